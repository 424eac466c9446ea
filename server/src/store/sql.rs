use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue, DatabaseConnection, EntityTrait, ModelTrait, QueryOrder,
};
use uuid::Uuid;

use super::{now, StoreError, StoreResult, TaskStore};
use crate::entity;
use crate::types::{Task, TaskStatus, UpdateTask};

/// Relational store over a sea-orm connection (PostgreSQL or SQLite).
///
/// The schema is owned by the `migration` crate and must be applied before
/// the store is used.
#[derive(Debug, Clone)]
pub struct SqlStore {
    db: DatabaseConnection,
}

impl SqlStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl TryFrom<entity::Model> for Task {
    type Error = StoreError;

    fn try_from(model: entity::Model) -> Result<Self, Self::Error> {
        let status = model.status.parse().map_err(StoreError::InvalidStatus)?;
        Ok(Task {
            id: model.id,
            title: model.title,
            description: model.description,
            status,
            created_at: model.created_at,
        })
    }
}

#[async_trait]
impl TaskStore for SqlStore {
    #[tracing::instrument(skip(self))]
    async fn create(
        &self,
        title: String,
        description: String,
        status: Option<TaskStatus>,
    ) -> StoreResult<Task> {
        let active_model = entity::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            title: ActiveValue::Set(title),
            description: ActiveValue::Set(description),
            status: ActiveValue::Set(status.unwrap_or_default().to_string()),
            created_at: ActiveValue::Set(now()),
        };
        let created_model = active_model.insert(&self.db).await?;
        created_model.try_into()
    }

    #[tracing::instrument(skip(self))]
    async fn list_all(&self) -> StoreResult<Vec<Task>> {
        entity::Entity::find()
            .order_by_desc(entity::Column::CreatedAt)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Task::try_from)
            .collect()
    }

    #[tracing::instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> StoreResult<Task> {
        entity::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(StoreError::NotFound(id))?
            .try_into()
    }

    #[tracing::instrument(skip(self))]
    async fn update(&self, id: Uuid, changes: UpdateTask) -> StoreResult<Task> {
        let task_to_update = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(StoreError::NotFound(id))?;
        if changes.is_empty() {
            return task_to_update.try_into();
        }

        let mut active_model: entity::ActiveModel = task_to_update.into();
        if let Some(title) = changes.title {
            active_model.title = ActiveValue::Set(title);
        }
        if let Some(description) = changes.description {
            active_model.description = ActiveValue::Set(description);
        }
        if let Some(status) = changes.status {
            active_model.status = ActiveValue::Set(status.to_string());
        }
        let updated_model = active_model.update(&self.db).await?;
        updated_model.try_into()
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> StoreResult<Task> {
        let task_to_delete = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(StoreError::NotFound(id))?;

        let snapshot = Task::try_from(task_to_delete.clone())?;
        let result = task_to_delete.delete(&self.db).await?;
        if result.rows_affected == 0 {
            // Removed by a concurrent request between the read and the delete.
            return Err(StoreError::NotFound(id));
        }
        Ok(snapshot)
    }
}
