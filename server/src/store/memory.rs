use std::cmp::Reverse;
use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{now, StoreError, StoreResult, TaskStore};
use crate::types::{Task, TaskStatus, UpdateTask};

/// Process-local store. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Tasks>,
}

#[derive(Debug, Default)]
struct Tasks {
    next_seq: u64,
    // seq orders tasks that share a created_at.
    by_id: HashMap<Uuid, (u64, Task)>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    #[tracing::instrument(skip(self))]
    async fn create(
        &self,
        title: String,
        description: String,
        status: Option<TaskStatus>,
    ) -> StoreResult<Task> {
        let task = Task {
            id: Uuid::new_v4(),
            title,
            description,
            status: status.unwrap_or_default(),
            created_at: now(),
        };
        let mut tasks = self.inner.write().await;
        let seq = tasks.next_seq;
        tasks.next_seq += 1;
        tasks.by_id.insert(task.id, (seq, task.clone()));
        Ok(task)
    }

    #[tracing::instrument(skip(self))]
    async fn list_all(&self) -> StoreResult<Vec<Task>> {
        let tasks = self.inner.read().await;
        let mut entries: Vec<&(u64, Task)> = tasks.by_id.values().collect();
        entries.sort_by_key(|(seq, task)| Reverse((task.created_at, *seq)));
        Ok(entries.into_iter().map(|(_, task)| task.clone()).collect())
    }

    #[tracing::instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> StoreResult<Task> {
        let tasks = self.inner.read().await;
        tasks
            .by_id
            .get(&id)
            .map(|(_, task)| task.clone())
            .ok_or(StoreError::NotFound(id))
    }

    #[tracing::instrument(skip(self))]
    async fn update(&self, id: Uuid, changes: UpdateTask) -> StoreResult<Task> {
        let mut tasks = self.inner.write().await;
        let (_, task) = tasks.by_id.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        changes.apply_to(task);
        Ok(task.clone())
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> StoreResult<Task> {
        let mut tasks = self.inner.write().await;
        tasks
            .by_id
            .remove(&id)
            .map(|(_, task)| task)
            .ok_or(StoreError::NotFound(id))
    }
}
