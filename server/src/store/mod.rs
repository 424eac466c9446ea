//! Persistence for task records.
//!
//! Handlers only see `dyn TaskStore`. `SqlStore` backs the server whenever a
//! database URL is configured; `MemoryStore` is used otherwise and in tests.

mod memory;
mod sql;

use async_trait::async_trait;
use chrono::{DateTime, SubsecRound, Utc};
use uuid::Uuid;

use crate::types::{Task, TaskStatus, UpdateTask};

pub use memory::MemoryStore;
pub use sql::SqlStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("task {0} not found")]
    NotFound(Uuid),

    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// A stored row carries a status outside the known set.
    #[error("stored status {0:?} is not a valid task status")]
    InvalidStatus(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn create(
        &self,
        title: String,
        description: String,
        status: Option<TaskStatus>,
    ) -> StoreResult<Task>;

    /// Every task, newest `created_at` first.
    async fn list_all(&self) -> StoreResult<Vec<Task>>;

    async fn get_by_id(&self, id: Uuid) -> StoreResult<Task>;

    /// Overwrites the fields present in `changes`. Last write wins.
    async fn update(&self, id: Uuid, changes: UpdateTask) -> StoreResult<Task>;

    /// Removes the task and returns it as it was before deletion.
    async fn delete(&self, id: Uuid) -> StoreResult<Task>;
}

/// Creation timestamp, truncated to what PostgreSQL `timestamptz` keeps so a
/// freshly created task compares equal to its stored copy.
pub(crate) fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}
