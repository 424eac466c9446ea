//! Task DTOs as seen by API consumers.
//!
//! These mirror the server's schema but are defined independently so the
//! client does not pull in axum or sea-orm. The integration test catches any
//! drift between the two crates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

/// A single task returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a task. Omitting `status` lets the server default it
/// to `PENDING`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
}

/// Payload for `PUT`: the edit form submits every field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplaceTask {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
}

/// Payload for `PATCH`. Only the fields present in the JSON are applied;
/// omitted fields keep their stored values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTask {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
}

fn require(field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::Validation(format!("{field} is required")));
    }
    Ok(())
}

impl CreateTask {
    pub fn validate(&self) -> Result<(), ApiError> {
        require("title", &self.title)?;
        require("description", &self.description)
    }
}

impl ReplaceTask {
    pub fn validate(&self) -> Result<(), ApiError> {
        require("title", &self.title)?;
        require("description", &self.description)
    }
}

impl From<&Task> for ReplaceTask {
    /// Pre-fills an edit form from a fetched task.
    fn from(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            status: task.status,
        }
    }
}

impl UpdateTask {
    pub fn validate(&self) -> Result<(), ApiError> {
        if let Some(title) = &self.title {
            require("title", title)?;
        }
        if let Some(description) = &self.description {
            require("description", description)?;
        }
        Ok(())
    }
}

/// Tasks whose title contains `query`, ignoring case. An empty or blank
/// query matches everything. Order is preserved.
pub fn filter_by_title<'a>(tasks: &'a [Task], query: &str) -> Vec<&'a Task> {
    let needle = query.trim().to_lowercase();
    tasks
        .iter()
        .filter(|task| needle.is_empty() || task.title.to_lowercase().contains(&needle))
        .collect()
}
