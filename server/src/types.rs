//! Task records and the JSON payloads accepted by the API.
//!
//! Payload types deserialize only; they are validated by the handlers before
//! anything reaches the store.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle state of a task. Any status may move to any other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "PENDING",
            TaskStatus::InProgress => "IN_PROGRESS",
            TaskStatus::Completed => "COMPLETED",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(TaskStatus::Pending),
            "IN_PROGRESS" => Ok(TaskStatus::InProgress),
            "COMPLETED" => Ok(TaskStatus::Completed),
            other => Err(other.to_string()),
        }
    }
}

/// A persisted task.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /tasks`. A missing or null status means `PENDING`.
#[derive(Debug, Deserialize)]
pub struct CreateTask {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub status: Option<TaskStatus>,
}

/// Body of `PUT /tasks/{id}`: every editable field is replaced.
#[derive(Debug, Deserialize)]
pub struct ReplaceTask {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
}

/// Body of `PATCH /tasks/{id}`. Only the fields present are applied.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTask {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
}

impl From<ReplaceTask> for UpdateTask {
    fn from(input: ReplaceTask) -> Self {
        Self {
            title: Some(input.title),
            description: Some(input.description),
            status: Some(input.status),
        }
    }
}

fn require_text(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{field} must not be empty"));
    }
    Ok(())
}

impl CreateTask {
    pub fn validate(&self) -> Result<(), String> {
        require_text("title", &self.title)?;
        require_text("description", &self.description)
    }
}

impl ReplaceTask {
    pub fn validate(&self) -> Result<(), String> {
        require_text("title", &self.title)?;
        require_text("description", &self.description)
    }
}

impl UpdateTask {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.status.is_none()
    }

    pub fn validate(&self) -> Result<(), String> {
        if let Some(title) = &self.title {
            require_text("title", title)?;
        }
        if let Some(description) = &self.description {
            require_text("description", description)?;
        }
        Ok(())
    }

    /// Writes the supplied fields onto `task`, leaving the rest untouched.
    pub fn apply_to(self, task: &mut Task) {
        if let Some(title) = self.title {
            task.title = title;
        }
        if let Some(description) = self.description {
            task.description = description;
        }
        if let Some(status) = self.status {
            task.status = status;
        }
    }
}
