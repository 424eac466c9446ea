use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, Path, Request, State};
use axum::http::request::Parts;
use axum::routing::get;
use axum::{Json, Router};
use uuid::Uuid;

use crate::error::ApiError;
use crate::store::{MemoryStore, TaskStore};
use crate::types::{CreateTask, ReplaceTask, Task, UpdateTask};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TaskStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self { store }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }
}

/// JSON body whose rejections are reported as a 400 `{message}`.
#[derive(Debug)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
        Ok(ApiJson(value))
    }
}

/// The `{id}` path segment. A segment that is not a UUID cannot name a task.
#[derive(Debug, Clone, Copy)]
pub struct TaskId(pub Uuid);

impl<S> FromRequestParts<S> for TaskId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::NotFound)?;
        raw.parse().map(TaskId).map_err(|_| ApiError::NotFound)
    }
}

pub fn task_router() -> Router<AppState> {
    Router::new()
        .route("/tasks", get(list_tasks).post(create_task))
        .route(
            "/tasks/{id}",
            get(get_task)
                .put(replace_task)
                .patch(update_task)
                .delete(delete_task),
        )
}

#[tracing::instrument(skip(state))]
async fn list_tasks(State(state): State<AppState>) -> Result<Json<Vec<Task>>, ApiError> {
    let tasks = state
        .store
        .list_all()
        .await
        .map_err(|e| ApiError::from_store(e, "Failed to fetch tasks"))?;
    Ok(Json(tasks))
}

#[tracing::instrument(skip(state))]
async fn create_task(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateTask>,
) -> Result<Json<Task>, ApiError> {
    input.validate().map_err(ApiError::BadRequest)?;
    let task = state
        .store
        .create(input.title, input.description, input.status)
        .await
        .map_err(|e| ApiError::from_store(e, "Failed to create task"))?;
    tracing::info!(id = %task.id, "task created");
    Ok(Json(task))
}

#[tracing::instrument(skip(state))]
async fn get_task(
    State(state): State<AppState>,
    TaskId(id): TaskId,
) -> Result<Json<Task>, ApiError> {
    let task = state
        .store
        .get_by_id(id)
        .await
        .map_err(|e| ApiError::from_store(e, "Failed to fetch task"))?;
    Ok(Json(task))
}

#[tracing::instrument(skip(state))]
async fn replace_task(
    State(state): State<AppState>,
    TaskId(id): TaskId,
    ApiJson(input): ApiJson<ReplaceTask>,
) -> Result<Json<Task>, ApiError> {
    input.validate().map_err(ApiError::BadRequest)?;
    let task = state
        .store
        .update(id, input.into())
        .await
        .map_err(|e| ApiError::from_store(e, "Failed to update task"))?;
    Ok(Json(task))
}

#[tracing::instrument(skip(state))]
async fn update_task(
    State(state): State<AppState>,
    TaskId(id): TaskId,
    ApiJson(input): ApiJson<UpdateTask>,
) -> Result<Json<Task>, ApiError> {
    input.validate().map_err(ApiError::BadRequest)?;
    let task = state
        .store
        .update(id, input)
        .await
        .map_err(|e| ApiError::from_store(e, "Failed to update task"))?;
    Ok(Json(task))
}

#[tracing::instrument(skip(state))]
async fn delete_task(
    State(state): State<AppState>,
    TaskId(id): TaskId,
) -> Result<Json<Task>, ApiError> {
    let task = state
        .store
        .delete(id)
        .await
        .map_err(|e| ApiError::from_store(e, "Failed to delete task"))?;
    tracing::info!(%id, "task deleted");
    Ok(Json(task))
}
