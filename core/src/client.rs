//! Stateless HTTP request builder and response parser for the task API.
//!
//! # Design
//! `TaskClient` holds only a `base_url`. Each operation is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method that
//! consumes an `HttpResponse`. The caller executes the round-trip in between
//! and, after any mutation, re-fetches the list with `build_list_tasks`.

use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreateTask, ReplaceTask, Task, UpdateTask};

/// Synchronous, stateless client for the task API.
#[derive(Debug, Clone)]
pub struct TaskClient {
    base_url: String,
}

impl TaskClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn tasks_url(&self) -> String {
        format!("{}/tasks", self.base_url)
    }

    fn task_url(&self, id: Uuid) -> String {
        format!("{}/tasks/{id}", self.base_url)
    }

    pub fn build_list_tasks(&self) -> HttpRequest {
        bodiless(HttpMethod::Get, self.tasks_url())
    }

    pub fn build_get_task(&self, id: Uuid) -> HttpRequest {
        bodiless(HttpMethod::Get, self.task_url(id))
    }

    /// Validates the form, then builds `POST /tasks`.
    pub fn build_create_task(&self, input: &CreateTask) -> Result<HttpRequest, ApiError> {
        input.validate()?;
        with_json_body(HttpMethod::Post, self.tasks_url(), input)
    }

    /// Validates the form, then builds `PUT /tasks/{id}`.
    pub fn build_replace_task(&self, id: Uuid, input: &ReplaceTask) -> Result<HttpRequest, ApiError> {
        input.validate()?;
        with_json_body(HttpMethod::Put, self.task_url(id), input)
    }

    pub fn build_update_task(&self, id: Uuid, input: &UpdateTask) -> Result<HttpRequest, ApiError> {
        input.validate()?;
        with_json_body(HttpMethod::Patch, self.task_url(id), input)
    }

    pub fn build_delete_task(&self, id: Uuid) -> HttpRequest {
        bodiless(HttpMethod::Delete, self.task_url(id))
    }

    pub fn parse_list_tasks(&self, response: HttpResponse) -> Result<Vec<Task>, ApiError> {
        parse_ok(response)
    }

    pub fn parse_get_task(&self, response: HttpResponse) -> Result<Task, ApiError> {
        parse_ok(response)
    }

    pub fn parse_create_task(&self, response: HttpResponse) -> Result<Task, ApiError> {
        parse_ok(response)
    }

    pub fn parse_replace_task(&self, response: HttpResponse) -> Result<Task, ApiError> {
        parse_ok(response)
    }

    pub fn parse_update_task(&self, response: HttpResponse) -> Result<Task, ApiError> {
        parse_ok(response)
    }

    /// Returns the task as it was before deletion.
    pub fn parse_delete_task(&self, response: HttpResponse) -> Result<Task, ApiError> {
        parse_ok(response)
    }
}

fn bodiless(method: HttpMethod, path: String) -> HttpRequest {
    HttpRequest {
        method,
        path,
        headers: Vec::new(),
        body: None,
    }
}

fn with_json_body<T: Serialize>(
    method: HttpMethod,
    path: String,
    input: &T,
) -> Result<HttpRequest, ApiError> {
    let body = serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
    Ok(HttpRequest {
        method,
        path,
        headers: vec![("content-type".to_string(), "application/json".to_string())],
        body: Some(body),
    })
}

fn parse_ok<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

#[derive(serde::Deserialize)]
struct ErrorBody {
    message: String,
}

/// Map every status other than 200 to the matching `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.status == 200 {
        return Ok(());
    }
    let message = serde_json::from_str::<ErrorBody>(&response.body)
        .map(|b| b.message)
        .unwrap_or_else(|_| response.body.clone());
    match response.status {
        404 => Err(ApiError::NotFound),
        400 => Err(ApiError::BadRequest(message)),
        status => Err(ApiError::HttpError { status, message }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TaskStatus;

    const TASK_JSON: &str = r#"{"id":"00000000-0000-0000-0000-000000000001","title":"Test","description":"Desc","status":"PENDING","createdAt":"2025-09-01T10:00:00Z"}"#;

    fn client() -> TaskClient {
        TaskClient::new("http://localhost:3000")
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn build_list_tasks_produces_correct_request() {
        let req = client().build_list_tasks();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/tasks");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_get_task_produces_correct_request() {
        let req = client().build_get_task(Uuid::nil());
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(
            req.path,
            "http://localhost:3000/tasks/00000000-0000-0000-0000-000000000000"
        );
        assert!(req.body.is_none());
    }

    #[test]
    fn build_create_task_produces_correct_request() {
        let input = CreateTask {
            title: "Buy milk".to_string(),
            description: "2% fat".to_string(),
            status: None,
        };
        let req = client().build_create_task(&input).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:3000/tasks");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["title"], "Buy milk");
        assert_eq!(body["description"], "2% fat");
        assert!(body.get("status").is_none());
    }

    #[test]
    fn build_create_task_refuses_blank_title() {
        let input = CreateTask {
            title: String::new(),
            description: "d".to_string(),
            status: None,
        };
        let err = client().build_create_task(&input).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn build_replace_task_sends_every_field() {
        let input = ReplaceTask {
            title: "A".to_string(),
            description: "B".to_string(),
            status: TaskStatus::Completed,
        };
        let req = client().build_replace_task(Uuid::nil(), &input).unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"title": "A", "description": "B", "status": "COMPLETED"})
        );
    }

    #[test]
    fn build_update_task_sends_only_present_fields() {
        let input = UpdateTask {
            status: Some(TaskStatus::InProgress),
            ..Default::default()
        };
        let req = client().build_update_task(Uuid::nil(), &input).unwrap();
        assert_eq!(req.method, HttpMethod::Patch);
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"status": "IN_PROGRESS"}));
    }

    #[test]
    fn build_delete_task_produces_correct_request() {
        let req = client().build_delete_task(Uuid::nil());
        assert_eq!(req.method, HttpMethod::Delete);
        assert!(req.body.is_none());
    }

    #[test]
    fn parse_list_tasks_success() {
        let tasks = client()
            .parse_list_tasks(response(200, &format!("[{TASK_JSON}]")))
            .unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "Test");
        assert_eq!(tasks[0].status, TaskStatus::Pending);
    }

    #[test]
    fn parse_get_task_not_found() {
        let err = client()
            .parse_get_task(response(404, r#"{"message":"Task not found"}"#))
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn parse_create_task_bad_request_keeps_message() {
        let err = client()
            .parse_create_task(response(400, r#"{"message":"title must not be empty"}"#))
            .unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(m) if m == "title must not be empty"));
    }

    #[test]
    fn parse_update_task_server_error() {
        let err = client()
            .parse_update_task(response(500, r#"{"message":"Failed to update task"}"#))
            .unwrap_err();
        assert!(
            matches!(err, ApiError::HttpError { status: 500, message } if message == "Failed to update task")
        );
    }

    #[test]
    fn non_json_error_body_is_kept_raw() {
        let err = client()
            .parse_replace_task(response(502, "bad gateway"))
            .unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 502, message } if message == "bad gateway"));
    }

    #[test]
    fn parse_delete_task_returns_snapshot() {
        let task = client().parse_delete_task(response(200, TASK_JSON)).unwrap();
        assert_eq!(task.title, "Test");
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = TaskClient::new("http://localhost:3000/");
        let req = client.build_list_tasks();
        assert_eq!(req.path, "http://localhost:3000/tasks");
    }

    #[test]
    fn parse_list_tasks_bad_json() {
        let err = client()
            .parse_list_tasks(response(200, "not json"))
            .unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }
}
