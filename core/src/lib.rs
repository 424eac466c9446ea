//! Synchronous API client core for the task service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). A UI executes the actual
//! HTTP round-trip, re-fetches the list after each mutation, and narrows the
//! displayed list locally with [`filter_by_title`].
//!
//! # Design
//! - `TaskClient` is stateless; it holds only `base_url`.
//! - Each operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - Create and edit forms are validated before a request is built.
//! - DTOs are defined independently from the server crate; the integration
//!   test catches schema drift.

pub mod client;
pub mod error;
pub mod http;
pub mod types;

pub use client::TaskClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{filter_by_title, CreateTask, ReplaceTask, Task, TaskStatus, UpdateTask};
