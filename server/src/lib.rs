//! Task tracking service: a task store behind a small JSON HTTP API.
//!
//! # Overview
//! `GET/POST /tasks` and `GET/PUT/PATCH/DELETE /tasks/{id}` perform single
//! record operations against a [`store::TaskStore`]. Errors are always JSON
//! `{"message": ...}` bodies.
//!
//! # Design
//! - Handlers hold an `Arc<dyn TaskStore>`, so the SQL store and the
//!   in-memory store are interchangeable.
//! - `run` takes an already bound listener; tests bind port 0 and read back
//!   the address.

pub mod api;
pub mod config;
pub mod entity;
pub mod error;
pub mod store;
pub mod types;

use std::sync::Arc;

use axum::{routing::get, Router};
use migration::MigratorTrait;
use sea_orm::Database;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use api::AppState;
pub use error::{ApiError, ErrorResponse};
pub use types::{CreateTask, ReplaceTask, Task, TaskStatus, UpdateTask};

use crate::config::Config;
use crate::store::{MemoryStore, SqlStore, TaskStore};

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check_handler))
        .merge(api::task_router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn run(listener: TcpListener, state: AppState) -> Result<(), std::io::Error> {
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

/// Opens the store named by `config`, applying migrations to SQL databases.
#[tracing::instrument(skip(config))]
pub async fn connect_store(config: &Config) -> anyhow::Result<Arc<dyn TaskStore>> {
    match &config.database_url {
        Some(db_url) => {
            let db = Database::connect(db_url.as_str()).await?;
            migration::Migrator::up(&db, None).await?;
            tracing::info!("Database migrations applied successfully");
            Ok(Arc::new(SqlStore::new(db)))
        }
        None => {
            tracing::warn!("DATABASE_URL is not set; tasks are kept in memory only");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

#[tracing::instrument(skip(config))]
pub async fn start_server(config: Config) -> anyhow::Result<()> {
    let store = connect_store(&config).await?;

    let address = config.bind_address();
    let listener = TcpListener::bind(&address).await?;
    tracing::info!("Task server listening on http://{}", address);

    run(listener, AppState::new(store)).await?;
    tracing::info!("Task server stopped");
    Ok(())
}

#[tracing::instrument]
pub async fn health_check_handler() -> &'static str {
    "OK"
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
