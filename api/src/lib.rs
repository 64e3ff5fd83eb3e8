//! Todo web API built on status-driven responses.
//!
//! # Overview
//! Business logic and CRUD services report every outcome as a
//! [`status_http::Status`]. Handlers pass that status to the
//! `status_http` response builders, so validation failures always come
//! back as `400` with field-grouped messages, missing reads as `204`, and
//! creates as `201` with a `location` header.

pub mod biz;
pub mod config;
pub mod crud;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod reply;
pub mod state;
pub mod store;
pub mod validation;

use axum::body::Body;
use axum::routing::{get, patch};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub use config::{ConfigError, ServerConfig};
pub use models::{ChangeDifficultyDto, ChangeNameDto, CreateTodoDto, TodoItem};
pub use state::{route_table, AppState, GET_SINGLE_TODO};
pub use store::TodoStore;

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/api/todo", get(handlers::list_todos).post(handlers::create_todo))
        .route("/api/todo/name", patch(handlers::change_name))
        .route("/api/todo/difficulty", patch(handlers::change_difficulty))
        .route(
            "/api/todo/{id}",
            get(handlers::get_todo)
                .patch(handlers::patch_todo)
                .delete(handlers::delete_todo),
        )
        .with_state(state)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(middleware::request_span::<Body>))
        .layer(SetRequestIdLayer::x_request_id(middleware::UuidRequestId))
}

/// Serve until Ctrl-C.
pub async fn run(listener: TcpListener, state: AppState) -> Result<(), std::io::Error> {
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "cannot listen for Ctrl-C; serving until killed");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
