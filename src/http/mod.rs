//! HTTP API over a [`BoardService`].
//!
//! | Method & path               | Success                         |
//! |-----------------------------|---------------------------------|
//! | `GET /tasks`                | `{tasks, columns}`              |
//! | `GET /archived-tasks`       | `{archivedTasks}`               |
//! | `POST /update`              | `{message}`                     |
//! | `POST /tasks`               | `201` with the stored task      |
//! | `PUT /tasks/{id}`           | the stored task                 |
//! | `POST /tasks/{id}/archive`  | `{message, archivedTask}`       |
//! | `POST /tasks/{id}/restore`  | `{message, restoredTask}`       |
//! | `DELETE /tasks/{id}`        | `{message}`                     |
//!
//! Failures answer with an [`ErrorBody`].

mod error;
mod handlers;

use axum::{
    Router,
    routing::{get, post, put},
};
use mockable::Clock;
use std::io;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

use crate::board::{ports::BoardStore, services::BoardService};

pub use error::{ApiError, ErrorBody, status_for};
pub use handlers::{ArchiveResponse, ArchivedTasksResponse, MessageResponse, RestoreResponse};

/// Builds the API router with permissive CORS and request tracing.
#[must_use]
pub fn router<S, C>(service: BoardService<S, C>) -> Router
where
    S: BoardStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/tasks",
            get(handlers::list_tasks::<S, C>).post(handlers::create_task::<S, C>),
        )
        .route(
            "/tasks/{id}",
            put(handlers::update_task::<S, C>).delete(handlers::delete_task::<S, C>),
        )
        .route("/tasks/{id}/archive", post(handlers::archive_task::<S, C>))
        .route("/tasks/{id}/restore", post(handlers::restore_task::<S, C>))
        .route("/archived-tasks", get(handlers::list_archived::<S, C>))
        .route("/update", post(handlers::bulk_update::<S, C>))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(service)
}

/// Serves `app` on `listener` until Ctrl-C.
///
/// # Errors
///
/// Returns the I/O error that stopped the server.
pub async fn serve(listener: TcpListener, app: Router) -> io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "board API listening");
    }
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown requested"),
        Err(err) => {
            tracing::warn!(error = %err, "cannot listen for Ctrl-C, serving until killed");
            std::future::pending::<()>().await;
        }
    }
}
