//! HTTP transport for the todo item service.
//!
//! # Responsibility
//! - Route `/api/todoitems` requests to `todolist_core::TodoService`.
//! - Own request validation, status mapping and request logging.
//!
//! # Invariants
//! - Empty descriptions never reach the service.
//! - Service code stays free of logging; this crate logs at the edge.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod state;

use axum::routing::{get, put};
use axum::Router;
use log::info;
use std::future::Future;
use tokio::net::TcpListener;

pub use config::{ConfigError, DbLocation, ServerConfig};
pub use error::{ApiError, ErrorBody, INTERNAL_MESSAGE};
pub use state::AppState;

pub const TODO_ITEMS_PATH: &str = "/api/todoitems";

/// Builds the application router over `state`.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            TODO_ITEMS_PATH,
            get(handlers::list_items).post(handlers::create_item),
        )
        .route(
            "/api/todoitems/{id}",
            get(handlers::get_item).put(handlers::update_item),
        )
        .route("/api/todoitems/{id}/complete", put(handlers::mark_complete))
        .layer(axum::middleware::from_fn(middleware::request_logging))
        .with_state(state)
}

/// Serves the API on `listener` until `shutdown` resolves.
pub async fn serve(
    listener: TcpListener,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), std::io::Error> {
    let local_addr = listener.local_addr()?;
    info!("event=server_listen module=api status=ok addr={local_addr}");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("event=server_shutdown module=api status=ok addr={local_addr}");
    Ok(())
}
