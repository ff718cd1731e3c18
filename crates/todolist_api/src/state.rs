//! Shared application state for request handlers.
//!
//! # Invariants
//! - One SQLite connection per process, guarded by a mutex.
//! - Every unit of work runs on the blocking pool while holding the lock, so
//!   service operations never interleave inside this process.

use crate::error::ApiError;
use rusqlite::Connection;
use std::sync::{Arc, Mutex};
use todolist_core::{SqliteTodoRepository, TodoService, TodoServiceError};

/// Handle cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    db: Arc<Mutex<Connection>>,
}

impl AppState {
    /// Wraps a migrated connection (see `todolist_core::db::open_db`).
    pub fn new(conn: Connection) -> Self {
        Self {
            db: Arc::new(Mutex::new(conn)),
        }
    }

    /// Runs one service operation as a unit of work.
    ///
    /// `classify` maps domain errors to the transport response for the calling
    /// route.
    pub async fn run<T, F>(
        &self,
        classify: fn(TodoServiceError) -> ApiError,
        op: F,
    ) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: for<'c> FnOnce(&TodoService<SqliteTodoRepository<'c>>) -> Result<T, TodoServiceError>
            + Send
            + 'static,
    {
        let db = Arc::clone(&self.db);
        tokio::task::spawn_blocking(move || {
            let conn = db
                .lock()
                .map_err(|_| ApiError::internal("database connection lock poisoned"))?;
            let service = TodoService::new(SqliteTodoRepository::new(&conn));
            op(&service).map_err(classify)
        })
        .await
        .map_err(|err| ApiError::internal(format!("blocking task failed: {err}")))?
    }
}
