//! Server entry point.
//!
//! # Responsibility
//! - Load configuration, start logging, open the store and serve the API.
//! - Stop gracefully on Ctrl-C.

use log::{error, info};
use std::process::ExitCode;
use todolist_api::{AppState, DbLocation, ServerConfig};
use todolist_core::db::{open_db, open_db_in_memory};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> ExitCode {
    println!("todolist_core ping={}", todolist_core::ping());
    println!("todolist_core version={}", todolist_core::core_version());

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("configuration error: {err}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = todolist_core::init_logging(&config.log_level, &config.log_dir) {
        eprintln!("logging init failed: {err}");
        return ExitCode::FAILURE;
    }

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=server_exit module=cli status=error error={err}");
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let conn = match &config.db {
        DbLocation::File(path) => open_db(path)?,
        DbLocation::InMemory => open_db_in_memory()?,
    };

    let listener = TcpListener::bind(config.bind_addr).await?;
    println!("listening on {}", listener.local_addr()?);
    info!(
        "event=server_start module=cli status=ok db={:?} log_dir={}",
        config.db,
        config.log_dir.display()
    );

    todolist_api::serve(listener, AppState::new(conn), shutdown_signal()).await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("event=shutdown_signal module=cli status=error error={err}");
        std::future::pending::<()>().await;
    }
}
