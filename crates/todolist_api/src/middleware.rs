//! Request logging middleware.
//!
//! Emits one `http_request` event per request with method, path, status and
//! duration. Server errors log at `error`. Client errors are routine and log
//! at `info` so they stay out of the stderr mirror.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::middleware::Next;
use axum::response::Response;
use log::{log, Level};
use std::time::Instant;

pub async fn request_logging(request: Request<Body>, next: Next) -> Response {
    let started_at = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    let status = response.status();
    let (level, outcome) = classify(status);
    log!(
        level,
        "event=http_request module=api status={outcome} method={method} path={path} http_status={} duration_ms={}",
        status.as_u16(),
        started_at.elapsed().as_millis()
    );

    response
}

/// Log level and `status=` value for a response status.
fn classify(status: StatusCode) -> (Level, &'static str) {
    if status.is_server_error() {
        (Level::Error, "error")
    } else if status.is_client_error() {
        (Level::Info, "rejected")
    } else {
        (Level::Info, "ok")
    }
}
