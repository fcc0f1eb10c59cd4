//! Request/response logging middleware.

use std::time::Instant;

use axum::{
    body::{self, Body},
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::error::ApiError;

/// Largest request body buffered for logging; matches axum's JSON limit.
pub const MAX_LOGGED_BODY: usize = 2 * 1024 * 1024;

/// Logs method, path, status, response length, latency and the request body.
pub async fn access_log(req: Request, next: Next) -> Response {
    let started = Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();

    let (parts, body) = req.into_parts();
    let bytes = match body::to_bytes(body, MAX_LOGGED_BODY).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(%method, %uri, error = %e, "request body rejected");
            return ApiError::new(StatusCode::PAYLOAD_TOO_LARGE, "request body too large")
                .into_response();
        }
    };
    let logged_body = String::from_utf8_lossy(&bytes).into_owned();
    let req = Request::from_parts(parts, Body::from(bytes));

    let res = next.run(req).await;

    let content_length = res
        .headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();
    tracing::info!(
        %method,
        %uri,
        status = res.status().as_u16(),
        content_length = %content_length,
        elapsed_ms = started.elapsed().as_millis() as u64,
        body = %logged_body,
        "request handled"
    );
    res
}
