//! Request/response logging middleware.

use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use tracing::info;

use larke_auth::jwt::Claims;

/// Logs request method, path, principal, status, and duration.
pub async fn request_logging(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let response = next.run(request).await;

    let principal = response
        .extensions()
        .get::<Claims>()
        .map(|c| c.principal().to_string());

    info!(
        method = %method,
        path = %uri.path(),
        principal = principal.as_deref().unwrap_or("-"),
        status = %response.status().as_u16(),
        duration_ms = %start.elapsed().as_millis(),
        "HTTP request"
    );

    response
}
