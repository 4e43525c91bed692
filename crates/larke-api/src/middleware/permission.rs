//! Route permission middleware.

use axum::extract::{MatchedPath, Request, State};
use axum::middleware::Next;
use axum::response::Response;
use tracing::warn;

use larke_auth::jwt::Claims;
use larke_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Requires the principal to hold `(route, METHOD)` on the default guard.
///
/// The route is the matched path template (e.g. `/api/permission/users/{user}/roles`)
/// when available, the literal request path otherwise. Must run after
/// `check_login_type`.
pub async fn require_route_permission(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let principal = request
        .extensions()
        .get::<Claims>()
        .map(|c| c.principal().to_string())
        .ok_or_else(|| AppError::unauthorized("Missing Authorization header"))?;

    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());
    let method = request.method().as_str().to_string();

    let allowed = state
        .permissions
        .manager(None)?
        .enforce(&principal, &route, &method)
        .await?;

    if !allowed {
        warn!(principal = %principal, route = %route, method = %method, "Route access denied");
        return Err(AppError::forbidden(format!("Access to {method} {route} denied")).into());
    }

    Ok(next.run(request).await)
}
