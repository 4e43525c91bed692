//! Route definitions for the Larke HTTP API.
//!
//! Routes are registered with their full `/api/...` paths so that route
//! permission checks see the same path the client requested.

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{get, post},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the Axum router with all routes and request middleware.
///
/// The login-type guard wraps every route; permission management routes
/// additionally require a matching route permission.
pub fn build_router(state: AppState) -> Router {
    let permission_routes = Router::new()
        .route("/api/permission/enforce", post(handlers::permission::enforce))
        .route(
            "/api/permission/roles",
            post(handlers::permission::assign_role).delete(handlers::permission::revoke_role),
        )
        .route(
            "/api/permission/users/{user}/roles",
            get(handlers::permission::user_roles),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::require_route_permission,
        ));

    Router::new()
        .route("/api/health", get(handlers::health::health))
        .route(
            "/api/auth/me/permissions",
            get(handlers::auth::my_permissions),
        )
        .merge(permission_routes)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::check_login_type,
        ))
        .layer(axum_middleware::from_fn(middleware::request_logging))
        .with_state(state)
}
