//! Permission management handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use tracing::info;

use crate::dto::request::{EnforceRequest, RoleAssignmentRequest, RoleQuery, validate};
use crate::dto::response::{ApiResponse, ChangeResponse, EnforceResponse, UserRolesResponse};
use crate::error::ApiError;
use crate::extractors::AuthClaims;
use crate::state::AppState;

fn parts(domain: &[String]) -> Vec<&str> {
    domain.iter().map(String::as_str).collect()
}

/// POST /api/permission/enforce
pub async fn enforce(
    State(state): State<AppState>,
    Json(req): Json<EnforceRequest>,
) -> Result<Json<ApiResponse<EnforceResponse>>, ApiError> {
    validate(&req)?;

    let allowed = state
        .permissions
        .manager(req.guard.as_deref())?
        .enforce_in(&req.user, &parts(&req.domain), &req.resource_type, &req.rule)
        .await?;

    Ok(Json(ApiResponse::ok(EnforceResponse { allowed })))
}

/// POST /api/permission/roles
pub async fn assign_role(
    State(state): State<AppState>,
    auth: AuthClaims,
    Json(req): Json<RoleAssignmentRequest>,
) -> Result<Json<ApiResponse<ChangeResponse>>, ApiError> {
    validate(&req)?;

    let changed = state
        .permissions
        .manager(req.guard.as_deref())?
        .add_role_for_user(&req.user, &req.role, &parts(&req.domain))
        .await?;

    info!(
        actor = %auth.principal(),
        user = %req.user,
        role = %req.role,
        changed,
        "Role assigned"
    );
    Ok(Json(ApiResponse::ok(ChangeResponse { changed })))
}

/// DELETE /api/permission/roles
pub async fn revoke_role(
    State(state): State<AppState>,
    auth: AuthClaims,
    Json(req): Json<RoleAssignmentRequest>,
) -> Result<Json<ApiResponse<ChangeResponse>>, ApiError> {
    validate(&req)?;

    let changed = state
        .permissions
        .manager(req.guard.as_deref())?
        .delete_role_for_user(&req.user, &req.role, &parts(&req.domain))
        .await?;

    info!(
        actor = %auth.principal(),
        user = %req.user,
        role = %req.role,
        changed,
        "Role revoked"
    );
    Ok(Json(ApiResponse::ok(ChangeResponse { changed })))
}

/// GET /api/permission/users/{user}/roles
pub async fn user_roles(
    State(state): State<AppState>,
    Path(user): Path<String>,
    Query(query): Query<RoleQuery>,
) -> Result<Json<ApiResponse<UserRolesResponse>>, ApiError> {
    let manager = state.permissions.manager(query.guard.as_deref())?;
    let domain = query.domain_parts();

    let roles = manager.get_roles_for_user(&user, &domain).await?;
    let implicit_roles = manager.get_implicit_roles_for_user(&user, &domain).await?;

    Ok(Json(ApiResponse::ok(UserRolesResponse {
        user,
        roles,
        implicit_roles,
    })))
}
