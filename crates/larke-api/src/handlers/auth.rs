//! Handlers for the authenticated principal.

use axum::Json;
use axum::extract::State;

use crate::dto::response::{ApiResponse, MyPermissionsResponse};
use crate::error::ApiError;
use crate::extractors::AuthClaims;
use crate::state::AppState;

/// GET /api/auth/me/permissions
pub async fn my_permissions(
    State(state): State<AppState>,
    auth: AuthClaims,
) -> Result<Json<ApiResponse<MyPermissionsResponse>>, ApiError> {
    let permissions = state
        .permissions
        .manager(None)?
        .get_implicit_resources_for_user(auth.principal(), &[])
        .await?;

    Ok(Json(ApiResponse::ok(MyPermissionsResponse {
        principal: auth.principal().to_string(),
        permissions,
    })))
}
