//! Login-type guard middleware.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::error::ApiError;
use crate::extractors::bearer_token;
use crate::state::AppState;

/// Runs the session guard on the request's bearer token.
///
/// Requests without a token pass untouched. A token that fails decoding
/// answers 401 `ACCESS_TOKEN_ERROR`; under single-login policy a token
/// superseded by a newer login answers 401 `ACCESS_TOKEN_TIMEOUT`. On pass,
/// the decoded claims are attached to the request and the response.
pub async fn check_login_type(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = bearer_token(request.headers()).map(str::to_owned);

    match state.session_guard.authenticate(token.as_deref()).await {
        Ok(Some(claims)) => {
            request.extensions_mut().insert(claims.clone());
            let mut response = next.run(request).await;
            response.extensions_mut().insert(claims);
            response
        }
        Ok(None) => next.run(request).await,
        Err(rejection) => ApiError::from(rejection).into_response(),
    }
}
