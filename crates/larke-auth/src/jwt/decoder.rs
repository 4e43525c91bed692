//! Access token validation.

use std::sync::Arc;

use jsonwebtoken::{Validation, decode};

use larke_core::config::JwtConfig;
use larke_core::error::AppError;
use larke_core::result::AppResult;

use super::claims::Claims;
use super::service::TokenService;
use super::signer::JwtSigner;

/// Validates access tokens signed by a [`JwtSigner`].
#[derive(Clone)]
pub struct JwtDecoder {
    /// Verification keys.
    signer: Arc<JwtSigner>,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("signer", &self.signer)
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from passport JWT configuration.
    pub fn new(config: &JwtConfig, signer: Arc<JwtSigner>) -> Self {
        let mut validation = Validation::new(signer.algorithm());
        validation.validate_exp = true;
        validation.leeway = config.leeway_seconds;
        validation.set_required_spec_claims(&["exp", "sub"]);
        if !config.issuer.is_empty() {
            validation.set_issuer(&[config.issuer.as_str()]);
        }

        Self { signer, validation }
    }
}

impl TokenService for JwtDecoder {
    fn decode_access_token(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(token, self.signer.decoding_key(), &self.validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::unauthorized("Token has expired")
                }
                jsonwebtoken::errors::ErrorKind::InvalidToken => {
                    AppError::unauthorized("Invalid token format")
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AppError::unauthorized("Invalid token signature")
                }
                jsonwebtoken::errors::ErrorKind::InvalidIssuer => {
                    AppError::unauthorized("Invalid token issuer")
                }
                _ => AppError::unauthorized(format!("Token validation failed: {e}")),
            })?;

        Ok(token_data.claims)
    }
}
