//! Access token creation with configurable signing and TTL.

use std::sync::Arc;

use chrono::Utc;
use jsonwebtoken::{Header, encode};

use larke_core::config::JwtConfig;
use larke_core::error::AppError;
use larke_core::result::AppResult;

use super::claims::Claims;
use super::signer::JwtSigner;

/// Creates signed access tokens.
#[derive(Debug, Clone)]
pub struct JwtEncoder {
    /// Signing keys.
    signer: Arc<JwtSigner>,
    /// Access token TTL in seconds.
    access_ttl_seconds: i64,
    /// Issuer stamped into every token, if any.
    issuer: Option<String>,
}

impl JwtEncoder {
    /// Creates a new encoder from passport JWT configuration.
    ///
    /// Fails when `access_ttl_minutes` does not fit in seconds as an `i64`.
    pub fn new(config: &JwtConfig, signer: Arc<JwtSigner>) -> AppResult<Self> {
        let access_ttl_seconds = i64::try_from(config.access_ttl_minutes)
            .ok()
            .and_then(|minutes| minutes.checked_mul(60))
            .ok_or_else(|| {
                AppError::configuration(format!(
                    "passport.jwt.access_ttl_minutes is too large: {}",
                    config.access_ttl_minutes
                ))
            })?;

        Ok(Self {
            signer,
            access_ttl_seconds,
            issuer: (!config.issuer.is_empty()).then(|| config.issuer.clone()),
        })
    }

    /// Generates an access token for the principal issued now.
    pub fn generate_access_token(&self, principal: &str) -> AppResult<(String, Claims)> {
        self.encode_access_token(principal, Utc::now().timestamp())
    }

    /// Generates an access token for the principal with an explicit `iat`.
    pub fn encode_access_token(
        &self,
        principal: &str,
        issued_at: i64,
    ) -> AppResult<(String, Claims)> {
        let expires_at = issued_at
            .checked_add(self.access_ttl_seconds)
            .ok_or_else(|| AppError::configuration("Access token expiry overflows the timestamp range"))?;
        let mut claims = Claims::new(principal, issued_at, expires_at);
        claims.iss = self.issuer.clone();

        let token = encode(
            &Header::new(self.signer.algorithm()),
            &claims,
            self.signer.encoding_key(),
        )
        .map_err(|e| AppError::internal(format!("Failed to encode access token: {e}")))?;

        Ok((token, claims))
    }
}
