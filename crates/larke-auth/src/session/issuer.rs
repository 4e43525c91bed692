//! Token issuance that advances the principal's session fence.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use larke_core::result::AppResult;
use larke_core::traits::AccountStore;

use crate::jwt::{Claims, JwtEncoder};

/// Issues access tokens and records their `iat` as the account's
/// `refresh_time`, superseding every earlier token under single-login policy.
#[derive(Debug, Clone)]
pub struct LoginIssuer {
    /// Token encoder.
    encoder: Arc<JwtEncoder>,
    /// Account session state.
    accounts: Arc<dyn AccountStore>,
}

impl LoginIssuer {
    /// Creates a new issuer.
    pub fn new(encoder: Arc<JwtEncoder>, accounts: Arc<dyn AccountStore>) -> Self {
        Self { encoder, accounts }
    }

    /// Issues a new access token for the principal.
    ///
    /// The `iat` is reserved through [`AccountStore::advance_refresh_time`]
    /// before signing, so concurrent logins within the same second still
    /// produce distinct fence values and only the last one stays current.
    pub async fn issue(&self, principal: &str) -> AppResult<(String, Claims)> {
        let issued_at = self
            .accounts
            .advance_refresh_time(principal, Utc::now().timestamp())
            .await?;

        let (token, claims) = self.encoder.encode_access_token(principal, issued_at)?;
        info!(principal = %principal, iat = claims.iat, "Access token issued");
        Ok((token, claims))
    }
}
