//! Login-concurrency guard run on every authenticated request.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, warn};

use larke_core::traits::AccountStore;
use larke_core::types::LoginType;

use crate::jwt::{Claims, TokenService};

/// Stable machine-readable code attached to a rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RejectionCode {
    /// The token could not be decoded or verified.
    AccessTokenError,
    /// The token is well formed but a newer login has replaced it.
    AccessTokenTimeout,
}

impl RejectionCode {
    /// The wire representation of the code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AccessTokenError => "ACCESS_TOKEN_ERROR",
            Self::AccessTokenTimeout => "ACCESS_TOKEN_TIMEOUT",
        }
    }
}

impl fmt::Display for RejectionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why the guard refused a request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuardRejection {
    /// Malformed, expired, or tampered token, or session state that could
    /// not be read.
    #[error("access token error: {reason}")]
    TokenInvalid {
        /// Human-readable cause.
        reason: String,
    },
    /// The token's `iat` no longer matches the account's `refresh_time`.
    #[error("access token is no longer valid: a newer login superseded it")]
    SessionSuperseded {
        /// Principal whose session moved on.
        principal: String,
    },
}

impl GuardRejection {
    /// The machine-readable code for this rejection.
    pub fn code(&self) -> RejectionCode {
        match self {
            Self::TokenInvalid { .. } => RejectionCode::AccessTokenError,
            Self::SessionSuperseded { .. } => RejectionCode::AccessTokenTimeout,
        }
    }
}

/// Decodes the bearer token and enforces the configured [`LoginType`].
///
/// The guard is read-only: it never issues tokens nor touches
/// `refresh_time`, and every failure is turned into a [`GuardRejection`].
#[derive(Debug, Clone)]
pub struct SessionGuard {
    /// Token decoder.
    tokens: Arc<dyn TokenService>,
    /// Account session state.
    accounts: Arc<dyn AccountStore>,
    /// Login concurrency policy.
    login_type: LoginType,
}

impl SessionGuard {
    /// Creates a new guard.
    pub fn new(
        tokens: Arc<dyn TokenService>,
        accounts: Arc<dyn AccountStore>,
        login_type: LoginType,
    ) -> Self {
        Self {
            tokens,
            accounts,
            login_type,
        }
    }

    /// The configured login policy.
    pub fn login_type(&self) -> LoginType {
        self.login_type
    }

    /// Checks a request's access token.
    ///
    /// A missing or empty token passes untouched; authentication itself is
    /// enforced elsewhere.
    pub async fn check(&self, access_token: Option<&str>) -> Result<(), GuardRejection> {
        self.authenticate(access_token).await.map(|_| ())
    }

    /// Same as [`SessionGuard::check`] but hands back the decoded claims.
    pub async fn authenticate(
        &self,
        access_token: Option<&str>,
    ) -> Result<Option<Claims>, GuardRejection> {
        let Some(token) = access_token.filter(|t| !t.is_empty()) else {
            return Ok(None);
        };

        let claims = self.tokens.decode_access_token(token).map_err(|e| {
            debug!(error = %e, "Access token rejected");
            GuardRejection::TokenInvalid { reason: e.message }
        })?;

        if self.login_type == LoginType::Single {
            self.ensure_current_session(&claims).await?;
        }

        Ok(Some(claims))
    }

    /// Rejects tokens issued before the principal's latest login.
    async fn ensure_current_session(&self, claims: &Claims) -> Result<(), GuardRejection> {
        let principal = claims.principal();
        let refresh_time = self.accounts.refresh_time(principal).await.map_err(|e| {
            error!(principal = %principal, error = %e, "Failed to read account session state");
            GuardRejection::TokenInvalid {
                reason: "account session state unavailable".to_string(),
            }
        })?;

        match refresh_time {
            Some(current) if current == claims.issued_at() => Ok(()),
            current => {
                warn!(
                    principal = %principal,
                    iat = claims.issued_at(),
                    refresh_time = ?current,
                    "Access token superseded by a newer login"
                );
                Err(GuardRejection::SessionSuperseded {
                    principal: principal.to_string(),
                })
            }
        }
    }
}
