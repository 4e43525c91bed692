//! Token service trait consumed by the session guard.

use larke_core::result::AppResult;

use super::claims::Claims;

/// Decodes and validates bearer access tokens.
///
/// Implementations fail with an unauthorized [`larke_core::AppError`] for
/// malformed, expired, or tampered tokens.
pub trait TokenService: Send + Sync + std::fmt::Debug + 'static {
    /// Decodes an access token string into its claim set.
    fn decode_access_token(&self, token: &str) -> AppResult<Claims>;
}
