//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use larke_auth::jwt::{JwtDecoder, JwtEncoder, JwtSigner};
use larke_auth::permission::EnforcerRegistry;
use larke_auth::session::{LoginIssuer, MemoryAccountStore, SessionGuard};
use larke_core::config::AppConfig;
use larke_core::result::AppResult;
use larke_core::traits::AccountStore;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Login-type guard run on every request
    pub session_guard: Arc<SessionGuard>,
    /// Token issuer that advances the session fence
    pub login_issuer: Arc<LoginIssuer>,
    /// Named policy engines
    pub permissions: Arc<EnforcerRegistry>,
}

impl AppState {
    /// Wires the in-memory collaborators from configuration.
    pub fn from_config(config: AppConfig) -> AppResult<Self> {
        let accounts: Arc<dyn AccountStore> = Arc::new(MemoryAccountStore::new());
        Self::with_accounts(config, accounts)
    }

    /// Wires the state around an externally provided account store.
    pub fn with_accounts(config: AppConfig, accounts: Arc<dyn AccountStore>) -> AppResult<Self> {
        let jwt = &config.passport.jwt;
        let signer = Arc::new(JwtSigner::from_config(jwt)?);
        let encoder = Arc::new(JwtEncoder::new(jwt, Arc::clone(&signer))?);
        let decoder = Arc::new(JwtDecoder::new(jwt, signer));

        let session_guard = Arc::new(SessionGuard::new(
            decoder,
            Arc::clone(&accounts),
            config.passport.login_type,
        ));
        let login_issuer = Arc::new(LoginIssuer::new(encoder, accounts));
        let permissions = Arc::new(EnforcerRegistry::from_config(&config.permission));

        Ok(Self {
            config: Arc::new(config),
            session_guard,
            login_issuer,
            permissions,
        })
    }
}
