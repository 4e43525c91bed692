//! Integration tests for token issuance and login-concurrency enforcement.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Barrier;

use larke_auth::jwt::{JwtDecoder, JwtEncoder, JwtSigner, TokenService};
use larke_auth::session::{LoginIssuer, MemoryAccountStore, RejectionCode, SessionGuard};
use larke_core::config::{JwtConfig, SigningAlgorithm};
use larke_core::result::AppResult;
use larke_core::traits::AccountStore;
use larke_core::types::LoginType;

struct Harness {
    issuer: LoginIssuer,
    decoder: Arc<JwtDecoder>,
    accounts: Arc<MemoryAccountStore>,
}

impl Harness {
    fn new(config: JwtConfig) -> Self {
        let signer = Arc::new(JwtSigner::from_config(&config).expect("signer"));
        let encoder = Arc::new(JwtEncoder::new(&config, Arc::clone(&signer)).unwrap());
        let decoder = Arc::new(JwtDecoder::new(&config, signer));
        let accounts = Arc::new(MemoryAccountStore::new());
        let issuer = LoginIssuer::new(encoder, accounts.clone());

        Self {
            issuer,
            decoder,
            accounts,
        }
    }

    fn guard(&self, login_type: LoginType) -> SessionGuard {
        SessionGuard::new(self.decoder.clone(), self.accounts.clone(), login_type)
    }
}

#[tokio::test]
async fn test_second_login_supersedes_first_under_single() {
    let harness = Harness::new(JwtConfig::default());
    let (t1, c1) = harness.issuer.issue("bob").await.unwrap();
    let (t2, c2) = harness.issuer.issue("bob").await.unwrap();

    assert!(c2.iat > c1.iat);
    assert_eq!(harness.accounts.refresh_time("bob").await.unwrap(), Some(c2.iat));

    let guard = harness.guard(LoginType::Single);
    let rejection = guard.check(Some(&t1)).await.unwrap_err();
    assert_eq!(rejection.code(), RejectionCode::AccessTokenTimeout);
    assert!(guard.check(Some(&t2)).await.is_ok());
}

#[tokio::test]
async fn test_every_login_stays_valid_under_many() {
    let harness = Harness::new(JwtConfig::default());
    let (t1, _) = harness.issuer.issue("bob").await.unwrap();
    let (t2, _) = harness.issuer.issue("bob").await.unwrap();

    let guard = harness.guard(LoginType::Many);
    assert!(guard.check(Some(&t1)).await.is_ok());
    assert!(guard.check(Some(&t2)).await.is_ok());
}

#[tokio::test]
async fn test_other_principals_are_unaffected() {
    let harness = Harness::new(JwtConfig::default());
    let (alice, _) = harness.issuer.issue("alice").await.unwrap();
    let (_bob, _) = harness.issuer.issue("bob").await.unwrap();
    let (_bob_again, _) = harness.issuer.issue("bob").await.unwrap();

    let guard = harness.guard(LoginType::Single);
    assert!(guard.check(Some(&alice)).await.is_ok());
}

#[tokio::test]
async fn test_tampered_token_is_access_token_error() {
    let harness = Harness::new(JwtConfig::default());
    let (token, _) = harness.issuer.issue("bob").await.unwrap();
    let tampered = format!("{token}x");

    for login_type in [LoginType::Many, LoginType::Single] {
        let rejection = harness
            .guard(login_type)
            .check(Some(&tampered))
            .await
            .unwrap_err();
        assert_eq!(rejection.code(), RejectionCode::AccessTokenError);
    }
}

#[tokio::test]
async fn test_rs256_round_trip() {
    let fixtures = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");
    let config = JwtConfig {
        algorithm: SigningAlgorithm::RS256,
        private_key: format!("{fixtures}/private.pem"),
        public_key: format!("{fixtures}/public.pem"),
        ..JwtConfig::default()
    };
    let harness = Harness::new(config);

    let (token, issued) = harness.issuer.issue("carol").await.unwrap();
    let claims = harness.decoder.decode_access_token(&token).unwrap();
    assert_eq!(claims.principal(), "carol");
    assert_eq!(claims.iat, issued.iat);

    assert!(harness.guard(LoginType::Single).check(Some(&token)).await.is_ok());
}

/// Holds every fence advance until two logins are in flight at once.
#[derive(Debug)]
struct RacingAccounts {
    inner: MemoryAccountStore,
    barrier: Barrier,
}

#[async_trait]
impl AccountStore for RacingAccounts {
    async fn refresh_time(&self, principal: &str) -> AppResult<Option<i64>> {
        self.inner.refresh_time(principal).await
    }

    async fn record_refresh_time(&self, principal: &str, refresh_time: i64) -> AppResult<()> {
        self.inner.record_refresh_time(principal, refresh_time).await
    }

    async fn advance_refresh_time(&self, principal: &str, now: i64) -> AppResult<i64> {
        self.barrier.wait().await;
        self.inner.advance_refresh_time(principal, now).await
    }
}

#[tokio::test]
async fn test_concurrent_logins_leave_one_valid_token() {
    let config = JwtConfig::default();
    let signer = Arc::new(JwtSigner::from_config(&config).unwrap());
    let encoder = Arc::new(JwtEncoder::new(&config, Arc::clone(&signer)).unwrap());
    let decoder = Arc::new(JwtDecoder::new(&config, signer));
    let accounts = Arc::new(RacingAccounts {
        inner: MemoryAccountStore::new(),
        barrier: Barrier::new(2),
    });
    let issuer = LoginIssuer::new(encoder, accounts.clone());

    let (first, second) = tokio::join!(issuer.issue("bob"), issuer.issue("bob"));
    let (t1, c1) = first.unwrap();
    let (t2, c2) = second.unwrap();
    assert_ne!(c1.iat, c2.iat);

    let guard = SessionGuard::new(decoder, accounts, LoginType::Single);
    let accepted = [guard.check(Some(&t1)).await, guard.check(Some(&t2)).await]
        .iter()
        .filter(|r| r.is_ok())
        .count();
    assert_eq!(accepted, 1);
}
