//! Passport (token and login policy) configuration.

use serde::{Deserialize, Serialize};

use crate::types::LoginType;

/// Login policy and token settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PassportConfig {
    /// Login concurrency policy.
    #[serde(default)]
    pub login_type: LoginType,
    /// Access token signing settings.
    #[serde(default)]
    pub jwt: JwtConfig,
}

/// Signing algorithm family for access tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SigningAlgorithm {
    /// HMAC with SHA-256 over a shared secret.
    #[default]
    HS256,
    /// RSASSA-PKCS1-v1_5 with SHA-256 over a PEM key pair.
    RS256,
}

/// Access token signing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// Signing algorithm.
    #[serde(default)]
    pub algorithm: SigningAlgorithm,
    /// Shared secret for `HS256`.
    #[serde(default = "default_secret")]
    pub secret: String,
    /// Path to the PEM private key for `RS256`.
    #[serde(default)]
    pub private_key: String,
    /// Path to the PEM public key for `RS256`.
    #[serde(default)]
    pub public_key: String,
    /// Passphrase of the private key. Encrypted keys are not supported and a
    /// non-empty value is rejected when the signer is built.
    #[serde(default)]
    pub passphrase: String,
    /// Access token TTL in minutes.
    #[serde(default = "default_access_ttl")]
    pub access_ttl_minutes: u64,
    /// Clock skew tolerance in seconds.
    #[serde(default = "default_leeway")]
    pub leeway_seconds: u64,
    /// Expected `iss` claim. Empty disables issuer checks.
    #[serde(default)]
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            algorithm: SigningAlgorithm::default(),
            secret: default_secret(),
            private_key: String::new(),
            public_key: String::new(),
            passphrase: String::new(),
            access_ttl_minutes: default_access_ttl(),
            leeway_seconds: default_leeway(),
            issuer: String::new(),
        }
    }
}

fn default_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_access_ttl() -> u64 {
    120
}

fn default_leeway() -> u64 {
    5
}
