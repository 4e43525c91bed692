//! Signing and verification keys for access tokens.

use std::fmt;
use std::path::Path;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey};
use tracing::info;

use larke_core::config::{JwtConfig, SigningAlgorithm};
use larke_core::error::AppError;
use larke_core::result::AppResult;

/// Holds the algorithm and key pair used to sign and verify access tokens.
#[derive(Clone)]
pub struct JwtSigner {
    /// Signing algorithm.
    algorithm: Algorithm,
    /// Key used when encoding.
    encoding_key: EncodingKey,
    /// Key used when decoding.
    decoding_key: DecodingKey,
}

impl fmt::Debug for JwtSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtSigner")
            .field("algorithm", &self.algorithm)
            .finish()
    }
}

impl JwtSigner {
    /// Builds the signer described by the configuration.
    ///
    /// `HS256` uses `secret`; `RS256` reads the PEM files at `private_key`
    /// and `public_key`.
    pub fn from_config(config: &JwtConfig) -> AppResult<Self> {
        let signer = match config.algorithm {
            SigningAlgorithm::HS256 => {
                if config.secret.is_empty() {
                    return Err(AppError::configuration(
                        "passport.jwt.secret must not be empty for HS256",
                    ));
                }
                Self::hmac(config.secret.as_bytes())
            }
            SigningAlgorithm::RS256 => {
                if !config.passphrase.is_empty() {
                    return Err(AppError::configuration(
                        "Encrypted RSA private keys are not supported; provide an unencrypted PEM key",
                    ));
                }
                let private_pem = read_key(&config.private_key, "private_key")?;
                let public_pem = read_key(&config.public_key, "public_key")?;
                Self::rsa_pem(&private_pem, &public_pem)?
            }
        };

        info!(algorithm = ?signer.algorithm, "Access token signer ready");
        Ok(signer)
    }

    /// HMAC-SHA256 signer over a shared secret.
    pub fn hmac(secret: &[u8]) -> Self {
        Self {
            algorithm: Algorithm::HS256,
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
        }
    }

    /// RSA-SHA256 signer over a PEM encoded key pair.
    pub fn rsa_pem(private_pem: &[u8], public_pem: &[u8]) -> AppResult<Self> {
        let encoding_key = EncodingKey::from_rsa_pem(private_pem)
            .map_err(|e| AppError::configuration(format!("Invalid RSA private key: {e}")))?;
        let decoding_key = DecodingKey::from_rsa_pem(public_pem)
            .map_err(|e| AppError::configuration(format!("Invalid RSA public key: {e}")))?;

        Ok(Self {
            algorithm: Algorithm::RS256,
            encoding_key,
            decoding_key,
        })
    }

    /// The signing algorithm.
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub(crate) fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }

    pub(crate) fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }
}

fn read_key(path: &str, field: &str) -> AppResult<Vec<u8>> {
    if path.is_empty() {
        return Err(AppError::configuration(format!(
            "passport.jwt.{field} must be set for RS256"
        )));
    }
    std::fs::read(Path::new(path))
        .map_err(|e| AppError::configuration(format!("Failed to read {field} '{path}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hs256_from_config() {
        let signer = JwtSigner::from_config(&JwtConfig::default()).unwrap();
        assert_eq!(signer.algorithm(), Algorithm::HS256);
    }

    #[test]
    fn test_empty_secret_rejected() {
        let config = JwtConfig {
            secret: String::new(),
            ..JwtConfig::default()
        };
        assert!(JwtSigner::from_config(&config).is_err());
    }

    #[test]
    fn test_rs256_requires_key_paths() {
        let config = JwtConfig {
            algorithm: SigningAlgorithm::RS256,
            ..JwtConfig::default()
        };
        let err = JwtSigner::from_config(&config).unwrap_err();
        assert!(err.message.contains("private_key"));
    }

    #[test]
    fn test_rs256_passphrase_rejected() {
        let config = JwtConfig {
            algorithm: SigningAlgorithm::RS256,
            passphrase: "secret".to_string(),
            ..JwtConfig::default()
        };
        let err = JwtSigner::from_config(&config).unwrap_err();
        assert!(err.message.contains("Encrypted"));
    }
}
