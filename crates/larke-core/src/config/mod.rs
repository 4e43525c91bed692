//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section, and every field carries a default so an empty file is valid.

pub mod app;
pub mod logging;
pub mod passport;
pub mod permission;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use self::app::ServerConfig;
pub use self::logging::LoggingConfig;
pub use self::passport::{JwtConfig, PassportConfig, SigningAlgorithm};
pub use self::permission::{DEFAULT_GUARD, GuardConfig, PermissionConfig};

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Login policy and token settings.
    #[serde(default)]
    pub passport: PassportConfig,
    /// Policy engine guards.
    #[serde(default)]
    pub permission: PermissionConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges `config/default.toml` with an environment-specific overlay
    /// `config/{env}.toml` and environment variables prefixed with `LARKE_`
    /// (nested keys separated by `__`, e.g. `LARKE_PASSPORT__LOGIN_TYPE`).
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("LARKE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Load configuration from a single file, without overlays.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::types::{DomainScope, LoginType};

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.passport.login_type, LoginType::Many);
        assert_eq!(config.permission.default_guard, DEFAULT_GUARD);
        assert_eq!(config.passport.jwt.algorithm, SigningAlgorithm::HS256);
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[passport]
login_type = "single"

[passport.jwt]
secret = "test-secret"
access_ttl_minutes = 30

[permission]
default_guard = "admin"

[[permission.guards.admin.policies]]
name = "editor"
resource_type = "article"
rule = "publish"

[[permission.guards.admin.role_links]]
user = "alice"
role = "editor"
domain = ["blog"]
"#
        )
        .unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.passport.login_type, LoginType::Single);
        assert_eq!(config.passport.jwt.secret, "test-secret");
        assert_eq!(config.passport.jwt.access_ttl_minutes, 30);
        assert_eq!(config.permission.default_guard, "admin");

        let guard = &config.permission.guards["admin"];
        assert_eq!(guard.policies.len(), 1);
        assert_eq!(guard.role_links[0].domain, DomainScope::from("blog"));
    }

    #[test]
    fn test_seed_with_blank_domain_is_global() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[[permission.guards.larke.role_links]]
user = "root"
role = "admin"
domain = [""]
"#
        )
        .unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert!(config.permission.guards["larke"].role_links[0].domain.is_global());
    }

    #[test]
    fn test_guard_names_default_first() {
        let mut config = PermissionConfig::default();
        config
            .guards
            .insert("tenant".to_string(), GuardConfig::default());
        config
            .guards
            .insert(DEFAULT_GUARD.to_string(), GuardConfig::default());

        assert_eq!(config.guard_names(), vec!["larke", "tenant"]);
    }
}
