//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use larke_core::error::AppError;

/// Runs `validator` rules and folds failures into a validation error.
pub fn validate<T: Validate>(request: &T) -> Result<(), AppError> {
    request
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))
}

/// Permission check request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EnforceRequest {
    /// Guard to check against; the default guard when absent.
    #[serde(default)]
    pub guard: Option<String>,
    /// Subject being checked.
    #[validate(length(min = 1, message = "User is required"))]
    pub user: String,
    /// Domain scope; empty for global.
    #[serde(default)]
    pub domain: Vec<String>,
    /// Resource type.
    #[validate(length(min = 1, message = "Resource type is required"))]
    pub resource_type: String,
    /// Action on the resource.
    #[validate(length(min = 1, message = "Rule is required"))]
    pub rule: String,
}

/// Role grant or revocation.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RoleAssignmentRequest {
    /// Guard to modify; the default guard when absent.
    #[serde(default)]
    pub guard: Option<String>,
    /// Member receiving or losing the role.
    #[validate(length(min = 1, message = "User is required"))]
    pub user: String,
    /// Role name.
    #[validate(length(min = 1, message = "Role is required"))]
    pub role: String,
    /// Domain scope; empty for global.
    #[serde(default)]
    pub domain: Vec<String>,
}

/// Query string for role listings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoleQuery {
    /// Guard to read; the default guard when absent.
    pub guard: Option<String>,
    /// Domain parts joined by `/`; global when absent.
    pub domain: Option<String>,
}

impl RoleQuery {
    /// The domain parts, with empty segments dropped.
    pub fn domain_parts(&self) -> Vec<&str> {
        self.domain
            .as_deref()
            .map(|d| d.split('/').filter(|p| !p.is_empty()).collect())
            .unwrap_or_default()
    }
}
