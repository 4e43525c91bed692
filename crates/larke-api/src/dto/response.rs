//! Response DTOs.

use serde::{Deserialize, Serialize};

use larke_core::types::PolicyRule;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Server version.
    pub version: String,
    /// Active login policy.
    pub login_type: String,
    /// Registered permission guards.
    pub guards: Vec<String>,
}

/// Permission check result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnforceResponse {
    /// Whether the request is allowed.
    pub allowed: bool,
}

/// Result of a mutation on the policy store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeResponse {
    /// Whether the store changed.
    pub changed: bool,
}

/// Roles held by a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRolesResponse {
    /// The member.
    pub user: String,
    /// Directly held roles.
    pub roles: Vec<String>,
    /// Every role reached through inheritance.
    pub implicit_roles: Vec<String>,
}

/// Effective permissions of the authenticated principal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MyPermissionsResponse {
    /// The principal.
    pub principal: String,
    /// Implicit rules, restated with the principal as subject.
    pub permissions: Vec<PolicyRule>,
}
