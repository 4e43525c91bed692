//! Policy engine trait for pluggable RBAC/ABAC backends.

use async_trait::async_trait;

use crate::error::AppError;
use crate::result::AppResult;
use crate::types::{DomainScope, PolicyRule, RoleLink};

/// A Casbin-model-compatible policy engine.
///
/// The engine owns every semantic decision: existence checks, idempotence,
/// cascades, persistence, and evaluation. Mutating methods return `true` when
/// the stored state changed.
///
/// The methods in the "optional" group at the end have default
/// implementations that return [`crate::error::ErrorKind::NotImplemented`];
/// every other method is mandatory.
#[async_trait]
pub trait PolicyEngine: Send + Sync + std::fmt::Debug + 'static {
    // ── Role membership ───────────────────────────────────────

    /// Adds a role for a user in the given scope.
    async fn add_role_for_user(
        &self,
        user: &str,
        role: &str,
        domain: &DomainScope,
    ) -> AppResult<bool>;

    /// Adds several roles at once. Fails as a whole (returns `false`, stores
    /// nothing) when any of the links already exists.
    async fn add_roles_for_user(
        &self,
        user: &str,
        roles: &[String],
        domain: &DomainScope,
    ) -> AppResult<bool>;

    /// Whether the user directly holds the role in the scope.
    async fn has_role_for_user(
        &self,
        user: &str,
        role: &str,
        domain: &DomainScope,
    ) -> AppResult<bool>;

    /// Roles directly held by the user in the scope.
    async fn get_roles_for_user(&self, user: &str, domain: &DomainScope) -> AppResult<Vec<String>>;

    /// Users directly holding the role in the scope.
    async fn get_users_for_role(&self, role: &str, domain: &DomainScope) -> AppResult<Vec<String>>;

    /// Removes one role from the user.
    async fn delete_role_for_user(
        &self,
        user: &str,
        role: &str,
        domain: &DomainScope,
    ) -> AppResult<bool>;

    /// Removes the user's roles. The global scope removes them in every scope.
    async fn delete_roles_for_user(&self, user: &str, domain: &DomainScope) -> AppResult<bool>;

    /// Removes the user's role links and the rules granted to the user.
    async fn delete_user(&self, user: &str) -> AppResult<bool>;

    /// Removes the role from every link and the rules granted to the role.
    async fn delete_role(&self, role: &str) -> AppResult<bool>;

    /// Removes every rule matching `(resource_type, rule)` for any subject.
    async fn delete_permission(&self, resource_type: &str, rule: &str) -> AppResult<bool>;

    // ── Policy rules ──────────────────────────────────────────

    /// Adds a single rule.
    async fn add_policy(&self, rule: PolicyRule) -> AppResult<bool>;

    /// Adds several rules atomically; nothing is stored if any already exists.
    async fn add_policies(&self, rules: Vec<PolicyRule>) -> AppResult<bool>;

    /// Removes the exact rule.
    async fn remove_policy(&self, rule: &PolicyRule) -> AppResult<bool>;

    /// Removes every rule whose subject is `name`.
    async fn remove_policies_for(&self, name: &str) -> AppResult<bool>;

    /// Whether the exact rule exists.
    async fn has_policy(&self, rule: &PolicyRule) -> AppResult<bool>;

    /// Rules whose subject is exactly `name`.
    async fn get_policies_for(&self, name: &str) -> AppResult<Vec<PolicyRule>>;

    // ── Transitive queries ────────────────────────────────────

    /// Roles reachable from the user through role inheritance.
    async fn get_implicit_roles_for_user(
        &self,
        user: &str,
        domain: &DomainScope,
    ) -> AppResult<Vec<String>>;

    /// Non-role members that reach the role through inheritance.
    async fn get_implicit_users_for_role(
        &self,
        role: &str,
        domain: &DomainScope,
    ) -> AppResult<Vec<String>>;

    /// Rules granted to the user or to any role the user inherits.
    async fn get_implicit_permissions_for_user(
        &self,
        user: &str,
        domain: &DomainScope,
    ) -> AppResult<Vec<PolicyRule>>;

    /// Non-role subjects that are granted `(resource_type, rule)` in any scope.
    async fn get_implicit_users_for_permission(
        &self,
        resource_type: &str,
        rule: &str,
    ) -> AppResult<Vec<String>>;

    /// Members with at least one role link in the scope.
    async fn get_all_users_by_domain(&self, domain: &DomainScope) -> AppResult<Vec<String>>;

    // ── Decision ──────────────────────────────────────────────

    /// Whether `user` may perform `rule` on `resource_type` in the scope.
    async fn enforce(
        &self,
        user: &str,
        domain: &DomainScope,
        resource_type: &str,
        rule: &str,
    ) -> AppResult<bool>;

    // ── Optional ──────────────────────────────────────────────

    /// Every role named in a role link.
    async fn get_all_roles(&self) -> AppResult<Vec<String>> {
        Err(unsupported("get_all_roles"))
    }

    /// Every subject named in a rule.
    async fn get_all_subjects(&self) -> AppResult<Vec<String>> {
        Err(unsupported("get_all_subjects"))
    }

    /// Every non-global scope in use.
    async fn get_all_domains(&self) -> AppResult<Vec<DomainScope>> {
        Err(unsupported("get_all_domains"))
    }

    /// Every stored rule.
    async fn get_policy(&self) -> AppResult<Vec<PolicyRule>> {
        Err(unsupported("get_policy"))
    }

    /// Every stored role link.
    async fn get_role_links(&self) -> AppResult<Vec<RoleLink>> {
        Err(unsupported("get_role_links"))
    }
}

fn unsupported(operation: &str) -> AppError {
    AppError::not_implemented(format!("Policy engine does not support '{operation}'"))
}
