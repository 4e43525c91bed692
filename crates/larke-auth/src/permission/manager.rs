//! Typed permission façade over a named policy engine.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use larke_core::result::AppResult;
use larke_core::traits::PolicyEngine;
use larke_core::types::{DomainScope, PolicyRule, RoleLink};

/// Domain arguments are an ordered list of scope strings; `&[]` is global.
fn scope(domain: &[&str]) -> DomainScope {
    DomainScope::new(domain.iter().copied())
}

/// Role and permission management bound to one guard's policy engine.
///
/// Every call forwards to the engine. The manager adds no validation of its
/// own and returns engine errors unchanged.
///
/// Engine features beyond the ones wrapped here are reached through
/// [`PermissionManager::engine`].
#[derive(Debug, Clone)]
pub struct PermissionManager {
    /// Guard this manager was resolved for.
    guard: String,
    /// Policy engine backing the guard.
    engine: Arc<dyn PolicyEngine>,
}

impl PermissionManager {
    /// Binds a manager to an engine under the given guard name.
    pub fn new(guard: impl Into<String>, engine: Arc<dyn PolicyEngine>) -> Self {
        Self {
            guard: guard.into(),
            engine,
        }
    }

    /// Rebinds this manager to another engine, keeping the guard name.
    pub fn with_engine(mut self, engine: Arc<dyn PolicyEngine>) -> Self {
        self.engine = engine;
        self
    }

    /// The underlying engine.
    pub fn engine(&self) -> &Arc<dyn PolicyEngine> {
        &self.engine
    }

    /// The guard name.
    pub fn guard_name(&self) -> &str {
        &self.guard
    }

    // ── Role membership ───────────────────────────────────────

    /// Grants `role` to `user`.
    pub async fn add_role_for_user(&self, user: &str, role: &str, domain: &[&str]) -> AppResult<bool> {
        self.engine
            .add_role_for_user(user, role, &scope(domain))
            .await
    }

    /// Grants several roles to `user` at once.
    pub async fn add_roles_for_user(
        &self,
        user: &str,
        roles: &[String],
        domain: &[&str],
    ) -> AppResult<bool> {
        self.engine
            .add_roles_for_user(user, roles, &scope(domain))
            .await
    }

    /// Whether `user` directly holds `role`.
    pub async fn has_role_for_user(&self, user: &str, role: &str, domain: &[&str]) -> AppResult<bool> {
        self.engine
            .has_role_for_user(user, role, &scope(domain))
            .await
    }

    /// Roles directly held by `user`.
    pub async fn get_roles_for_user(&self, user: &str, domain: &[&str]) -> AppResult<Vec<String>> {
        self.engine.get_roles_for_user(user, &scope(domain)).await
    }

    /// Users directly holding `role`.
    pub async fn get_users_for_role(&self, role: &str, domain: &[&str]) -> AppResult<Vec<String>> {
        self.engine.get_users_for_role(role, &scope(domain)).await
    }

    /// Revokes one role from `user`.
    pub async fn delete_role_for_user(
        &self,
        user: &str,
        role: &str,
        domain: &[&str],
    ) -> AppResult<bool> {
        self.engine
            .delete_role_for_user(user, role, &scope(domain))
            .await
    }

    /// Revokes the roles of `user`; `&[]` revokes them in every domain.
    pub async fn delete_roles_for_user(&self, user: &str, domain: &[&str]) -> AppResult<bool> {
        self.engine
            .delete_roles_for_user(user, &scope(domain))
            .await
    }

    /// Removes `user` with all its role links and rules.
    pub async fn delete_user(&self, user: &str) -> AppResult<bool> {
        self.engine.delete_user(user).await
    }

    /// Removes `role` from every user and drops its rules.
    pub async fn delete_role(&self, role: &str) -> AppResult<bool> {
        self.engine.delete_role(role).await
    }

    /// Removes `(resource_type, rule)` from every subject.
    pub async fn delete_permission(&self, resource_type: &str, rule: &str) -> AppResult<bool> {
        self.engine.delete_permission(resource_type, rule).await
    }

    // ── Policy rules ──────────────────────────────────────────

    /// Adds the rule `(name, resource_type, rule)`.
    pub async fn add_policy(&self, name: &str, resource_type: &str, rule: &str) -> AppResult<bool> {
        self.engine
            .add_policy(PolicyRule::new(name, resource_type, rule))
            .await
    }

    /// Adds several rules atomically.
    pub async fn add_policies(&self, rules: Vec<PolicyRule>) -> AppResult<bool> {
        self.engine.add_policies(rules).await
    }

    /// Removes the exact rule.
    pub async fn delete_policy(&self, name: &str, resource_type: &str, rule: &str) -> AppResult<bool> {
        self.engine
            .remove_policy(&PolicyRule::new(name, resource_type, rule))
            .await
    }

    /// Removes every rule granted to `name`.
    pub async fn delete_policies(&self, name: &str) -> AppResult<bool> {
        self.engine.remove_policies_for(name).await
    }

    /// Whether the exact rule exists.
    pub async fn has_policy_for_user(
        &self,
        name: &str,
        resource_type: &str,
        rule: &str,
    ) -> AppResult<bool> {
        self.engine
            .has_policy(&PolicyRule::new(name, resource_type, rule))
            .await
    }

    // ── Permissions for a user ────────────────────────────────

    /// Grants `(resource_type, rule)` directly to `user`.
    pub async fn add_permission_for_user(
        &self,
        user: &str,
        resource_type: &str,
        rule: &str,
    ) -> AppResult<bool> {
        self.add_policy(user, resource_type, rule).await
    }

    /// Grants several `(resource_type, rule)` pairs to `user` atomically.
    pub async fn add_permissions_for_user(
        &self,
        user: &str,
        permissions: &[(&str, &str)],
    ) -> AppResult<bool> {
        let rules = permissions
            .iter()
            .map(|(resource_type, rule)| PolicyRule::new(user, *resource_type, *rule))
            .collect();
        self.engine.add_policies(rules).await
    }

    /// Whether `user` was granted `(resource_type, rule)` directly.
    pub async fn has_permission_for_user(
        &self,
        user: &str,
        resource_type: &str,
        rule: &str,
    ) -> AppResult<bool> {
        self.has_policy_for_user(user, resource_type, rule).await
    }

    /// Rules granted directly to `user`.
    pub async fn get_permissions_for_user(&self, user: &str) -> AppResult<Vec<PolicyRule>> {
        self.engine.get_policies_for(user).await
    }

    // ── Transitive queries ────────────────────────────────────

    /// Rules granted to `user` directly or through any inherited role.
    pub async fn get_implicit_permissions_for_user(
        &self,
        user: &str,
        domain: &[&str],
    ) -> AppResult<Vec<PolicyRule>> {
        self.engine
            .get_implicit_permissions_for_user(user, &scope(domain))
            .await
    }

    /// Users granted `(resource_type, rule)` directly or through roles.
    pub async fn get_implicit_users_for_permission(
        &self,
        resource_type: &str,
        rule: &str,
    ) -> AppResult<Vec<String>> {
        self.engine
            .get_implicit_users_for_permission(resource_type, rule)
            .await
    }

    /// Every role `name` inherits.
    pub async fn get_implicit_roles_for_user(&self, name: &str, domain: &[&str]) -> AppResult<Vec<String>> {
        self.engine
            .get_implicit_roles_for_user(name, &scope(domain))
            .await
    }

    /// Every user reaching role `name` through inheritance.
    pub async fn get_implicit_users_for_role(&self, name: &str, domain: &[&str]) -> AppResult<Vec<String>> {
        self.engine
            .get_implicit_users_for_role(name, &scope(domain))
            .await
    }

    /// The implicit rules of `user`, each restated with `user` as subject.
    pub async fn get_implicit_resources_for_user(
        &self,
        user: &str,
        domain: &[&str],
    ) -> AppResult<Vec<PolicyRule>> {
        let permissions = self
            .engine
            .get_implicit_permissions_for_user(user, &scope(domain))
            .await?;

        let mut seen = HashSet::new();
        Ok(permissions
            .into_iter()
            .map(|p| PolicyRule::new(user, p.resource_type, p.rule))
            .filter(|p| seen.insert(p.clone()))
            .collect())
    }

    /// Users holding a role in exactly `domain`.
    pub async fn get_all_users_by_domain(&self, domain: &[&str]) -> AppResult<Vec<String>> {
        self.engine.get_all_users_by_domain(&scope(domain)).await
    }

    // ── Decision ──────────────────────────────────────────────

    /// Whether `user` may perform `rule` on `resource_type`, following
    /// global role links only.
    pub async fn enforce(&self, user: &str, resource_type: &str, rule: &str) -> AppResult<bool> {
        self.enforce_in(user, &[], resource_type, rule).await
    }

    /// Whether `user` may perform `rule` on `resource_type` within `domain`.
    pub async fn enforce_in(
        &self,
        user: &str,
        domain: &[&str],
        resource_type: &str,
        rule: &str,
    ) -> AppResult<bool> {
        let allowed = self
            .engine
            .enforce(user, &scope(domain), resource_type, rule)
            .await?;
        debug!(guard = %self.guard, user = %user, resource_type = %resource_type, rule = %rule, allowed, "Enforced");
        Ok(allowed)
    }

    // ── Optional engine features ──────────────────────────────

    /// Every role known to the engine.
    pub async fn get_all_roles(&self) -> AppResult<Vec<String>> {
        self.engine.get_all_roles().await
    }

    /// Every subject named in a rule.
    pub async fn get_all_subjects(&self) -> AppResult<Vec<String>> {
        self.engine.get_all_subjects().await
    }

    /// Every non-global domain in use.
    pub async fn get_all_domains(&self) -> AppResult<Vec<DomainScope>> {
        self.engine.get_all_domains().await
    }

    /// Every stored rule.
    pub async fn get_policy(&self) -> AppResult<Vec<PolicyRule>> {
        self.engine.get_policy().await
    }

    /// Every stored role link.
    pub async fn get_role_links(&self) -> AppResult<Vec<RoleLink>> {
        self.engine.get_role_links().await
    }
}
