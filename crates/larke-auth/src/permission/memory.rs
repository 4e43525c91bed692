//! In-memory policy engine with Casbin RBAC-with-domains semantics.
//!
//! Request: `(user, domain, resource_type, rule)`
//! Policy: `p = name, resource_type, rule`
//! Role link: `g = user, role, domain`
//!
//! A request is granted when some policy's `name` is the user or one of the
//! user's transitive roles. Role links in the requested domain and in the
//! global scope both count toward inheritance.

use std::collections::{HashSet, VecDeque};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info};

use larke_core::config::GuardConfig;
use larke_core::result::AppResult;
use larke_core::traits::PolicyEngine;
use larke_core::types::{DomainScope, PolicyRule, RoleLink};

/// Stored rules and role links, in insertion order.
#[derive(Debug, Default)]
struct PolicyState {
    /// `p` rules.
    policies: Vec<PolicyRule>,
    /// `g` rules.
    links: Vec<RoleLink>,
}

impl PolicyState {
    fn has_link(&self, link: &RoleLink) -> bool {
        self.links.contains(link)
    }

    fn is_role(&self, name: &str) -> bool {
        self.links.iter().any(|l| l.role == name)
    }

    /// Links that apply when evaluating in `domain`.
    fn links_in<'a>(&'a self, domain: &'a DomainScope) -> impl Iterator<Item = &'a RoleLink> {
        self.links
            .iter()
            .filter(move |l| l.domain == *domain || l.domain.is_global())
    }

    /// Breadth-first walk from `user` up through its roles.
    fn implicit_roles(&self, user: &str, domain: &DomainScope) -> Vec<String> {
        let mut seen: HashSet<&str> = HashSet::from([user]);
        let mut queue: VecDeque<&str> = VecDeque::from([user]);
        let mut roles = Vec::new();

        while let Some(current) = queue.pop_front() {
            for link in self.links_in(domain).filter(|l| l.user == current) {
                if seen.insert(link.role.as_str()) {
                    roles.push(link.role.clone());
                    queue.push_back(link.role.as_str());
                }
            }
        }

        roles
    }

    /// Breadth-first walk from `role` down through its members.
    fn implicit_members(&self, role: &str, domain: &DomainScope) -> Vec<String> {
        let mut seen: HashSet<&str> = HashSet::from([role]);
        let mut queue: VecDeque<&str> = VecDeque::from([role]);
        let mut members = Vec::new();

        while let Some(current) = queue.pop_front() {
            for link in self.links_in(domain).filter(|l| l.role == current) {
                if seen.insert(link.user.as_str()) {
                    members.push(link.user.clone());
                    queue.push_back(link.user.as_str());
                }
            }
        }

        members
    }

    /// The user plus every role it inherits in `domain`.
    fn subjects_of(&self, user: &str, domain: &DomainScope) -> HashSet<String> {
        let mut subjects: HashSet<String> = self.implicit_roles(user, domain).into_iter().collect();
        subjects.insert(user.to_string());
        subjects
    }

    fn enforce(&self, user: &str, domain: &DomainScope, resource_type: &str, rule: &str) -> bool {
        let subjects = self.subjects_of(user, domain);
        self.policies
            .iter()
            .any(|p| p.matches(resource_type, rule) && subjects.contains(&p.name))
    }

    /// Every scope that has at least one link, plus the global scope.
    fn scopes(&self) -> Vec<DomainScope> {
        let mut scopes = vec![DomainScope::global()];
        for link in &self.links {
            if !scopes.contains(&link.domain) {
                scopes.push(link.domain.clone());
            }
        }
        scopes
    }

    /// Removes every link and rule matching the predicates; reports a change.
    fn retain(
        &mut self,
        keep_link: impl Fn(&RoleLink) -> bool,
        keep_policy: impl Fn(&PolicyRule) -> bool,
    ) -> bool {
        let before = (self.links.len(), self.policies.len());
        self.links.retain(|l| keep_link(l));
        self.policies.retain(|p| keep_policy(p));
        before != (self.links.len(), self.policies.len())
    }
}

/// Deduplicates while keeping first-seen order.
fn unique<I: IntoIterator<Item = String>>(items: I) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

/// Policy engine that keeps every rule in process memory.
///
/// Suitable for single-node deployments and tests. Each instance is
/// isolated; guards never share an engine.
#[derive(Debug, Default)]
pub struct MemoryPolicyEngine {
    /// Protected rule state.
    state: RwLock<PolicyState>,
}

impl MemoryPolicyEngine {
    /// Creates an empty engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine pre-loaded with a guard's seed rules.
    pub fn from_seed(seed: &GuardConfig) -> Self {
        let mut state = PolicyState::default();
        for rule in &seed.policies {
            if !state.policies.contains(rule) {
                state.policies.push(rule.clone());
            }
        }
        for link in &seed.role_links {
            if !state.has_link(link) {
                state.links.push(link.clone());
            }
        }

        Self {
            state: RwLock::new(state),
        }
    }
}

#[async_trait]
impl PolicyEngine for MemoryPolicyEngine {
    async fn add_role_for_user(
        &self,
        user: &str,
        role: &str,
        domain: &DomainScope,
    ) -> AppResult<bool> {
        let link = RoleLink::new(user, role, domain.clone());
        let mut state = self.state.write().await;
        if state.has_link(&link) {
            return Ok(false);
        }
        info!(user = %user, role = %role, domain = %domain, "Role granted");
        state.links.push(link);
        Ok(true)
    }

    async fn add_roles_for_user(
        &self,
        user: &str,
        roles: &[String],
        domain: &DomainScope,
    ) -> AppResult<bool> {
        let links: Vec<RoleLink> = unique(roles.iter().cloned())
            .into_iter()
            .map(|role| RoleLink::new(user, role, domain.clone()))
            .collect();

        let mut state = self.state.write().await;
        if links.is_empty() || links.iter().any(|l| state.has_link(l)) {
            return Ok(false);
        }
        info!(user = %user, count = links.len(), domain = %domain, "Roles granted");
        state.links.extend(links);
        Ok(true)
    }

    async fn has_role_for_user(
        &self,
        user: &str,
        role: &str,
        domain: &DomainScope,
    ) -> AppResult<bool> {
        let state = self.state.read().await;
        Ok(state
            .links
            .iter()
            .any(|l| l.user == user && l.role == role && l.domain == *domain))
    }

    async fn get_roles_for_user(&self, user: &str, domain: &DomainScope) -> AppResult<Vec<String>> {
        let state = self.state.read().await;
        Ok(state
            .links
            .iter()
            .filter(|l| l.user == user && l.domain == *domain)
            .map(|l| l.role.clone())
            .collect())
    }

    async fn get_users_for_role(&self, role: &str, domain: &DomainScope) -> AppResult<Vec<String>> {
        let state = self.state.read().await;
        Ok(state
            .links
            .iter()
            .filter(|l| l.role == role && l.domain == *domain)
            .map(|l| l.user.clone())
            .collect())
    }

    async fn delete_role_for_user(
        &self,
        user: &str,
        role: &str,
        domain: &DomainScope,
    ) -> AppResult<bool> {
        let mut state = self.state.write().await;
        let changed = state.retain(
            |l| !(l.user == user && l.role == role && l.domain == *domain),
            |_| true,
        );
        if changed {
            info!(user = %user, role = %role, domain = %domain, "Role revoked");
        }
        Ok(changed)
    }

    async fn delete_roles_for_user(&self, user: &str, domain: &DomainScope) -> AppResult<bool> {
        let mut state = self.state.write().await;
        let changed = state.retain(
            |l| !(l.user == user && (domain.is_global() || l.domain == *domain)),
            |_| true,
        );
        if changed {
            info!(user = %user, domain = %domain, "All roles revoked");
        }
        Ok(changed)
    }

    async fn delete_user(&self, user: &str) -> AppResult<bool> {
        let mut state = self.state.write().await;
        let changed = state.retain(|l| l.user != user, |p| p.name != user);
        if changed {
            info!(user = %user, "User removed from policy");
        }
        Ok(changed)
    }

    async fn delete_role(&self, role: &str) -> AppResult<bool> {
        let mut state = self.state.write().await;
        let changed = state.retain(|l| l.role != role && l.user != role, |p| p.name != role);
        if changed {
            info!(role = %role, "Role removed from policy");
        }
        Ok(changed)
    }

    async fn delete_permission(&self, resource_type: &str, rule: &str) -> AppResult<bool> {
        let mut state = self.state.write().await;
        let changed = state.retain(|_| true, |p| !p.matches(resource_type, rule));
        if changed {
            info!(resource_type = %resource_type, rule = %rule, "Permission removed from policy");
        }
        Ok(changed)
    }

    async fn add_policy(&self, rule: PolicyRule) -> AppResult<bool> {
        let mut state = self.state.write().await;
        if state.policies.contains(&rule) {
            return Ok(false);
        }
        info!(policy = %rule, "Policy added");
        state.policies.push(rule);
        Ok(true)
    }

    async fn add_policies(&self, rules: Vec<PolicyRule>) -> AppResult<bool> {
        let mut seen = HashSet::new();
        let rules: Vec<PolicyRule> = rules
            .into_iter()
            .filter(|r| seen.insert(r.clone()))
            .collect();

        let mut state = self.state.write().await;
        if rules.is_empty() || rules.iter().any(|r| state.policies.contains(r)) {
            return Ok(false);
        }
        info!(count = rules.len(), "Policies added");
        state.policies.extend(rules);
        Ok(true)
    }

    async fn remove_policy(&self, rule: &PolicyRule) -> AppResult<bool> {
        let mut state = self.state.write().await;
        let changed = state.retain(|_| true, |p| p != rule);
        if changed {
            info!(policy = %rule, "Policy removed");
        }
        Ok(changed)
    }

    async fn remove_policies_for(&self, name: &str) -> AppResult<bool> {
        let mut state = self.state.write().await;
        let changed = state.retain(|_| true, |p| p.name != name);
        if changed {
            info!(name = %name, "Policies removed");
        }
        Ok(changed)
    }

    async fn has_policy(&self, rule: &PolicyRule) -> AppResult<bool> {
        Ok(self.state.read().await.policies.contains(rule))
    }

    async fn get_policies_for(&self, name: &str) -> AppResult<Vec<PolicyRule>> {
        let state = self.state.read().await;
        Ok(state
            .policies
            .iter()
            .filter(|p| p.name == name)
            .cloned()
            .collect())
    }

    async fn get_implicit_roles_for_user(
        &self,
        user: &str,
        domain: &DomainScope,
    ) -> AppResult<Vec<String>> {
        Ok(self.state.read().await.implicit_roles(user, domain))
    }

    async fn get_implicit_users_for_role(
        &self,
        role: &str,
        domain: &DomainScope,
    ) -> AppResult<Vec<String>> {
        let state = self.state.read().await;
        Ok(state
            .implicit_members(role, domain)
            .into_iter()
            .filter(|member| !state.is_role(member))
            .collect())
    }

    async fn get_implicit_permissions_for_user(
        &self,
        user: &str,
        domain: &DomainScope,
    ) -> AppResult<Vec<PolicyRule>> {
        let state = self.state.read().await;
        let subjects = state.subjects_of(user, domain);
        Ok(state
            .policies
            .iter()
            .filter(|p| subjects.contains(&p.name))
            .cloned()
            .collect())
    }

    async fn get_implicit_users_for_permission(
        &self,
        resource_type: &str,
        rule: &str,
    ) -> AppResult<Vec<String>> {
        let state = self.state.read().await;
        let candidates = unique(
            state
                .links
                .iter()
                .map(|l| l.user.clone())
                .chain(state.policies.iter().map(|p| p.name.clone())),
        );
        let scopes = state.scopes();

        Ok(candidates
            .into_iter()
            .filter(|c| !state.is_role(c))
            .filter(|c| {
                scopes
                    .iter()
                    .any(|scope| state.enforce(c, scope, resource_type, rule))
            })
            .collect())
    }

    async fn get_all_users_by_domain(&self, domain: &DomainScope) -> AppResult<Vec<String>> {
        let state = self.state.read().await;
        Ok(unique(
            state
                .links
                .iter()
                .filter(|l| l.domain == *domain)
                .map(|l| l.user.clone()),
        ))
    }

    async fn enforce(
        &self,
        user: &str,
        domain: &DomainScope,
        resource_type: &str,
        rule: &str,
    ) -> AppResult<bool> {
        let allowed = self
            .state
            .read()
            .await
            .enforce(user, domain, resource_type, rule);
        debug!(
            user = %user,
            domain = %domain,
            resource_type = %resource_type,
            rule = %rule,
            allowed,
            "Policy evaluated"
        );
        Ok(allowed)
    }

    async fn get_all_roles(&self) -> AppResult<Vec<String>> {
        let state = self.state.read().await;
        Ok(unique(state.links.iter().map(|l| l.role.clone())))
    }

    async fn get_all_subjects(&self) -> AppResult<Vec<String>> {
        let state = self.state.read().await;
        Ok(unique(state.policies.iter().map(|p| p.name.clone())))
    }

    async fn get_all_domains(&self) -> AppResult<Vec<DomainScope>> {
        let state = self.state.read().await;
        Ok(state
            .scopes()
            .into_iter()
            .filter(|scope| !scope.is_global())
            .collect())
    }

    async fn get_policy(&self) -> AppResult<Vec<PolicyRule>> {
        Ok(self.state.read().await.policies.clone())
    }

    async fn get_role_links(&self) -> AppResult<Vec<RoleLink>> {
        Ok(self.state.read().await.links.clone())
    }
}
