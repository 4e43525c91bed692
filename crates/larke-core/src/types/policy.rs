//! Policy and grouping rule shapes stored by a policy engine.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::domain::DomainScope;

/// A permission rule `(name, resource_type, rule)`.
///
/// `name` is the subject the rule grants to: a user or a role. The triple is
/// the natural key of the rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PolicyRule {
    /// Subject (user or role identifier).
    pub name: String,
    /// Resource type, e.g. `article` or a request path.
    pub resource_type: String,
    /// Action or rule on the resource, e.g. `publish` or an HTTP method.
    pub rule: String,
}

impl PolicyRule {
    /// Creates a new policy rule.
    pub fn new(
        name: impl Into<String>,
        resource_type: impl Into<String>,
        rule: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            resource_type: resource_type.into(),
            rule: rule.into(),
        }
    }

    /// Whether this rule covers the given `(resource_type, rule)` pair.
    pub fn matches(&self, resource_type: &str, rule: &str) -> bool {
        self.resource_type == resource_type && self.rule == rule
    }
}

impl fmt::Display for PolicyRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p, {}, {}, {}", self.name, self.resource_type, self.rule)
    }
}

/// A role assignment `(user, role, domain)`.
///
/// `user` may itself be a role, which is how role inheritance is expressed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoleLink {
    /// Member of the role.
    pub user: String,
    /// Role granted to the member.
    pub role: String,
    /// Scope of the assignment.
    #[serde(default)]
    pub domain: DomainScope,
}

impl RoleLink {
    /// Creates a new role link.
    pub fn new(user: impl Into<String>, role: impl Into<String>, domain: DomainScope) -> Self {
        Self {
            user: user.into(),
            role: role.into(),
            domain,
        }
    }
}

impl fmt::Display for RoleLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "g, {}, {}, {}", self.user, self.role, self.domain)
    }
}
