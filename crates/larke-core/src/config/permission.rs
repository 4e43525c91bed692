//! Permission guard configuration.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::{PolicyRule, RoleLink};

/// Name of the guard used when a caller does not name one.
pub const DEFAULT_GUARD: &str = "larke";

/// Policy engine guards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionConfig {
    /// Guard resolved when none is named.
    #[serde(default = "default_guard")]
    pub default_guard: String,
    /// Named guards and their seed data. The default guard always exists,
    /// even when it has no entry here.
    #[serde(default)]
    pub guards: HashMap<String, GuardConfig>,
}

impl Default for PermissionConfig {
    fn default() -> Self {
        Self {
            default_guard: default_guard(),
            guards: HashMap::new(),
        }
    }
}

impl PermissionConfig {
    /// Guard names to build, the default guard first.
    pub fn guard_names(&self) -> Vec<String> {
        let mut names = vec![self.default_guard.clone()];
        let mut rest: Vec<String> = self
            .guards
            .keys()
            .filter(|name| **name != self.default_guard)
            .cloned()
            .collect();
        rest.sort();
        names.extend(rest);
        names
    }
}

/// Seed data loaded into a guard's engine at startup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GuardConfig {
    /// Permission rules.
    #[serde(default)]
    pub policies: Vec<PolicyRule>,
    /// Role assignments.
    #[serde(default)]
    pub role_links: Vec<RoleLink>,
}

fn default_guard() -> String {
    DEFAULT_GUARD.to_string()
}
