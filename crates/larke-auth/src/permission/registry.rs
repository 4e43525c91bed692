//! Named policy engine guards.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::info;

use larke_core::config::PermissionConfig;
use larke_core::error::AppError;
use larke_core::result::AppResult;
use larke_core::traits::PolicyEngine;

use super::manager::PermissionManager;
use super::memory::MemoryPolicyEngine;

/// Holds one policy engine per guard name.
///
/// Guards are isolated: each name maps to its own engine instance. The
/// default guard is a configuration value, resolved when a caller passes no
/// name.
#[derive(Debug)]
pub struct EnforcerRegistry {
    /// Guard resolved when none is named.
    default_guard: String,
    /// Guard name → engine.
    engines: DashMap<String, Arc<dyn PolicyEngine>>,
}

impl EnforcerRegistry {
    /// Creates an empty registry with the given default guard name.
    pub fn new(default_guard: impl Into<String>) -> Self {
        Self {
            default_guard: default_guard.into(),
            engines: DashMap::new(),
        }
    }

    /// Builds an in-memory engine for the default guard and every configured
    /// guard, seeded from configuration.
    pub fn from_config(config: &PermissionConfig) -> Self {
        let registry = Self::new(config.default_guard.clone());
        for name in config.guard_names() {
            let engine = match config.guards.get(&name) {
                Some(seed) => MemoryPolicyEngine::from_seed(seed),
                None => MemoryPolicyEngine::new(),
            };
            registry.register(name, Arc::new(engine));
        }
        registry
    }

    /// The default guard name.
    pub fn default_guard(&self) -> &str {
        &self.default_guard
    }

    /// Registers (or replaces) the engine for a guard.
    pub fn register(&self, name: impl Into<String>, engine: Arc<dyn PolicyEngine>) {
        let name = name.into();
        info!(guard = %name, "Permission guard registered");
        self.engines.insert(name, engine);
    }

    /// Registered guard names, sorted.
    pub fn guard_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.engines.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    /// Resolves the engine for `name`, or the default guard for `None`/empty.
    pub fn engine(&self, name: Option<&str>) -> AppResult<Arc<dyn PolicyEngine>> {
        let name = self.resolve_name(name);
        self.engines
            .get(name)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| AppError::not_found(format!("Unknown permission guard '{name}'")))
    }

    /// Resolves a [`PermissionManager`] for `name`, or the default guard.
    pub fn manager(&self, name: Option<&str>) -> AppResult<PermissionManager> {
        let engine = self.engine(name)?;
        Ok(PermissionManager::new(self.resolve_name(name), engine))
    }

    fn resolve_name<'a>(&'a self, name: Option<&'a str>) -> &'a str {
        match name {
            Some(n) if !n.is_empty() => n,
            _ => &self.default_guard,
        }
    }
}
