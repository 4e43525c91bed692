//! In-memory account session store for single-node deployments and tests.

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::debug;

use larke_core::result::AppResult;
use larke_core::traits::AccountStore;

/// Keeps each principal's `refresh_time` in a concurrent map.
///
/// Writes replace the previous value unconditionally (last writer wins) and
/// reads observe the latest completed write.
#[derive(Debug, Default)]
pub struct MemoryAccountStore {
    /// Principal → refresh time in seconds.
    refresh_times: DashMap<String, i64>,
}

impl MemoryAccountStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets the principal's session marker.
    pub fn forget(&self, principal: &str) -> bool {
        self.refresh_times.remove(principal).is_some()
    }

    /// Number of principals with a recorded session.
    pub fn len(&self) -> usize {
        self.refresh_times.len()
    }

    /// Whether no principal has a recorded session.
    pub fn is_empty(&self) -> bool {
        self.refresh_times.is_empty()
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn refresh_time(&self, principal: &str) -> AppResult<Option<i64>> {
        Ok(self.refresh_times.get(principal).map(|entry| *entry.value()))
    }

    async fn record_refresh_time(&self, principal: &str, refresh_time: i64) -> AppResult<()> {
        self.refresh_times
            .insert(principal.to_string(), refresh_time);
        debug!(principal = %principal, refresh_time, "Refresh time recorded");
        Ok(())
    }

    async fn advance_refresh_time(&self, principal: &str, now: i64) -> AppResult<i64> {
        let mut entry = self
            .refresh_times
            .entry(principal.to_string())
            .or_insert(i64::MIN);
        let refresh_time = match entry.value().checked_add(1) {
            Some(next) if next > now => next,
            _ => now,
        };
        *entry.value_mut() = refresh_time;
        drop(entry);

        debug!(principal = %principal, refresh_time, "Refresh time advanced");
        Ok(refresh_time)
    }
}
