//! Account session state used as the single-session fence.

use async_trait::async_trait;

use crate::result::AppResult;

/// Storage for the per-principal `refresh_time` marker.
///
/// `refresh_time` is expressed in whole seconds since the Unix epoch and is
/// overwritten every time a token is issued for the principal. Writes are
/// last-writer-wins and a read must observe the most recently completed write.
#[async_trait]
pub trait AccountStore: Send + Sync + std::fmt::Debug + 'static {
    /// Returns the principal's current `refresh_time`, or `None` if the
    /// principal has never been issued a token.
    async fn refresh_time(&self, principal: &str) -> AppResult<Option<i64>>;

    /// Records a new `refresh_time` for the principal.
    async fn record_refresh_time(&self, principal: &str, refresh_time: i64) -> AppResult<()>;

    /// Atomically moves the principal's `refresh_time` to
    /// `max(now, previous + 1)` and returns the stored value.
    ///
    /// Concurrent calls for the same principal must yield distinct, strictly
    /// increasing values.
    async fn advance_refresh_time(&self, principal: &str, now: i64) -> AppResult<i64>;
}
