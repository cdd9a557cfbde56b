//! Rotation ledger trait for refresh-token replay protection.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::result::AppResult;
use crate::types::id::RotationId;

/// Records refresh-token rotation ids that have been redeemed or revoked.
///
/// Implementations must make [`consume`](RotationLedger::consume) an atomic
/// check-and-set: when two callers race on the same id, exactly one observes
/// `true`. Two implementations are provided in `deckhub-auth`:
/// - In-memory (DashMap entry lock)
/// - Redis (`SET NX EX`)
#[async_trait]
pub trait RotationLedger: Send + Sync + std::fmt::Debug + 'static {
    /// Marks `id` as consumed until `expires_at`.
    ///
    /// Returns `true` if this call consumed the id, `false` if it had
    /// already been consumed.
    async fn consume(&self, id: RotationId, expires_at: DateTime<Utc>) -> AppResult<bool>;

    /// Checks whether `id` has been consumed.
    async fn is_consumed(&self, id: &RotationId) -> AppResult<bool>;

    /// Drops every entry whose refresh token expired at or before `now`.
    ///
    /// Returns the number of entries removed.
    async fn purge_expired(&self, now: DateTime<Utc>) -> AppResult<u64>;

    /// Check that the ledger backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}
