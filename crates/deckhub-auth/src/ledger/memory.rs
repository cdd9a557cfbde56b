//! In-memory rotation ledger for single-node deployments.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::debug;

use deckhub_core::result::AppResult;
use deckhub_core::traits::RotationLedger;
use deckhub_core::types::RotationId;

/// Rotation ledger keyed by id, holding each refresh token's expiry.
///
/// `consume` takes the shard lock for the id through the entry API, so the
/// check and the insert happen in one critical section.
#[derive(Debug, Clone, Default)]
pub struct MemoryRotationLedger {
    /// Consumed ids mapped to the expiry of the token that carried them.
    consumed: Arc<DashMap<RotationId, DateTime<Utc>>>,
}

impl MemoryRotationLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of ids currently held.
    pub fn len(&self) -> usize {
        self.consumed.len()
    }

    /// Whether the ledger holds no ids.
    pub fn is_empty(&self) -> bool {
        self.consumed.is_empty()
    }
}

#[async_trait]
impl RotationLedger for MemoryRotationLedger {
    async fn consume(&self, id: RotationId, expires_at: DateTime<Utc>) -> AppResult<bool> {
        match self.consumed.entry(id) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(expires_at);
                Ok(true)
            }
        }
    }

    async fn is_consumed(&self, id: &RotationId) -> AppResult<bool> {
        Ok(self.consumed.contains_key(id))
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let mut removed = 0u64;
        self.consumed.retain(|_, expires_at| {
            let keep = *expires_at > now;
            if !keep {
                removed += 1;
            }
            keep
        });
        debug!(removed, remaining = self.consumed.len(), "Purged expired rotation ids");
        Ok(removed)
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}
