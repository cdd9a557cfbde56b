//! Rotation ledger configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Longest accepted interval between ledger purges (1 day).
pub const MAX_CLEANUP_INTERVAL_SECONDS: u64 = 86_400;

/// Where consumed refresh-token rotation ids are recorded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Backend: `"memory"` for single-node, `"redis"` for shared state.
    #[serde(default)]
    pub backend: LedgerBackend,
    /// Redis connection URL (used when `backend = "redis"`).
    #[serde(default = "default_redis_url")]
    pub redis_url: String,
    /// Key prefix for consumed rotation ids in Redis.
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
    /// Interval between purges of expired rotation ids, in seconds.
    #[serde(default = "default_cleanup_interval")]
    pub cleanup_interval_seconds: u64,
}

/// Ledger backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LedgerBackend {
    /// In-process ledger.
    #[default]
    Memory,
    /// Redis-backed ledger.
    Redis,
}

impl std::fmt::Display for LedgerBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LedgerBackend::Memory => write!(f, "memory"),
            LedgerBackend::Redis => write!(f, "redis"),
        }
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            backend: LedgerBackend::default(),
            redis_url: default_redis_url(),
            key_prefix: default_key_prefix(),
            cleanup_interval_seconds: default_cleanup_interval(),
        }
    }
}

impl LedgerConfig {
    /// Rejects a purge interval outside `1..=MAX_CLEANUP_INTERVAL_SECONDS`.
    pub fn validate(&self) -> Result<(), AppError> {
        if !(1..=MAX_CLEANUP_INTERVAL_SECONDS).contains(&self.cleanup_interval_seconds) {
            return Err(AppError::configuration(format!(
                "ledger.cleanup_interval_seconds must be between 1 and {}, got {}",
                MAX_CLEANUP_INTERVAL_SECONDS, self.cleanup_interval_seconds
            )));
        }
        Ok(())
    }

    /// Interval between purges, clamped to the accepted range.
    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(
            self.cleanup_interval_seconds
                .clamp(1, MAX_CLEANUP_INTERVAL_SECONDS),
        )
    }
}

fn default_redis_url() -> String {
    "redis://127.0.0.1:6379".to_string()
}

fn default_key_prefix() -> String {
    "deckhub:rotation:".to_string()
}

fn default_cleanup_interval() -> u64 {
    300
}
