//! Consumed refresh-token rotation ids.
//!
//! The ledger is the only mutable shared state on the server side. Both
//! backends make `consume` an atomic check-and-set.

pub mod cleanup;
pub mod memory;
pub mod redis;

pub use cleanup::LedgerCleanup;
pub use memory::MemoryRotationLedger;
#[cfg(feature = "redis-ledger")]
pub use self::redis::RedisRotationLedger;

use std::sync::Arc;

use tracing::info;

use deckhub_core::config::{LedgerBackend, LedgerConfig};
use deckhub_core::error::AppError;
use deckhub_core::result::AppResult;
use deckhub_core::traits::RotationLedger;

/// Builds the ledger selected by configuration and checks it is reachable.
pub async fn from_config(config: &LedgerConfig) -> AppResult<Arc<dyn RotationLedger>> {
    let ledger = build(config).await?;
    if !ledger.health_check().await? {
        return Err(AppError::ledger(format!(
            "{} rotation ledger failed its health check",
            config.backend
        )));
    }
    info!(backend = %config.backend, "Rotation ledger ready");
    Ok(ledger)
}

async fn build(config: &LedgerConfig) -> AppResult<Arc<dyn RotationLedger>> {
    match config.backend {
        LedgerBackend::Memory => Ok(Arc::new(MemoryRotationLedger::new())),
        #[cfg(feature = "redis-ledger")]
        LedgerBackend::Redis => {
            let ledger = RedisRotationLedger::new(&config.redis_url, &config.key_prefix).await?;
            Ok(Arc::new(ledger))
        }
        #[cfg(not(feature = "redis-ledger"))]
        LedgerBackend::Redis => Err(AppError::configuration(
            "Redis ledger requested but the `redis-ledger` feature is disabled",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deckhub_core::types::RotationId;

    #[tokio::test]
    async fn test_from_config_builds_healthy_memory_ledger() {
        let ledger = from_config(&LedgerConfig::default()).await.unwrap();
        let id = RotationId::new();
        let expires_at = chrono::Utc::now() + chrono::Duration::days(1);
        assert!(ledger.consume(id, expires_at).await.unwrap());
        assert!(ledger.is_consumed(&id).await.unwrap());
    }
}
