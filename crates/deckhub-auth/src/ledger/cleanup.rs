//! Periodic purge of expired rotation ids.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{error, info};

use deckhub_core::config::LedgerConfig;
use deckhub_core::error::AppError;
use deckhub_core::traits::{Clock, RotationLedger};

/// Drops consumed rotation ids once the refresh token that carried them has
/// expired; such ids can never be replayed.
#[derive(Clone)]
pub struct LedgerCleanup {
    /// Ledger to purge.
    ledger: Arc<dyn RotationLedger>,
    /// Time source.
    clock: Arc<dyn Clock>,
    /// Interval between purges.
    interval: Duration,
}

impl std::fmt::Debug for LedgerCleanup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LedgerCleanup")
            .field("interval", &self.interval)
            .finish()
    }
}

impl LedgerCleanup {
    /// Creates a cleanup handler.
    pub fn new(ledger: Arc<dyn RotationLedger>, clock: Arc<dyn Clock>, interval: Duration) -> Self {
        Self {
            ledger,
            clock,
            interval,
        }
    }

    /// Creates a cleanup handler ticking at `ledger.cleanup_interval_seconds`.
    pub fn from_config(
        config: &LedgerConfig,
        ledger: Arc<dyn RotationLedger>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self::new(ledger, clock, config.cleanup_interval())
    }

    /// Interval between purges.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Runs a single purge. Returns the number of ids dropped.
    pub async fn run_cleanup(&self) -> Result<u64, AppError> {
        let removed = self.ledger.purge_expired(self.clock.now()).await?;
        if removed > 0 {
            info!(removed, "Rotation ledger cleanup completed");
        }
        Ok(removed)
    }

    /// Purges on every tick until `shutdown` flips to `true`.
    ///
    /// Failures are logged and the loop keeps going.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Err(e) = self.run_cleanup().await {
                        error!(error = %e, "Rotation ledger cleanup failed");
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        info!("Rotation ledger cleanup stopped");
                        break;
                    }
                }
            }
        }
    }

    /// Spawns [`run`](Self::run) onto the current runtime.
    pub fn spawn(self, shutdown: watch::Receiver<bool>) -> tokio::task::JoinHandle<()> {
        tokio::spawn(self.run(shutdown))
    }
}
