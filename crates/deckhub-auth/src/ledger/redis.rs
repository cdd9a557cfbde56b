//! Redis-backed rotation ledger for multi-node deployments.

#[cfg(feature = "redis-ledger")]
mod implementation {
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use redis::AsyncCommands;
    use tracing::{error, info};

    use deckhub_core::error::AppError;
    use deckhub_core::result::AppResult;
    use deckhub_core::traits::RotationLedger;
    use deckhub_core::types::RotationId;

    /// Lua script for atomic consumption.
    ///
    /// KEYS[1] = rotation key
    /// ARGV[1] = expiry as unix seconds
    ///
    /// Returns:
    ///   1 = consumed by this call
    ///   0 = already consumed
    const CONSUME_SCRIPT: &str = r#"
        if redis.call('SET', KEYS[1], '1', 'NX', 'EXAT', ARGV[1]) then
            return 1
        end
        return 0
    "#;

    /// Rotation ledger storing one expiring key per consumed id.
    ///
    /// Redis expires keys itself, so `purge_expired` has nothing to do.
    #[derive(Clone)]
    pub struct RedisRotationLedger {
        /// Redis connection manager.
        pool: redis::aio::ConnectionManager,
        /// Key prefix for rotation ids.
        prefix: String,
    }

    impl std::fmt::Debug for RedisRotationLedger {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("RedisRotationLedger")
                .field("prefix", &self.prefix)
                .finish()
        }
    }

    impl RedisRotationLedger {
        /// Connects to Redis.
        pub async fn new(redis_url: &str, prefix: &str) -> Result<Self, AppError> {
            let client = redis::Client::open(redis_url)
                .map_err(|e| AppError::ledger(format!("Redis connection failed: {e}")))?;

            let pool = client
                .get_connection_manager()
                .await
                .map_err(|e| AppError::ledger(format!("Redis connection manager failed: {e}")))?;

            info!(prefix = %prefix, "Redis rotation ledger initialized");

            Ok(Self {
                pool,
                prefix: prefix.to_string(),
            })
        }

        fn key(&self, id: &RotationId) -> String {
            format!("{}{}", self.prefix, id)
        }
    }

    #[async_trait]
    impl RotationLedger for RedisRotationLedger {
        async fn consume(&self, id: RotationId, expires_at: DateTime<Utc>) -> AppResult<bool> {
            let mut conn = self.pool.clone();

            let result: i64 = redis::Script::new(CONSUME_SCRIPT)
                .key(self.key(&id))
                .arg(expires_at.timestamp())
                .invoke_async(&mut conn)
                .await
                .map_err(|e| AppError::ledger(format!("Redis Lua consume failed: {e}")))?;

            match result {
                1 => Ok(true),
                0 => Ok(false),
                other => {
                    error!(result = other, "Unexpected Lua script result");
                    Err(AppError::ledger(format!(
                        "Unexpected rotation consume result: {other}"
                    )))
                }
            }
        }

        async fn is_consumed(&self, id: &RotationId) -> AppResult<bool> {
            let mut conn = self.pool.clone();
            conn.exists(self.key(id))
                .await
                .map_err(|e| AppError::ledger(format!("Redis EXISTS failed: {e}")))
        }

        async fn purge_expired(&self, _now: DateTime<Utc>) -> AppResult<u64> {
            Ok(0)
        }

        async fn health_check(&self) -> AppResult<bool> {
            let mut conn = self.pool.clone();
            let pong: String = redis::cmd("PING")
                .query_async(&mut conn)
                .await
                .map_err(|e| AppError::ledger(format!("Redis PING failed: {e}")))?;
            Ok(pong == "PONG")
        }
    }
}

#[cfg(feature = "redis-ledger")]
pub use implementation::RedisRotationLedger;
