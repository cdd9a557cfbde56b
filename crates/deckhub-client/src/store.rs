//! Persisted refresh token.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use deckhub_core::result::AppResult;
use deckhub_core::traits::Clock;

/// Where the client keeps its refresh token between sessions.
#[async_trait]
pub trait RefreshTokenStore: Send + Sync + std::fmt::Debug + 'static {
    /// Returns the stored token, if any and not yet expired.
    async fn load(&self) -> AppResult<Option<String>>;

    /// Replaces the stored token.
    async fn save(&self, token: &str, expires_at: DateTime<Utc>) -> AppResult<()>;

    /// Removes the stored token.
    async fn delete(&self) -> AppResult<()>;
}

/// Cookie-like in-memory store that forgets its token once expired.
#[derive(Debug)]
pub struct MemoryRefreshTokenStore {
    /// Token and its expiry.
    slot: Mutex<Option<(String, DateTime<Utc>)>>,
    /// Time source for expiry.
    clock: Arc<dyn Clock>,
}

impl MemoryRefreshTokenStore {
    /// Creates an empty store.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            slot: Mutex::new(None),
            clock,
        }
    }
}

#[async_trait]
impl RefreshTokenStore for MemoryRefreshTokenStore {
    async fn load(&self) -> AppResult<Option<String>> {
        let mut slot = self.slot.lock().await;
        if let Some((_, expires_at)) = slot.as_ref() {
            if *expires_at <= self.clock.now() {
                *slot = None;
            }
        }
        Ok(slot.as_ref().map(|(token, _)| token.clone()))
    }

    async fn save(&self, token: &str, expires_at: DateTime<Utc>) -> AppResult<()> {
        *self.slot.lock().await = Some((token.to_string(), expires_at));
        Ok(())
    }

    async fn delete(&self) -> AppResult<()> {
        *self.slot.lock().await = None;
        Ok(())
    }
}
