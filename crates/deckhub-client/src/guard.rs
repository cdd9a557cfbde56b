//! Session guard.
//!
//! Holds the current access token and makes sure callers only ever see a
//! token that is valid beyond the refresh skew. Refreshes are single-flight:
//! a `tokio::sync::Mutex` serializes them and a generation counter lets
//! callers that queued behind a completed refresh return its outcome instead
//! of refreshing again.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use deckhub_core::config::SessionConfig;
use deckhub_core::traits::Clock;
use deckhub_entity::token::TokenPair;

use crate::api::AuthApi;
use crate::store::RefreshTokenStore;

/// Observable session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// No usable access token.
    Unauthenticated,
    /// Holding an access token.
    Authenticated,
    /// A refresh is in flight.
    Refreshing,
}

/// Cached access token.
#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

#[derive(Debug)]
struct SessionState {
    token: Option<CachedToken>,
    status: SessionStatus,
    /// Bumped whenever the cached token is replaced or cleared.
    generation: u64,
}

impl SessionState {
    fn set(&mut self, token: Option<CachedToken>) {
        self.status = if token.is_some() {
            SessionStatus::Authenticated
        } else {
            SessionStatus::Unauthenticated
        };
        self.token = token;
        self.generation += 1;
    }
}

/// Client-side holder of the session's tokens.
#[derive(Debug)]
pub struct SessionGuard {
    api: Arc<dyn AuthApi>,
    store: Arc<dyn RefreshTokenStore>,
    clock: Arc<dyn Clock>,
    /// Refresh this long before the access token expires.
    skew: Duration,
    state: RwLock<SessionState>,
    /// Held for the duration of a refresh.
    refresh_lock: Mutex<()>,
}

impl SessionGuard {
    /// Creates an unauthenticated guard.
    pub fn new(
        config: &SessionConfig,
        api: Arc<dyn AuthApi>,
        store: Arc<dyn RefreshTokenStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            api,
            store,
            clock,
            skew: config.refresh_skew(),
            state: RwLock::new(SessionState {
                token: None,
                status: SessionStatus::Unauthenticated,
                generation: 0,
            }),
            refresh_lock: Mutex::new(()),
        }
    }

    /// Installs a freshly issued pair (after login or registration).
    pub async fn login(&self, pair: TokenPair) {
        if let Err(e) = self
            .store
            .save(&pair.refresh_token, pair.refresh_expires_at)
            .await
        {
            warn!(error = %e, "Failed to persist refresh token");
        }
        self.state.write().await.set(Some(CachedToken {
            access_token: pair.access_token,
            expires_at: pair.access_expires_at,
        }));
        info!("Session established");
    }

    /// Returns whether a usable access token is held, refreshing if needed.
    pub async fn ensure_valid(&self) -> bool {
        let observed = {
            let state = self.state.read().await;
            match &state.token {
                None => return false,
                Some(token) if self.is_fresh(token) => return true,
                Some(_) => state.generation,
            }
        };
        self.refresh_once(observed).await
    }

    /// Attempts to resume a session from the persisted refresh token.
    pub async fn restore(&self) -> bool {
        let observed = {
            let state = self.state.read().await;
            if let Some(token) = &state.token {
                if self.is_fresh(token) {
                    return true;
                }
            }
            state.generation
        };
        self.refresh_once(observed).await
    }

    /// Ends the session. Never fails; a failed revoke is only logged.
    pub async fn logout(&self) {
        let refresh_token = match self.store.load().await {
            Ok(token) => token,
            Err(e) => {
                warn!(error = %e, "Failed to read refresh token during logout");
                None
            }
        };

        self.state.write().await.set(None);
        if let Err(e) = self.store.delete().await {
            warn!(error = %e, "Failed to delete refresh token");
        }

        if let Some(token) = refresh_token {
            if let Err(e) = self.api.revoke(&token).await {
                warn!(error = %e, "Refresh token revocation failed");
            }
        }
        info!("Session ended");
    }

    /// The cached access token, if any. Does not refresh.
    pub async fn access_token(&self) -> Option<String> {
        self.state
            .read()
            .await
            .token
            .as_ref()
            .map(|t| t.access_token.clone())
    }

    /// Ensures validity, then returns the access token to send.
    pub async fn bearer(&self) -> Option<String> {
        if self.ensure_valid().await {
            self.access_token().await
        } else {
            None
        }
    }

    /// Expiry of the cached access token.
    pub async fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.state.read().await.token.as_ref().map(|t| t.expires_at)
    }

    /// Current state.
    pub async fn status(&self) -> SessionStatus {
        self.state.read().await.status
    }

    fn is_fresh(&self, token: &CachedToken) -> bool {
        self.clock.now() + self.skew < token.expires_at
    }

    async fn refresh_once(&self, observed: u64) -> bool {
        let _flight = self.refresh_lock.lock().await;
        {
            let state = self.state.read().await;
            if state.generation != observed {
                debug!("Joining result of a completed refresh");
                return state.token.is_some();
            }
        }
        self.run_refresh(observed).await
    }

    async fn run_refresh(&self, observed: u64) -> bool {
        {
            let mut state = self.state.write().await;
            if state.generation != observed {
                return state.token.is_some();
            }
            state.status = SessionStatus::Refreshing;
        }

        let refresh_token = match self.store.load().await {
            Ok(Some(token)) => token,
            Ok(None) => {
                debug!("No persisted refresh token");
                self.finish_failed(observed).await;
                return false;
            }
            Err(e) => {
                warn!(error = %e, "Failed to read refresh token");
                self.finish_failed(observed).await;
                return false;
            }
        };

        match self.api.refresh(&refresh_token).await {
            Ok(pair) => {
                let mut state = self.state.write().await;
                if state.generation != observed {
                    drop(state);
                    debug!("Session changed during refresh; discarding rotated pair");
                    if let Err(e) = self.api.revoke(&pair.refresh_token).await {
                        warn!(error = %e, "Failed to revoke discarded refresh token");
                    }
                    return false;
                }
                if let Err(e) = self
                    .store
                    .save(&pair.refresh_token, pair.refresh_expires_at)
                    .await
                {
                    warn!(error = %e, "Failed to persist rotated refresh token");
                }
                state.set(Some(CachedToken {
                    access_token: pair.access_token,
                    expires_at: pair.access_expires_at,
                }));
                debug!("Access token refreshed");
                true
            }
            Err(e) => {
                warn!(error = %e, "Token refresh failed");
                if e.is_rejection() {
                    if let Err(e) = self.store.delete().await {
                        warn!(error = %e, "Failed to delete rejected refresh token");
                    }
                }
                self.finish_failed(observed).await;
                false
            }
        }
    }

    /// Clears the session after a failed refresh unless it changed meanwhile.
    async fn finish_failed(&self, observed: u64) {
        let mut state = self.state.write().await;
        if state.generation == observed {
            state.set(None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use deckhub_core::error::AppError;
    use deckhub_core::traits::ManualClock;

    use crate::api::ApiError;
    use crate::store::MemoryRefreshTokenStore;

    #[derive(Debug)]
    struct CountingApi {
        clock: Arc<ManualClock>,
        refreshes: AtomicUsize,
        revokes: AtomicUsize,
        fail_refresh: Option<ApiError>,
        fail_revoke: bool,
    }

    impl CountingApi {
        fn new(clock: Arc<ManualClock>) -> Self {
            Self {
                clock,
                refreshes: AtomicUsize::new(0),
                revokes: AtomicUsize::new(0),
                fail_refresh: None,
                fail_revoke: false,
            }
        }
    }

    #[async_trait]
    impl AuthApi for CountingApi {
        async fn refresh(&self, _refresh_token: &str) -> Result<TokenPair, ApiError> {
            let n = self.refreshes.fetch_add(1, Ordering::SeqCst) + 1;
            tokio::time::sleep(std::time::Duration::from_millis(50)).await;
            if let Some(e) = &self.fail_refresh {
                return Err(e.clone());
            }
            Ok(pair_at(self.clock.now(), &format!("access-{n}"), &format!("refresh-{n}")))
        }

        async fn revoke(&self, _refresh_token: &str) -> Result<(), ApiError> {
            self.revokes.fetch_add(1, Ordering::SeqCst);
            if self.fail_revoke {
                return Err(ApiError::Transport(AppError::external("offline")));
            }
            Ok(())
        }
    }

    fn pair_at(now: DateTime<Utc>, access: &str, refresh: &str) -> TokenPair {
        TokenPair {
            access_token: access.to_string(),
            access_expires_at: now + Duration::minutes(15),
            refresh_token: refresh.to_string(),
            refresh_expires_at: now + Duration::days(7),
        }
    }

    fn guard(
        api: Arc<CountingApi>,
        clock: Arc<ManualClock>,
    ) -> (Arc<SessionGuard>, Arc<MemoryRefreshTokenStore>) {
        let store = Arc::new(MemoryRefreshTokenStore::new(clock.clone()));
        let guard = SessionGuard::new(&SessionConfig::default(), api, store.clone(), clock);
        (Arc::new(guard), store)
    }

    #[tokio::test]
    async fn test_no_token_is_invalid() {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let api = Arc::new(CountingApi::new(clock.clone()));
        let (guard, _) = guard(api.clone(), clock);
        assert!(!guard.ensure_valid().await);
        assert_eq!(guard.status().await, SessionStatus::Unauthenticated);
        assert_eq!(api.refreshes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_fresh_token_needs_no_refresh() {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let api = Arc::new(CountingApi::new(clock.clone()));
        let (guard, _) = guard(api.clone(), clock.clone());
        guard.login(pair_at(clock.now(), "access-0", "refresh-0")).await;

        assert!(guard.ensure_valid().await);
        assert_eq!(guard.access_token().await.as_deref(), Some("access-0"));
        assert_eq!(api.refreshes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_refresh_inside_skew_window() {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let api = Arc::new(CountingApi::new(clock.clone()));
        let (guard, store) = guard(api.clone(), clock.clone());
        guard.login(pair_at(clock.now(), "access-0", "refresh-0")).await;

        // 20s before expiry, inside the default 30s skew
        clock.advance(Duration::minutes(15) - Duration::seconds(20));
        assert!(guard.ensure_valid().await);
        assert_eq!(api.refreshes.load(Ordering::SeqCst), 1);
        assert_eq!(guard.access_token().await.as_deref(), Some("access-1"));
        assert_eq!(store.load().await.unwrap().as_deref(), Some("refresh-1"));
        assert_eq!(guard.status().await, SessionStatus::Authenticated);
    }

    #[tokio::test]
    async fn test_concurrent_callers_share_one_refresh() {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let api = Arc::new(CountingApi::new(clock.clone()));
        let (guard, _) = guard(api.clone(), clock.clone());
        guard.login(pair_at(clock.now(), "access-0", "refresh-0")).await;
        clock.advance(Duration::minutes(16));

        let calls = (0..8).map(|_| {
            let guard = guard.clone();
            tokio::spawn(async move {
                let ok = guard.ensure_valid().await;
                (ok, guard.access_token().await)
            })
        });
        let results = futures::future::join_all(calls).await;

        assert_eq!(api.refreshes.load(Ordering::SeqCst), 1);
        for result in results {
            let (ok, token) = result.unwrap();
            assert!(ok);
            assert_eq!(token.as_deref(), Some("access-1"));
        }
    }

    #[tokio::test]
    async fn test_concurrent_callers_share_one_failure() {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let mut api = CountingApi::new(clock.clone());
        api.fail_refresh = Some(ApiError::Rejected("reused".to_string()));
        let api = Arc::new(api);
        let (guard, store) = guard(api.clone(), clock.clone());
        guard.login(pair_at(clock.now(), "access-0", "refresh-0")).await;
        clock.advance(Duration::minutes(16));

        let calls = (0..5).map(|_| {
            let guard = guard.clone();
            tokio::spawn(async move { guard.ensure_valid().await })
        });
        for result in futures::future::join_all(calls).await {
            assert!(!result.unwrap());
        }
        assert_eq!(api.refreshes.load(Ordering::SeqCst), 1);
        assert_eq!(guard.access_token().await, None);
        assert_eq!(store.load().await.unwrap(), None);
        assert_eq!(guard.status().await, SessionStatus::Unauthenticated);
    }

    #[tokio::test]
    async fn test_transport_failure_keeps_persisted_token() {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let mut api = CountingApi::new(clock.clone());
        api.fail_refresh = Some(ApiError::Transport(AppError::external("offline")));
        let (guard, store) = guard(Arc::new(api), clock.clone());
        guard.login(pair_at(clock.now(), "access-0", "refresh-0")).await;
        clock.advance(Duration::minutes(16));

        assert!(!guard.ensure_valid().await);
        assert_eq!(guard.access_token().await, None);
        assert_eq!(store.load().await.unwrap().as_deref(), Some("refresh-0"));
    }

    #[tokio::test]
    async fn test_restore_from_persisted_token() {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let api = Arc::new(CountingApi::new(clock.clone()));
        let (guard, store) = guard(api.clone(), clock.clone());
        assert!(!guard.restore().await);
        assert_eq!(api.refreshes.load(Ordering::SeqCst), 0);

        store
            .save("refresh-0", clock.now() + Duration::days(7))
            .await
            .unwrap();
        assert!(guard.restore().await);
        assert_eq!(guard.access_token().await.as_deref(), Some("access-1"));
        assert_eq!(api.refreshes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_logout_survives_failed_revoke() {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let mut api = CountingApi::new(clock.clone());
        api.fail_revoke = true;
        let api = Arc::new(api);
        let (guard, store) = guard(api.clone(), clock.clone());
        guard.login(pair_at(clock.now(), "access-0", "refresh-0")).await;

        guard.logout().await;
        assert_eq!(api.revokes.load(Ordering::SeqCst), 1);
        assert_eq!(guard.access_token().await, None);
        assert_eq!(store.load().await.unwrap(), None);
        assert!(!guard.ensure_valid().await);
    }

    #[tokio::test]
    async fn test_logout_during_refresh_discards_result() {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let api = Arc::new(CountingApi::new(clock.clone()));
        let (guard, _) = guard(api.clone(), clock.clone());
        guard.login(pair_at(clock.now(), "access-0", "refresh-0")).await;
        clock.advance(Duration::minutes(16));

        let pending = {
            let guard = guard.clone();
            tokio::spawn(async move { guard.ensure_valid().await })
        };
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        guard.logout().await;

        assert!(!pending.await.unwrap());
        assert_eq!(guard.access_token().await, None);
    }
}
