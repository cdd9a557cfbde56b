//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::Utc;

use deckhub_auth::credential::MemoryCredentialStore;
use deckhub_auth::ledger::MemoryRotationLedger;
use deckhub_auth::password::PasswordHasher;
use deckhub_auth::policy::AccessGate;
use deckhub_auth::token::TokenService;
use deckhub_client::{AuthApi, LocalAuthApi, MemoryRefreshTokenStore, SessionGuard};
use deckhub_core::config::AppConfig;
use deckhub_core::traits::ManualClock;
use deckhub_entity::token::TokenPair;
use deckhub_entity::user::{User, UserRole};

/// Password every test user is registered with
pub const PASSWORD: &str = "password123";

/// In-process DeckHub with a controllable clock
pub struct TestApp {
    /// Configuration the app was built from
    pub config: AppConfig,
    /// Test clock shared by server and client
    pub clock: Arc<ManualClock>,
    /// Registered users
    pub credentials: Arc<MemoryCredentialStore>,
    /// Rotation ledger
    pub ledger: Arc<MemoryRotationLedger>,
    /// Token lifecycle manager
    pub tokens: Arc<TokenService>,
    /// Per-request gate
    pub gate: AccessGate,
}

impl TestApp {
    /// Create a new test application
    pub fn new() -> Self {
        let config = AppConfig::default();
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let credentials = Arc::new(MemoryCredentialStore::new(
            PasswordHasher::with_costs(64, 1, 1).expect("argon2 params"),
            config.auth.password_min_length,
        ));
        let ledger = Arc::new(MemoryRotationLedger::new());
        let tokens = Arc::new(TokenService::new(
            &config.auth,
            ledger.clone(),
            credentials.clone(),
            clock.clone(),
        ));
        let gate = AccessGate::new(tokens.clone());

        Self {
            config,
            clock,
            credentials,
            ledger,
            tokens,
            gate,
        }
    }

    /// Register a user with [`PASSWORD`]
    pub async fn create_user(&self, email: &str, role: UserRole) -> User {
        self.credentials
            .register(email, PASSWORD, role)
            .await
            .expect("Failed to register test user")
    }

    /// Log a user in and return the issued pair
    pub async fn login(&self, email: &str) -> TokenPair {
        self.tokens
            .login(email, PASSWORD)
            .await
            .expect("Failed to log in test user")
            .tokens
    }

    /// Client guard talking to this app in-process
    pub fn guard(&self) -> (Arc<SessionGuard>, Arc<MemoryRefreshTokenStore>) {
        self.guard_with(Arc::new(LocalAuthApi::new(self.tokens.clone())))
    }

    /// Client guard over a custom transport
    pub fn guard_with(
        &self,
        api: Arc<dyn AuthApi>,
    ) -> (Arc<SessionGuard>, Arc<MemoryRefreshTokenStore>) {
        let store = Arc::new(MemoryRefreshTokenStore::new(self.clock.clone()));
        let guard = SessionGuard::new(&self.config.session, api, store.clone(), self.clock.clone());
        (Arc::new(guard), store)
    }
}
