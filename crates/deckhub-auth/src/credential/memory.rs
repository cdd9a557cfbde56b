//! In-memory credential store backed by Argon2id hashes.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::info;

use deckhub_core::error::AppError;
use deckhub_core::result::AppResult;
use deckhub_core::types::{OrganizationId, UserId};
use deckhub_entity::user::{User, UserRole};

use crate::password::PasswordHasher;

use super::store::CredentialStore;

/// Credential store keeping users in process memory.
///
/// Suitable for tests, the CLI, and single-node demos.
#[derive(Debug)]
pub struct MemoryCredentialStore {
    /// Users keyed by id.
    users: RwLock<HashMap<UserId, User>>,
    /// Password hasher.
    hasher: PasswordHasher,
    /// Minimum accepted password length.
    password_min_length: usize,
}

impl MemoryCredentialStore {
    /// Creates an empty store.
    pub fn new(hasher: PasswordHasher, password_min_length: usize) -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            hasher,
            password_min_length,
        }
    }

    /// Registers a new user.
    ///
    /// Emails are matched case-insensitively and must be unique.
    pub async fn register(&self, email: &str, password: &str, role: UserRole) -> AppResult<User> {
        let email = email.trim().to_lowercase();
        if email.is_empty() || !email.contains('@') {
            return Err(AppError::validation(format!("Invalid email address: '{email}'")));
        }
        if password.chars().count() < self.password_min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters",
                self.password_min_length
            )));
        }

        let password_hash = self.hasher.hash_password(password)?;

        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == email) {
            return Err(AppError::conflict(format!("Email already registered: '{email}'")));
        }

        let user = User {
            id: UserId::new(),
            email,
            password_hash,
            role,
            organization_id: None,
            created_at: Utc::now(),
        };
        users.insert(user.id, user.clone());
        info!(user_id = %user.id, role = %user.role, "User registered");
        Ok(user)
    }

    /// Assigns a user to an organization.
    pub async fn set_organization(
        &self,
        id: UserId,
        organization: Option<OrganizationId>,
    ) -> AppResult<()> {
        let mut users = self.users.write().await;
        let user = users
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))?;
        user.organization_id = organization;
        Ok(())
    }

    /// Removes a user. Returns `false` if the user did not exist.
    pub async fn remove(&self, id: UserId) -> bool {
        let removed = self.users.write().await.remove(&id).is_some();
        if removed {
            info!(user_id = %id, "User removed");
        }
        removed
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn find_user_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let email = email.trim().to_lowercase();
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn verify_password(&self, user: &User, plaintext: &str) -> AppResult<bool> {
        self.hasher.verify_password(plaintext, &user.password_hash)
    }
}
