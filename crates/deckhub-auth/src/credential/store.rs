//! Credential store trait.

use async_trait::async_trait;

use deckhub_core::result::AppResult;
use deckhub_core::types::UserId;
use deckhub_entity::user::User;

/// Persists user records; consulted by the token lifecycle, never owned by it.
#[async_trait]
pub trait CredentialStore: Send + Sync + std::fmt::Debug + 'static {
    /// Looks up a user by id.
    async fn find_user_by_id(&self, id: UserId) -> AppResult<Option<User>>;

    /// Looks up a user by login email.
    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Checks `plaintext` against the user's stored password.
    async fn verify_password(&self, user: &User, plaintext: &str) -> AppResult<bool>;
}
