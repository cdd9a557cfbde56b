//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use deckhub_core::types::{OrganizationId, UserId};

use super::role::UserRole;

/// A registered user as seen by the credential store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Login email address.
    pub email: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Platform role.
    pub role: UserRole,
    /// Organization the user belongs to, if any.
    pub organization_id: Option<OrganizationId>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
}
