//! Issued token strings returned to clients.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An access/refresh token pair returned on login and on refresh.
///
/// Field names on the wire follow the platform's JSON contract
/// (`accessToken`, `accessTokenExpiration`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Short-lived access token, sent as `Authorization: Bearer <token>`.
    #[serde(rename = "accessToken")]
    pub access_token: String,
    /// Access token expiration instant.
    #[serde(rename = "accessTokenExpiration")]
    pub access_expires_at: DateTime<Utc>,
    /// Long-lived refresh token, persisted by the client.
    #[serde(rename = "refreshToken")]
    pub refresh_token: String,
    /// Refresh token expiration instant.
    #[serde(rename = "refreshTokenExpiration")]
    pub refresh_expires_at: DateTime<Utc>,
}
