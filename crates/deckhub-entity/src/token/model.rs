//! Decoded token payload.

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use deckhub_core::types::{RotationId, UserId};

use super::ability::Ability;

/// Distinguishes access tokens from refresh tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Short-lived token for API requests.
    Access,
    /// Long-lived token for obtaining new access tokens.
    Refresh,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Access => write!(f, "access"),
            TokenKind::Refresh => write!(f, "refresh"),
        }
    }
}

/// An authenticated, capability-scoped token.
///
/// Timestamps have whole-second precision so that a token survives the wire
/// form unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The user this token authenticates.
    pub subject: UserId,
    /// Capabilities fixed at issuance.
    pub abilities: BTreeSet<Ability>,
    /// Access or refresh.
    pub kind: TokenKind,
    /// When the token was issued.
    pub issued_at: DateTime<Utc>,
    /// When the token stops being valid.
    pub expires_at: DateTime<Utc>,
    /// One-time identifier, present on refresh tokens only.
    pub rotation_id: Option<RotationId>,
}

impl Token {
    /// Builds an access token carrying `{AccessApi}`.
    pub fn access(subject: UserId, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        let issued_at = issued_at.trunc_subsecs(0);
        Self {
            subject,
            abilities: BTreeSet::from([Ability::AccessApi]),
            kind: TokenKind::Access,
            issued_at,
            expires_at: issued_at + ttl,
            rotation_id: None,
        }
    }

    /// Builds a refresh token carrying `{IssueAccessToken}` and a rotation id.
    pub fn refresh(
        subject: UserId,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
        rotation_id: RotationId,
    ) -> Self {
        Self {
            subject,
            abilities: BTreeSet::from([Ability::IssueAccessToken]),
            kind: TokenKind::Refresh,
            issued_at: issued_at.trunc_subsecs(0),
            expires_at: expires_at.trunc_subsecs(0),
            rotation_id: Some(rotation_id),
        }
    }

    /// Checks the structural invariants of a token.
    ///
    /// Access tokens carry exactly `{AccessApi}` and no rotation id; refresh
    /// tokens carry exactly `{IssueAccessToken}` and a rotation id; the
    /// expiry is strictly after issuance.
    pub fn check_invariants(&self) -> Result<(), String> {
        if self.expires_at <= self.issued_at {
            return Err("expiry must be after issuance".to_string());
        }
        let expected = match self.kind {
            TokenKind::Access => Ability::AccessApi,
            TokenKind::Refresh => Ability::IssueAccessToken,
        };
        if self.abilities.len() != 1 || !self.abilities.contains(&expected) {
            return Err(format!("{} token must carry only '{expected}'", self.kind));
        }
        match (self.kind, self.rotation_id) {
            (TokenKind::Access, Some(_)) => {
                Err("access token must not carry a rotation id".to_string())
            }
            (TokenKind::Refresh, None) => Err("refresh token must carry a rotation id".to_string()),
            _ => Ok(()),
        }
    }

    /// Whether the token carries `ability`.
    pub fn has_ability(&self, ability: Ability) -> bool {
        self.abilities.contains(&ability)
    }

    /// Whether the token is expired at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Remaining lifetime at `now` (zero once expired).
    pub fn remaining_at(&self, now: DateTime<Utc>) -> Duration {
        (self.expires_at - now).max(Duration::zero())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_token_invariants() {
        let token = Token::access(UserId::new(), Utc::now(), Duration::minutes(15));
        assert!(token.check_invariants().is_ok());
        assert!(token.has_ability(Ability::AccessApi));
        assert!(!token.has_ability(Ability::IssueAccessToken));
        assert_eq!(token.issued_at.timestamp_subsec_nanos(), 0);
    }

    #[test]
    fn test_access_token_with_refresh_ability_is_rejected() {
        let mut token = Token::access(UserId::new(), Utc::now(), Duration::minutes(15));
        token.abilities.insert(Ability::IssueAccessToken);
        assert!(token.check_invariants().is_err());
    }

    #[test]
    fn test_refresh_token_requires_rotation_id() {
        let now = Utc::now();
        let mut token = Token::refresh(
            UserId::new(),
            now,
            now + Duration::days(7),
            RotationId::new(),
        );
        assert!(token.check_invariants().is_ok());
        token.rotation_id = None;
        assert!(token.check_invariants().is_err());
    }

    #[test]
    fn test_expiry_boundary() {
        let now = Utc::now();
        let token = Token::access(UserId::new(), now, Duration::minutes(1));
        assert!(!token.is_expired_at(token.expires_at - Duration::seconds(1)));
        assert!(token.is_expired_at(token.expires_at));
        assert_eq!(token.remaining_at(token.expires_at + Duration::minutes(3)), Duration::zero());
    }
}
