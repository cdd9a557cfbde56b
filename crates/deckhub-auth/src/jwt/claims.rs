//! JWT claims structure shared by access and refresh tokens.

use chrono::DateTime;
use serde::{Deserialize, Serialize};

use deckhub_core::types::{RotationId, UserId};
use deckhub_entity::token::{Token, TokenKind};

use super::abilities::AbilityMap;

/// JWT claims payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID).
    pub sub: UserId,
    /// Ability wire names, in canonical order.
    pub abilities: Vec<String>,
    /// Token type: "access" or "refresh".
    pub token_type: TokenKind,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Rotation ID, refresh tokens only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rid: Option<RotationId>,
}

impl Claims {
    /// Builds claims from a token, naming abilities through `names`.
    pub fn from_token(token: &Token, names: &AbilityMap) -> Self {
        Self {
            sub: token.subject,
            abilities: token
                .abilities
                .iter()
                .map(|ability| names.name(*ability).to_string())
                .collect(),
            token_type: token.kind,
            iat: token.issued_at.timestamp(),
            exp: token.expires_at.timestamp(),
            rid: token.rotation_id,
        }
    }

    /// Rebuilds the token, rejecting unknown ability names, out-of-range
    /// timestamps and violated token invariants.
    pub fn into_token(self, names: &AbilityMap) -> Result<Token, String> {
        let abilities = self
            .abilities
            .iter()
            .map(|name| {
                names
                    .parse(name)
                    .ok_or_else(|| format!("unknown ability '{name}'"))
            })
            .collect::<Result<_, _>>()?;

        let issued_at = DateTime::from_timestamp(self.iat, 0)
            .ok_or_else(|| format!("iat out of range: {}", self.iat))?;
        let expires_at = DateTime::from_timestamp(self.exp, 0)
            .ok_or_else(|| format!("exp out of range: {}", self.exp))?;

        let token = Token {
            subject: self.sub,
            abilities,
            kind: self.token_type,
            issued_at,
            expires_at,
            rotation_id: self.rid,
        };
        token.check_invariants()?;
        Ok(token)
    }
}
