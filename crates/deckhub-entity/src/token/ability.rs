//! Capabilities a token may carry.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A capability gating which operations a token can authorize.
///
/// The set is closed: every endpoint declares one of these statically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Ability {
    /// Perform ordinary authenticated API calls.
    AccessApi,
    /// Redeem a refresh token for a new access token.
    IssueAccessToken,
}

impl Ability {
    /// Every ability, in declaration order.
    pub const ALL: [Ability; 2] = [Ability::AccessApi, Ability::IssueAccessToken];

    /// Return the default wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AccessApi => "access-api",
            Self::IssueAccessToken => "issue-access-token",
        }
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Ability {
    type Err = deckhub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|ability| ability.as_str() == s)
            .ok_or_else(|| deckhub_core::AppError::validation(format!("Unknown ability: '{s}'")))
    }
}
