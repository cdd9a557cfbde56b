//! Authorization outcomes, actions, and requester relations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use deckhub_core::error::AppError;

/// What the requester wants to do with a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// View the resource.
    Read,
    /// Update or delete the resource.
    Write,
}

impl Action {
    /// Both actions.
    pub const ALL: [Action; 2] = [Action::Read, Action::Write];
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Read => write!(f, "read"),
            Action::Write => write!(f, "write"),
        }
    }
}

impl FromStr for Action {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "read" => Ok(Self::Read),
            "write" | "update" | "delete" => Ok(Self::Write),
            _ => Err(AppError::validation(format!(
                "Invalid action: '{s}'. Expected read or write"
            ))),
        }
    }
}

/// How the requester relates to a resource's owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    /// The requester owns the resource.
    Owner,
    /// The requester belongs to the owner's organization.
    OrganizationMember,
    /// Authenticated, but neither owner nor member.
    OtherAuthenticated,
    /// No authenticated requester.
    Anonymous,
}

impl Relation {
    /// Every relation.
    pub const ALL: [Relation; 4] = [
        Relation::Owner,
        Relation::OrganizationMember,
        Relation::OtherAuthenticated,
        Relation::Anonymous,
    ];
}

impl FromStr for Relation {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "owner" => Ok(Self::Owner),
            "member" | "organization_member" => Ok(Self::OrganizationMember),
            "other" | "other_authenticated" => Ok(Self::OtherAuthenticated),
            "anonymous" | "none" => Ok(Self::Anonymous),
            _ => Err(AppError::validation(format!(
                "Invalid relation: '{s}'. Expected owner, member, other or anonymous"
            ))),
        }
    }
}

/// Outcome of an authorization decision.
///
/// `Forbidden` and `NotFound` are always distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Decision {
    /// The action may proceed.
    Allow,
    /// The requester must authenticate first (401).
    Unauthenticated,
    /// The requester is known but not permitted (403).
    Forbidden,
    /// The resource does not exist (404).
    NotFound,
}

impl Decision {
    /// Whether the action may proceed.
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }

    /// Whether the client should drop its session and log in again.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(self, Self::Unauthenticated)
    }

    /// HTTP-equivalent status code.
    pub fn status_code(&self) -> http::StatusCode {
        match self {
            Self::Allow => http::StatusCode::OK,
            Self::Unauthenticated => http::StatusCode::UNAUTHORIZED,
            Self::Forbidden => http::StatusCode::FORBIDDEN,
            Self::NotFound => http::StatusCode::NOT_FOUND,
        }
    }

    /// Response message used by the platform's controllers.
    pub fn message(&self) -> &'static str {
        match self {
            Self::Allow => "OK",
            Self::Unauthenticated => "Unauthorized",
            Self::Forbidden => "Forbidden",
            Self::NotFound => "Not found",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
