//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Platform roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Regular account.
    User,
    /// Owner of an organization.
    OrganizationOwner,
    /// Platform administrator.
    Admin,
}

impl UserRole {
    /// Return the role as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::OrganizationOwner => "organization_owner",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = deckhub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Self::User),
            "organization_owner" | "owner" => Ok(Self::OrganizationOwner),
            "admin" => Ok(Self::Admin),
            _ => Err(deckhub_core::AppError::validation(format!(
                "Invalid user role: '{s}'. Expected one of: user, organization_owner, admin"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_roundtrips_through_from_str() {
        for role in [UserRole::User, UserRole::OrganizationOwner, UserRole::Admin] {
            assert_eq!(role.to_string().parse::<UserRole>().unwrap(), role);
        }
    }

    #[test]
    fn test_from_str() {
        assert_eq!("admin".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert_eq!("OWNER".parse::<UserRole>().unwrap(), UserRole::OrganizationOwner);
        assert!("moderator".parse::<UserRole>().is_err());
    }
}
