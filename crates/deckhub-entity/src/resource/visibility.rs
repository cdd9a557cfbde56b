//! Resource visibility enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Who may read an owned resource.
///
/// Serialized as `"Public"`, `"Private"`, `"Limited"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Visibility {
    /// Readable by anyone, authenticated or not.
    Public,
    /// Readable only by the owner.
    Private,
    /// Readable by the owner and members of the owner's organization.
    Limited,
}

impl Visibility {
    /// Every visibility level.
    pub const ALL: [Visibility; 3] = [Visibility::Public, Visibility::Private, Visibility::Limited];

    /// Return the visibility as its stored string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "Public",
            Self::Private => "Private",
            Self::Limited => "Limited",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Visibility {
    type Err = deckhub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "public" => Ok(Self::Public),
            "private" => Ok(Self::Private),
            "limited" => Ok(Self::Limited),
            _ => Err(deckhub_core::AppError::validation(format!(
                "Invalid visibility: '{s}'. Expected one of: Public, Private, Limited"
            ))),
        }
    }
}
