//! Authentication configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Longest accepted access token lifetime (7 days).
pub const MAX_ACCESS_TTL_MINUTES: u64 = 7 * 24 * 60;

/// Longest accepted refresh token lifetime (10 years).
pub const MAX_REFRESH_TTL_DAYS: u64 = 3650;

/// Token signing and lifetime configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for token signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Access token TTL in minutes.
    #[serde(default = "default_access_ttl")]
    pub access_ttl_minutes: u64,
    /// Refresh token TTL in days.
    #[serde(default = "default_refresh_ttl")]
    pub refresh_ttl_days: u64,
    /// Minimum password length accepted at registration.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Wire names of the token abilities.
    #[serde(default)]
    pub abilities: AbilityNamesConfig,
}

/// Mapping from ability wire names to the closed ability set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityNamesConfig {
    /// Name carried by tokens allowed to call the API.
    #[serde(default = "default_access_api")]
    pub access_api: String,
    /// Name carried by tokens allowed to mint new access tokens.
    #[serde(default = "default_issue_access_token")]
    pub issue_access_token: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            access_ttl_minutes: default_access_ttl(),
            refresh_ttl_days: default_refresh_ttl(),
            password_min_length: default_password_min(),
            abilities: AbilityNamesConfig::default(),
        }
    }
}

impl Default for AbilityNamesConfig {
    fn default() -> Self {
        Self {
            access_api: default_access_api(),
            issue_access_token: default_issue_access_token(),
        }
    }
}

impl AuthConfig {
    /// Rejects configurations that cannot produce valid tokens.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.jwt_secret.trim().is_empty() {
            return Err(AppError::configuration("auth.jwt_secret must not be empty"));
        }
        bounded_duration(
            "auth.access_ttl_minutes",
            self.access_ttl_minutes,
            1,
            MAX_ACCESS_TTL_MINUTES,
            chrono::TimeDelta::try_minutes,
        )?;
        bounded_duration(
            "auth.refresh_ttl_days",
            self.refresh_ttl_days,
            1,
            MAX_REFRESH_TTL_DAYS,
            chrono::TimeDelta::try_days,
        )?;
        let names = &self.abilities;
        if names.access_api.is_empty() || names.issue_access_token.is_empty() {
            return Err(AppError::configuration("ability names must not be empty"));
        }
        if names.access_api == names.issue_access_token {
            return Err(AppError::configuration(format!(
                "ability names must be distinct, both are '{}'",
                names.access_api
            )));
        }
        Ok(())
    }

    /// Access token lifetime, clamped to the accepted range.
    pub fn access_ttl(&self) -> chrono::Duration {
        let minutes = self.access_ttl_minutes.clamp(1, MAX_ACCESS_TTL_MINUTES);
        chrono::Duration::minutes(minutes as i64)
    }

    /// Refresh token lifetime, clamped to the accepted range.
    pub fn refresh_ttl(&self) -> chrono::Duration {
        let days = self.refresh_ttl_days.clamp(1, MAX_REFRESH_TTL_DAYS);
        chrono::Duration::days(days as i64)
    }
}

/// Converts a configured count into a duration, rejecting values outside
/// `min..=max` or beyond what `TimeDelta` can represent.
pub(crate) fn bounded_duration(
    key: &str,
    value: u64,
    min: u64,
    max: u64,
    convert: fn(i64) -> Option<chrono::TimeDelta>,
) -> Result<chrono::TimeDelta, AppError> {
    if !(min..=max).contains(&value) {
        return Err(AppError::configuration(format!(
            "{key} must be between {min} and {max}, got {value}"
        )));
    }
    i64::try_from(value)
        .ok()
        .and_then(convert)
        .ok_or_else(|| AppError::configuration(format!("{key} is out of range: {value}")))
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_access_ttl() -> u64 {
    15
}

fn default_refresh_ttl() -> u64 {
    7
}

fn default_password_min() -> usize {
    8
}

fn default_access_api() -> String {
    "access-api".to_string()
}

fn default_issue_access_token() -> String {
    "issue-access-token".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AuthConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.access_ttl(), chrono::Duration::minutes(15));
        assert_eq!(config.refresh_ttl(), chrono::Duration::days(7));
    }

    #[test]
    fn test_rejects_empty_secret() {
        let config = AuthConfig {
            jwt_secret: "  ".to_string(),
            ..AuthConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_and_oversized_ttls() {
        for config in [
            AuthConfig {
                access_ttl_minutes: 0,
                ..AuthConfig::default()
            },
            AuthConfig {
                access_ttl_minutes: u64::MAX,
                ..AuthConfig::default()
            },
            AuthConfig {
                refresh_ttl_days: 1_000_000_000_000,
                ..AuthConfig::default()
            },
            AuthConfig {
                refresh_ttl_days: MAX_REFRESH_TTL_DAYS + 1,
                ..AuthConfig::default()
            },
        ] {
            let err = config.validate().unwrap_err();
            assert_eq!(err.kind, crate::error::ErrorKind::Configuration);
        }
    }

    #[test]
    fn test_ttl_accessors_never_go_negative_or_panic() {
        let config = AuthConfig {
            access_ttl_minutes: u64::MAX,
            refresh_ttl_days: 1_000_000_000_000,
            ..AuthConfig::default()
        };
        assert_eq!(
            config.access_ttl(),
            chrono::Duration::minutes(MAX_ACCESS_TTL_MINUTES as i64)
        );
        assert_eq!(
            config.refresh_ttl(),
            chrono::Duration::days(MAX_REFRESH_TTL_DAYS as i64)
        );
    }

    #[test]
    fn test_upper_bounds_are_accepted() {
        let config = AuthConfig {
            access_ttl_minutes: MAX_ACCESS_TTL_MINUTES,
            refresh_ttl_days: MAX_REFRESH_TTL_DAYS,
            ..AuthConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_duplicate_ability_names() {
        let config = AuthConfig {
            abilities: AbilityNamesConfig {
                access_api: "same".to_string(),
                issue_access_token: "same".to_string(),
            },
            ..AuthConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
