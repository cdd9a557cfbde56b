//! Client session configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Widest accepted proactive refresh window (1 hour).
pub const MAX_REFRESH_SKEW_SECONDS: u64 = 3600;

/// Settings for the client-side session guard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Refresh proactively when the access token expires within this many seconds.
    #[serde(default = "default_refresh_skew")]
    pub refresh_skew_seconds: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            refresh_skew_seconds: default_refresh_skew(),
        }
    }
}

impl SessionConfig {
    /// Rejects a refresh window outside `0..=MAX_REFRESH_SKEW_SECONDS`.
    pub fn validate(&self) -> Result<(), AppError> {
        super::auth::bounded_duration(
            "session.refresh_skew_seconds",
            self.refresh_skew_seconds,
            0,
            MAX_REFRESH_SKEW_SECONDS,
            chrono::TimeDelta::try_seconds,
        )?;
        Ok(())
    }

    /// The proactive refresh window, clamped to the accepted range.
    pub fn refresh_skew(&self) -> chrono::Duration {
        let seconds = self.refresh_skew_seconds.min(MAX_REFRESH_SKEW_SECONDS);
        chrono::Duration::seconds(seconds as i64)
    }
}

fn default_refresh_skew() -> u64 {
    30
}
