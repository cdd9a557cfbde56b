//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from an
//! optional TOML file overlaid with `DECKHUB__*` environment variables. Every
//! field has a default so an empty source yields a usable configuration.

pub mod auth;
pub mod ledger;
pub mod logging;
pub mod session;

use serde::{Deserialize, Serialize};

pub use self::auth::{AbilityNamesConfig, AuthConfig};
pub use self::ledger::{LedgerBackend, LedgerConfig};
pub use self::logging::LoggingConfig;
pub use self::session::SessionConfig;

use crate::error::AppError;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Token signing and lifetime settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Rotation ledger settings.
    #[serde(default)]
    pub ledger: LedgerConfig,
    /// Client session guard settings.
    #[serde(default)]
    pub session: SessionConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file and the environment.
    ///
    /// The file is optional. Environment variables prefixed with `DECKHUB__`
    /// override file values, e.g. `DECKHUB__AUTH__ACCESS_TTL_MINUTES=5`.
    pub fn load(path: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("DECKHUB")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let loaded: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        loaded.validate()?;
        Ok(loaded)
    }

    /// Validates every section.
    pub fn validate(&self) -> Result<(), AppError> {
        self.auth.validate()?;
        self.ledger.validate()?;
        self.session.validate()
    }
}
