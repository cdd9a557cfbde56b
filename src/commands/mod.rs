//! CLI command definitions and dispatch.

pub mod decide;
pub mod inspect;
pub mod issue;
pub mod password;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use deckhub_core::config::AppConfig;
use deckhub_core::error::AppError;

/// DeckHub access control for the flashcard platform
#[derive(Debug, Parser)]
#[command(name = "deckhub", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (falls back to DECKHUB_CONFIG)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Issue an access/refresh token pair for a user id
    Issue(issue::IssueArgs),
    /// Decode and verify a token
    Inspect(inspect::InspectArgs),
    /// Evaluate the authorization table for one request shape
    Decide(decide::DecideArgs),
    /// Hash a password with the configured Argon2 parameters
    HashPassword(password::HashPasswordArgs),
}

impl Cli {
    /// Resolved configuration path
    pub fn config_path(&self) -> String {
        self.config.clone().unwrap_or_else(|| {
            std::env::var("DECKHUB_CONFIG").unwrap_or_else(|_| "config/default.toml".to_string())
        })
    }

    /// Execute the CLI command
    pub async fn execute(&self, config: &AppConfig) -> Result<(), AppError> {
        match &self.command {
            Commands::Issue(args) => issue::execute(args, config, self.format).await,
            Commands::Inspect(args) => inspect::execute(args, config, self.format),
            Commands::Decide(args) => decide::execute(args, self.format),
            Commands::HashPassword(args) => password::execute(args, config),
        }
    }
}
