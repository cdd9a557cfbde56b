//! Token issuing command.

use std::sync::Arc;

use clap::Args;

use deckhub_auth::credential::MemoryCredentialStore;
use deckhub_auth::password::PasswordHasher;
use deckhub_auth::token::TokenService;
use deckhub_core::config::AppConfig;
use deckhub_core::error::AppError;
use deckhub_core::traits::SystemClock;
use deckhub_core::types::UserId;

use crate::output::{self, OutputFormat};

/// Arguments for `issue`
#[derive(Debug, Args)]
pub struct IssueArgs {
    /// Subject user id (UUID)
    #[arg(short, long)]
    pub user: UserId,
}

/// Execute `issue`
pub async fn execute(
    args: &IssueArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let ledger = deckhub_auth::ledger::from_config(&config.ledger).await?;
    let credentials = Arc::new(MemoryCredentialStore::new(
        PasswordHasher::new(),
        config.auth.password_min_length,
    ));
    let service = TokenService::new(&config.auth, ledger, credentials, Arc::new(SystemClock));

    let pair = service.issue(args.user)?;
    tracing::info!(user_id = %args.user, "Issued token pair");

    let value = serde_json::to_value(&pair)?;
    output::print_object(&value, format);
    if format == OutputFormat::Text {
        output::print_success(&format!("Issued tokens for {}", args.user));
    }
    Ok(())
}
