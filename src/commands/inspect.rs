//! Token inspection command.

use chrono::Utc;
use clap::Args;
use serde_json::json;

use deckhub_auth::jwt::{DecodeError, TokenCodec};
use deckhub_core::config::AppConfig;
use deckhub_core::error::AppError;

use crate::output::{self, OutputFormat};

/// Arguments for `inspect`
#[derive(Debug, Args)]
pub struct InspectArgs {
    /// Encoded token
    pub token: String,
}

/// Execute `inspect`
pub fn execute(
    args: &InspectArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let codec = TokenCodec::new(&config.auth);

    let token = match codec.verify(&args.token) {
        Ok(token) => token,
        Err(e) => {
            return Err(AppError::authentication(format!("Token rejected: {}", e)));
        }
    };

    let status = match codec.decode(&args.token, Utc::now()) {
        Ok(_) => "valid".to_string(),
        Err(DecodeError::Expired(at)) => format!("expired at {}", at.to_rfc3339()),
        Err(e) => e.to_string(),
    };

    let abilities: Vec<&str> = token
        .abilities
        .iter()
        .map(|a| codec.abilities().name(*a))
        .collect();

    let value = json!({
        "subject": token.subject.to_string(),
        "kind": token.kind.to_string(),
        "abilities": abilities.join(", "),
        "issued_at": token.issued_at.to_rfc3339(),
        "expires_at": token.expires_at.to_rfc3339(),
        "rotation_id": token.rotation_id.map(|id| id.to_string()),
        "status": status,
    });
    output::print_object(&value, format);
    Ok(())
}
