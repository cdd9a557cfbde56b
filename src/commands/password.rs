//! Password hashing command.

use clap::Args;

use deckhub_auth::password::PasswordHasher;
use deckhub_core::config::AppConfig;
use deckhub_core::error::AppError;

use crate::output;

/// Arguments for `hash-password`
#[derive(Debug, Args)]
pub struct HashPasswordArgs {
    /// Password (will prompt if not provided)
    #[arg(short, long)]
    pub password: Option<String>,
}

/// Execute `hash-password`
pub fn execute(args: &HashPasswordArgs, config: &AppConfig) -> Result<(), AppError> {
    let password = match &args.password {
        Some(p) => p.clone(),
        None => dialoguer::Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords do not match")
            .interact()
            .map_err(|e| AppError::internal(format!("Input error: {}", e)))?,
    };

    check_length(&password, config.auth.password_min_length)?;

    let hash = PasswordHasher::new().hash_password(&password)?;
    output::print_kv("hash", &hash);
    Ok(())
}

/// Rejects passwords shorter than `min` characters.
fn check_length(password: &str, min: usize) -> Result<(), AppError> {
    if password.chars().count() < min {
        return Err(AppError::validation(format!(
            "Password must be at least {} characters",
            min
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // 7 characters, 14 bytes
        assert!(check_length("ééééééé", 8).is_err());
        assert!(check_length("éééééééé", 8).is_ok());
        assert!(check_length("short", 8).is_err());
    }
}
