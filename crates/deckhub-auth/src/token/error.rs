//! Typed outcomes of token lifecycle operations.
//!
//! Every variant is terminal for the current call; nothing is retried
//! internally.

use thiserror::Error;

use deckhub_core::error::AppError;

/// Why a refresh token could not be redeemed.
#[derive(Debug, Error)]
pub enum RefreshError {
    /// Undecodable, tampered, not a refresh token, or its subject is gone.
    #[error("refresh token is invalid")]
    Invalid,
    /// The refresh token is past its lifetime.
    #[error("refresh token has expired")]
    Expired,
    /// The rotation id was already redeemed or revoked.
    #[error("refresh token was already used")]
    Reused,
    /// The ledger or credential store failed.
    #[error(transparent)]
    Internal(#[from] AppError),
}

impl RefreshError {
    /// Whether the client must discard its session and log in again.
    pub fn requires_reauthentication(&self) -> bool {
        !matches!(self, Self::Internal(_))
    }
}

/// Why a token does not authorize a request.
#[derive(Debug, Error)]
pub enum AuthorizeError {
    /// Missing, malformed, tampered, or revoked token.
    #[error("unauthenticated")]
    Unauthenticated,
    /// The token is authentic but past its lifetime.
    #[error("token has expired")]
    Expired,
    /// The token is valid but lacks the required ability.
    #[error("token lacks the required ability")]
    Forbidden,
    /// The ledger failed.
    #[error(transparent)]
    Internal(#[from] AppError),
}

impl AuthorizeError {
    /// Whether the client must discard its session and log in again.
    ///
    /// `Forbidden` keeps the session: the user stays logged in but the
    /// action is denied.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(self, Self::Unauthenticated | Self::Expired)
    }

    /// HTTP-equivalent status code.
    pub fn status_code(&self) -> http::StatusCode {
        match self {
            Self::Unauthenticated | Self::Expired => http::StatusCode::UNAUTHORIZED,
            Self::Forbidden => http::StatusCode::FORBIDDEN,
            Self::Internal(_) => http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Why a login attempt failed.
#[derive(Debug, Error)]
pub enum LoginError {
    /// Unknown email or wrong password; the two are not distinguished.
    #[error("invalid email or password")]
    InvalidCredentials,
    /// The credential store or token encoding failed.
    #[error(transparent)]
    Internal(#[from] AppError),
}
