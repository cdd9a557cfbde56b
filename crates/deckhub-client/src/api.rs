//! Transport seam to the token lifecycle endpoints.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use deckhub_auth::token::{RefreshError, TokenService};
use deckhub_core::error::AppError;
use deckhub_entity::token::TokenPair;

/// Failure of a call to the token endpoints.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The server refused the token (invalid, expired, or reused).
    #[error("token rejected: {0}")]
    Rejected(String),
    /// The call did not complete (network, server fault).
    #[error("transport failure: {0}")]
    Transport(#[from] AppError),
}

impl ApiError {
    /// Whether the persisted refresh token is now useless.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}

/// Calls the client makes to the token lifecycle manager.
#[async_trait]
pub trait AuthApi: Send + Sync + std::fmt::Debug + 'static {
    /// Redeems a refresh token for a new pair.
    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, ApiError>;

    /// Revokes a refresh token.
    async fn revoke(&self, refresh_token: &str) -> Result<(), ApiError>;
}

/// In-process [`AuthApi`] calling a [`TokenService`] directly.
#[derive(Debug, Clone)]
pub struct LocalAuthApi {
    service: Arc<TokenService>,
}

impl LocalAuthApi {
    /// Wraps a token service.
    pub fn new(service: Arc<TokenService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl AuthApi for LocalAuthApi {
    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, ApiError> {
        self.service
            .refresh(refresh_token)
            .await
            .map_err(|e| match e {
                RefreshError::Internal(inner) => ApiError::Transport(inner),
                rejected => ApiError::Rejected(rejected.to_string()),
            })
    }

    async fn revoke(&self, refresh_token: &str) -> Result<(), ApiError> {
        self.service.revoke(refresh_token).await.map_err(ApiError::from)
    }
}
