//! Token lifecycle manager.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, warn};

use deckhub_core::config::AuthConfig;
use deckhub_core::error::AppError;
use deckhub_core::traits::{Clock, RotationLedger};
use deckhub_core::types::{RotationId, UserId};
use deckhub_entity::token::{Ability, Token, TokenKind, TokenPair};
use deckhub_entity::user::User;

use crate::credential::CredentialStore;
use crate::jwt::{DecodeError, TokenCodec};

use super::error::{AuthorizeError, LoginError, RefreshError};

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginResult {
    /// Issued token pair.
    pub tokens: TokenPair,
    /// The authenticated user.
    pub user: User,
}

/// Issues, rotates, validates and revokes tokens.
///
/// The only mutable state involved is the rotation ledger; everything else
/// is derived from the token itself.
#[derive(Clone)]
pub struct TokenService {
    /// Token codec.
    codec: Arc<TokenCodec>,
    /// Consumed rotation ids.
    ledger: Arc<dyn RotationLedger>,
    /// User records.
    credentials: Arc<dyn CredentialStore>,
    /// Time source.
    clock: Arc<dyn Clock>,
    /// Access token lifetime.
    access_ttl: Duration,
    /// Refresh token lifetime.
    refresh_ttl: Duration,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish()
    }
}

impl TokenService {
    /// Creates a token service.
    pub fn new(
        config: &AuthConfig,
        ledger: Arc<dyn RotationLedger>,
        credentials: Arc<dyn CredentialStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            codec: Arc::new(TokenCodec::new(config)),
            ledger,
            credentials,
            clock,
            access_ttl: config.access_ttl(),
            refresh_ttl: config.refresh_ttl(),
        }
    }

    /// The codec used for encoding and decoding.
    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    /// Issues an access/refresh pair for a freshly authenticated user.
    pub fn issue(&self, user_id: UserId) -> Result<TokenPair, AppError> {
        let now = self.clock.now();
        let pair = self.issue_pair(user_id, now, now + self.refresh_ttl)?;
        info!(user_id = %user_id, "Token pair issued");
        Ok(pair)
    }

    /// Verifies credentials and issues a token pair.
    ///
    /// An unknown email and a wrong password produce the same error.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResult, LoginError> {
        let Some(user) = self.credentials.find_user_by_email(email).await? else {
            debug!("Login rejected: unknown email");
            return Err(LoginError::InvalidCredentials);
        };

        if !self.credentials.verify_password(&user, password).await? {
            warn!(user_id = %user.id, "Login rejected: wrong password");
            return Err(LoginError::InvalidCredentials);
        }

        let tokens = self.issue(user.id)?;
        info!(user_id = %user.id, "Login successful");
        Ok(LoginResult { tokens, user })
    }

    /// Redeems a refresh token.
    ///
    /// The rotation id is consumed atomically, so at most one redemption of
    /// a given refresh token succeeds. The returned pair carries a new access
    /// token and a rotated refresh token bound to the original expiry.
    pub async fn refresh(&self, raw: &str) -> Result<TokenPair, RefreshError> {
        let now = self.clock.now();

        let token = self.codec.decode(raw, now).map_err(|e| match e {
            DecodeError::Expired(_) => RefreshError::Expired,
            other => {
                debug!(error = %other, "Refresh rejected: undecodable token");
                RefreshError::Invalid
            }
        })?;

        let rotation_id = match (token.kind, token.rotation_id) {
            (TokenKind::Refresh, Some(id)) => id,
            _ => {
                warn!(user_id = %token.subject, "Refresh rejected: not a refresh token");
                return Err(RefreshError::Invalid);
            }
        };

        if self.credentials.find_user_by_id(token.subject).await?.is_none() {
            warn!(user_id = %token.subject, "Refresh rejected: subject no longer exists");
            return Err(RefreshError::Invalid);
        }

        if !self.ledger.consume(rotation_id, token.expires_at).await? {
            warn!(
                user_id = %token.subject,
                rotation_id = %rotation_id,
                "Refresh token reuse detected"
            );
            return Err(RefreshError::Reused);
        }

        let pair = self.issue_pair(token.subject, now, token.expires_at)?;
        info!(user_id = %token.subject, "Access token refreshed");
        Ok(pair)
    }

    /// Checks that a token is current and carries `required`.
    ///
    /// Returns the authenticated subject.
    pub async fn authorize(&self, raw: &str, required: Ability) -> Result<UserId, AuthorizeError> {
        let token = self.codec.decode(raw, self.clock.now()).map_err(|e| match e {
            DecodeError::Expired(_) => AuthorizeError::Expired,
            _ => AuthorizeError::Unauthenticated,
        })?;

        if !token.has_ability(required) {
            debug!(
                user_id = %token.subject,
                required = %required,
                kind = %token.kind,
                "Token lacks required ability"
            );
            return Err(AuthorizeError::Forbidden);
        }

        if let Some(rotation_id) = token.rotation_id {
            if self.ledger.is_consumed(&rotation_id).await? {
                return Err(AuthorizeError::Unauthenticated);
            }
        }

        Ok(token.subject)
    }

    /// Revokes a refresh token immediately (logout).
    ///
    /// Idempotent. Tokens that are undecodable, expired, or not refresh
    /// tokens are ignored since they cannot be redeemed anyway.
    pub async fn revoke(&self, raw: &str) -> Result<(), AppError> {
        let token = match self.codec.verify(raw) {
            Ok(token) => token,
            Err(e) => {
                debug!(error = %e, "Ignoring revoke of undecodable token");
                return Ok(());
            }
        };

        let Some(rotation_id) = token.rotation_id else {
            debug!(user_id = %token.subject, "Ignoring revoke of access token");
            return Ok(());
        };

        if token.is_expired_at(self.clock.now()) {
            return Ok(());
        }

        if self.ledger.consume(rotation_id, token.expires_at).await? {
            info!(user_id = %token.subject, "Refresh token revoked");
        } else {
            debug!(user_id = %token.subject, "Refresh token already revoked");
        }
        Ok(())
    }

    fn issue_pair(
        &self,
        subject: UserId,
        now: DateTime<Utc>,
        refresh_expires_at: DateTime<Utc>,
    ) -> Result<TokenPair, AppError> {
        let access = Token::access(subject, now, self.access_ttl);
        let refresh = Token::refresh(subject, now, refresh_expires_at, RotationId::new());

        Ok(TokenPair {
            access_token: self.codec.encode(&access)?,
            access_expires_at: access.expires_at,
            refresh_token: self.codec.encode(&refresh)?,
            refresh_expires_at: refresh.expires_at,
        })
    }
}
