//! HS256 token codec.
//!
//! The codec is a pure serialize/verify boundary: it knows ability wire names
//! but not what abilities permit, and decoding never touches shared state.

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use thiserror::Error;

use deckhub_core::config::AuthConfig;
use deckhub_core::error::AppError;
use deckhub_entity::token::Token;

use super::abilities::AbilityMap;
use super::claims::Claims;

/// Why an opaque token string could not be turned back into a [`Token`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Structurally invalid: not a JWT, bad encoding, or broken invariants.
    #[error("malformed token: {0}")]
    Malformed(String),
    /// The signature does not match the payload.
    #[error("token signature is invalid")]
    SignatureInvalid,
    /// The token is authentic but `now >= expires_at`.
    #[error("token expired at {0}")]
    Expired(DateTime<Utc>),
}

/// Encodes and verifies signed tokens.
#[derive(Clone)]
pub struct TokenCodec {
    /// HMAC key for signing.
    encoding_key: EncodingKey,
    /// HMAC key for verification.
    decoding_key: DecodingKey,
    /// Signature and claim validation settings. Expiry is checked against
    /// the caller's clock instead.
    validation: Validation,
    /// Ability wire names.
    abilities: AbilityMap,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("abilities", &self.abilities)
            .finish()
    }
}

impl TokenCodec {
    /// Creates a codec from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
            abilities: AbilityMap::new(&config.abilities),
        }
    }

    /// The ability wire-name mapping in use.
    pub fn abilities(&self) -> &AbilityMap {
        &self.abilities
    }

    /// Encodes a token into its opaque wire form.
    ///
    /// Deterministic for a given token and signing key.
    pub fn encode(&self, token: &Token) -> Result<String, AppError> {
        token
            .check_invariants()
            .map_err(|reason| AppError::validation(format!("Refusing to encode token: {reason}")))?;

        let claims = Claims::from_token(token, &self.abilities);
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode token: {e}")))
    }

    /// Decodes and verifies a token, treating it as expired once
    /// `now >= expires_at`.
    pub fn decode(&self, raw: &str, now: DateTime<Utc>) -> Result<Token, DecodeError> {
        let token = self.verify(raw)?;
        if token.is_expired_at(now) {
            return Err(DecodeError::Expired(token.expires_at));
        }
        Ok(token)
    }

    /// Verifies signature and structure without evaluating expiry.
    pub fn verify(&self, raw: &str) -> Result<Token, DecodeError> {
        let data = decode::<Claims>(raw, &self.decoding_key, &self.validation).map_err(|e| {
            match e.kind() {
                JwtErrorKind::InvalidSignature => DecodeError::SignatureInvalid,
                _ => DecodeError::Malformed(e.to_string()),
            }
        })?;

        data.claims
            .into_token(&self.abilities)
            .map_err(DecodeError::Malformed)
    }
}
