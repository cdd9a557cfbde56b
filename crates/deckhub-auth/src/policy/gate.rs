//! Per-request access gate.
//!
//! Every endpoint declares the ability it requires. The gate validates the
//! bearer token's ability scope first, then hands the authenticated subject
//! (or none) to the [`PolicyEngine`].

use std::sync::Arc;

use tracing::debug;

use deckhub_core::error::AppError;
use deckhub_core::types::UserId;
use deckhub_entity::organization::Membership;
use deckhub_entity::resource::ResourceMeta;
use deckhub_entity::token::Ability;

use crate::token::{AuthorizeError, TokenService};

use super::decision::{Action, Decision};
use super::engine::PolicyEngine;

/// Extracts the token from an `Authorization` header value.
///
/// Accepts `Bearer <token>` with any casing of the scheme.
pub fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Combines token validation and the authorization engine.
#[derive(Debug, Clone)]
pub struct AccessGate {
    /// Token lifecycle manager.
    tokens: Arc<TokenService>,
    /// Decision table.
    engine: PolicyEngine,
}

impl AccessGate {
    /// Creates a gate over the given token service.
    pub fn new(tokens: Arc<TokenService>) -> Self {
        Self {
            tokens,
            engine: PolicyEngine::new(),
        }
    }

    /// Authenticates a request that must carry a token with `required`.
    pub async fn authenticate(
        &self,
        bearer: Option<&str>,
        required: Ability,
    ) -> Result<UserId, AuthorizeError> {
        let raw = bearer.ok_or(AuthorizeError::Unauthenticated)?;
        self.tokens.authorize(raw, required).await
    }

    /// Decides a resource request.
    ///
    /// No token means an anonymous requester, which may still read public
    /// resources. A token that is present but invalid or expired yields
    /// `Unauthenticated`; one lacking `required` yields `Forbidden`. Only
    /// ledger failures surface as errors.
    pub async fn check<M: Membership + ?Sized>(
        &self,
        bearer: Option<&str>,
        required: Ability,
        resource: Option<&ResourceMeta>,
        action: Action,
        membership: &M,
    ) -> Result<Decision, AppError> {
        let requester = match bearer {
            None => None,
            Some(raw) => match self.tokens.authorize(raw, required).await {
                Ok(subject) => Some(subject),
                Err(AuthorizeError::Internal(e)) => return Err(e),
                Err(e) => {
                    debug!(error = %e, "Token rejected before policy evaluation");
                    return Ok(match e {
                        AuthorizeError::Forbidden => Decision::Forbidden,
                        _ => Decision::Unauthenticated,
                    });
                }
            },
        };

        let decision = self.engine.decide(requester, resource, action, membership);
        debug!(
            requester = ?requester,
            action = %action,
            decision = %decision,
            "Access decision"
        );
        Ok(decision)
    }

    /// The underlying decision engine.
    pub fn engine(&self) -> &PolicyEngine {
        &self.engine
    }
}
