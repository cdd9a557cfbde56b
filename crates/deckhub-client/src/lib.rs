//! # deckhub-client
//!
//! Client-side half of DeckHub access control. The [`SessionGuard`] owns the
//! current access token, refreshes it before expiry, and collapses concurrent
//! refresh attempts into a single in-flight call.
//!
//! ## Modules
//!
//! - `api`: transport seam to the token lifecycle endpoints
//! - `store`: persisted refresh token (the cookie equivalent)
//! - `guard`: the session state cell and its refresh protocol

pub mod api;
pub mod guard;
pub mod store;

pub use api::{ApiError, AuthApi, LocalAuthApi};
pub use guard::{SessionGuard, SessionStatus};
pub use store::{MemoryRefreshTokenStore, RefreshTokenStore};
