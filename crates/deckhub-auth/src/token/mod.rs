//! Token lifecycle: issue, refresh with rotation, authorize, revoke, login.

pub mod error;
pub mod service;

pub use error::{AuthorizeError, LoginError, RefreshError};
pub use service::{LoginResult, TokenService};
