//! # deckhub-auth
//!
//! Server-side access control for the DeckHub platform.
//!
//! ## Modules
//!
//! - `jwt`: signed token encoding and verification
//! - `password`: Argon2id password hashing
//! - `credential`: credential store seam and an in-memory implementation
//! - `ledger`: consumed refresh-token rotation ids (memory and Redis)
//! - `token`: token lifecycle: issue, refresh, authorize, revoke, login
//! - `policy`: visibility/ownership decisions and the per-request access gate

pub mod credential;
pub mod jwt;
pub mod ledger;
pub mod password;
pub mod policy;
pub mod token;

pub use credential::{CredentialStore, MemoryCredentialStore};
pub use jwt::{DecodeError, TokenCodec};
pub use ledger::{LedgerCleanup, MemoryRotationLedger};
pub use password::PasswordHasher;
pub use policy::{AccessGate, Action, Decision, PolicyEngine};
pub use token::{AuthorizeError, LoginError, RefreshError, TokenService};
