//! # deckhub-core
//!
//! Core crate for DeckHub access control. Contains configuration schemas,
//! typed identifiers, the clock and rotation-ledger traits, and the unified
//! error system.
//!
//! This crate has **no** internal dependencies on other DeckHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
