//! Token abilities, payloads and issued pairs.

pub mod ability;
pub mod grant;
pub mod model;

pub use ability::Ability;
pub use grant::TokenPair;
pub use model::{Token, TokenKind};
