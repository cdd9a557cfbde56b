//! Signed token encoding, decoding, and claims mapping.

pub mod abilities;
pub mod claims;
pub mod codec;

pub use abilities::AbilityMap;
pub use claims::Claims;
pub use codec::{DecodeError, TokenCodec};
