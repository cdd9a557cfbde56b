//! Owned content metadata consulted by the authorization engine.

pub mod model;
pub mod visibility;

pub use model::{ResourceKind, ResourceMeta};
pub use visibility::Visibility;
