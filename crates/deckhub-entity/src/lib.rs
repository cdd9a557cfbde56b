//! # deckhub-entity
//!
//! Domain value objects for DeckHub access control: users and roles, token
//! abilities and payloads, resource visibility metadata, and organization
//! membership. Entities derive `Debug`, `Clone`, `Serialize` and
//! `Deserialize`; none of them perform I/O.

pub mod organization;
pub mod resource;
pub mod token;
pub mod user;
