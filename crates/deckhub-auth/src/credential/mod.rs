//! Credential store seam and an in-memory implementation.

pub mod memory;
pub mod store;

pub use memory::MemoryCredentialStore;
pub use store::CredentialStore;
