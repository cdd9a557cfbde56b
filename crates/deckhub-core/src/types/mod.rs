//! Core type definitions used across the DeckHub workspace.

pub mod id;

pub use id::*;
