//! Resource visibility/ownership authorization.
//!
//! - `decision`: the closed set of outcomes and actions
//! - `engine`: the pure decision table
//! - `gate`: per-request composition of ability checks and the engine

pub mod decision;
pub mod engine;
pub mod gate;

pub use decision::{Action, Decision, Relation};
pub use engine::PolicyEngine;
pub use gate::{AccessGate, bearer_token};
