//! Core traits defined in `deckhub-core` and implemented by other crates.

pub mod clock;
pub mod ledger;

pub use clock::{Clock, ManualClock, SystemClock};
pub use ledger::RotationLedger;
