//! Organization membership.

pub mod roster;

pub use roster::{Membership, NoMembership, OrganizationRoster};
