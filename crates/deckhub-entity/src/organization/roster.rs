//! Organization membership relation.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use deckhub_core::types::{OrganizationId, UserId};

/// Answers whether a user belongs to an organization.
///
/// Membership is binary. An organization's owner is always a member.
pub trait Membership {
    /// Whether `user` is a member of `organization`.
    fn is_member(&self, organization: OrganizationId, user: UserId) -> bool;
}

/// Membership source for requests that involve no organizations.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMembership;

impl Membership for NoMembership {
    fn is_member(&self, _organization: OrganizationId, _user: UserId) -> bool {
        false
    }
}

/// In-memory snapshot of organizations, their owners and members.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrganizationRoster {
    owners: HashMap<OrganizationId, UserId>,
    members: HashSet<(OrganizationId, UserId)>,
}

impl OrganizationRoster {
    /// Creates an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an organization and its owner.
    pub fn add_organization(&mut self, organization: OrganizationId, owner: UserId) {
        self.owners.insert(organization, owner);
    }

    /// Adds `user` to `organization`. Returns `false` if already a member.
    pub fn add_member(&mut self, organization: OrganizationId, user: UserId) -> bool {
        self.members.insert((organization, user))
    }

    /// Removes `user` from `organization`. Returns `false` if not a member.
    pub fn remove_member(&mut self, organization: OrganizationId, user: UserId) -> bool {
        self.members.remove(&(organization, user))
    }

    /// Whether `user` owns `organization`.
    pub fn is_owner(&self, organization: OrganizationId, user: UserId) -> bool {
        self.owners.get(&organization) == Some(&user)
    }

    /// Members of `organization`, owner excluded.
    pub fn members_of(&self, organization: OrganizationId) -> impl Iterator<Item = UserId> + '_ {
        self.members
            .iter()
            .filter(move |(org, _)| *org == organization)
            .map(|(_, user)| *user)
    }
}

impl Membership for OrganizationRoster {
    fn is_member(&self, organization: OrganizationId, user: UserId) -> bool {
        self.is_owner(organization, user) || self.members.contains(&(organization, user))
    }
}
