//! Visibility/ownership decision table.
//!
//! The engine reads resource metadata, requester identity and organization
//! membership, and returns a [`Decision`]. It performs no I/O and mutates
//! nothing.

use deckhub_core::types::UserId;
use deckhub_entity::organization::Membership;
use deckhub_entity::resource::{ResourceMeta, Visibility};

use super::decision::{Action, Decision, Relation};

/// Pure authorization policy over owned resources.
#[derive(Debug, Clone, Copy, Default)]
pub struct PolicyEngine;

impl PolicyEngine {
    /// Creates the engine.
    pub fn new() -> Self {
        Self
    }

    /// Decides whether `requester` may perform `action` on `resource`.
    ///
    /// A missing resource is `NotFound` whatever the requester's state;
    /// existence is not treated as confidential.
    pub fn decide<M: Membership + ?Sized>(
        &self,
        requester: Option<UserId>,
        resource: Option<&ResourceMeta>,
        action: Action,
        membership: &M,
    ) -> Decision {
        let Some(resource) = resource else {
            return Decision::NotFound;
        };
        let relation = self.relation(requester, resource, membership);
        Self::table(resource.visibility, action, relation)
    }

    /// Classifies the requester relative to the resource owner.
    pub fn relation<M: Membership + ?Sized>(
        &self,
        requester: Option<UserId>,
        resource: &ResourceMeta,
        membership: &M,
    ) -> Relation {
        match requester {
            None => Relation::Anonymous,
            Some(user) if resource.is_owned_by(user) => Relation::Owner,
            Some(user) => match resource.owner_organization {
                Some(org) if membership.is_member(org, user) => Relation::OrganizationMember,
                _ => Relation::OtherAuthenticated,
            },
        }
    }

    /// The decision table.
    ///
    /// Mutation is owner-only at every visibility level. Reads follow
    /// visibility: `Public` to anyone, `Limited` to the owner's
    /// organization, `Private` to the owner. Anonymous requesters denied
    /// anything get `Unauthenticated`; authenticated ones get `Forbidden`.
    pub const fn table(visibility: Visibility, action: Action, relation: Relation) -> Decision {
        match (visibility, action, relation) {
            (_, _, Relation::Owner) => Decision::Allow,
            (Visibility::Public, Action::Read, _) => Decision::Allow,
            (Visibility::Limited, Action::Read, Relation::OrganizationMember) => Decision::Allow,
            (_, _, Relation::Anonymous) => Decision::Unauthenticated,
            (_, _, Relation::OrganizationMember | Relation::OtherAuthenticated) => {
                Decision::Forbidden
            }
        }
    }

    /// Keeps the resources `requester` may read, preserving order.
    pub fn readable<'a, M, I>(
        &self,
        requester: Option<UserId>,
        resources: I,
        membership: &M,
    ) -> Vec<&'a ResourceMeta>
    where
        M: Membership + ?Sized,
        I: IntoIterator<Item = &'a ResourceMeta>,
    {
        resources
            .into_iter()
            .filter(|resource| {
                self.decide(requester, Some(*resource), Action::Read, membership)
                    .is_allowed()
            })
            .collect()
    }
}
