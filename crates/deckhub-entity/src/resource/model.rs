//! Ownership and visibility metadata of a deck or quiz.

use serde::{Deserialize, Serialize};

use deckhub_core::types::{OrganizationId, ResourceId, UserId};

use super::visibility::Visibility;

/// Kind of owned content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// A flashcard deck.
    Deck,
    /// A quiz.
    Quiz,
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceKind::Deck => write!(f, "deck"),
            ResourceKind::Quiz => write!(f, "quiz"),
        }
    }
}

/// Read-only metadata describing who owns a resource and who may see it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceMeta {
    /// Deck or quiz.
    pub kind: ResourceKind,
    /// Resource identifier.
    pub id: ResourceId,
    /// The owning user.
    pub owner_id: UserId,
    /// The owner's organization, consulted for `Limited` visibility.
    pub owner_organization: Option<OrganizationId>,
    /// Read visibility.
    pub visibility: Visibility,
}

impl ResourceMeta {
    /// Metadata for a deck.
    pub fn deck(owner_id: UserId, visibility: Visibility) -> Self {
        Self {
            kind: ResourceKind::Deck,
            id: ResourceId::new(),
            owner_id,
            owner_organization: None,
            visibility,
        }
    }

    /// Metadata for a quiz.
    pub fn quiz(owner_id: UserId, visibility: Visibility) -> Self {
        Self {
            kind: ResourceKind::Quiz,
            id: ResourceId::new(),
            owner_id,
            owner_organization: None,
            visibility,
        }
    }

    /// Attaches the owner's organization.
    pub fn in_organization(mut self, organization: OrganizationId) -> Self {
        self.owner_organization = Some(organization);
        self
    }

    /// Whether `user` owns this resource.
    pub fn is_owned_by(&self, user: UserId) -> bool {
        self.owner_id == user
    }
}
