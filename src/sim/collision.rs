//! Contact categories, physics body setup and contact classification
//!
//! The host reports contacts as an unordered pair of bodies. Which side is
//! the player is never guaranteed, so classification only looks at the union
//! of the two category masks.

use serde::{Deserialize, Serialize};

use super::state::{EntityId, EntityKind};
use crate::consts::{ENEMY_RADIUS, PLAYER_RADIUS, POWER_UP_RADIUS};

/// Category bitmask identifying a body's physics group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Category(pub u32);

impl Category {
    /// Not part of any group
    pub const NONE: Self = Self(0);

    pub const ENEMY: Self = Self(1 << 0);

    pub const POWER_UP: Self = Self(1 << 1);

    pub const PLAYER: Self = Self(1 << 2);

    /// Everything a falling body reports contacts with
    pub const MASK_FALLING_CONTACT: Self = Self::PLAYER;

    /// Everything the player reports contacts with
    pub const MASK_PLAYER_CONTACT: Self = Self(Self::ENEMY.0 | Self::POWER_UP.0);

    /// Category of a falling entity kind
    pub fn of(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Enemy => Self::ENEMY,
            EntityKind::PowerUp => Self::POWER_UP,
        }
    }

    /// Check if these flags contain a specific flag.
    #[inline]
    pub fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    #[inline]
    pub fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

/// Physics body description handed to the host with every spawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyConfig {
    pub category: Category,
    /// Categories that generate contact notifications
    pub contact_test: Category,
    /// Categories that physically push this body
    pub collision: Category,
    /// Moved by the physics engine (falling bodies) or only by the game (player)
    pub dynamic: bool,
    /// Circle radius
    pub radius: f32,
}

impl BodyConfig {
    /// The player body: static, never pushed
    pub fn player() -> Self {
        Self {
            category: Category::PLAYER,
            contact_test: Category::MASK_PLAYER_CONTACT,
            collision: Category::NONE,
            dynamic: false,
            radius: PLAYER_RADIUS,
        }
    }

    /// A falling body. With `push_back` set, falling bodies collide with the
    /// player instead of passing through it.
    pub fn falling(kind: EntityKind, push_back: bool) -> Self {
        let radius = match kind {
            EntityKind::Enemy => ENEMY_RADIUS,
            EntityKind::PowerUp => POWER_UP_RADIUS,
        };
        Self {
            category: Category::of(kind),
            contact_test: Category::MASK_FALLING_CONTACT,
            collision: if push_back { Category::PLAYER } else { Category::NONE },
            dynamic: true,
            radius,
        }
    }
}

/// One side of a contact as reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactBody {
    pub category: Category,
    /// Entity behind the body, if the host still has one
    pub entity: Option<EntityId>,
}

impl ContactBody {
    pub fn player() -> Self {
        Self {
            category: Category::PLAYER,
            entity: None,
        }
    }

    pub fn entity(kind: EntityKind, id: EntityId) -> Self {
        Self {
            category: Category::of(kind),
            entity: Some(id),
        }
    }
}

/// Which falling kind the player touched, if the pair is a player contact
///
/// Symmetric in its arguments; every pair other than player/enemy and
/// player/power-up classifies as `None`.
pub fn classify(a: Category, b: Category) -> Option<EntityKind> {
    let union = a.union(b);
    if union == Category::ENEMY.union(Category::PLAYER) {
        Some(EntityKind::Enemy)
    } else if union == Category::POWER_UP.union(Category::PLAYER) {
        Some(EntityKind::PowerUp)
    } else {
        None
    }
}

/// Classify a contact and pick out the non-player side
pub fn non_player(a: &ContactBody, b: &ContactBody) -> Option<(EntityKind, ContactBody)> {
    let kind = classify(a.category, b.category)?;
    let other = if a.category == Category::of(kind) { *a } else { *b };
    Some((kind, other))
}
