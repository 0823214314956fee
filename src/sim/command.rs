//! Outbound requests from the rules core to the host
//!
//! The session never renders, plays audio or moves bodies itself. It queues
//! these commands and the host drains and executes them after each callback.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::BodyConfig;
use super::state::{EntityId, EntityKind};

/// Why an entity left the playfield
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemoveReason {
    /// Fell past the bottom edge
    Expired,
    /// Enemy hit the player
    Destroyed,
    /// Power-up caught by the player
    Collected,
}

/// Visual/audio feedback
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Effect {
    /// Enemy hit the player: particles and explosion sound
    Explosion { at: Vec2 },
    /// Power-up caught: recover sound
    Recover { at: Vec2 },
    /// Player destroyed at game over: particles only
    PlayerExplosion { at: Vec2 },
}

impl Effect {
    /// Particle emitter asset to place at the effect position
    pub fn emitter(&self) -> Option<&'static str> {
        match self {
            Effect::Explosion { .. } | Effect::PlayerExplosion { .. } => Some("Explosion"),
            Effect::Recover { .. } => None,
        }
    }

    pub fn position(&self) -> Vec2 {
        match *self {
            Effect::Explosion { at } | Effect::Recover { at } | Effect::PlayerExplosion { at } => at,
        }
    }
}

/// A request for the host to act on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HostCommand {
    /// Create a falling body that descends straight down to `despawn_y`
    /// over `fall_duration` seconds, already `age` seconds into the fall
    Spawn {
        id: EntityId,
        kind: EntityKind,
        position: Vec2,
        despawn_y: f32,
        fall_duration: f32,
        age: f32,
        body: BodyConfig,
    },
    /// Remove a falling body
    Remove { id: EntityId, reason: RemoveReason },
    /// Refresh the score label
    ScoreDisplay { score: i32 },
    /// Show the game-over labels
    GameOverDisplay { elapsed: f64 },
    /// Remove the game-over labels
    RestartDisplayClear,
    PlayEffect(Effect),
    /// Move the player to a touch location
    MovePlayer { position: Vec2 },
    /// Take the player out of the scene
    RemovePlayer,
    /// Put the player back at its start position
    RespawnPlayer { position: Vec2, body: BodyConfig },
}
