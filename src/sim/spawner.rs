//! Falling entity spawning
//!
//! Each spawn rolls [0, 100): below the threshold is an enemy, the rest a
//! power-up. Entities appear at a random x above the top edge.

use glam::Vec2;
use rand::Rng;

use super::collision::BodyConfig;
use super::command::HostCommand;
use super::state::{EntityKind, FallingEntity, GameState};
use crate::Tuning;
use crate::consts::SPAWN_ROLL_RANGE;

/// Kind produced by a spawn roll
#[inline]
pub fn kind_for_roll(roll: u32, enemy_threshold: u32) -> EntityKind {
    if roll < enemy_threshold {
        EntityKind::Enemy
    } else {
        EntityKind::PowerUp
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spawner {
    pub enemy_threshold: u32,
    /// Playfield width; x is drawn from [0, width]
    pub width: f32,
    /// Height entities appear at
    pub spawn_y: f32,
    /// Height entities are removed at
    pub despawn_y: f32,
    /// Whether falling bodies physically push the player
    pub push_back: bool,
}

impl Spawner {
    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self {
            enemy_threshold: tuning.enemy_roll_threshold,
            width: tuning.width,
            spawn_y: tuning.height + tuning.spawn_margin,
            despawn_y: tuning.despawn_y,
            push_back: tuning.physical_push_back,
        }
    }

    /// Draw the spawn roll
    pub fn roll<R: Rng>(&self, rng: &mut R) -> u32 {
        rng.random_range(0..SPAWN_ROLL_RANGE)
    }

    /// Random spawn point above the visible area
    pub fn spawn_position<R: Rng>(&self, rng: &mut R) -> Vec2 {
        Vec2::new(rng.random_range(0.0..=self.width), self.spawn_y)
    }

    /// Spawn one entity into `state` and describe it for the host
    ///
    /// `age` is how far into its fall the entity already is, for spawns that
    /// were due earlier in the step. Returns `None` without touching the RNG
    /// once the round is over.
    pub fn spawn<R: Rng>(&self, state: &mut GameState, rng: &mut R, age: f32) -> Option<HostCommand> {
        if state.is_game_over() {
            return None;
        }

        let kind = kind_for_roll(self.roll(rng), self.enemy_threshold);
        let position = self.spawn_position(rng);
        let fall_duration = state.difficulty.fall_duration(kind);
        let id = state.next_entity_id();

        state.entities.push(FallingEntity {
            id,
            kind,
            spawn_position: position,
            fall_duration,
            despawn_y: self.despawn_y,
            age,
        });

        log::debug!("Spawned {kind:?} #{id} at x={:.1} (falls in {fall_duration:.3}s)", position.x);

        Some(HostCommand::Spawn {
            id,
            kind,
            position,
            despawn_y: self.despawn_y,
            fall_duration,
            age,
            body: BodyConfig::falling(kind, self.push_back),
        })
    }
}
