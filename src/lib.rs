//! Super Space Man - dodge the falling black holes, catch the power-ups
//!
//! Core modules:
//! - `sim`: Deterministic rules core (score, difficulty, spawning, contacts, restart)
//! - `tuning`: Data-driven game balance loaded from JSON
//! - `audio`: Sound bank that degrades gracefully when media is missing
//! - `presentation`: Label texts and layout for the host's UI
//! - `headless`: Reference host that drives a session without an engine

pub mod audio;
pub mod headless;
pub mod presentation;
pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Game configuration constants
pub mod consts {
    /// Fixed timestep used by the headless host (60 Hz, matches the display link)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum times a single schedule may fire during one `advance`
    pub const MAX_FIRES_PER_ADVANCE: u32 = 64;

    /// Score at the start of every round
    pub const INITIAL_SCORE: i32 = 3;

    /// Seconds between spawns at round start
    pub const INITIAL_SPAWN_INTERVAL: f32 = 0.5;
    /// Seconds an enemy takes to fall through the playfield at round start
    pub const INITIAL_ENEMY_FALL_DURATION: f32 = 1.5;
    /// Seconds a power-up takes to fall through the playfield at round start
    pub const INITIAL_POWER_UP_FALL_DURATION: f32 = 1.5;

    /// Seconds between difficulty ticks
    pub const DIFFICULTY_INTERVAL: f32 = 2.0;
    /// Default per-tick decay applied to all three difficulty parameters
    pub const DEFAULT_DECAY: f32 = 0.95;
    /// Spawn interval decay used by the shipped scene
    pub const CLASSIC_SPAWN_DECAY: f32 = 0.93;

    /// Spawn roll is uniform in [0, SPAWN_ROLL_RANGE)
    pub const SPAWN_ROLL_RANGE: u32 = 100;
    /// Rolls below this produce an enemy, the rest a power-up
    pub const ENEMY_ROLL_THRESHOLD: u32 = 95;

    /// Falling entities appear this far above the visible top edge
    pub const SPAWN_MARGIN: f32 = 100.0;
    /// Falling entities are removed once they reach this height
    pub const DESPAWN_Y: f32 = -100.0;

    /// Player spawn height (x is centered)
    pub const PLAYER_START_Y: f32 = 200.0;

    /// Body radii (half the sprite widths)
    pub const PLAYER_RADIUS: f32 = 32.0;
    pub const ENEMY_RADIUS: f32 = 24.0;
    pub const POWER_UP_RADIUS: f32 = 20.0;

    /// Default playfield (portrait phone in points)
    pub const DEFAULT_WIDTH: f32 = 390.0;
    pub const DEFAULT_HEIGHT: f32 = 844.0;
}

/// Axis-aligned rectangle in playfield coordinates (origin bottom-left, y up)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    /// Rectangle of the given size centered on `center`
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }
}
