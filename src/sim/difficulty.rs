//! Difficulty scaling
//!
//! Every tick shrinks the spawn interval and both fall durations
//! geometrically. There is no floor: the parameters approach zero without
//! reaching it.

use serde::{Deserialize, Serialize};

use super::state::Difficulty;
use crate::Tuning;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyScaler {
    /// Seconds between ticks
    pub interval: f32,
    pub spawn_decay: f32,
    pub enemy_fall_decay: f32,
    pub power_up_fall_decay: f32,
}

impl DifficultyScaler {
    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self {
            interval: tuning.difficulty_interval,
            spawn_decay: tuning.spawn_decay,
            enemy_fall_decay: tuning.enemy_fall_decay,
            power_up_fall_decay: tuning.power_up_fall_decay,
        }
    }

    /// Apply one tick of decay
    pub fn apply(&self, difficulty: &mut Difficulty) {
        difficulty.spawn_interval *= self.spawn_decay;
        difficulty.enemy_fall_duration *= self.enemy_fall_decay;
        difficulty.power_up_fall_duration *= self.power_up_fall_decay;
    }
}

impl Default for DifficultyScaler {
    fn default() -> Self {
        Self::from_tuning(&Tuning::default())
    }
}
