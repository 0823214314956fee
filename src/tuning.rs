//! Game balance and playfield configuration
//!
//! Loaded from a JSON file; every field falls back to its default so a
//! tuning file only needs the values it changes.

use std::fs;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors that can occur while loading tuning
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("could not access tuning file: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse tuning file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid tuning: {0}")]
    Invalid(String),
}

/// Named balance presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DifficultyPreset {
    /// Uniform decay on all three parameters
    #[default]
    Standard,
    /// Spawn interval shrinks faster than the fall durations
    Classic,
}

impl DifficultyPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyPreset::Standard => "Standard",
            DifficultyPreset::Classic => "Classic",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "standard" | "std" => Some(DifficultyPreset::Standard),
            "classic" => Some(DifficultyPreset::Classic),
            _ => None,
        }
    }

    /// Per-tick decay of the spawn interval
    pub fn spawn_decay(&self) -> f32 {
        match self {
            DifficultyPreset::Standard => DEFAULT_DECAY,
            DifficultyPreset::Classic => CLASSIC_SPAWN_DECAY,
        }
    }
}

/// Game balance, playfield and audio levels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Playfield ===
    pub width: f32,
    pub height: f32,
    /// Height above the visible top edge where entities appear
    pub spawn_margin: f32,
    /// Height at which falling entities are removed
    pub despawn_y: f32,
    pub player_start_y: f32,

    // === Difficulty ===
    pub spawn_interval: f32,
    pub enemy_fall_duration: f32,
    pub power_up_fall_duration: f32,
    /// Seconds between difficulty ticks
    pub difficulty_interval: f32,
    pub spawn_decay: f32,
    pub enemy_fall_decay: f32,
    pub power_up_fall_decay: f32,

    // === Spawning ===
    /// Rolls in [0, 100) below this spawn an enemy
    pub enemy_roll_threshold: u32,

    // === Physics bodies ===
    /// Falling bodies physically push the player (collision mask set)
    /// instead of only reporting contacts
    pub physical_push_back: bool,

    // === Restart ===
    pub restart_region_width: f32,
    pub restart_region_height: f32,

    // === Audio ===
    pub sfx_volume: f32,
    pub music_volume: f32,
    pub muted: bool,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            spawn_margin: SPAWN_MARGIN,
            despawn_y: DESPAWN_Y,
            player_start_y: PLAYER_START_Y,

            spawn_interval: INITIAL_SPAWN_INTERVAL,
            enemy_fall_duration: INITIAL_ENEMY_FALL_DURATION,
            power_up_fall_duration: INITIAL_POWER_UP_FALL_DURATION,
            difficulty_interval: DIFFICULTY_INTERVAL,
            spawn_decay: DEFAULT_DECAY,
            enemy_fall_decay: DEFAULT_DECAY,
            power_up_fall_decay: DEFAULT_DECAY,

            enemy_roll_threshold: ENEMY_ROLL_THRESHOLD,

            physical_push_back: false,

            restart_region_width: 240.0,
            restart_region_height: 32.0,

            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
        }
    }
}

impl Tuning {
    /// Tuning for a named preset
    pub fn from_preset(preset: DifficultyPreset) -> Self {
        Self {
            spawn_decay: preset.spawn_decay(),
            ..Self::default()
        }
    }

    /// The balance of the shipped scene (spawn interval decays at 0.93)
    pub fn classic() -> Self {
        Self::from_preset(DifficultyPreset::Classic)
    }

    /// Playfield size
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Where the player appears at round start and on restart
    pub fn player_start(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.player_start_y)
    }

    /// Check that the values describe a playable game
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("width", self.width),
            ("height", self.height),
            ("spawn_interval", self.spawn_interval),
            ("enemy_fall_duration", self.enemy_fall_duration),
            ("power_up_fall_duration", self.power_up_fall_duration),
            ("difficulty_interval", self.difficulty_interval),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(TuningError::Invalid(format!("{name} must be positive, got {value}")));
            }
        }

        let decays = [
            ("spawn_decay", self.spawn_decay),
            ("enemy_fall_decay", self.enemy_fall_decay),
            ("power_up_fall_decay", self.power_up_fall_decay),
        ];
        for (name, value) in decays {
            if !(value > 0.0 && value <= 1.0) {
                return Err(TuningError::Invalid(format!("{name} must be in (0, 1], got {value}")));
            }
        }

        if self.enemy_roll_threshold > SPAWN_ROLL_RANGE {
            return Err(TuningError::Invalid(format!(
                "enemy_roll_threshold must be at most {SPAWN_ROLL_RANGE}, got {}",
                self.enemy_roll_threshold
            )));
        }

        if self.despawn_y >= self.height + self.spawn_margin {
            return Err(TuningError::Invalid(
                "despawn_y must lie below the spawn height".to_string(),
            ));
        }

        Ok(())
    }

    /// Load and validate tuning from a JSON file
    pub fn load(path: &Path) -> Result<Self, TuningError> {
        let json = fs::read_to_string(path)?;
        let tuning: Tuning = serde_json::from_str(&json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning, falling back to defaults on any error
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default tuning");
            return Self::default();
        };

        match Self::load(path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(e) => {
                log::warn!("{e} ({}), using default tuning", path.display());
                Self::default()
            }
        }
    }

    /// Tuning named on the command line: a preset name, a JSON file, or
    /// nothing (`-` or absent) for the defaults
    pub fn from_arg(arg: Option<&str>) -> Self {
        match arg.filter(|a| *a != "-") {
            None => Self::load_or_default(None),
            Some(name) => match DifficultyPreset::from_name(name) {
                Some(preset) => {
                    log::info!("Using {} preset", preset.as_str());
                    Self::from_preset(preset)
                }
                None => Self::load_or_default(Some(Path::new(name))),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.spawn_interval, 0.5);
        assert_eq!(tuning.enemy_fall_duration, 1.5);
        assert_eq!(tuning.power_up_fall_duration, 1.5);
        assert!(!tuning.physical_push_back);
    }

    #[test]
    fn test_classic_preset() {
        let tuning = Tuning::classic();
        assert_eq!(tuning.spawn_decay, 0.93);
        assert_eq!(tuning.enemy_fall_decay, 0.95);
        assert!(tuning.validate().is_ok());
    }

    #[test]
    fn test_preset_names() {
        assert_eq!(DifficultyPreset::from_name("CLASSIC"), Some(DifficultyPreset::Classic));
        assert_eq!(DifficultyPreset::from_name("std"), Some(DifficultyPreset::Standard));
        assert_eq!(DifficultyPreset::from_name("hard"), None);
        assert_eq!(DifficultyPreset::Classic.as_str(), "Classic");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning: Tuning = serde_json::from_str(r#"{ "spawn_decay": 0.9, "width": 500.0 }"#).unwrap();
        assert_eq!(tuning.spawn_decay, 0.9);
        assert_eq!(tuning.width, 500.0);
        assert_eq!(tuning.height, DEFAULT_HEIGHT);
        assert_eq!(tuning.enemy_roll_threshold, 95);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let zero_interval = Tuning {
            spawn_interval: 0.0,
            ..Default::default()
        };
        assert!(matches!(zero_interval.validate(), Err(TuningError::Invalid(_))));

        let growing = Tuning {
            enemy_fall_decay: 1.2,
            ..Default::default()
        };
        assert!(growing.validate().is_err());

        let threshold = Tuning {
            enemy_roll_threshold: 101,
            ..Default::default()
        };
        assert!(threshold.validate().is_err());
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let path = std::env::temp_dir().join("super_space_man_missing_tuning.json");
        let _ = fs::remove_file(&path);
        assert!(matches!(Tuning::load(&path), Err(TuningError::Io(_))));
        assert_eq!(Tuning::load_or_default(Some(&path)), Tuning::default());
    }

    #[test]
    fn test_load_written_file() {
        let path = std::env::temp_dir().join(format!("super_space_man_tuning_{}.json", std::process::id()));
        let tuning = Tuning {
            physical_push_back: true,
            ..Tuning::classic()
        };
        fs::write(&path, serde_json::to_string_pretty(&tuning).unwrap()).unwrap();
        let loaded = Tuning::load(&path).unwrap();
        let from_arg = Tuning::from_arg(path.to_str());
        let _ = fs::remove_file(&path);
        assert_eq!(loaded, tuning);
        assert_eq!(from_arg, tuning);
    }

    #[test]
    fn test_from_arg() {
        assert_eq!(Tuning::from_arg(None), Tuning::default());
        assert_eq!(Tuning::from_arg(Some("-")), Tuning::default());
        assert_eq!(Tuning::from_arg(Some("Classic")), Tuning::classic());
        assert_eq!(Tuning::from_arg(Some("standard")), Tuning::default());
        assert_eq!(Tuning::from_arg(Some("no_such_tuning_file.json")), Tuning::default());
    }

    #[test]
    fn test_load_rejects_garbage() {
        let path = std::env::temp_dir().join(format!("super_space_man_garbage_{}.json", std::process::id()));
        fs::write(&path, "not json").unwrap();
        let result = Tuning::load(&path);
        let _ = fs::remove_file(&path);
        assert!(matches!(result, Err(TuningError::Parse(_))));
    }
}
