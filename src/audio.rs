//! Sound bank for effects and background music
//!
//! Clips are read from an asset directory at startup. A clip that is missing
//! or unreadable is logged and left out; playing it later is a silent no-op,
//! so the round carries on without sound.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::Tuning;
use crate::sim::Effect;

/// Errors loading a single clip
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("audio asset {0} not found")]
    Missing(PathBuf),

    #[error("could not read audio asset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("audio asset {0} is empty")]
    Empty(PathBuf),
}

/// Sounds the game plays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sound {
    /// Enemy hits the player
    Explosion,
    /// Power-up caught
    Recover,
    /// Looping soundtrack
    BackgroundMusic,
}

impl Sound {
    pub const ALL: [Sound; 3] = [Sound::Explosion, Sound::Recover, Sound::BackgroundMusic];

    /// Asset file name
    pub fn file_name(self) -> &'static str {
        match self {
            Sound::Explosion => "explosion.mp3",
            Sound::Recover => "recover.wav",
            Sound::BackgroundMusic => "JeremyBlakePowerup.mp3",
        }
    }

    /// Per-clip gain; the explosion recording is too loud at full volume
    pub fn base_volume(self) -> f32 {
        match self {
            Sound::Explosion => 0.5,
            Sound::Recover | Sound::BackgroundMusic => 1.0,
        }
    }

    pub fn looping(self) -> bool {
        matches!(self, Sound::BackgroundMusic)
    }

    /// Sound accompanying a gameplay effect
    pub fn for_effect(effect: &Effect) -> Option<Sound> {
        match effect {
            Effect::Explosion { .. } => Some(Sound::Explosion),
            Effect::Recover { .. } => Some(Sound::Recover),
            Effect::PlayerExplosion { .. } => None,
        }
    }
}

/// A loaded clip
#[derive(Debug, Clone)]
struct Clip {
    sound: Sound,
    data: Vec<u8>,
}

/// What the host's mixer should play
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Playback<'a> {
    pub sound: Sound,
    pub data: &'a [u8],
    pub volume: f32,
    pub looping: bool,
}

/// Loaded clips plus volume settings
#[derive(Debug, Default)]
pub struct SoundBank {
    clips: Vec<Clip>,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    /// Number of successful `play` calls
    played: u32,
}

impl SoundBank {
    /// A bank with no clips; every `play` is a no-op
    pub fn silent() -> Self {
        Self {
            sfx_volume: 1.0,
            music_volume: 1.0,
            ..Default::default()
        }
    }

    /// Load every clip from `dir`, skipping the ones that fail
    pub fn load(dir: &Path, tuning: &Tuning) -> Self {
        let mut bank = Self {
            sfx_volume: tuning.sfx_volume.clamp(0.0, 1.0),
            music_volume: tuning.music_volume.clamp(0.0, 1.0),
            muted: tuning.muted,
            ..Default::default()
        };

        for sound in Sound::ALL {
            match load_clip(&dir.join(sound.file_name())) {
                Ok(data) => bank.clips.push(Clip { sound, data }),
                Err(e) => log::warn!("{e} - {sound:?} disabled"),
            }
        }

        if bank.clips.is_empty() {
            log::warn!("No audio assets in {} - audio disabled", dir.display());
        } else {
            log::info!("Loaded {} audio clips", bank.clips.len());
        }
        bank
    }

    pub fn is_loaded(&self, sound: Sound) -> bool {
        self.clips.iter().any(|c| c.sound == sound)
    }

    pub fn played(&self) -> u32 {
        self.played
    }

    fn effective_volume(&self, sound: Sound) -> f32 {
        if self.muted {
            return 0.0;
        }
        let channel = if sound.looping() {
            self.music_volume
        } else {
            self.sfx_volume
        };
        channel * sound.base_volume()
    }

    /// Play a sound if it loaded and isn't muted
    pub fn play(&mut self, sound: Sound) -> Option<Playback<'_>> {
        let volume = self.effective_volume(sound);
        if volume <= 0.0 {
            return None;
        }
        let clip = self.clips.iter().find(|c| c.sound == sound)?;
        self.played += 1;
        log::debug!("Playing {sound:?} at volume {volume:.2}");
        Some(Playback {
            sound,
            data: &clip.data,
            volume,
            looping: sound.looping(),
        })
    }

    /// Play the sound for a gameplay effect, if it has one
    pub fn play_effect(&mut self, effect: &Effect) -> Option<Playback<'_>> {
        self.play(Sound::for_effect(effect)?)
    }
}

fn load_clip(path: &Path) -> Result<Vec<u8>, AudioError> {
    if !path.exists() {
        return Err(AudioError::Missing(path.to_path_buf()));
    }
    let data = fs::read(path).map_err(|source| AudioError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if data.is_empty() {
        return Err(AudioError::Empty(path.to_path_buf()));
    }
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn asset_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("super_space_man_{name}_{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_missing_assets_degrade() {
        let dir = asset_dir("no_audio");
        let mut bank = SoundBank::load(&dir, &Tuning::default());
        let _ = fs::remove_dir_all(&dir);

        for sound in Sound::ALL {
            assert!(!bank.is_loaded(sound));
            assert!(bank.play(sound).is_none());
        }
        assert_eq!(bank.played(), 0);
    }

    #[test]
    fn test_partial_assets() {
        let dir = asset_dir("partial_audio");
        fs::write(dir.join("explosion.mp3"), b"boom").unwrap();
        fs::write(dir.join("recover.wav"), b"").unwrap();
        let mut bank = SoundBank::load(&dir, &Tuning::default());
        let _ = fs::remove_dir_all(&dir);

        assert!(bank.is_loaded(Sound::Explosion));
        // Empty file is rejected
        assert!(!bank.is_loaded(Sound::Recover));
        assert!(!bank.is_loaded(Sound::BackgroundMusic));

        let playback = bank.play_effect(&Effect::Explosion { at: Vec2::ZERO }).unwrap();
        assert_eq!(playback.data, b"boom");
        assert!((playback.volume - 0.5).abs() < 1e-6);
        assert!(!playback.looping);

        assert!(bank.play_effect(&Effect::Recover { at: Vec2::ZERO }).is_none());
        assert!(bank.play_effect(&Effect::PlayerExplosion { at: Vec2::ZERO }).is_none());
        assert_eq!(bank.played(), 1);
    }

    #[test]
    fn test_music_loops_and_mute() {
        let dir = asset_dir("music_audio");
        fs::write(dir.join("JeremyBlakePowerup.mp3"), b"tune").unwrap();
        let mut bank = SoundBank::load(&dir, &Tuning::default());

        let playback = bank.play(Sound::BackgroundMusic).unwrap();
        assert!(playback.looping);
        assert!((playback.volume - 0.7).abs() < 1e-6);

        let muted = Tuning {
            muted: true,
            ..Default::default()
        };
        let mut bank = SoundBank::load(&dir, &muted);
        let _ = fs::remove_dir_all(&dir);
        assert!(bank.is_loaded(Sound::BackgroundMusic));
        assert!(bank.play(Sound::BackgroundMusic).is_none());
    }

    #[test]
    fn test_load_clip_errors() {
        let dir = asset_dir("clip_errors");
        let missing = dir.join("nope.wav");
        assert!(matches!(load_clip(&missing), Err(AudioError::Missing(_))));
        let empty = dir.join("empty.wav");
        fs::write(&empty, b"").unwrap();
        assert!(matches!(load_clip(&empty), Err(AudioError::Empty(_))));
        let _ = fs::remove_dir_all(&dir);
    }
}
