//! Deterministic rules core
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Simulation clock only (no wall time)
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, physics or audio dependencies; the host is told what to
//!   do through queued `HostCommand`s

pub mod collision;
pub mod command;
pub mod difficulty;
pub mod schedule;
pub mod session;
pub mod spawner;
pub mod state;

pub use collision::{BodyConfig, Category, ContactBody, classify};
pub use command::{Effect, HostCommand, RemoveReason};
pub use difficulty::DifficultyScaler;
pub use schedule::Schedule;
pub use session::{PressOutcome, Session};
pub use spawner::{Spawner, kind_for_roll};
pub use state::{
    Difficulty, EntityId, EntityKind, FallingEntity, GamePhase, GameState, Player, ScoreOutcome,
};
