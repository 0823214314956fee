//! A play session: the game state plus the timers and RNG that drive it
//!
//! The host calls into the session from its event callbacks (`advance`,
//! `on_contact`, `on_press`, `on_drag`) one at a time. Each call applies its
//! whole effect before returning and queues `HostCommand`s for the host to
//! drain.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::{self, BodyConfig, ContactBody};
use super::command::{Effect, HostCommand, RemoveReason};
use super::difficulty::DifficultyScaler;
use super::schedule::Schedule;
use super::spawner::Spawner;
use super::state::{EntityKind, GameState, ScoreOutcome};
use crate::Tuning;
use crate::consts::MAX_FIRES_PER_ADVANCE;
use crate::presentation::Layout;

/// What a press did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressOutcome {
    /// Round was over and the press hit the restart region
    Restarted,
    /// Press moved the player
    Moved,
    /// No player to move
    Ignored,
}

pub struct Session {
    tuning: Tuning,
    layout: Layout,
    state: GameState,
    rng: Pcg32,
    spawner: Spawner,
    scaler: DifficultyScaler,
    spawn_timer: Schedule,
    difficulty_timer: Schedule,
    commands: Vec<HostCommand>,
}

impl Session {
    /// Start a session; the first round begins immediately
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        let mut session = Self {
            layout: Layout::new(&tuning),
            state: GameState::new(seed, &tuning),
            rng: Pcg32::seed_from_u64(seed),
            spawner: Spawner::from_tuning(&tuning),
            scaler: DifficultyScaler::from_tuning(&tuning),
            spawn_timer: Schedule::idle(),
            difficulty_timer: Schedule::idle(),
            commands: Vec::new(),
            tuning,
        };

        session.arm_timers();
        session.commands.push(HostCommand::ScoreDisplay {
            score: session.state.score,
        });
        log::info!("Session started with seed {seed}");
        session
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn spawn_timer(&self) -> &Schedule {
        &self.spawn_timer
    }

    pub fn difficulty_timer(&self) -> &Schedule {
        &self.difficulty_timer
    }

    /// Take all queued commands
    pub fn drain_commands(&mut self) -> Vec<HostCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Spawning fires right away, difficulty after its first full interval
    fn arm_timers(&mut self) {
        self.spawn_timer.start(0.0);
        self.difficulty_timer.start(self.scaler.interval);
    }

    fn cancel_timers(&mut self) {
        self.spawn_timer.cancel();
        self.difficulty_timer.cancel();
    }

    /// Let `dt` seconds of simulation time pass
    pub fn advance(&mut self, dt: f32) {
        self.state.clock += f64::from(dt);

        // Expire entities that reached the bottom
        for entity in &mut self.state.entities {
            entity.advance(dt);
        }
        let commands = &mut self.commands;
        self.state.entities.retain(|entity| {
            if entity.expired() {
                commands.push(HostCommand::Remove {
                    id: entity.id,
                    reason: RemoveReason::Expired,
                });
                false
            } else {
                true
            }
        });

        if self.state.is_game_over() {
            return;
        }

        self.difficulty_timer.elapse(dt);
        let mut fires = 0;
        while self.difficulty_timer.due() {
            if fires == MAX_FIRES_PER_ADVANCE {
                log::warn!("Difficulty timer fell behind, dropping backlog");
                self.difficulty_timer.resync(self.scaler.interval);
                break;
            }
            self.scaler.apply(&mut self.state.difficulty);
            self.difficulty_timer.rearm(self.scaler.interval);
            fires += 1;
        }
        if fires > 0 {
            log::debug!(
                "Difficulty now spawn={:.4}s enemy={:.4}s power-up={:.4}s",
                self.state.difficulty.spawn_interval,
                self.state.difficulty.enemy_fall_duration,
                self.state.difficulty.power_up_fall_duration
            );
        }

        self.spawn_timer.elapse(dt);
        let mut fires = 0;
        while self.spawn_timer.due() {
            if fires == MAX_FIRES_PER_ADVANCE {
                log::warn!("Spawn timer fell behind, dropping backlog");
                self.spawn_timer.resync(self.state.difficulty.spawn_interval);
                break;
            }
            let age = self.spawn_timer.overdue();
            if let Some(command) = self.spawner.spawn(&mut self.state, &mut self.rng, age) {
                self.commands.push(command);
            }
            // Interval is read now, so difficulty changes apply to the next wait
            self.spawn_timer.rearm(self.state.difficulty.spawn_interval);
            fires += 1;
        }
    }

    /// The host saw two bodies touch
    ///
    /// Returns the score outcome when the contact was a player contact with
    /// a live entity; everything else is ignored.
    pub fn on_contact(&mut self, a: ContactBody, b: ContactBody) -> Option<ScoreOutcome> {
        let Some((kind, body)) = collision::non_player(&a, &b) else {
            log::debug!("Ignoring contact {:?} / {:?}", a.category, b.category);
            return None;
        };

        if self.state.is_game_over() {
            log::debug!("Ignoring {kind:?} contact after game over");
            return None;
        }

        let Some(id) = body.entity else {
            log::debug!("Ignoring {kind:?} contact without an entity");
            return None;
        };
        let Some(entity) = self.state.remove_entity(id) else {
            log::debug!("Ignoring contact with {kind:?} #{id}, already removed");
            return None;
        };

        let at = entity.position();
        match kind {
            EntityKind::Enemy => {
                self.commands.push(HostCommand::PlayEffect(Effect::Explosion { at }));
                self.commands.push(HostCommand::Remove {
                    id,
                    reason: RemoveReason::Destroyed,
                });
            }
            EntityKind::PowerUp => {
                self.commands.push(HostCommand::Remove {
                    id,
                    reason: RemoveReason::Collected,
                });
                self.commands.push(HostCommand::PlayEffect(Effect::Recover { at }));
            }
        }

        let outcome = self.state.apply_collision(kind);
        self.commands.push(HostCommand::ScoreDisplay {
            score: self.state.score,
        });

        if let ScoreOutcome::RoundEnded { elapsed } = outcome {
            self.end_round(elapsed);
        }

        Some(outcome)
    }

    /// Game-over sequence: stop the timers, blow up the player, show results
    fn end_round(&mut self, elapsed: f64) {
        self.cancel_timers();

        self.commands.push(HostCommand::GameOverDisplay { elapsed });
        self.commands.push(HostCommand::PlayEffect(Effect::PlayerExplosion {
            at: self.state.player.position,
        }));
        self.commands.push(HostCommand::RemovePlayer);

        log::info!("Round {} over, survived {elapsed:.3}s", self.state.round);
    }

    /// Start a new round; only allowed once the current round is over
    ///
    /// Returns false (and does nothing) while a round is active.
    pub fn restart(&mut self) -> bool {
        if !self.state.is_game_over() {
            return false;
        }

        // Entities still falling from the last round go away with it
        for entity in &self.state.entities {
            self.commands.push(HostCommand::Remove {
                id: entity.id,
                reason: RemoveReason::Expired,
            });
        }

        self.state.reset_round(&self.tuning);
        self.arm_timers();

        self.commands.push(HostCommand::RestartDisplayClear);
        self.commands.push(HostCommand::RespawnPlayer {
            position: self.state.player.position,
            body: BodyConfig::player(),
        });
        self.commands.push(HostCommand::ScoreDisplay {
            score: self.state.score,
        });

        log::info!("Round {} started", self.state.round);
        true
    }

    /// A touch began at `position`
    ///
    /// Restarts a finished round when the touch lands in the restart region;
    /// otherwise it is ordinary player movement.
    pub fn on_press(&mut self, position: Vec2) -> PressOutcome {
        if self.state.is_game_over() && self.layout.restart_region.contains(position) && self.restart() {
            return PressOutcome::Restarted;
        }
        self.move_player(position)
    }

    /// A touch moved to `position`
    pub fn on_drag(&mut self, position: Vec2) -> PressOutcome {
        self.move_player(position)
    }

    fn move_player(&mut self, position: Vec2) -> PressOutcome {
        if !self.state.player.present {
            return PressOutcome::Ignored;
        }
        self.state.player.position = position;
        self.commands.push(HostCommand::MovePlayer { position });
        PressOutcome::Moved
    }
}
