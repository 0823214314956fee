//! Game state and core simulation types
//!
//! Everything a round needs to be replayed lives here; the session owns it
//! exclusively.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::Tuning;
use crate::consts::INITIAL_SCORE;

/// Entity identifier, unique within a session and never reused
pub type EntityId = u32;

/// Current phase of the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Score reached zero; waiting for a restart
    GameOver,
}

/// What kind of thing is falling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Enemy,
    PowerUp,
}

impl EntityKind {
    /// Score change when the player touches this kind
    pub fn score_delta(self) -> i32 {
        match self {
            EntityKind::Enemy => -1,
            EntityKind::PowerUp => 1,
        }
    }

    /// Sprite asset name
    pub fn sprite(self) -> &'static str {
        match self {
            EntityKind::Enemy => "BlackHole0",
            EntityKind::PowerUp => "PowerUp",
        }
    }

    /// Particle emitter attached to the falling body
    pub fn emitter(self) -> &'static str {
        match self {
            EntityKind::Enemy => "Flame",
            EntityKind::PowerUp => "Fountain",
        }
    }
}

/// The three parameters the difficulty scaler shrinks
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    /// Seconds between spawns
    pub spawn_interval: f32,
    /// Seconds for an enemy to fall through the playfield
    pub enemy_fall_duration: f32,
    /// Seconds for a power-up to fall through the playfield
    pub power_up_fall_duration: f32,
}

impl Difficulty {
    /// Round-start values
    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self {
            spawn_interval: tuning.spawn_interval,
            enemy_fall_duration: tuning.enemy_fall_duration,
            power_up_fall_duration: tuning.power_up_fall_duration,
        }
    }

    /// Fall duration for a newly spawned entity of `kind`
    pub fn fall_duration(&self, kind: EntityKind) -> f32 {
        match kind {
            EntityKind::Enemy => self.enemy_fall_duration,
            EntityKind::PowerUp => self.power_up_fall_duration,
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::from_tuning(&Tuning::default())
    }
}

/// An enemy or power-up descending in a straight line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallingEntity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub spawn_position: Vec2,
    /// Captured at spawn; later difficulty changes don't affect it
    pub fall_duration: f32,
    /// Height at which the entity is removed
    pub despawn_y: f32,
    /// Seconds since spawn
    pub age: f32,
}

impl FallingEntity {
    /// Advance the entity's age
    pub fn advance(&mut self, dt: f32) {
        self.age += dt;
    }

    /// Fraction of the fall completed, in [0, 1]
    pub fn progress(&self) -> f32 {
        (self.age / self.fall_duration).clamp(0.0, 1.0)
    }

    /// Current position on the straight descent
    pub fn position(&self) -> Vec2 {
        let end = Vec2::new(self.spawn_position.x, self.despawn_y);
        self.spawn_position.lerp(end, self.progress())
    }

    /// Whether the entity has reached the bottom and should be removed
    pub fn expired(&self) -> bool {
        self.age >= self.fall_duration
    }
}

/// The player-controlled node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub position: Vec2,
    /// False between the game-over explosion and the next restart
    pub present: bool,
}

impl Player {
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            present: true,
        }
    }
}

/// Result of applying a collision to the score
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScoreOutcome {
    /// Score changed, round continues
    Continue,
    /// Score reached zero; seconds survived this round
    RoundEnded { elapsed: f64 },
    /// Round already over, nothing changed
    Ignored,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    pub score: i32,
    pub phase: GamePhase,
    /// Simulation seconds since the session began
    pub clock: f64,
    /// Clock value when the current round began
    pub start_time: f64,
    pub difficulty: Difficulty,
    pub player: Player,
    /// Live falling entities (sorted by id for determinism)
    pub entities: Vec<FallingEntity>,
    /// Rounds started in this session, including the current one
    pub round: u32,
    /// Next entity ID
    next_id: EntityId,
}

impl GameState {
    /// Create the state for the first round of a session
    pub fn new(seed: u64, tuning: &Tuning) -> Self {
        Self {
            seed,
            score: INITIAL_SCORE,
            phase: GamePhase::Playing,
            clock: 0.0,
            start_time: 0.0,
            difficulty: Difficulty::from_tuning(tuning),
            player: Player::at(tuning.player_start()),
            entities: Vec::new(),
            round: 1,
            next_id: 1,
        }
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Seconds since the current round began
    pub fn elapsed(&self) -> f64 {
        (self.clock - self.start_time).max(0.0)
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Apply the score effect of the player touching `kind`
    ///
    /// Ends the round when the score reaches exactly zero. Once the round is
    /// over nothing changes until `reset_round`.
    pub fn apply_collision(&mut self, kind: EntityKind) -> ScoreOutcome {
        if self.is_game_over() {
            return ScoreOutcome::Ignored;
        }

        self.score += kind.score_delta();

        if self.score == 0 {
            self.phase = GamePhase::GameOver;
            self.player.present = false;
            ScoreOutcome::RoundEnded {
                elapsed: self.elapsed(),
            }
        } else {
            ScoreOutcome::Continue
        }
    }

    /// Put the state back to round-start values; the clock keeps running
    pub fn reset_round(&mut self, tuning: &Tuning) {
        self.score = INITIAL_SCORE;
        self.phase = GamePhase::Playing;
        self.start_time = self.clock;
        self.difficulty = Difficulty::from_tuning(tuning);
        self.player = Player::at(tuning.player_start());
        self.entities.clear();
        self.round += 1;
    }

    /// Look up a live entity
    pub fn entity(&self, id: EntityId) -> Option<&FallingEntity> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// Remove a live entity, returning it if it existed
    pub fn remove_entity(&mut self, id: EntityId) -> Option<FallingEntity> {
        let index = self.entities.iter().position(|e| e.id == id)?;
        Some(self.entities.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn fresh() -> GameState {
        GameState::new(7, &Tuning::default())
    }

    #[test]
    fn test_new_state() {
        let state = fresh();
        assert_eq!(state.score, 3);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.player.present);
        assert_eq!(state.player.position, Vec2::new(195.0, 200.0));
        assert_eq!(state.difficulty, Difficulty::default());
    }

    #[test]
    fn test_score_scenario() {
        let mut state = fresh();
        state.clock = 12.5;

        assert_eq!(state.apply_collision(EntityKind::Enemy), ScoreOutcome::Continue);
        assert_eq!(state.score, 2);
        assert_eq!(state.apply_collision(EntityKind::Enemy), ScoreOutcome::Continue);
        assert_eq!(state.score, 1);
        assert_eq!(state.apply_collision(EntityKind::PowerUp), ScoreOutcome::Continue);
        assert_eq!(state.score, 2);
        assert_eq!(state.apply_collision(EntityKind::Enemy), ScoreOutcome::Continue);
        assert_eq!(state.score, 1);

        let outcome = state.apply_collision(EntityKind::Enemy);
        assert_eq!(state.score, 0);
        assert!(state.is_game_over());
        assert!(!state.player.present);
        match outcome {
            ScoreOutcome::RoundEnded { elapsed } => assert!((elapsed - 12.5).abs() < 1e-9),
            other => panic!("expected round end, got {other:?}"),
        }
    }

    #[test]
    fn test_game_over_is_terminal() {
        let mut state = fresh();
        for _ in 0..3 {
            state.apply_collision(EntityKind::Enemy);
        }
        assert!(state.is_game_over());

        assert_eq!(state.apply_collision(EntityKind::Enemy), ScoreOutcome::Ignored);
        assert_eq!(state.apply_collision(EntityKind::PowerUp), ScoreOutcome::Ignored);
        assert_eq!(state.score, 0);
        assert!(state.is_game_over());
    }

    #[test]
    fn test_reset_round() {
        let tuning = Tuning::default();
        let mut state = fresh();
        state.clock = 30.0;
        state.difficulty.spawn_interval = 0.01;
        state.difficulty.enemy_fall_duration = 0.2;
        let id = state.next_entity_id();
        state.entities.push(FallingEntity {
            id,
            kind: EntityKind::Enemy,
            spawn_position: Vec2::new(10.0, 944.0),
            fall_duration: 1.0,
            despawn_y: -100.0,
            age: 0.0,
        });
        for _ in 0..3 {
            state.apply_collision(EntityKind::Enemy);
        }

        state.reset_round(&tuning);
        assert_eq!(state.score, 3);
        assert!(!state.is_game_over());
        assert_eq!(state.difficulty, Difficulty::from_tuning(&tuning));
        assert_eq!(state.start_time, 30.0);
        assert_eq!(state.elapsed(), 0.0);
        assert!(state.entities.is_empty());
        assert!(state.player.present);
        assert_eq!(state.round, 2);
        // IDs keep counting across rounds
        assert_eq!(state.next_entity_id(), id + 1);
    }

    #[test]
    fn test_entity_descent() {
        let mut entity = FallingEntity {
            id: 1,
            kind: EntityKind::PowerUp,
            spawn_position: Vec2::new(50.0, 900.0),
            fall_duration: 2.0,
            despawn_y: -100.0,
            age: 0.0,
        };
        assert_eq!(entity.position(), Vec2::new(50.0, 900.0));

        entity.advance(1.0);
        assert!((entity.position().y - 400.0).abs() < 1e-3);
        assert_eq!(entity.position().x, 50.0);
        assert!(!entity.expired());

        entity.advance(1.5);
        assert!(entity.expired());
        assert_eq!(entity.position(), Vec2::new(50.0, -100.0));
    }

    #[test]
    fn test_remove_entity() {
        let mut state = fresh();
        for x in [1.0, 2.0, 3.0] {
            let id = state.next_entity_id();
            state.entities.push(FallingEntity {
                id,
                kind: EntityKind::Enemy,
                spawn_position: Vec2::new(x, 944.0),
                fall_duration: 1.5,
                despawn_y: -100.0,
                age: 0.0,
            });
        }
        assert_eq!(state.remove_entity(2).map(|e| e.id), Some(2));
        assert!(state.remove_entity(2).is_none());
        assert!(state.entity(1).is_some());
        assert!(state.entity(2).is_none());
        assert_eq!(state.entities.len(), 2);
    }

    proptest! {
        #[test]
        fn prop_score_is_initial_minus_hits_plus_pickups(hits in proptest::collection::vec(any::<bool>(), 0..64)) {
            let mut state = fresh();
            let mut expected = INITIAL_SCORE;
            let mut ended = false;

            for is_enemy in hits {
                let kind = if is_enemy { EntityKind::Enemy } else { EntityKind::PowerUp };
                let outcome = state.apply_collision(kind);
                if ended {
                    prop_assert_eq!(outcome, ScoreOutcome::Ignored);
                    continue;
                }
                expected += kind.score_delta();
                prop_assert_eq!(state.score, expected);
                if expected == 0 {
                    let round_ended = matches!(outcome, ScoreOutcome::RoundEnded { .. });
                    prop_assert!(round_ended, "expected round end, got {:?}", outcome);
                    ended = true;
                } else {
                    prop_assert_eq!(outcome, ScoreOutcome::Continue);
                }
            }
            prop_assert_eq!(state.is_game_over(), ended);
            prop_assert!(state.score >= 0);
        }
    }
}
