//! Headless reference host
//!
//! Plays the part of the engine for a session: mirrors spawned bodies, moves
//! them down their straight paths, reports the first frame each one's path
//! passes over the player, and steers the player with a simple pilot. Used by
//! the native binary and by tests that need whole rounds.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::audio::{Sound, SoundBank};
use crate::presentation;
use crate::sim::{
    BodyConfig, ContactBody, EntityId, EntityKind, HostCommand, PressOutcome, RemoveReason, Session,
};

/// How the player is steered
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pilot {
    /// Never moves
    Idle,
    /// Slides sideways away from enemies and toward power-ups
    Dodger {
        /// Horizontal speed (points/second)
        speed: f32,
        /// How far above the player falling bodies are considered
        lookahead: f32,
    },
}

impl Default for Pilot {
    fn default() -> Self {
        Pilot::Dodger {
            speed: 420.0,
            lookahead: 260.0,
        }
    }
}

/// A falling body as the host sees it
#[derive(Debug, Clone)]
struct Body {
    id: EntityId,
    kind: EntityKind,
    start: Vec2,
    despawn_y: f32,
    fall_duration: f32,
    age: f32,
    /// Position before the last frame's move
    prev: Vec2,
    radius: f32,
    /// Contact already reported
    touched: bool,
}

impl Body {
    fn position(&self) -> Vec2 {
        let t = (self.age / self.fall_duration).clamp(0.0, 1.0);
        self.start.lerp(Vec2::new(self.start.x, self.despawn_y), t)
    }

    /// Closest approach to `point` along the last frame's path
    fn swept_distance(&self, point: Vec2) -> f32 {
        let cur = self.position();
        let (low, high) = (cur.y.min(self.prev.y), cur.y.max(self.prev.y));
        Vec2::new(cur.x, point.y.clamp(low, high)).distance(point)
    }
}

/// Summary of one round
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoundReport {
    pub seed: u64,
    pub round: u32,
    /// Seconds survived, if the round ended
    pub survived: Option<f64>,
    pub spawned: u32,
    pub enemies_hit: u32,
    pub power_ups_collected: u32,
    pub expired: u32,
    pub sounds_played: u32,
    pub final_score: i32,
}

pub struct HeadlessHost {
    session: Session,
    sounds: SoundBank,
    pilot: Pilot,
    bodies: Vec<Body>,
    /// Player position and radius while it is in the scene
    player: Option<(Vec2, f32)>,
    score_label: String,
    game_over_labels: Option<[String; 3]>,
    report: RoundReport,
}

impl HeadlessHost {
    pub fn new(session: Session, mut sounds: SoundBank, pilot: Pilot) -> Self {
        let player = session.state().player.position;
        if sounds.play(Sound::BackgroundMusic).is_none() {
            log::debug!("Background music unavailable");
        }
        let mut host = Self {
            report: RoundReport {
                seed: session.state().seed,
                round: session.state().round,
                ..Default::default()
            },
            session,
            sounds,
            pilot,
            bodies: Vec::new(),
            player: Some((player, BodyConfig::player().radius)),
            score_label: String::new(),
            game_over_labels: None,
        };
        host.apply_commands();
        host
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn score_label(&self) -> &str {
        &self.score_label
    }

    pub fn game_over_labels(&self) -> Option<&[String; 3]> {
        self.game_over_labels.as_ref()
    }

    pub fn live_bodies(&self) -> usize {
        self.bodies.len()
    }

    /// One host frame
    pub fn step(&mut self, dt: f32) {
        if let Some(target) = self.steer(dt) {
            self.session.on_drag(target);
        }

        self.session.advance(dt);

        // Bodies spawned by this advance arrive with their own age
        for body in &mut self.bodies {
            body.prev = body.position();
            body.age += dt;
        }
        self.apply_commands();

        self.report_contacts();
    }

    /// Run until the round ends or `max_time` seconds pass
    pub fn run_round(&mut self, dt: f32, max_time: f64) -> RoundReport {
        let start = self.session.state().elapsed();
        while !self.session.state().is_game_over() && self.session.state().elapsed() - start < max_time {
            self.step(dt);
        }
        self.report.final_score = self.session.state().score;
        self.report.sounds_played = self.sounds.played();
        self.report.clone()
    }

    /// Tap the restart prompt
    pub fn press_restart(&mut self) -> bool {
        let target = self.session.layout().restart_region.center();
        let restarted = self.session.on_press(target) == PressOutcome::Restarted;
        // Leftover bodies are cleared into the old report
        self.apply_commands();
        if restarted {
            self.report = RoundReport {
                seed: self.session.state().seed,
                round: self.session.state().round,
                ..Default::default()
            };
        }
        restarted
    }

    fn report_contacts(&mut self) {
        let Some((player, player_radius)) = self.player else {
            return;
        };

        let touching: Vec<(EntityKind, EntityId)> = self
            .bodies
            .iter_mut()
            .filter(|b| !b.touched && b.swept_distance(player) < b.radius + player_radius)
            .map(|b| {
                b.touched = true;
                (b.kind, b.id)
            })
            .collect();

        for (kind, id) in touching {
            self.session
                .on_contact(ContactBody::player(), ContactBody::entity(kind, id));
            self.apply_commands();
        }
    }

    fn apply_commands(&mut self) {
        for command in self.session.drain_commands() {
            match command {
                HostCommand::Spawn {
                    id,
                    kind,
                    position,
                    despawn_y,
                    fall_duration,
                    age,
                    body,
                } => {
                    log::trace!("{} sprite with {} emitter at {position:?}", kind.sprite(), kind.emitter());
                    self.bodies.push(Body {
                        id,
                        kind,
                        start: position,
                        despawn_y,
                        fall_duration,
                        age,
                        prev: position,
                        radius: body.radius,
                        touched: false,
                    });
                    self.report.spawned += 1;
                }
                HostCommand::Remove { id, reason } => {
                    self.bodies.retain(|b| b.id != id);
                    match reason {
                        RemoveReason::Expired => self.report.expired += 1,
                        RemoveReason::Destroyed => self.report.enemies_hit += 1,
                        RemoveReason::Collected => self.report.power_ups_collected += 1,
                    }
                }
                HostCommand::ScoreDisplay { score } => {
                    self.score_label = presentation::score_text(score);
                }
                HostCommand::GameOverDisplay { elapsed } => {
                    self.report.survived = Some(elapsed);
                    self.game_over_labels = Some([
                        presentation::game_over_title().to_string(),
                        presentation::survival_time_text(elapsed),
                        presentation::restart_prompt().to_string(),
                    ]);
                }
                HostCommand::RestartDisplayClear => {
                    self.game_over_labels = None;
                }
                HostCommand::PlayEffect(effect) => {
                    if let Some(emitter) = effect.emitter() {
                        log::trace!("{emitter} emitter at {:?}", effect.position());
                    }
                    self.sounds.play_effect(&effect);
                }
                HostCommand::MovePlayer { position } => {
                    if let Some((player, _)) = &mut self.player {
                        *player = position;
                    }
                }
                HostCommand::RemovePlayer => {
                    self.player = None;
                }
                HostCommand::RespawnPlayer { position, body } => {
                    self.player = Some((position, body.radius));
                }
            }
        }
    }

    /// Pick where the pilot drags the player this frame
    fn steer(&self, dt: f32) -> Option<Vec2> {
        let (player, radius) = self.player?;
        let Pilot::Dodger { speed, lookahead } = self.pilot else {
            return None;
        };
        let width = self.session.tuning().width;

        let cost = |x: f32| -> f32 {
            self.bodies
                .iter()
                .filter(|b| !b.touched)
                .map(|b| {
                    let pos = b.position();
                    let above = pos.y - player.y;
                    if !(-radius..=lookahead).contains(&above) {
                        return 0.0;
                    }
                    let reach = b.radius + radius + 8.0;
                    let overlap = (reach - (pos.x - x).abs()).max(0.0) / reach;
                    let urgency = 1.0 - above.max(0.0) / lookahead;
                    match b.kind {
                        EntityKind::Enemy => overlap * (1.0 + urgency),
                        EntityKind::PowerUp => -0.5 * overlap,
                    }
                })
                .sum::<f32>()
                // Mild pull toward the middle so the pilot doesn't hug a wall
                + 0.1 * ((x - width / 2.0).abs() / width)
        };

        let max_step = speed * dt;
        let best = (0..=16)
            .map(|i| player.x - max_step + max_step * i as f32 / 8.0)
            .map(|x| x.clamp(0.0, width))
            .min_by(|a, b| cost(*a).total_cmp(&cost(*b)))?;

        if (best - player.x).abs() < f32::EPSILON {
            None
        } else {
            Some(Vec2::new(best, player.y))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;
    use crate::consts::SIM_DT;

    fn host(seed: u64, pilot: Pilot) -> HeadlessHost {
        HeadlessHost::new(Session::new(Tuning::default(), seed), SoundBank::silent(), pilot)
    }

    #[test]
    fn test_idle_round_ends() {
        let mut host = host(42, Pilot::Idle);
        assert_eq!(host.score_label(), "Score: 3");

        let report = host.run_round(SIM_DT, 600.0);
        let survived = report.survived.expect("round should end");
        assert!(survived > 0.0);
        assert_eq!(report.final_score, 0);
        assert_eq!(
            report.enemies_hit as i32 - report.power_ups_collected as i32,
            3
        );
        assert_eq!(host.score_label(), "Score: 0");

        let labels = host.game_over_labels().unwrap();
        assert_eq!(labels[0], "GAME OVER");
        assert!(labels[1].starts_with("Survival Time: "));
    }

    #[test]
    fn test_rounds_are_deterministic() {
        let a = host(7, Pilot::default()).run_round(SIM_DT, 600.0);
        let b = host(7, Pilot::default()).run_round(SIM_DT, 600.0);
        assert_eq!(a, b);
        assert!(a.survived.is_some());
    }

    #[test]
    fn test_bodies_mirror_session() {
        let mut host = host(3, Pilot::Idle);
        for _ in 0..120 {
            host.step(SIM_DT);
            if host.session().state().is_game_over() {
                break;
            }
            assert_eq!(host.live_bodies(), host.session().state().entities.len());
        }
    }

    #[test]
    fn test_bodies_track_entity_positions() {
        let mut host = host(5, Pilot::Idle);
        for _ in 0..90 {
            host.step(SIM_DT);
            if host.session().state().is_game_over() {
                break;
            }
            for body in &host.bodies {
                let entity = host.session().state().entity(body.id).unwrap();
                assert!((body.age - entity.age).abs() < 1e-5);
                assert!(body.position().distance(entity.position()) < 1e-2);
            }
        }
    }

    #[test]
    fn test_restart_after_round() {
        let mut host = host(11, Pilot::Idle);
        host.run_round(SIM_DT, 600.0);
        assert!(host.session().state().is_game_over());

        assert!(host.press_restart());
        assert!(host.game_over_labels().is_none());
        assert_eq!(host.score_label(), "Score: 3");
        assert_eq!(host.live_bodies(), 0);
        assert_eq!(host.session().state().round, 2);

        let report = host.run_round(SIM_DT, 600.0);
        assert_eq!(report.round, 2);
        assert!(report.survived.is_some());
    }
}
