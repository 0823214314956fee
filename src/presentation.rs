//! Label texts and layout for the host's UI
//!
//! The rules core only needs the restart region from here; the rest is what
//! a host shows in response to `ScoreDisplay` and `GameOverDisplay`.

use glam::Vec2;

use crate::{Rect, Tuning};

/// Default label font size (game-over title)
pub const TITLE_FONT_SIZE: f32 = 32.0;
/// Score, survival time and restart prompt
pub const LABEL_FONT_SIZE: f32 = 20.0;

/// Gap between the title and the survival time label
const TITLE_GAP: f32 = 10.0;
/// Gap between the title and the restart prompt, on top of both label heights
const PROMPT_GAP: f32 = 30.0;
/// Score label inset from the top-right corner
const SCORE_INSET: f32 = 80.0;

pub fn score_text(score: i32) -> String {
    format!("Score: {score}")
}

pub fn game_over_title() -> &'static str {
    "GAME OVER"
}

pub fn survival_time_text(elapsed: f64) -> String {
    format!("Survival Time: {elapsed:.3} seconds")
}

pub fn restart_prompt() -> &'static str {
    "Tap Here to Play Again"
}

/// Label positions for a playfield
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub size: Vec2,
    pub score_label: Vec2,
    pub title_label: Vec2,
    pub survival_label: Vec2,
    pub restart_label: Vec2,
    /// Presses inside this region restart a finished round
    pub restart_region: Rect,
}

impl Layout {
    pub fn new(tuning: &Tuning) -> Self {
        let size = tuning.size();
        let center = size / 2.0;

        let title_label = center;
        let survival_label = Vec2::new(center.x, center.y - TITLE_FONT_SIZE - TITLE_GAP);
        let restart_label = Vec2::new(
            center.x,
            center.y - TITLE_FONT_SIZE - LABEL_FONT_SIZE - PROMPT_GAP,
        );
        let restart_region = Rect::from_center_size(
            restart_label,
            Vec2::new(tuning.restart_region_width, tuning.restart_region_height),
        );

        Self {
            size,
            score_label: Vec2::new(size.x - SCORE_INSET, size.y - SCORE_INSET),
            title_label,
            survival_label,
            restart_label,
            restart_region,
        }
    }
}
