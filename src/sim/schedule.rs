//! Repeating timer owned by the session
//!
//! A schedule counts down on the simulation clock. The caller decides the
//! interval each time it re-arms, so a changed interval takes effect on the
//! following wait rather than retroactively.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Schedule {
    /// Seconds until the next fire (may go negative while catching up)
    remaining: f32,
    armed: bool,
}

impl Schedule {
    /// A schedule that never fires until started
    pub const fn idle() -> Self {
        Self {
            remaining: 0.0,
            armed: false,
        }
    }

    /// Arm the schedule; `first_delay` of 0 fires on the next `elapse`
    pub fn start(&mut self, first_delay: f32) {
        self.remaining = first_delay;
        self.armed = true;
    }

    /// Disarm; pending fires are dropped
    pub fn cancel(&mut self) {
        self.armed = false;
        self.remaining = 0.0;
    }

    #[inline]
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    #[inline]
    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    /// Let `dt` seconds pass
    pub fn elapse(&mut self, dt: f32) {
        if self.armed {
            self.remaining -= dt;
        }
    }

    /// How long ago the pending fire was due
    #[inline]
    pub fn overdue(&self) -> f32 {
        (-self.remaining).max(0.0)
    }

    /// Whether a fire is pending
    #[inline]
    pub fn due(&self) -> bool {
        self.armed && self.remaining <= 0.0
    }

    /// Consume one pending fire and wait `interval` more seconds
    pub fn rearm(&mut self, interval: f32) {
        self.remaining += interval;
    }

    /// Drop any backlog and wait a full `interval` from now
    pub fn resync(&mut self, interval: f32) {
        self.remaining = interval;
    }
}
