//! The player-controlled bird
//!
//! There is no velocity model: gravity and jumps both move `pos.y` directly.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bird {
    /// Top-left corner. `x` never changes after reset.
    pub pos: Vec2,
    /// Side of the bird's square hitbox
    pub size: f32,
}

impl Bird {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.bird_start_x, tuning.bird_start_y),
            size: tuning.bird_size,
        }
    }

    /// Back to the start coordinates
    pub fn reset(&mut self, tuning: &Tuning) {
        *self = Self::new(tuning);
    }

    /// Apply one tick of gravity
    #[inline]
    pub fn integrate(&mut self, gravity: f32) {
        self.pos.y += gravity;
    }

    /// Nudge the bird up. Jumps between two ticks stack.
    #[inline]
    pub fn impulse(&mut self, jump: f32) {
        self.pos.y -= jump;
    }

    pub fn left(&self) -> f32 {
        self.pos.x
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.size
    }

    pub fn top(&self) -> f32 {
        self.pos.y
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size
    }
}
