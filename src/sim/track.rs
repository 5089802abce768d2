//! Pipe pairs scrolling right to left
//!
//! A new pair enters at the right edge whenever a pair crosses the spawn line
//! (half the playfield width). Only `max_pipe_pairs` stay alive; the oldest is
//! recycled first.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Source of vertical gap offsets for newly spawned pairs
pub trait GapSource {
    /// Next offset in `tuning.gap_offset_min..tuning.gap_offset_max`
    fn next_gap_offset(&mut self, tuning: &Tuning) -> i32;
}

/// Seeded PCG gap source
#[derive(Debug, Clone)]
pub struct PcgGaps {
    rng: Pcg32,
}

impl PcgGaps {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl GapSource for PcgGaps {
    fn next_gap_offset(&mut self, tuning: &Tuning) -> i32 {
        self.rng
            .random_range(tuning.gap_offset_min..tuning.gap_offset_max)
    }
}

/// Replays a fixed list of offsets, cycling when exhausted
#[derive(Debug, Clone)]
pub struct FixedGaps {
    offsets: Vec<i32>,
    next: usize,
}

impl FixedGaps {
    pub fn new(offsets: Vec<i32>) -> Self {
        assert!(!offsets.is_empty(), "FixedGaps needs at least one offset");
        Self { offsets, next: 0 }
    }

    /// Every pair gets the same offset
    pub fn constant(offset: i32) -> Self {
        Self::new(vec![offset])
    }
}

impl GapSource for FixedGaps {
    fn next_gap_offset(&mut self, _tuning: &Tuning) -> i32 {
        let offset = self.offsets[self.next];
        self.next = (self.next + 1) % self.offsets.len();
        offset
    }
}

/// A top and bottom pipe sharing one x and a vertical gap
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PipePair {
    /// Left edge of both pipes
    pub x: f32,
    /// y of the top pipe's top edge (always <= 0, so the pipe hangs from
    /// above the canvas)
    pub gap_offset: i32,
}

impl PipePair {
    pub fn new(x: f32, gap_offset: i32) -> Self {
        Self { x, gap_offset }
    }

    /// Trailing (right) edge
    pub fn right(&self, tuning: &Tuning) -> f32 {
        self.x + tuning.pipe_width
    }

    /// y of the top pipe's top edge
    pub fn top_y(&self) -> f32 {
        self.gap_offset as f32
    }

    /// y where the top pipe ends and the gap begins
    pub fn gap_start(&self, tuning: &Tuning) -> f32 {
        self.top_y() + tuning.top_pipe_height
    }

    /// y where the gap ends and the bottom pipe begins
    pub fn gap_end(&self, tuning: &Tuning) -> f32 {
        self.top_y() + tuning.bottom_pipe_offset()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Track {
    /// Oldest first
    pairs: VecDeque<PipePair>,
}

impl Track {
    /// A track holding the single initial pair at the right edge
    pub fn new(tuning: &Tuning, gaps: &mut impl GapSource) -> Self {
        let mut track = Self::default();
        track.reset(tuning, gaps);
        track
    }

    /// Drop every pair and start over with one at the right edge
    pub fn reset(&mut self, tuning: &Tuning, gaps: &mut impl GapSource) {
        self.pairs.clear();
        self.push_new(tuning, gaps);
    }

    /// Move every pair left by one step
    pub fn advance(&mut self, speed: f32) {
        for pair in &mut self.pairs {
            pair.x -= speed;
        }
    }

    /// Spawn a pair at the right edge if a pair sits exactly on the spawn
    /// line, recycling the oldest when over capacity. Returns whether a pair
    /// was spawned.
    pub fn maybe_spawn(&mut self, tuning: &Tuning, gaps: &mut impl GapSource) -> bool {
        let spawn_line = tuning.spawn_line();
        // Exact comparison: pipes move in whole steps from the right edge
        if !self.pairs.iter().any(|p| p.x == spawn_line) {
            return false;
        }

        self.push_new(tuning, gaps);
        if self.pairs.len() > tuning.max_pipe_pairs {
            if let Some(old) = self.pairs.pop_front() {
                log::debug!("Recycled pipe pair at x={}", old.x);
            }
        }
        true
    }

    fn push_new(&mut self, tuning: &Tuning, gaps: &mut impl GapSource) {
        let gap_offset = gaps.next_gap_offset(tuning);
        log::debug!("Spawned pipe pair with gap offset {gap_offset}");
        self.pairs.push_back(PipePair::new(tuning.width, gap_offset));
    }

    /// Live pairs, oldest first
    pub fn pairs(&self) -> impl ExactSizeIterator<Item = &PipePair> + '_ {
        self.pairs.iter()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
