//! Game state and core simulation types

use serde::{Deserialize, Serialize};

use super::bird::Bird;
use super::track::{GapSource, Track};
use crate::tuning::Tuning;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first start
    #[default]
    Idle,
    /// Active gameplay
    Running,
    /// The bird crashed; waiting for a restart
    Ended,
}

/// Everything a tick reads or writes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Pipe pairs cleared this run
    pub score: u32,
    /// Best score across sessions, as last read from or written to the store
    pub best_score: u32,
    pub bird: Bird,
    pub track: Track,
    /// Ticks since the last reset
    pub time_ticks: u64,
}

impl GameState {
    /// Create an idle game with the bird and first pipe pair in place
    pub fn new(tuning: Tuning, best_score: u32, gaps: &mut impl GapSource) -> Self {
        Self {
            bird: Bird::new(&tuning),
            track: Track::new(&tuning, gaps),
            tuning,
            phase: GamePhase::Idle,
            score: 0,
            best_score,
            time_ticks: 0,
        }
    }

    /// Put the bird, pipes and score back to their starting values.
    /// Leaves the phase and best score alone.
    pub fn reset(&mut self, gaps: &mut impl GapSource) {
        self.bird.reset(&self.tuning);
        self.track.reset(&self.tuning, gaps);
        self.score = 0;
        self.time_ticks = 0;
    }

    /// Jump input. Ignored unless running.
    pub fn jump(&mut self) {
        if self.phase == GamePhase::Running {
            self.bird.impulse(self.tuning.jump);
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::track::FixedGaps;

    #[test]
    fn test_new_is_idle() {
        let state = GameState::new(Tuning::default(), 7, &mut FixedGaps::constant(-50));
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.score, 0);
        assert_eq!(state.best_score, 7);
        assert_eq!(state.track.len(), 1);
    }

    #[test]
    fn test_jump_ignored_unless_running() {
        let mut state = GameState::new(Tuning::default(), 0, &mut FixedGaps::constant(-50));
        state.jump();
        assert_eq!(state.bird.pos.y, 150.0);

        state.phase = GamePhase::Running;
        state.jump();
        assert_eq!(state.bird.pos.y, 120.0);

        state.phase = GamePhase::Ended;
        state.jump();
        assert_eq!(state.bird.pos.y, 120.0);
    }

    #[test]
    fn test_reset_keeps_phase_and_best() {
        let mut gaps = FixedGaps::new(vec![-50, -60]);
        let mut state = GameState::new(Tuning::default(), 3, &mut gaps);
        state.phase = GamePhase::Running;
        state.score = 2;
        state.jump();
        state.track.advance(10.0);

        state.reset(&mut gaps);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.best_score, 3);
        assert_eq!(state.score, 0);
        assert_eq!(state.bird.pos.y, 150.0);
        assert_eq!(state.track.len(), 1);
        assert_eq!(state.track.pairs().next().unwrap().x, 288.0);
        assert_eq!(state.track.pairs().next().unwrap().gap_offset, -60);
    }
}
