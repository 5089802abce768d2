//! Demo autopilot
//!
//! Hovers near the bottom of the next gap by jumping whenever the coming
//! tick would carry the bird too close to the bottom pipe. It can still crash
//! when consecutive gaps are far apart, since gravity alone is slow.

use super::state::GameState;
use super::track::PipePair;

/// How far above the bottom pipe the bird tries to stay
const BOTTOM_MARGIN: f32 = 8.0;

/// The first pair whose trailing edge has not yet passed the bird
pub fn next_pair(state: &GameState) -> Option<&PipePair> {
    let bird_left = state.bird.left();
    state
        .track
        .pairs()
        .find(|p| p.right(&state.tuning) >= bird_left)
}

/// Whether to jump before the next tick
pub fn wants_jump(state: &GameState) -> bool {
    let Some(pair) = next_pair(state) else {
        return false;
    };
    let floor = pair.gap_end(&state.tuning) - BOTTOM_MARGIN;
    state.bird.bottom() + state.tuning.gravity > floor
}
