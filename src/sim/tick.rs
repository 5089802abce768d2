//! Fixed-step simulation tick
//!
//! One tick per display refresh. Order matters: pipes move and spawn first,
//! then the bird falls, then the frame is classified against the new
//! positions.

use super::collision::{FrameOutcome, classify};
use super::state::GameState;
use super::track::GapSource;

/// Advance a running game by one tick.
///
/// Increments the score on [`FrameOutcome::Score`]. The caller owns the
/// phase transition on [`FrameOutcome::Terminate`]. Does nothing unless the
/// game is running.
pub fn tick(state: &mut GameState, gaps: &mut impl GapSource) -> FrameOutcome {
    if !state.is_running() {
        return FrameOutcome::Continue;
    }

    state.time_ticks += 1;

    let tuning = &state.tuning;
    state.track.advance(tuning.pipe_speed);
    state.track.maybe_spawn(tuning, gaps);
    state.bird.integrate(tuning.gravity);

    let outcome = classify(&state.bird, &state.track, tuning);
    if outcome == FrameOutcome::Score {
        state.score += 1;
    }
    outcome
}
