//! Whole-frame drawing

use super::shapes;
use super::surface::Surface;
use crate::sim::GameState;

/// Draw one frame of `state`. Reads the state only.
pub fn draw_frame(state: &GameState, surface: &mut impl Surface) {
    let tuning = &state.tuning;
    let height = surface.height();

    surface.clear();
    shapes::background(surface);

    for pair in state.track.pairs() {
        shapes::pipe(
            surface,
            pair.x,
            pair.top_y(),
            tuning.pipe_width,
            tuning.top_pipe_height,
            true,
        );
        // Runs off the bottom of the canvas; the ground covers the end
        shapes::pipe(
            surface,
            pair.x,
            pair.gap_end(tuning),
            tuning.pipe_width,
            height,
            false,
        );
    }

    shapes::ground(surface, tuning.ground_height);
    shapes::bird(surface, state.bird.pos.x, state.bird.pos.y, state.bird.size);
    shapes::score(surface, state.score);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::shapes::{BIRD_BODY, GROUND, PIPE};
    use crate::renderer::surface::{DrawCall, RecordingSurface};
    use crate::sim::{FixedGaps, GameState};
    use crate::tuning::Tuning;

    #[test]
    fn test_frame_draws_each_pair_twice() {
        let mut gaps = FixedGaps::constant(-100);
        let mut state = GameState::new(Tuning::default(), 0, &mut gaps);
        state.track.advance(144.0);
        state.track.maybe_spawn(&state.tuning, &mut gaps);
        assert_eq!(state.track.len(), 2);
        state.score = 4;

        let mut s = RecordingSurface::new(288.0, 512.0);
        draw_frame(&state, &mut s);

        assert_eq!(s.calls[0], DrawCall::Clear);
        assert!(matches!(s.calls[1], DrawCall::Gradient { .. }));
        assert_eq!(s.rects_of(PIPE).count(), 4);
        assert_eq!(s.rects_of(GROUND).count(), 1);
        assert_eq!(s.texts(), vec!["Score: 4"]);
        assert!(s.calls.iter().any(|c| matches!(
            c,
            DrawCall::Circle { cx, cy, color, .. } if *cx == 65.0 && *cy == 165.0 && *color == BIRD_BODY
        )));
    }

    #[test]
    fn test_bottom_pipe_starts_after_gap() {
        let mut gaps = FixedGaps::constant(-120);
        let state = GameState::new(Tuning::default(), 0, &mut gaps);
        let mut s = RecordingSurface::new(288.0, 512.0);
        draw_frame(&state, &mut s);

        let ys: Vec<f32> = s
            .rects_of(PIPE)
            .filter_map(|c| match c {
                DrawCall::Rect { y, .. } => Some(*y),
                _ => None,
            })
            .collect();
        assert_eq!(ys, vec![-120.0, 180.0]);
    }
}
