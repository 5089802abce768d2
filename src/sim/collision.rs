//! Collision and scoring checks
//!
//! Both tests use inclusive or exact comparisons: touching a pipe edge is a
//! hit, and a point is scored only on the tick a pipe's trailing edge lands
//! exactly on the bird's x.

use super::bird::Bird;
use super::track::{PipePair, Track};
use crate::tuning::Tuning;

/// What a tick means for the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Nothing happened
    Continue,
    /// A pipe pair was cleared this tick
    Score,
    /// The bird hit a pipe or the ground
    Terminate,
}

/// True when the bird overlaps either pipe of `pair` or has reached the ground
pub fn collides(bird: &Bird, pair: &PipePair, tuning: &Tuning) -> bool {
    let overlaps_x = bird.right() >= pair.x && bird.left() <= pair.right(tuning);
    let outside_gap =
        bird.top() <= pair.gap_start(tuning) || bird.bottom() >= pair.gap_end(tuning);

    (overlaps_x && outside_gap) || hits_ground(bird, tuning)
}

/// True when the bird's bottom edge is at or below the ground line
#[inline]
pub fn hits_ground(bird: &Bird, tuning: &Tuning) -> bool {
    bird.bottom() >= tuning.ground_line()
}

/// True on the single tick where the pair's trailing edge equals the bird's x
pub fn scores(bird: &Bird, pair: &PipePair, tuning: &Tuning) -> bool {
    pair.right(tuning) == bird.left() && bird.left() > 0.0
}

/// Classify one tick by checking every pair in track order.
///
/// The first colliding pair ends the check with [`FrameOutcome::Terminate`].
/// Otherwise the result is [`FrameOutcome::Score`] if any pair scored.
pub fn classify(bird: &Bird, track: &Track, tuning: &Tuning) -> FrameOutcome {
    let mut outcome = FrameOutcome::Continue;
    for pair in track.pairs() {
        if collides(bird, pair, tuning) {
            return FrameOutcome::Terminate;
        }
        if scores(bird, pair, tuning) {
            outcome = FrameOutcome::Score;
        }
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::track::FixedGaps;
    use glam::Vec2;

    fn bird_at(y: f32) -> Bird {
        let mut bird = Bird::new(&Tuning::default());
        bird.pos = Vec2::new(50.0, y);
        bird
    }

    // Gap offset -100: top pipe ends at y=100, bottom pipe starts at y=200
    fn pair_at(x: f32) -> PipePair {
        PipePair::new(x, -100)
    }

    #[test]
    fn test_bird_in_gap_is_safe() {
        let tuning = Tuning::default();
        assert!(!collides(&bird_at(140.0), &pair_at(40.0), &tuning));
    }

    #[test]
    fn test_hits_top_pipe() {
        let tuning = Tuning::default();
        assert!(collides(&bird_at(90.0), &pair_at(40.0), &tuning));
    }

    #[test]
    fn test_hits_bottom_pipe() {
        let tuning = Tuning::default();
        assert!(collides(&bird_at(180.0), &pair_at(40.0), &tuning));
    }

    #[test]
    fn test_edges_touching_count() {
        let tuning = Tuning::default();
        // Bird top exactly on the top pipe's bottom edge
        assert!(collides(&bird_at(100.0), &pair_at(40.0), &tuning));
        // Bird bottom exactly on the bottom pipe's top edge
        assert!(collides(&bird_at(170.0), &pair_at(40.0), &tuning));
        // Bird right edge exactly on the pipe's left edge, above the gap
        assert!(collides(&bird_at(50.0), &pair_at(80.0), &tuning));
        // Pipe right edge exactly on the bird's left edge
        assert!(collides(&bird_at(50.0), &pair_at(-10.0), &tuning));
    }

    #[test]
    fn test_no_horizontal_overlap_is_safe() {
        let tuning = Tuning::default();
        assert!(!collides(&bird_at(50.0), &pair_at(82.0), &tuning));
        assert!(!collides(&bird_at(50.0), &pair_at(-12.0), &tuning));
    }

    #[test]
    fn test_ground_ignores_pipes() {
        let tuning = Tuning::default();
        // Bottom edge at 462 == ground line
        let bird = bird_at(432.0);
        assert!(hits_ground(&bird, &tuning));
        assert!(collides(&bird, &pair_at(250.0), &tuning));
        assert!(!hits_ground(&bird_at(431.0), &tuning));
    }

    #[test]
    fn test_score_only_on_exact_crossing() {
        let tuning = Tuning::default();
        let bird = bird_at(140.0);
        assert!(scores(&bird, &pair_at(-10.0), &tuning));
        assert!(!scores(&bird, &pair_at(-8.0), &tuning));
        assert!(!scores(&bird, &pair_at(-12.0), &tuning));
    }

    #[test]
    fn test_no_score_at_non_positive_x() {
        let tuning = Tuning::default();
        let mut bird = bird_at(140.0);
        bird.pos.x = 0.0;
        assert!(!scores(&bird, &pair_at(-60.0), &tuning));
    }

    #[test]
    fn test_classify_score() {
        let tuning = Tuning::default();
        let mut gaps = FixedGaps::constant(-100);
        let mut track = Track::new(&tuning, &mut gaps);
        // Step the single pair until its trailing edge sits on x=50
        while track.pairs().next().unwrap().x > -10.0 {
            track.advance(tuning.pipe_speed);
        }
        assert_eq!(
            classify(&bird_at(140.0), &track, &tuning),
            FrameOutcome::Score
        );
        track.advance(tuning.pipe_speed);
        assert_eq!(
            classify(&bird_at(140.0), &track, &tuning),
            FrameOutcome::Continue
        );
    }

    #[test]
    fn test_classify_collision_wins() {
        let tuning = Tuning::default();
        let mut gaps = FixedGaps::constant(-100);
        let track = Track::new(&tuning, &mut gaps);
        assert_eq!(
            classify(&bird_at(440.0), &track, &tuning),
            FrameOutcome::Terminate
        );
    }
}
