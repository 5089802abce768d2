//! End-to-end session behavior against in-memory host capabilities

use flappy_gap::renderer::{DrawCall, RecordingSurface};
use flappy_gap::sim::{FixedGaps, GamePhase, autopilot};
use flappy_gap::{ManualScheduler, MemoryStore, Session, SessionEvent, Tuning};
use proptest::prelude::*;

type TestSession = Session<ManualScheduler, MemoryStore, FixedGaps>;

fn session_with(best: i64, gaps: FixedGaps) -> TestSession {
    Session::new(
        Tuning::default(),
        ManualScheduler::new(),
        MemoryStore::with_best(best),
        gaps,
    )
}

/// Fire every pending frame once. Returns how many were fired.
fn pump(s: &mut TestSession, surface: &mut RecordingSurface) -> usize {
    let due = s.scheduler_mut().take_due();
    for handle in &due {
        surface.reset();
        s.on_frame(*handle, surface);
    }
    due.len()
}

/// Let the autopilot fly for `frames` frames
fn fly(s: &mut TestSession, surface: &mut RecordingSurface, frames: usize) {
    for _ in 0..frames {
        if autopilot::wants_jump(s.state()) {
            s.jump();
        }
        pump(s, surface);
    }
}

/// Stop jumping and let the bird fall until the run ends
fn crash(s: &mut TestSession, surface: &mut RecordingSurface) {
    for _ in 0..10_000 {
        if s.phase() != GamePhase::Running {
            return;
        }
        pump(s, surface);
    }
    panic!("run never ended");
}

#[test]
fn double_restart_keeps_a_single_loop() {
    let mut s = session_with(0, FixedGaps::constant(-100));
    let mut surface = RecordingSurface::new(288.0, 512.0);

    s.restart();
    s.restart();
    assert_eq!(s.scheduler().pending().len(), 1);

    for _ in 0..10 {
        assert_eq!(pump(&mut s, &mut surface), 1);
    }
    assert_eq!(s.state().time_ticks, 10);
    assert_eq!(s.state().bird.pos.y, 150.0 + 1.5 * 10.0);
}

#[test]
fn restart_mid_run_does_not_double_speed() {
    let mut s = session_with(0, FixedGaps::constant(-100));
    let mut surface = RecordingSurface::new(288.0, 512.0);

    s.start();
    fly(&mut s, &mut surface, 20);
    s.restart();
    assert_eq!(s.scheduler().pending().len(), 1);

    pump(&mut s, &mut surface);
    let pair = s.state().track.pairs().next().unwrap();
    assert_eq!(pair.x, 286.0);
}

#[test]
fn score_lands_on_exact_tick() {
    let mut s = session_with(0, FixedGaps::constant(-100));
    let mut surface = RecordingSurface::new(288.0, 512.0);
    s.start();
    s.drain_events();

    let mut scored_at = Vec::new();
    for _ in 0..300 {
        if autopilot::wants_jump(s.state()) {
            s.jump();
        }
        pump(&mut s, &mut surface);
        for event in s.drain_events() {
            if let SessionEvent::ScoreChanged(score) = event {
                scored_at.push((score, s.state().time_ticks));
            }
        }
    }

    // First pair after (288 + 60 - 50) / 2 ticks, then one every 144 / 2
    assert_eq!(scored_at, vec![(1, 149), (2, 221), (3, 293)]);
}

#[test]
fn best_score_only_grows_and_is_written_at_end() {
    let mut s = session_with(0, FixedGaps::constant(-100));
    let mut surface = RecordingSurface::new(288.0, 512.0);

    s.start();
    fly(&mut s, &mut surface, 400);
    assert_eq!(s.store().writes(), 0);
    assert_eq!(s.best_score(), 0);
    crash(&mut s, &mut surface);
    let first = s.score();
    assert!(first >= 4);
    assert_eq!(s.best_score(), first);
    assert_eq!(s.store().writes(), 1);

    // Worse run leaves the best alone
    s.restart();
    crash(&mut s, &mut surface);
    assert_eq!(s.score(), 0);
    assert_eq!(s.best_score(), first);
    assert_eq!(s.store().writes(), 1);

    // Better run replaces it
    s.restart();
    fly(&mut s, &mut surface, 1000);
    let third = s.score();
    assert!(third > first);
    crash(&mut s, &mut surface);
    assert_eq!(s.best_score(), third);
    assert_eq!(s.store().writes(), 2);
}

#[test]
fn best_score_survives_into_new_session() {
    let mut s = session_with(0, FixedGaps::constant(-100));
    let mut surface = RecordingSurface::new(288.0, 512.0);
    s.start();
    fly(&mut s, &mut surface, 300);
    crash(&mut s, &mut surface);
    let best = s.best_score();

    let store = s.store().clone();
    let next = Session::new(
        Tuning::default(),
        ManualScheduler::new(),
        store,
        FixedGaps::constant(-100),
    );
    assert_eq!(next.best_score(), best);
}

#[test]
fn game_over_stops_the_loop() {
    let mut s = session_with(0, FixedGaps::constant(-100));
    let mut surface = RecordingSurface::new(288.0, 512.0);
    s.start();
    crash(&mut s, &mut surface);

    assert_eq!(s.phase(), GamePhase::Ended);
    assert!(!s.is_looping());
    assert!(s.scheduler().pending().is_empty());
    assert!(
        s.drain_events()
            .contains(&SessionEvent::GameOver { score: 0 })
    );

    // Input after the crash does nothing
    let y = s.state().bird.pos.y;
    s.jump();
    assert_eq!(s.state().bird.pos.y, y);
}

#[test]
fn frame_draw_calls() {
    let mut s = session_with(0, FixedGaps::constant(-100));
    let mut surface = RecordingSurface::new(288.0, 512.0);
    s.start();

    // Second pair spawns on tick 72
    for _ in 0..72 {
        if autopilot::wants_jump(s.state()) {
            s.jump();
        }
        pump(&mut s, &mut surface);
    }
    assert_eq!(s.state().track.len(), 2);

    let rects = surface
        .calls
        .iter()
        .filter(|c| matches!(c, DrawCall::Rect { .. }))
        .count();
    let circles = surface
        .calls
        .iter()
        .filter(|c| matches!(c, DrawCall::Circle { .. }))
        .count();
    // 2 pairs x 2 pipes x (body + rim), ground, beak
    assert_eq!(rects, 10);
    // Body and eye
    assert_eq!(circles, 2);
    assert_eq!(surface.texts(), vec!["Score: 0"]);
}

proptest! {
    #[test]
    fn best_score_is_running_max(
        runs in proptest::collection::vec(0usize..700, 1..5)
    ) {
        let mut s = session_with(0, FixedGaps::constant(-100));
        let mut surface = RecordingSurface::new(288.0, 512.0);
        let mut expected_best = 0;
        let mut writes = 0;

        for frames in runs {
            let before = s.best_score();
            s.restart();
            fly(&mut s, &mut surface, frames);
            prop_assert_eq!(s.best_score(), before);
            crash(&mut s, &mut surface);

            if s.score() > expected_best {
                expected_best = s.score();
                writes += 1;
            }
            prop_assert!(s.best_score() >= before);
            prop_assert_eq!(s.best_score(), expected_best);
            prop_assert_eq!(s.store().writes(), writes);
        }
    }
}
