//! Session lifecycle and the frame loop
//!
//! A [`Session`] owns the game state and drives it one tick per frame. Frames
//! come from an injected [`Scheduler`]; the session keeps at most one frame
//! pending and ignores any frame that is not the pending one, so two loops can
//! never advance the same game.

use crate::persistence::{self, ScoreStore};
use crate::renderer::{Surface, draw_frame};
use crate::sim::{FrameOutcome, GamePhase, GameState, GapSource, tick};
use crate::tuning::Tuning;

/// Identifies one scheduled frame callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

/// Host display-refresh scheduling.
///
/// `schedule_next` asks the host to deliver one frame later; the host then
/// calls [`Session::on_frame`] with the returned handle. `None` means the
/// host could not schedule anything and no frame will come.
pub trait Scheduler {
    fn schedule_next(&mut self) -> Option<FrameHandle>;
    fn cancel(&mut self, handle: FrameHandle);
}

/// A scheduler whose frames fire only when the caller says so.
///
/// Used by tests and the native demo.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    next_id: i32,
    pending: Vec<FrameHandle>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames requested and not yet fired or cancelled
    pub fn pending(&self) -> &[FrameHandle] {
        &self.pending
    }

    /// Remove and return every pending frame, oldest first
    pub fn take_due(&mut self) -> Vec<FrameHandle> {
        std::mem::take(&mut self.pending)
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_next(&mut self) -> Option<FrameHandle> {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.pending.push(handle);
        Some(handle)
    }

    fn cancel(&mut self, handle: FrameHandle) {
        self.pending.retain(|h| *h != handle);
    }
}

/// Things the presentation layer should reflect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// The first run began; the start control is spent
    Started,
    ScoreChanged(u32),
    /// A new best score was saved
    BestScoreChanged(u32),
    /// The run ended; show the terminal overlay
    GameOver { score: u32 },
    /// Hide the terminal overlay
    OverlayCleared,
}

pub struct Session<S: Scheduler, T: ScoreStore, G: GapSource> {
    state: GameState,
    scheduler: S,
    store: T,
    gaps: G,
    /// The only frame allowed to advance the game
    pending: Option<FrameHandle>,
    events: Vec<SessionEvent>,
}

impl<S: Scheduler, T: ScoreStore, G: GapSource> Session<S, T, G> {
    /// Create an idle session. Reads the best score from `store` once.
    pub fn new(tuning: Tuning, scheduler: S, store: T, mut gaps: G) -> Self {
        let best_score = persistence::load_best(&store);
        log::info!("Session created, best score {best_score}");
        Self {
            state: GameState::new(tuning, best_score, &mut gaps),
            scheduler,
            store,
            gaps,
            pending: None,
            events: Vec::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn best_score(&self) -> u32 {
        self.state.best_score
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn store(&self) -> &T {
        &self.store
    }

    /// Whether a frame is currently scheduled
    pub fn is_looping(&self) -> bool {
        self.pending.is_some()
    }

    /// Begin the first run. Does nothing unless idle.
    pub fn start(&mut self) {
        if self.state.phase != GamePhase::Idle {
            log::debug!("start ignored in {:?}", self.state.phase);
            return;
        }
        self.reset();
        self.state.phase = GamePhase::Running;
        self.events.push(SessionEvent::Started);
        self.arm();
        log::info!("Game started");
    }

    /// Begin a fresh run from any phase
    pub fn restart(&mut self) {
        self.events.push(SessionEvent::OverlayCleared);
        self.reset();
        self.state.phase = GamePhase::Running;
        self.arm();
        log::info!("Game restarted");
    }

    /// Jump input from the player. Ignored unless running.
    pub fn jump(&mut self) {
        self.state.jump();
    }

    /// Host frame callback: run one tick and draw it.
    ///
    /// Returns `false` when `handle` is stale (cancelled or superseded), in
    /// which case nothing happens.
    pub fn on_frame(&mut self, handle: FrameHandle, surface: &mut impl Surface) -> bool {
        if self.pending != Some(handle) {
            log::debug!("Dropping stale frame {handle:?}");
            return false;
        }
        self.pending = None;

        if !self.state.is_running() {
            return true;
        }

        match tick(&mut self.state, &mut self.gaps) {
            FrameOutcome::Continue => {}
            FrameOutcome::Score => {
                self.events.push(SessionEvent::ScoreChanged(self.state.score));
            }
            FrameOutcome::Terminate => self.end(),
        }

        if self.state.is_running() {
            self.arm();
        }
        draw_frame(&self.state, surface);
        true
    }

    /// Events queued since the last drain, oldest first
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Cancel any pending frame, then put the bird, pipes and score back.
    fn reset(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel(handle);
        }
        self.state.reset(&mut self.gaps);
        self.events.push(SessionEvent::ScoreChanged(0));
    }

    fn arm(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel(handle);
        }
        self.pending = self.scheduler.schedule_next();
        if self.pending.is_none() {
            log::error!("Host refused to schedule a frame, the game is stalled");
        }
    }

    /// Running -> Ended. The only place the best score is written.
    fn end(&mut self) {
        let score = self.state.score;
        self.state.phase = GamePhase::Ended;

        if score > self.state.best_score {
            self.state.best_score = score;
            persistence::save_best(&mut self.store, score);
            self.events.push(SessionEvent::BestScoreChanged(score));
        }

        self.events.push(SessionEvent::GameOver { score });
        log::info!(
            "Game over after {} ticks: score {score}, best {}",
            self.state.time_ticks,
            self.state.best_score
        );
    }
}
