//! Flappy Gap - A single-screen flap-through-the-gap arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bird, pipe track, collisions, game state)
//! - `session`: Start/restart/end lifecycle and the frame loop
//! - `renderer`: Draws the simulation onto a 2D fill surface
//! - `persistence`: Best score storage
//! - `platform`: Browser implementations of the host capabilities
//! - `tuning`: Data-driven game geometry and physics

pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod sim;
pub mod tuning;

pub use persistence::{BEST_SCORE_KEY, MemoryStore, ScoreStore};
pub use session::{FrameHandle, ManualScheduler, Scheduler, Session, SessionEvent};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions
    pub const CANVAS_WIDTH: f32 = 288.0;
    pub const CANVAS_HEIGHT: f32 = 512.0;
    /// Ground strip at the bottom of the playfield
    pub const GROUND_HEIGHT: f32 = 50.0;

    /// Bird defaults
    pub const BIRD_START_X: f32 = 50.0;
    pub const BIRD_START_Y: f32 = 150.0;
    pub const BIRD_SIZE: f32 = 30.0;

    /// Added to the bird's y every tick
    pub const GRAVITY: f32 = 1.5;
    /// Subtracted from the bird's y on every jump
    pub const JUMP: f32 = 30.0;

    /// Pipe defaults
    pub const PIPE_WIDTH: f32 = 60.0;
    pub const PIPE_SPEED: f32 = 2.0;
    pub const TOP_PIPE_HEIGHT: f32 = 200.0;
    pub const PIPE_GAP: f32 = 100.0;
    /// Live pipe pairs before the oldest is recycled
    pub const MAX_PIPE_PAIRS: usize = 3;

    /// Gap offsets are drawn from `GAP_OFFSET_MIN..GAP_OFFSET_MAX`
    pub const GAP_OFFSET_MIN: i32 = -200;
    pub const GAP_OFFSET_MAX: i32 = 0;
}
