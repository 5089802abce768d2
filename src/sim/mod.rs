//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed step per tick
//! - Injected gap source only
//! - Stable iteration order (oldest pipe pair first)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod bird;
pub mod collision;
pub mod state;
pub mod tick;
pub mod track;

pub use bird::Bird;
pub use collision::{FrameOutcome, classify, collides, hits_ground, scores};
pub use state::{GamePhase, GameState};
pub use tick::tick;
pub use track::{FixedGaps, GapSource, PcgGaps, PipePair, Track};
