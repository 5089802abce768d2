//! Game geometry and physics
//!
//! Defaults mirror [`crate::consts`]. Overrides can be supplied as JSON
//! (LocalStorage on web); fields the JSON leaves out keep the value of the
//! tuning it is applied over.

use std::error::Error;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Errors from loading or validating a [`Tuning`].
#[derive(Debug)]
pub enum TuningError {
    /// The JSON override could not be parsed.
    Parse(serde_json::Error),
    /// A length, speed or count that must be strictly positive was not.
    NotPositive { name: &'static str, value: f32 },
    /// `GAP_OFFSET_MIN..GAP_OFFSET_MAX` is empty.
    EmptyGapRange { min: i32, max: i32 },
    /// Pipes stepping left from the right edge never land exactly on the
    /// spawn line, so no further pairs would ever appear.
    SpawnLineUnreachable { width: f32, speed: f32 },
    /// Pipe trailing edges never land exactly on the bird's x, so the score
    /// could never increase.
    ScoreLineUnreachable { distance: f32, speed: f32 },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "invalid tuning json: {e}"),
            Self::NotPositive { name, value } => {
                write!(f, "{name} must be positive, got {value}")
            }
            Self::EmptyGapRange { min, max } => {
                write!(f, "gap offset range {min}..{max} is empty")
            }
            Self::SpawnLineUnreachable { width, speed } => write!(
                f,
                "pipes moving {speed}/tick never hit the spawn line at {}",
                width / 2.0
            ),
            Self::ScoreLineUnreachable { distance, speed } => write!(
                f,
                "pipes moving {speed}/tick never travel exactly {distance} to the score line"
            ),
        }
    }
}

impl Error for TuningError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

/// Data-driven game balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Playfield ===
    pub width: f32,
    pub height: f32,
    pub ground_height: f32,

    // === Bird ===
    pub bird_start_x: f32,
    pub bird_start_y: f32,
    pub bird_size: f32,
    pub gravity: f32,
    pub jump: f32,

    // === Pipes ===
    pub pipe_width: f32,
    pub pipe_speed: f32,
    pub top_pipe_height: f32,
    pub pipe_gap: f32,
    pub max_pipe_pairs: usize,
    pub gap_offset_min: i32,
    pub gap_offset_max: i32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
            ground_height: GROUND_HEIGHT,

            bird_start_x: BIRD_START_X,
            bird_start_y: BIRD_START_Y,
            bird_size: BIRD_SIZE,
            gravity: GRAVITY,
            jump: JUMP,

            pipe_width: PIPE_WIDTH,
            pipe_speed: PIPE_SPEED,
            top_pipe_height: TOP_PIPE_HEIGHT,
            pipe_gap: PIPE_GAP,
            max_pipe_pairs: MAX_PIPE_PAIRS,
            gap_offset_min: GAP_OFFSET_MIN,
            gap_offset_max: GAP_OFFSET_MAX,
        }
    }
}

impl Tuning {
    /// LocalStorage key for overrides (used only in wasm32)
    pub const STORAGE_KEY: &'static str = "flappy_gap_tuning";

    /// Default tuning resized to a canvas of the given dimensions
    pub fn for_canvas(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Parse a JSON override over the defaults and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        Self::from_json_over(&Self::default(), json)
    }

    /// Apply a JSON object of overrides on top of `base` and validate the
    /// result. Fields the object does not name are taken from `base`.
    pub fn from_json_over(base: &Tuning, json: &str) -> Result<Self, TuningError> {
        let overrides: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)?;
        let mut merged = serde_json::to_value(base)?;
        if let Some(fields) = merged.as_object_mut() {
            fields.extend(overrides);
        }
        let tuning: Self = serde_json::from_value(merged)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// y coordinate of the top of the ground strip
    pub fn ground_line(&self) -> f32 {
        self.height - self.ground_height
    }

    /// x coordinate at which the leading pipe pair triggers a spawn
    pub fn spawn_line(&self) -> f32 {
        self.width / 2.0
    }

    /// Distance from the top of the top pipe to the top of the bottom pipe
    pub fn bottom_pipe_offset(&self) -> f32 {
        self.top_pipe_height + self.pipe_gap
    }

    /// Check that every quantity is usable and that the exact-equality spawn
    /// and score triggers are actually hit by pipes stepping from the right
    /// edge.
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("width", self.width),
            ("height", self.height),
            ("bird_size", self.bird_size),
            ("pipe_width", self.pipe_width),
            ("pipe_speed", self.pipe_speed),
            ("top_pipe_height", self.top_pipe_height),
            ("pipe_gap", self.pipe_gap),
            ("max_pipe_pairs", self.max_pipe_pairs as f32),
        ];
        for (name, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(TuningError::NotPositive { name, value });
            }
        }

        if self.gap_offset_min >= self.gap_offset_max {
            return Err(TuningError::EmptyGapRange {
                min: self.gap_offset_min,
                max: self.gap_offset_max,
            });
        }

        if !is_whole_steps(self.width - self.spawn_line(), self.pipe_speed) {
            return Err(TuningError::SpawnLineUnreachable {
                width: self.width,
                speed: self.pipe_speed,
            });
        }

        let distance = self.width + self.pipe_width - self.bird_start_x;
        if !is_whole_steps(distance, self.pipe_speed) {
            return Err(TuningError::ScoreLineUnreachable {
                distance,
                speed: self.pipe_speed,
            });
        }

        Ok(())
    }

    /// Load overrides from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load(width: f32, height: f32) -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        let base = Self::for_canvas(width, height);
        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json_over(&base, &json) {
                    Ok(tuning) => {
                        log::info!("Loaded tuning overrides from LocalStorage");
                        return tuning;
                    }
                    Err(e) => log::warn!("Ignoring tuning overrides: {e}"),
                }
            }
        }

        log::info!("Using default tuning");
        base
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(width: f32, height: f32) -> Self {
        Self::for_canvas(width, height)
    }
}

/// True when `distance` is a non-negative whole multiple of `step`
fn is_whole_steps(distance: f32, step: f32) -> bool {
    if distance < 0.0 {
        return false;
    }
    let steps = distance / step;
    steps.fract() == 0.0 && steps * step == distance
}
