//! Best score persistence
//!
//! The only thing saved is a single integer under [`BEST_SCORE_KEY`]. It is
//! read once when a session is created and written at most once per run.

use std::collections::HashMap;

/// LocalStorage key for the best score
pub const BEST_SCORE_KEY: &str = "flappyBirdHighScore";

/// A persisted key to integer map
pub trait ScoreStore {
    /// `None` when the key is missing or its value is not an integer
    fn get(&self, key: &str) -> Option<i64>;
    fn set(&mut self, key: &str, value: i64);
}

/// In-memory store for tests and the native build
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, i64>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `best` under [`BEST_SCORE_KEY`]
    pub fn with_best(best: i64) -> Self {
        let mut store = Self::new();
        store.values.insert(BEST_SCORE_KEY.to_string(), best);
        store
    }

    /// Number of `set` calls so far
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl ScoreStore for MemoryStore {
    fn get(&self, key: &str) -> Option<i64> {
        self.values.get(key).copied()
    }

    fn set(&mut self, key: &str, value: i64) {
        self.values.insert(key.to_string(), value);
        self.writes += 1;
    }
}

/// Read the best score, treating missing or out of range values as zero
pub fn load_best(store: &impl ScoreStore) -> u32 {
    match store.get(BEST_SCORE_KEY) {
        Some(value) => u32::try_from(value).unwrap_or_else(|_| {
            log::warn!("Ignoring out of range best score {value}");
            0
        }),
        None => 0,
    }
}

/// Write `best` under [`BEST_SCORE_KEY`]
pub fn save_best(store: &mut impl ScoreStore, best: u32) {
    store.set(BEST_SCORE_KEY, i64::from(best));
    log::info!("Best score saved ({best})");
}

/// Parse a stored best score string, the way the browser keeps it
pub fn parse_score(raw: &str) -> Option<i64> {
    match raw.trim().parse::<i64>() {
        Ok(value) => Some(value),
        Err(_) => {
            log::warn!("Malformed stored score {raw:?}");
            None
        }
    }
}
