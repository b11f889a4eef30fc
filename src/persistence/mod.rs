//! High score persistence
//!
//! Features:
//! - Versioned JSON record (bare integers from older saves still load)
//! - Atomic file writes on native (tmp → save)
//! - LocalStorage on the web
//! - Any read failure degrades to a high score of 0

pub mod record;

#[cfg(not(target_arch = "wasm32"))]
pub mod file;
#[cfg(target_arch = "wasm32")]
pub mod local_storage;

pub use record::HighScoreRecord;

#[cfg(not(target_arch = "wasm32"))]
pub use file::JsonFileStore;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

use crate::error::StoreError;

/// Durable storage for the best score
pub trait HighScoreStore {
    /// Read the stored high score
    fn load_high_score(&mut self) -> Result<u64, StoreError>;

    /// Overwrite the stored high score
    fn save_high_score(&mut self, value: u64) -> Result<(), StoreError>;
}

/// Read the high score, treating any failure as 0
pub fn load_or_default<S: HighScoreStore + ?Sized>(store: &mut S) -> u64 {
    match store.load_high_score() {
        Ok(value) => value,
        Err(StoreError::NotFound) => {
            log::info!("No high score found, starting fresh");
            0
        }
        Err(e) => {
            log::warn!("Ignoring stored high score: {}", e);
            0
        }
    }
}

/// In-memory store (tests and sessions without durable storage)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    value: Option<u64>,
    /// Number of successful saves
    pub saves: u32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a high score
    pub fn with_value(value: u64) -> Self {
        Self {
            value: Some(value),
            saves: 0,
        }
    }

    pub fn value(&self) -> Option<u64> {
        self.value
    }
}

impl HighScoreStore for MemoryStore {
    fn load_high_score(&mut self) -> Result<u64, StoreError> {
        self.value.ok_or(StoreError::NotFound)
    }

    fn save_high_score(&mut self, value: u64) -> Result<(), StoreError> {
        self.value = Some(value);
        self.saves += 1;
        Ok(())
    }
}

impl<S: HighScoreStore + ?Sized> HighScoreStore for Box<S> {
    fn load_high_score(&mut self) -> Result<u64, StoreError> {
        (**self).load_high_score()
    }

    fn save_high_score(&mut self, value: u64) -> Result<(), StoreError> {
        (**self).save_high_score(value)
    }
}
