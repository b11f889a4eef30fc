//! LocalStorage store (wasm32)

use super::HighScoreStore;
use super::record::HighScoreRecord;
use crate::error::StoreError;
use crate::platform;

/// High score kept under one LocalStorage key
#[derive(Debug, Clone)]
pub struct LocalStorageStore {
    key: String,
}

impl LocalStorageStore {
    /// Key used by earlier releases, which stored a bare integer
    pub const DEFAULT_KEY: &'static str = "spaceDodger_highScore";

    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage() -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(StoreError::Unavailable)
    }
}

impl Default for LocalStorageStore {
    fn default() -> Self {
        Self::new(Self::DEFAULT_KEY)
    }
}

impl HighScoreStore for LocalStorageStore {
    fn load_high_score(&mut self) -> Result<u64, StoreError> {
        let storage = Self::storage()?;
        let raw = storage
            .get_item(&self.key)
            .map_err(|_| StoreError::Io(format!("failed to read {}", self.key)))?
            .ok_or(StoreError::NotFound)?;
        let record = HighScoreRecord::decode(&raw)?;
        log::info!("Loaded high score {}", record.high_score);
        Ok(record.high_score)
    }

    fn save_high_score(&mut self, value: u64) -> Result<(), StoreError> {
        let storage = Self::storage()?;
        let json = HighScoreRecord::new(value, platform::now_ms()).encode()?;
        storage
            .set_item(&self.key, &json)
            .map_err(|_| StoreError::Io(format!("failed to write {}", self.key)))?;
        log::info!("High score {} saved", value);
        Ok(())
    }
}
