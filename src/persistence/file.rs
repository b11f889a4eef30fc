//! JSON file store (native)

use std::fs;
use std::path::{Path, PathBuf};

use super::HighScoreStore;
use super::record::HighScoreRecord;
use crate::error::StoreError;
use crate::platform;

/// High score kept in a small JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl HighScoreStore for JsonFileStore {
    fn load_high_score(&mut self) -> Result<u64, StoreError> {
        let raw = fs::read_to_string(&self.path)?;
        let record = HighScoreRecord::decode(&raw)?;
        log::info!(
            "Loaded high score {} from {}",
            record.high_score,
            self.path.display()
        );
        Ok(record.high_score)
    }

    fn save_high_score(&mut self, value: u64) -> Result<(), StoreError> {
        let json = HighScoreRecord::new(value, platform::now_ms()).encode()?;
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }
        // Write aside then rename so a crash never leaves a torn file
        let tmp = self.tmp_path();
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        log::info!("High score {} saved to {}", value, self.path.display());
        Ok(())
    }
}
