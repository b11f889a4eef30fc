//! Versioned high score record
//!
//! Stored as `{"version":1,"high_score":N,"saved_at_ms":T}`. A bare integer
//! is also accepted on read.

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Current record format version
pub const RECORD_VERSION: u32 = 1;

/// Persisted high score envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreRecord {
    pub version: u32,
    pub high_score: u64,
    /// Wall-clock time of the save (ms)
    #[serde(default)]
    pub saved_at_ms: Option<f64>,
}

impl HighScoreRecord {
    pub fn new(high_score: u64, saved_at_ms: f64) -> Self {
        Self {
            version: RECORD_VERSION,
            high_score,
            saved_at_ms: Some(saved_at_ms),
        }
    }

    pub fn encode(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode a stored record, accepting the bare-integer format
    pub fn decode(raw: &str) -> Result<Self, StoreError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(StoreError::NotFound);
        }
        if let Ok(high_score) = raw.parse::<u64>() {
            return Ok(Self {
                version: 0,
                high_score,
                saved_at_ms: None,
            });
        }

        let record: HighScoreRecord = serde_json::from_str(raw)?;
        if record.version != RECORD_VERSION {
            return Err(StoreError::UnsupportedVersion(record.version));
        }
        Ok(record)
    }
}
