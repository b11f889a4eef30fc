//! Error types
//!
//! The simulation itself never fails; these cover the collaborators around it.

use std::fmt;

/// High score storage errors
#[derive(Debug, Clone, PartialEq)]
pub enum StoreError {
    /// Nothing has been stored yet
    NotFound,
    /// I/O error
    Io(String),
    /// Stored data could not be decoded
    Corrupt(String),
    /// Record written by an unknown format version
    UnsupportedVersion(u32),
    /// Backing storage is not available on this platform/context
    Unavailable,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::NotFound => write!(f, "no stored high score"),
            StoreError::Io(msg) => write!(f, "I/O error: {}", msg),
            StoreError::Corrupt(msg) => write!(f, "corrupt high score record: {}", msg),
            StoreError::UnsupportedVersion(v) => {
                write!(f, "unsupported high score record version {}", v)
            }
            StoreError::Unavailable => write!(f, "storage unavailable"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::NotFound => StoreError::NotFound,
            _ => StoreError::Io(e.to_string()),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Corrupt(e.to_string())
    }
}

/// Configuration loading/validation errors
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Config file could not be read
    Io(String),
    /// Config file is not valid JSON for `GameConfig`
    Parse(String),
    /// Values parsed but are unusable
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(msg) => write!(f, "config I/O error: {}", msg),
            ConfigError::Parse(msg) => write!(f, "config parse error: {}", msg),
            ConfigError::Invalid(msg) => write!(f, "invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e.to_string())
    }
}

/// Failure reported by a session-end hook
#[derive(Debug, Clone, PartialEq)]
pub struct HookError(pub String);

impl fmt::Display for HookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session hook failed: {}", self.0)
    }
}

impl std::error::Error for HookError {}

/// Failure reported by a renderer
#[derive(Debug, Clone, PartialEq)]
pub struct RenderError(pub String);

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "render failed: {}", self.0)
    }
}

impl std::error::Error for RenderError {}
