//! Session-end hooks
//!
//! External integrations (leaderboards, analytics) observe finished sessions
//! through [`SessionHook`]. Hooks run after the session state has settled;
//! their failures are logged and never feed back into the game.

use crate::error::HookError;

/// Final numbers of a finished session
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionSummary {
    pub final_score: u64,
    /// High score after this session
    pub high_score: u64,
    pub new_high_score: bool,
    pub frames: u64,
    pub duration_ms: f64,
}

/// Observer fired once per game-over
pub trait SessionHook {
    fn on_session_end(&mut self, summary: &SessionSummary) -> Result<(), HookError>;
}

impl<F> SessionHook for F
where
    F: FnMut(&SessionSummary) -> Result<(), HookError>,
{
    fn on_session_end(&mut self, summary: &SessionSummary) -> Result<(), HookError> {
        self(summary)
    }
}

/// Logs every finished session
#[derive(Debug, Clone, Copy, Default)]
pub struct LogHook;

impl SessionHook for LogHook {
    fn on_session_end(&mut self, summary: &SessionSummary) -> Result<(), HookError> {
        log::info!(
            "Session over: score {} (best {}{}) after {} frames / {:.1}s",
            summary.final_score,
            summary.high_score,
            if summary.new_high_score { ", new record" } else { "" },
            summary.frames,
            summary.duration_ms / 1000.0
        );
        Ok(())
    }
}
