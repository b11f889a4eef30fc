//! Space Dodger - a fixed-arena arcade dodger
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, pools, collisions, per-frame tick)
//! - `game`: Session state machine wired to persistence and session-end hooks
//! - `driver`: Fixed timestep frame scheduling with cancellation
//! - `renderer`: Rendering collaborator contract and a text rasterizer
//! - `persistence`: High score storage with a versioned record
//! - `platform`: Browser/native platform abstraction

pub mod config;
pub mod driver;
pub mod error;
pub mod game;
pub mod hooks;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod sim;

pub use config::GameConfig;
pub use driver::{FixedTimestep, FrameDriver};
pub use error::{ConfigError, HookError, RenderError, StoreError};
pub use game::Game;
pub use hooks::{SessionHook, SessionSummary};
pub use persistence::{HighScoreStore, MemoryStore};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (the loop's nominal 60 Hz frame rate)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta the driver will accept (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 30.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    /// Distance between the player's spawn y and the bottom edge
    pub const PLAYER_SPAWN_OFFSET: f32 = 100.0;

    /// Hazard size range [min, max)
    pub const HAZARD_MIN_SIZE: f32 = 20.0;
    pub const HAZARD_MAX_SIZE: f32 = 50.0;
    /// Hazard base speed range [min, max), pixels per frame
    pub const HAZARD_MIN_SPEED: f32 = 2.0;
    pub const HAZARD_MAX_SPEED: f32 = 5.0;
    /// Score points per extra pixel/frame of hazard speed
    pub const HAZARD_SCORE_DIVISOR: f32 = 500.0;

    /// Pickup defaults
    pub const PICKUP_SIZE: f32 = 15.0;
    pub const PICKUP_SPEED: f32 = 3.0;

    /// Spawn cadence in frames
    pub const HAZARD_SPAWN_INTERVAL: u64 = 60;
    pub const PICKUP_SPAWN_INTERVAL: u64 = 200;

    /// Scoring
    pub const SURVIVAL_INTERVAL: u64 = 60;
    pub const SURVIVAL_BONUS: u64 = 10;
    pub const PICKUP_BONUS: u64 = 100;

    /// Idle entities retained per pool
    pub const POOL_CAPACITY: usize = 50;
}
