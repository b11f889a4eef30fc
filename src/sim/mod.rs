//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per frame, driven from outside
//! - Seeded RNG only
//! - No rendering, platform or persistence dependencies

pub mod arena;
pub mod autopilot;
pub mod collision;
pub mod draw;
pub mod entity;
pub mod pool;
pub mod state;
pub mod tick;

pub use arena::Arena;
pub use collision::{Aabb, CollisionReport, check_collisions, overlaps};
pub use draw::{Color, DrawCommand, FrameView, Hud, Shape};
pub use entity::{Entity, EntityId, Hazard, Pickup, Player, Pooled, SpawnContext};
pub use pool::{Pool, PoolStats};
pub use state::{GamePhase, GameState, SessionState};
pub use tick::{TickInput, TickOutcome, tick};
