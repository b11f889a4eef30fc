//! Entity types and their per-frame behavior
//!
//! `Entity` is the capability every drawable, collidable thing shares.
//! `Pooled` adds what a [`Pool`](super::pool::Pool) needs to recycle an
//! entity in place.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::collision::Aabb;
use super::draw::{Color, DrawCommand, Shape};
use super::tick::TickInput;
use crate::config::GameConfig;

/// Stable identity of a pooled entity, kept across recycling
pub type EntityId = u32;

/// Shared entity capability
pub trait Entity {
    /// Collision box
    fn bounds(&self) -> Aabb;

    /// Draw instruction for the current position
    fn draw(&self) -> DrawCommand;

    fn is_marked_for_removal(&self) -> bool {
        false
    }
}

/// Everything needed to (re)initialize an entity at spawn time
pub struct SpawnContext<'a> {
    pub rng: &'a mut Pcg32,
    /// Session score at the moment of spawning
    pub score: u64,
    pub config: &'a GameConfig,
}

impl<'a> SpawnContext<'a> {
    pub fn new(rng: &'a mut Pcg32, score: u64, config: &'a GameConfig) -> Self {
        Self { rng, score, config }
    }

    /// Random x so a box of `width` fits inside the arena
    fn random_x(&mut self, width: f32) -> f32 {
        let span = self.config.arena().free_width(width);
        if span > 0.0 {
            self.rng.random_range(0.0..span)
        } else {
            0.0
        }
    }
}

/// An entity a pool can construct, reset in place and advance
pub trait Pooled: Entity {
    fn id(&self) -> EntityId;

    /// Construct a new entity at fresh spawn state
    fn spawn(id: EntityId, ctx: &mut SpawnContext<'_>) -> Self;

    /// Return to fresh spawn state, keeping identity
    fn reset(&mut self, ctx: &mut SpawnContext<'_>);

    /// Advance one frame
    fn update(&mut self, arena: &Arena);

    fn mark_for_removal(&mut self);
}

/// The player's ship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    /// Velocity applied on the last update
    pub vel: Vec2,
    /// Pixels per frame
    pub speed: f32,
}

impl Player {
    /// New player at the spawn point: centered, near the bottom edge
    pub fn spawn(config: &GameConfig) -> Self {
        let size = Vec2::splat(config.player_size);
        Self {
            pos: Vec2::new(
                config.arena_width / 2.0 - size.x / 2.0,
                config.arena_height - config.player_spawn_offset,
            ),
            size,
            vel: Vec2::ZERO,
            speed: config.player_speed,
        }
    }

    /// Apply directional input, move, then clamp into the arena.
    ///
    /// Left wins over right and up wins over down when both are held.
    pub fn update(&mut self, input: &TickInput, arena: &Arena) {
        self.vel.x = if input.left {
            -self.speed
        } else if input.right {
            self.speed
        } else {
            0.0
        };
        self.vel.y = if input.up {
            -self.speed
        } else if input.down {
            self.speed
        } else {
            0.0
        };

        self.pos += self.vel;
        self.pos = arena.clamp_box(self.pos, self.size);
    }
}

impl Entity for Player {
    fn bounds(&self) -> Aabb {
        Aabb {
            pos: self.pos,
            size: self.size,
        }
    }

    fn draw(&self) -> DrawCommand {
        DrawCommand {
            shape: Shape::Ship,
            bounds: self.bounds(),
            color: Color::PLAYER,
            glow: true,
        }
    }
}

/// A falling square to avoid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hazard {
    pub id: EntityId,
    pub pos: Vec2,
    pub size: f32,
    /// Pixels per frame, downward
    pub speed: f32,
    pub marked_for_removal: bool,
}

impl Pooled for Hazard {
    fn id(&self) -> EntityId {
        self.id
    }

    fn spawn(id: EntityId, ctx: &mut SpawnContext<'_>) -> Self {
        let mut hazard = Self {
            id,
            pos: Vec2::ZERO,
            size: 0.0,
            speed: 0.0,
            marked_for_removal: false,
        };
        hazard.reset(ctx);
        hazard
    }

    fn reset(&mut self, ctx: &mut SpawnContext<'_>) {
        let config = ctx.config;
        self.size = ctx
            .rng
            .random_range(config.hazard_min_size..config.hazard_max_size);
        self.pos = Vec2::new(ctx.random_x(self.size), -self.size);
        // Faster as the session progresses; score is read now, not cached
        self.speed = ctx
            .rng
            .random_range(config.hazard_min_speed..config.hazard_max_speed)
            + ctx.score as f32 / config.hazard_score_divisor;
        self.marked_for_removal = false;
    }

    fn update(&mut self, arena: &Arena) {
        self.pos.y += self.speed;
        if arena.is_below(self.pos.y) {
            self.marked_for_removal = true;
        }
    }

    fn mark_for_removal(&mut self) {
        self.marked_for_removal = true;
    }
}

impl Entity for Hazard {
    fn bounds(&self) -> Aabb {
        Aabb::square(self.pos, self.size)
    }

    fn draw(&self) -> DrawCommand {
        DrawCommand {
            shape: Shape::Rect,
            bounds: self.bounds(),
            color: Color::HAZARD,
            glow: false,
        }
    }

    fn is_marked_for_removal(&self) -> bool {
        self.marked_for_removal
    }
}

/// A falling orb worth bonus points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pickup {
    pub id: EntityId,
    pub pos: Vec2,
    pub size: f32,
    pub speed: f32,
    pub marked_for_removal: bool,
}

impl Pooled for Pickup {
    fn id(&self) -> EntityId {
        self.id
    }

    fn spawn(id: EntityId, ctx: &mut SpawnContext<'_>) -> Self {
        let mut pickup = Self {
            id,
            pos: Vec2::ZERO,
            size: 0.0,
            speed: 0.0,
            marked_for_removal: false,
        };
        pickup.reset(ctx);
        pickup
    }

    fn reset(&mut self, ctx: &mut SpawnContext<'_>) {
        self.size = ctx.config.pickup_size;
        self.pos = Vec2::new(ctx.random_x(self.size), -self.size);
        self.speed = ctx.config.pickup_speed;
        self.marked_for_removal = false;
    }

    fn update(&mut self, arena: &Arena) {
        self.pos.y += self.speed;
        if arena.is_below(self.pos.y) {
            self.marked_for_removal = true;
        }
    }

    fn mark_for_removal(&mut self) {
        self.marked_for_removal = true;
    }
}

impl Entity for Pickup {
    fn bounds(&self) -> Aabb {
        Aabb::square(self.pos, self.size)
    }

    fn draw(&self) -> DrawCommand {
        DrawCommand {
            shape: Shape::Circle,
            bounds: self.bounds(),
            color: Color::PICKUP,
            glow: true,
        }
    }

    fn is_marked_for_removal(&self) -> bool {
        self.marked_for_removal
    }
}
