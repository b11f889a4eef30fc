//! Fixed-size playfield bounds

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// The rectangular arena, origin at the top-left, y growing downward
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Clamp a box's top-left so the box lies inside the arena.
    ///
    /// Lower bound first, then upper, so a box wider than the arena pins to
    /// the far edge instead of panicking like `f32::clamp` would.
    pub fn clamp_box(&self, pos: Vec2, size: Vec2) -> Vec2 {
        let mut p = pos;
        if p.x < 0.0 {
            p.x = 0.0;
        }
        if p.x + size.x > self.width {
            p.x = self.width - size.x;
        }
        if p.y < 0.0 {
            p.y = 0.0;
        }
        if p.y + size.y > self.height {
            p.y = self.height - size.y;
        }
        p
    }

    /// Horizontal room left for a box of the given width
    pub fn free_width(&self, width: f32) -> f32 {
        (self.width - width).max(0.0)
    }

    /// True once `y` is past the bottom edge
    pub fn is_below(&self, y: f32) -> bool {
        y > self.height
    }
}
