//! Axis-aligned bounding box collision
//!
//! Overlap uses strict inequalities: boxes that only share an edge do not
//! collide.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityId, Hazard, Pickup, Player, Pooled};
use super::pool::Pool;

/// Axis-aligned box, `pos` is the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Square box of side `size`
    pub fn square(pos: Vec2, size: f32) -> Self {
        Self {
            pos,
            size: Vec2::splat(size),
        }
    }

    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }
}

/// Strict AABB overlap; touching edges return false
#[inline]
pub fn overlaps(a: &Aabb, b: &Aabb) -> bool {
    a.pos.x < b.pos.x + b.size.x
        && a.pos.x + a.size.x > b.pos.x
        && a.pos.y < b.pos.y + b.size.y
        && a.pos.y + a.size.y > b.pos.y
}

/// Result of one collision pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionReport {
    /// First hazard found overlapping the player
    pub hazard_hit: Option<EntityId>,
    /// Number of hazards overlapping the player this frame
    pub hazard_overlaps: usize,
    /// Pickups collected (and marked for removal) this frame
    pub collected: Vec<EntityId>,
}

impl CollisionReport {
    pub fn is_fatal(&self) -> bool {
        self.hazard_hit.is_some()
    }
}

/// Test the player against every active hazard and pickup.
///
/// Hazards are checked first; a hazard hit ends the pass so no pickups are
/// collected on the frame the session ends. Each overlapping pickup is
/// marked for removal and reported once; pickups already marked are skipped.
pub fn check_collisions(
    player: &Player,
    hazards: &Pool<Hazard>,
    pickups: &mut Pool<Pickup>,
) -> CollisionReport {
    let player_box = player.bounds();
    let mut report = CollisionReport::default();

    for hazard in hazards.active() {
        if overlaps(&player_box, &hazard.bounds()) {
            report.hazard_overlaps += 1;
            if report.hazard_hit.is_none() {
                report.hazard_hit = Some(hazard.id());
            }
        }
    }
    if report.is_fatal() {
        return report;
    }

    for pickup in pickups.active_mut() {
        if pickup.is_marked_for_removal() {
            continue;
        }
        if overlaps(&player_box, &pickup.bounds()) {
            pickup.mark_for_removal();
            report.collected.push(pickup.id());
        }
    }

    report
}
