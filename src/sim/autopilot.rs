//! Attract-mode steering
//!
//! Produces a `TickInput` from the current state so the game can play
//! itself: sidestep the closest hazard falling into the player's column,
//! otherwise drift under the nearest pickup and hold the spawn row.

use super::entity::Entity;
use super::state::GameState;
use super::tick::TickInput;

/// How far above the player a hazard counts as a threat (pixels)
const LOOKAHEAD: f32 = 220.0;
/// Extra horizontal clearance wanted around a threat (pixels)
const CLEARANCE: f32 = 12.0;

/// Pick the input for the next frame
pub fn steer(state: &GameState) -> TickInput {
    let mut input = TickInput::default();
    let player = state.player.bounds();
    let speed = state.player.speed;
    let arena = state.config.arena();
    let player_center = player.center();

    // Closest hazard above us whose column overlaps ours (with clearance)
    let threat = state
        .hazards
        .active()
        .iter()
        .map(|h| h.bounds())
        .filter(|b| {
            b.pos.x - CLEARANCE < player.max().x
                && b.max().x + CLEARANCE > player.pos.x
                && b.pos.y < player.max().y
                && player.pos.y - b.max().y < LOOKAHEAD
        })
        .max_by(|a, b| {
            a.max()
                .y
                .partial_cmp(&b.max().y)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    if let Some(threat) = threat {
        let go_right = threat.center().x <= player_center.x;
        let room_right = arena.width - player.max().x;
        let room_left = player.pos.x;
        // Prefer dodging away from the threat unless the wall is in the way
        let dodge_right = if go_right {
            room_right >= speed || room_left < speed
        } else {
            room_left < speed
        };
        input.right = dodge_right;
        input.left = !dodge_right;
        // Backing off buys time while sidestepping
        input.down = player.max().y + speed <= arena.height;
        return input;
    }

    let target_x = state
        .pickups
        .active()
        .iter()
        .filter(|p| !p.is_marked_for_removal())
        .map(|p| p.bounds().center())
        .min_by(|a, b| {
            a.distance_squared(player_center)
                .partial_cmp(&b.distance_squared(player_center))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|c| c.x)
        .unwrap_or(arena.width / 2.0);

    let dx = target_x - player_center.x;
    if dx < -speed {
        input.left = true;
    } else if dx > speed {
        input.right = true;
    }

    let home_y = state.config.arena_height - state.config.player_spawn_offset;
    let dy = home_y - player.pos.y;
    if dy < -speed {
        input.up = true;
    } else if dy > speed {
        input.down = true;
    }

    input
}
