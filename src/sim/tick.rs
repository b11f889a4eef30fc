//! Per-frame simulation step
//!
//! One call advances the game by exactly one frame, in this order: player
//! input, frame counter, spawns, entity updates (which retire off-arena
//! entities), survival bonus, collisions.

use serde::{Deserialize, Serialize};

use super::check_collisions;
use super::entity::SpawnContext;
use super::state::GameState;

/// Held-key snapshot for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Start a new session once the current one is over
    pub restart: bool,
}

impl TickInput {
    /// Update a held flag from a keyboard `code` (e.g. `ArrowLeft`).
    /// Returns false for keys the game does not use.
    pub fn set_key(&mut self, code: &str, pressed: bool) -> bool {
        let flag = match code {
            "ArrowUp" | "KeyW" => &mut self.up,
            "ArrowDown" | "KeyS" => &mut self.down,
            "ArrowLeft" | "KeyA" => &mut self.left,
            "ArrowRight" | "KeyD" => &mut self.right,
            "Enter" => &mut self.restart,
            _ => return false,
        };
        *flag = pressed;
        true
    }
}

/// What a tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not running; nothing was simulated
    Halted,
    /// One frame simulated, session continues
    Advanced,
    /// A hazard hit the player this frame
    GameOver { final_score: u64, new_high_score: bool },
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) -> TickOutcome {
    if !state.session.is_running() {
        return TickOutcome::Halted;
    }

    let arena = state.config.arena();
    state.player.update(input, &arena);

    state.session.frames += 1;
    let frames = state.session.frames;

    // Spawning (score read now so new hazards pick up the current bonus)
    {
        let mut ctx = SpawnContext::new(&mut state.rng, state.session.score, &state.config);
        if frames % state.config.hazard_spawn_interval == 0 {
            let hazard = state.hazards.acquire(&mut ctx);
            log::trace!("frame {}: hazard {} spawned", frames, hazard.id);
        }
        if frames % state.config.pickup_spawn_interval == 0 {
            let pickup = state.pickups.acquire(&mut ctx);
            log::trace!("frame {}: pickup {} spawned", frames, pickup.id);
        }
    }

    state.hazards.update_all(&arena);
    state.pickups.update_all(&arena);

    // Survival score
    if frames % state.config.survival_interval == 0 {
        state.session.score += state.config.survival_bonus;
    }

    let report = check_collisions(&state.player, &state.hazards, &mut state.pickups);
    if let Some(hazard_id) = report.hazard_hit {
        let new_high_score = state.session.end();
        log::debug!(
            "frame {}: hit by hazard {} ({} overlapping)",
            frames,
            hazard_id,
            report.hazard_overlaps
        );
        return TickOutcome::GameOver {
            final_score: state.session.score,
            new_high_score,
        };
    }

    if !report.collected.is_empty() {
        let bonus = state.config.pickup_bonus * report.collected.len() as u64;
        state.session.score += bonus;
        log::trace!("frame {}: collected {:?} (+{})", frames, report.collected, bonus);
    }

    TickOutcome::Advanced
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::state::GamePhase;
    use glam::Vec2;

    /// Arena tall enough that nothing spawned in a few hundred frames
    /// reaches the player or falls off the bottom
    fn tall_config() -> GameConfig {
        GameConfig {
            arena_height: 20_000.0,
            ..Default::default()
        }
    }

    fn running(config: GameConfig) -> GameState {
        let mut state = GameState::new(config, 12345, 0);
        state.begin_session(0.0);
        state
    }

    #[test]
    fn test_tick_halted_when_idle() {
        let mut state = GameState::new(GameConfig::default(), 1, 0);
        assert_eq!(tick(&mut state, &TickInput::default()), TickOutcome::Halted);
        assert_eq!(state.session.frames, 0);
    }

    #[test]
    fn test_spawn_cadence_after_200_frames() {
        let mut state = running(tall_config());
        for _ in 0..200 {
            assert_eq!(tick(&mut state, &TickInput::default()), TickOutcome::Advanced);
        }
        assert_eq!(state.session.frames, 200);
        assert_eq!(state.hazards.active_len(), 3);
        assert_eq!(state.pickups.active_len(), 1);
        assert_eq!(state.hazards.stats().created, 3);
        assert_eq!(state.pickups.stats().created, 1);
    }

    #[test]
    fn test_survival_score_every_60_frames() {
        let mut state = running(tall_config());
        for k in 1..=10u64 {
            for _ in 0..60 {
                tick(&mut state, &TickInput::default());
            }
            assert_eq!(state.session.frames, 60 * k);
            assert_eq!(state.session.score, 10 * k);
        }
    }

    #[test]
    fn test_hazard_overlap_ends_session() {
        let mut state = running(GameConfig::default());
        state.player.pos = Vec2::new(0.0, 0.0);
        {
            let mut ctx = SpawnContext::new(&mut state.rng, 0, &state.config);
            let hazard = state.hazards.acquire(&mut ctx);
            hazard.pos = Vec2::new(10.0, 10.0);
            hazard.size = 25.0;
            hazard.speed = 0.0;
        }

        let outcome = tick(&mut state, &TickInput::default());
        assert_eq!(
            outcome,
            TickOutcome::GameOver {
                final_score: 0,
                new_high_score: false
            }
        );
        assert!(!state.session.is_running());
        assert!(state.session.is_game_over());

        // No further frames are simulated
        let frames = state.session.frames;
        assert_eq!(tick(&mut state, &TickInput::default()), TickOutcome::Halted);
        assert_eq!(state.session.frames, frames);
        assert_eq!(state.session.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_multiple_hazards_single_game_over() {
        let mut state = running(GameConfig::default());
        state.player.pos = Vec2::new(100.0, 100.0);
        {
            let mut ctx = SpawnContext::new(&mut state.rng, 0, &state.config);
            for _ in 0..3 {
                let hazard = state.hazards.acquire(&mut ctx);
                hazard.pos = Vec2::new(105.0, 105.0);
                hazard.speed = 0.0;
            }
        }
        assert!(matches!(
            tick(&mut state, &TickInput::default()),
            TickOutcome::GameOver { .. }
        ));
        assert_eq!(tick(&mut state, &TickInput::default()), TickOutcome::Halted);
    }

    #[test]
    fn test_pickup_collection_scores_and_recycles() {
        let mut state = running(GameConfig::default());
        state.player.pos = Vec2::new(200.0, 200.0);
        {
            let mut ctx = SpawnContext::new(&mut state.rng, 0, &state.config);
            for offset in [0.0, 8.0] {
                let pickup = state.pickups.acquire(&mut ctx);
                pickup.pos = Vec2::new(200.0 + offset, 200.0);
                pickup.speed = 0.0;
            }
        }

        assert_eq!(tick(&mut state, &TickInput::default()), TickOutcome::Advanced);
        assert_eq!(state.session.score, 200);
        // Marked this frame, reclaimed on the next update pass
        assert_eq!(state.pickups.active_len(), 2);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.session.score, 200);
        assert_eq!(state.pickups.active_len(), 0);
        assert_eq!(state.pickups.idle_len(), 2);
    }

    #[test]
    fn test_hazard_speed_bonus_reads_current_score() {
        let mut state = running(tall_config());
        state.session.score = 1500;
        for _ in 0..60 {
            tick(&mut state, &TickInput::default());
        }
        let hazard = &state.hazards.active()[0];
        // 2..5 base plus 1500 / 500
        assert!(hazard.speed >= 5.0 && hazard.speed < 8.0);
    }

    #[test]
    fn test_determinism() {
        let inputs = [
            TickInput {
                left: true,
                ..Default::default()
            },
            TickInput {
                up: true,
                right: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        let mut state1 = running(GameConfig::default());
        let mut state2 = running(GameConfig::default());
        for i in 0..600 {
            let input = &inputs[i % inputs.len()];
            let a = tick(&mut state1, input);
            let b = tick(&mut state2, input);
            assert_eq!(a, b);
        }
        assert_eq!(state1.session, state2.session);
        assert_eq!(state1.player, state2.player);
        assert_eq!(state1.hazards.active(), state2.hazards.active());
        assert_eq!(state1.pickups.active(), state2.pickups.active());
    }

    #[test]
    fn test_set_key() {
        let mut input = TickInput::default();
        assert!(input.set_key("ArrowLeft", true));
        assert!(input.left);
        assert!(input.set_key("ArrowLeft", false));
        assert!(!input.left);
        assert!(!input.set_key("Space", true));
    }
}
