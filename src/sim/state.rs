//! Game state and session bookkeeping
//!
//! `GameState` owns everything one session mutates: the player, both pools,
//! the RNG and the score counters.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::draw::{FrameView, Hud};
use super::entity::{Entity, Hazard, Pickup, Player};
use super::pool::Pool;
use crate::config::GameConfig;

/// Lifecycle of the game loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// No session started yet
    #[default]
    Idle,
    /// Frames are being simulated
    Running,
    /// Player hit a hazard; waiting for a restart
    GameOver,
}

/// Score and progress of the current session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub score: u64,
    /// Simulated frames this session
    pub frames: u64,
    pub phase: GamePhase,
    /// Best score seen across sessions
    pub high_score: u64,
    /// Wall-clock start of the session (ms)
    pub started_at_ms: f64,
    /// Wall-clock end of the session (ms), on the same clock as the start
    #[serde(default)]
    pub ended_at_ms: Option<f64>,
}

impl SessionState {
    pub fn new(high_score: u64) -> Self {
        Self {
            high_score,
            ..Default::default()
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Zero the counters and enter `Running`
    pub fn begin(&mut self, now_ms: f64) {
        self.score = 0;
        self.frames = 0;
        self.phase = GamePhase::Running;
        self.started_at_ms = now_ms;
        self.ended_at_ms = None;
    }

    /// Session time at `now_ms`; frozen once the end has been stamped
    pub fn elapsed_ms(&self, now_ms: f64) -> f64 {
        match self.phase {
            GamePhase::Idle => 0.0,
            GamePhase::Running => (now_ms - self.started_at_ms).max(0.0),
            GamePhase::GameOver => {
                (self.ended_at_ms.unwrap_or(now_ms) - self.started_at_ms).max(0.0)
            }
        }
    }

    /// Enter `GameOver`. Returns true when the score beats the high score,
    /// which is raised to match.
    pub fn end(&mut self) -> bool {
        self.phase = GamePhase::GameOver;
        if self.score > self.high_score {
            self.high_score = self.score;
            true
        } else {
            false
        }
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    pub rng: Pcg32,
    pub session: SessionState,
    pub player: Player,
    pub hazards: Pool<Hazard>,
    pub pickups: Pool<Pickup>,
}

impl GameState {
    /// Create an idle game state with the given seed
    pub fn new(config: GameConfig, seed: u64, high_score: u64) -> Self {
        let player = Player::spawn(&config);
        let hazards = Pool::new("hazards", config.pool_capacity);
        let pickups = Pool::new("pickups", config.pool_capacity);
        Self {
            rng: Pcg32::seed_from_u64(seed),
            session: SessionState::new(high_score),
            player,
            hazards,
            pickups,
            config,
        }
    }

    /// Start a fresh session: counters zeroed, player respawned and every
    /// active hazard and pickup returned to its pool.
    pub fn begin_session(&mut self, now_ms: f64) {
        self.session.begin(now_ms);
        self.player = Player::spawn(&self.config);
        self.hazards.reset_pool();
        self.pickups.reset_pool();
    }

    /// Snapshot for the renderer
    pub fn view(&self, now_ms: f64) -> FrameView {
        let mut commands =
            Vec::with_capacity(1 + self.hazards.active_len() + self.pickups.active_len());
        commands.push(self.player.draw());
        self.hazards.draw_all(&mut commands);
        self.pickups.draw_all(&mut commands);

        FrameView {
            arena_width: self.config.arena_width,
            arena_height: self.config.arena_height,
            commands,
            hud: Hud {
                score: self.session.score,
                high_score: self.session.high_score,
                frames: self.session.frames,
                phase: self.session.phase,
                elapsed_ms: self.session.elapsed_ms(now_ms),
            },
        }
    }
}
