//! Session state machine
//!
//! `Idle → Running → GameOver → Running → ...`
//!
//! `Game` wraps the pure simulation with the effects that happen around a
//! session: loading the high score, persisting a new record and notifying
//! session-end hooks.

use crate::config::GameConfig;
use crate::error::ConfigError;
use crate::hooks::{SessionHook, SessionSummary};
use crate::persistence::{self, HighScoreStore};
use crate::platform;
use crate::sim::{FrameView, GamePhase, GameState, TickInput, TickOutcome, tick};

/// A game instance: simulation plus its collaborators
pub struct Game<S: HighScoreStore> {
    state: GameState,
    store: S,
    hooks: Vec<Box<dyn SessionHook>>,
}

impl<S: HighScoreStore> Game<S> {
    /// Validate the config and load the high score (0 if unreadable)
    pub fn new(config: GameConfig, mut store: S) -> Result<Self, ConfigError> {
        config.validate()?;
        let high_score = persistence::load_or_default(&mut store);
        let seed = config.seed.unwrap_or_else(platform::random_seed);
        log::debug!("New game, seed {}, high score {}", seed, high_score);
        Ok(Self {
            state: GameState::new(config, seed, high_score),
            store,
            hooks: Vec::new(),
        })
    }

    /// Register a session-end hook
    pub fn add_hook(&mut self, hook: impl SessionHook + 'static) {
        self.hooks.push(Box::new(hook));
    }

    pub fn phase(&self) -> GamePhase {
        self.state.session.phase
    }

    pub fn score(&self) -> u64 {
        self.state.session.score
    }

    pub fn high_score(&self) -> u64 {
        self.state.session.high_score
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Start a session now. See [`Game::start_session_at`].
    pub fn start_session(&mut self) -> bool {
        self.start_session_at(platform::now_ms())
    }

    /// Start a session from `Idle` or `GameOver`.
    ///
    /// Returns false (and changes nothing) while a session is running.
    pub fn start_session_at(&mut self, now_ms: f64) -> bool {
        if self.state.session.is_running() {
            log::warn!("start_session ignored: a session is already running");
            return false;
        }
        self.state.begin_session(now_ms);
        log::info!(
            "Session started (high score {})",
            self.state.session.high_score
        );
        true
    }

    /// Simulate one frame now. See [`Game::step_at`].
    pub fn step(&mut self, input: &TickInput) -> TickOutcome {
        self.step_at(input, platform::now_ms())
    }

    /// Simulate one frame; runs the game-over effects when it ends the
    /// session. `now_ms` must be on the clock the session was started with.
    pub fn step_at(&mut self, input: &TickInput, now_ms: f64) -> TickOutcome {
        let outcome = tick(&mut self.state, input);
        if let TickOutcome::GameOver {
            final_score,
            new_high_score,
        } = outcome
        {
            self.finish_session(final_score, new_high_score, now_ms);
        }
        outcome
    }

    /// Snapshot for the renderer
    pub fn view(&self) -> FrameView {
        self.view_at(platform::now_ms())
    }

    /// Snapshot for the renderer at `now_ms` (session clock)
    pub fn view_at(&self, now_ms: f64) -> FrameView {
        self.state.view(now_ms)
    }

    fn finish_session(&mut self, final_score: u64, new_high_score: bool, now_ms: f64) {
        self.state.session.ended_at_ms = Some(now_ms);
        if new_high_score {
            log::info!("New high score: {}", final_score);
            if let Err(e) = self.store.save_high_score(final_score) {
                log::warn!("Failed to save high score: {}", e);
            }
        }

        let session = &self.state.session;
        let summary = SessionSummary {
            final_score,
            high_score: session.high_score,
            new_high_score,
            frames: session.frames,
            duration_ms: session.elapsed_ms(now_ms),
        };
        for hook in &mut self.hooks {
            if let Err(e) = hook.on_session_end(&summary) {
                log::warn!("{}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HookError;
    use crate::persistence::MemoryStore;
    use crate::sim::SpawnContext;
    use glam::Vec2;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn config() -> GameConfig {
        GameConfig {
            seed: Some(2024),
            ..Default::default()
        }
    }

    /// Park a motionless hazard on top of the player
    fn doom(game: &mut Game<MemoryStore>) {
        let state = game.state_mut();
        let target = state.player.pos;
        let mut ctx = SpawnContext::new(&mut state.rng, 0, &state.config);
        let hazard = state.hazards.acquire(&mut ctx);
        hazard.pos = target;
        hazard.speed = 0.0;
    }

    #[test]
    fn test_new_high_score_is_persisted() {
        let mut game = Game::new(config(), MemoryStore::with_value(300)).unwrap();
        assert_eq!(game.high_score(), 300);
        assert_eq!(game.phase(), GamePhase::Idle);

        assert!(game.start_session_at(0.0));
        game.state_mut().session.score = 350;
        doom(&mut game);

        let outcome = game.step(&TickInput::default());
        assert_eq!(
            outcome,
            TickOutcome::GameOver {
                final_score: 350,
                new_high_score: true
            }
        );
        assert_eq!(game.phase(), GamePhase::GameOver);
        assert_eq!(game.high_score(), 350);
        assert_eq!(game.store().value(), Some(350));

        // The next game loads the new record
        let next = Game::new(config(), game.into_store()).unwrap();
        assert_eq!(next.high_score(), 350);
    }

    #[test]
    fn test_lower_score_is_not_saved() {
        let mut game = Game::new(config(), MemoryStore::with_value(300)).unwrap();
        game.start_session_at(0.0);
        game.state_mut().session.score = 120;
        doom(&mut game);
        game.step(&TickInput::default());

        assert_eq!(game.store().saves, 0);
        assert_eq!(game.high_score(), 300);
    }

    #[test]
    fn test_start_rejected_while_running() {
        let mut game = Game::new(config(), MemoryStore::new()).unwrap();
        assert!(game.start_session_at(0.0));
        for _ in 0..10 {
            game.step(&TickInput::default());
        }
        assert!(!game.start_session_at(5.0));
        assert_eq!(game.state().session.frames, 10);
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut game = Game::new(config(), MemoryStore::new()).unwrap();
        game.start_session_at(0.0);
        doom(&mut game);
        game.step(&TickInput::default());
        assert_eq!(game.phase(), GamePhase::GameOver);
        assert_eq!(game.step(&TickInput::default()), TickOutcome::Halted);

        assert!(game.start_session_at(100.0));
        assert_eq!(game.phase(), GamePhase::Running);
        assert_eq!(game.score(), 0);
        assert_eq!(game.state().hazards.active_len(), 0);
        assert_eq!(game.state().hazards.idle_len(), 1);
        assert_eq!(game.step(&TickInput::default()), TickOutcome::Advanced);
    }

    #[test]
    fn test_hooks_fire_once_and_failures_are_contained() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut game = Game::new(config(), MemoryStore::new()).unwrap();

        let sink = Rc::clone(&seen);
        game.add_hook(move |summary: &SessionSummary| -> Result<(), HookError> {
            sink.borrow_mut().push(*summary);
            Ok(())
        });
        game.add_hook(|_: &SessionSummary| -> Result<(), HookError> {
            Err(HookError("leaderboard offline".to_string()))
        });

        game.start_session_at(0.0);
        game.state_mut().session.score = 40;
        doom(&mut game);
        doom(&mut game);
        game.step(&TickInput::default());
        game.step(&TickInput::default());

        let seen = seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].final_score, 40);
        assert!(seen[0].new_high_score);
        assert_eq!(seen[0].frames, 1);
        assert_eq!(game.phase(), GamePhase::GameOver);
        assert_eq!(game.store().value(), Some(40));
    }

    #[test]
    fn test_duration_uses_session_clock() {
        let durations = Rc::new(RefCell::new(Vec::new()));
        let mut game = Game::new(config(), MemoryStore::new()).unwrap();
        let sink = Rc::clone(&durations);
        game.add_hook(move |summary: &SessionSummary| -> Result<(), HookError> {
            sink.borrow_mut().push(summary.duration_ms);
            Ok(())
        });

        game.start_session_at(1_000.0);
        game.step_at(&TickInput::default(), 1_016.0);
        doom(&mut game);
        game.step_at(&TickInput::default(), 1_032.0);
        assert_eq!(game.phase(), GamePhase::GameOver);
        assert_eq!(*durations.borrow(), vec![32.0]);

        // The game-over screen shows a stopped clock
        assert_eq!(game.view_at(1_232.0).hud.elapsed_ms, 32.0);
        assert_eq!(game.view_at(60_000.0).hud.elapsed_ms, 32.0);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let bad = GameConfig {
            arena_width: -1.0,
            ..Default::default()
        };
        assert!(Game::new(bad, MemoryStore::new()).is_err());
    }

    #[test]
    fn test_start_from_idle_places_player_at_spawn() {
        let mut game = Game::new(config(), MemoryStore::new()).unwrap();
        game.start_session_at(0.0);
        let view = game.view();
        assert_eq!(view.commands.len(), 1);
        assert_eq!(view.hud.score, 0);
        assert_eq!(view.commands[0].bounds.pos, Vec2::new(385.0, 500.0));
    }
}
