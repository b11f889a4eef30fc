//! Frame scheduling
//!
//! Stands in for the display-refresh callback: the host calls
//! [`FrameDriver::frame`] once per refresh with the elapsed time, and the
//! driver runs as many fixed simulation steps as that time covers. When a
//! session ends the driver unschedules itself, so no further steps run until
//! the session is restarted.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::game::Game;
use crate::persistence::HighScoreStore;
use crate::renderer::Renderer;
use crate::sim::{GamePhase, TickInput, TickOutcome};

/// Fixed timestep accumulator
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    dt: f32,
    accumulator: f32,
    max_steps: u32,
}

impl FixedTimestep {
    pub fn new(dt: f32, max_steps: u32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
            max_steps,
        }
    }

    /// Add frame time; returns the number of fixed steps to run
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        let frame_dt = frame_dt.clamp(0.0, MAX_FRAME_DT);
        self.accumulator += frame_dt;
        // Cap to prevent spiral of death
        self.accumulator = self.accumulator.min(self.dt * self.max_steps as f32);
        // Small epsilon so exact multiples of dt are not lost to rounding
        let steps = ((self.accumulator + self.dt * 1e-3) / self.dt) as u32;
        let steps = steps.min(self.max_steps);
        self.accumulator = (self.accumulator - steps as f32 * self.dt).max(0.0);
        steps
    }

    /// Drop any banked time
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::new(SIM_DT, MAX_SUBSTEPS)
    }
}

/// Drives a [`Game`] from refresh callbacks and presents each frame
pub struct FrameDriver<S: HighScoreStore, R: Renderer> {
    game: Game<S>,
    renderer: R,
    timestep: FixedTimestep,
    scheduled: bool,
}

impl<S: HighScoreStore, R: Renderer> FrameDriver<S, R> {
    pub fn new(game: Game<S>, renderer: R) -> Self {
        Self {
            game,
            renderer,
            timestep: FixedTimestep::default(),
            scheduled: false,
        }
    }

    /// Start (or restart) a session and schedule frames
    pub fn start(&mut self) -> bool {
        if !self.game.start_session() {
            return false;
        }
        self.timestep.reset();
        self.scheduled = true;
        true
    }

    /// Cancel scheduling; the session state is left as is
    pub fn stop(&mut self) {
        if self.scheduled {
            log::debug!("Frame loop stopped");
        }
        self.scheduled = false;
        self.timestep.reset();
    }

    pub fn is_scheduled(&self) -> bool {
        self.scheduled
    }

    /// One refresh callback. Returns the number of simulation steps run.
    ///
    /// While unscheduled nothing is simulated; a `restart` input during
    /// game-over starts a new session first.
    pub fn frame(&mut self, frame_dt: f32, input: &TickInput) -> u32 {
        if !self.scheduled {
            if input.restart && self.game.phase() == GamePhase::GameOver {
                self.start();
            }
            if !self.scheduled {
                return 0;
            }
        }

        let steps = self.timestep.accumulate(frame_dt);
        let mut ran = 0;
        for _ in 0..steps {
            ran += 1;
            if let TickOutcome::GameOver { .. } | TickOutcome::Halted = self.game.step(input) {
                self.stop();
                break;
            }
        }

        self.present();
        ran
    }

    /// Hand the current view to the renderer without simulating
    pub fn present(&mut self) {
        let view = self.game.view();
        if let Err(e) = self.renderer.present(&view) {
            log::warn!("{}", e);
        }
    }

    pub fn game(&self) -> &Game<S> {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut Game<S> {
        &mut self.game
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::error::RenderError;
    use crate::persistence::MemoryStore;
    use crate::sim::{FrameView, SpawnContext};

    #[derive(Default)]
    struct CountingRenderer {
        frames: u32,
        fail: bool,
        last_score: u64,
        last_phase: GamePhase,
    }

    impl Renderer for CountingRenderer {
        fn present(&mut self, view: &FrameView) -> Result<(), RenderError> {
            self.frames += 1;
            self.last_score = view.hud.score;
            self.last_phase = view.hud.phase;
            if self.fail {
                Err(RenderError("canvas lost".to_string()))
            } else {
                Ok(())
            }
        }
    }

    fn driver(renderer: CountingRenderer) -> FrameDriver<MemoryStore, CountingRenderer> {
        let config = GameConfig {
            seed: Some(5),
            arena_height: 20_000.0,
            player_spawn_offset: 100.0,
            ..Default::default()
        };
        FrameDriver::new(Game::new(config, MemoryStore::new()).unwrap(), renderer)
    }

    #[test]
    fn test_one_step_exact() {
        let mut ts = FixedTimestep::new(1.0 / 60.0, 8);
        assert_eq!(ts.accumulate(1.0 / 60.0), 1);
    }

    #[test]
    fn test_accumulates_partial() {
        let mut ts = FixedTimestep::new(1.0 / 60.0, 8);
        assert_eq!(ts.accumulate(0.008), 0);
        assert_eq!(ts.accumulate(0.010), 1);
    }

    #[test]
    fn test_caps_steps() {
        let mut ts = FixedTimestep::new(1.0 / 60.0, 8);
        assert_eq!(ts.accumulate(5.0), 6);
        let mut ts = FixedTimestep::new(1.0 / 120.0, 4);
        assert_eq!(ts.accumulate(0.1), 4);
        assert_eq!(ts.accumulate(0.0), 0);
    }

    #[test]
    fn test_unscheduled_driver_does_nothing() {
        let mut d = driver(CountingRenderer::default());
        assert_eq!(d.frame(SIM_DT, &TickInput::default()), 0);
        assert_eq!(d.renderer().frames, 0);
        assert_eq!(d.game().phase(), GamePhase::Idle);
    }

    #[test]
    fn test_runs_and_presents_once_per_frame() {
        let mut d = driver(CountingRenderer::default());
        assert!(d.start());
        let mut steps = 0;
        for _ in 0..120 {
            steps += d.frame(SIM_DT, &TickInput::default());
        }
        assert_eq!(d.renderer().frames, 120);
        assert_eq!(steps as u64, d.game().state().session.frames);
        assert!(steps >= 119);
    }

    #[test]
    fn test_game_over_cancels_and_restart_resumes() {
        let mut d = driver(CountingRenderer::default());
        d.start();
        {
            let state = d.game_mut().state_mut();
            let target = state.player.pos;
            let mut ctx = SpawnContext::new(&mut state.rng, 0, &state.config);
            let hazard = state.hazards.acquire(&mut ctx);
            hazard.pos = target;
            hazard.speed = 0.0;
            state.session.score = 70;
        }

        assert_eq!(d.frame(SIM_DT * 3.0, &TickInput::default()), 1);
        assert!(!d.is_scheduled());
        assert_eq!(d.game().phase(), GamePhase::GameOver);

        // The fatal callback still presents exactly one game-over frame
        let presented = d.renderer().frames;
        assert_eq!(presented, 1);
        assert_eq!(d.renderer().last_phase, GamePhase::GameOver);
        assert_eq!(d.renderer().last_score, 70);
        assert_eq!(d.game().high_score(), 70);

        // Stopped: further callbacks neither simulate nor present
        assert_eq!(d.frame(SIM_DT, &TickInput::default()), 0);
        assert_eq!(d.renderer().frames, presented);

        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        assert_eq!(d.frame(SIM_DT, &restart), 1);
        assert!(d.is_scheduled());
        assert_eq!(d.game().phase(), GamePhase::Running);
        assert_eq!(d.game().state().session.frames, 1);
    }

    #[test]
    fn test_present_without_simulating() {
        let mut d = driver(CountingRenderer::default());
        d.present();
        assert_eq!(d.renderer().frames, 1);
        assert_eq!(d.renderer().last_phase, GamePhase::Idle);
        assert_eq!(d.game().state().session.frames, 0);
        assert!(!d.is_scheduled());
    }

    #[test]
    fn test_renderer_failure_does_not_stop_loop() {
        let mut d = driver(CountingRenderer {
            fail: true,
            ..Default::default()
        });
        d.start();
        for _ in 0..10 {
            d.frame(SIM_DT, &TickInput::default());
        }
        assert!(d.is_scheduled());
        assert_eq!(d.renderer().frames, 10);
        assert!(d.game().state().session.frames >= 9);
    }
}
