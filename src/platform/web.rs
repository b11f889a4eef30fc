//! Browser bindings (wasm32)
//!
//! The page owns the canvas and `requestAnimationFrame`; it forwards key
//! events and refresh callbacks here and draws the returned JSON frame.

use wasm_bindgen::prelude::*;

use crate::config::GameConfig;
use crate::driver::FrameDriver;
use crate::game::Game;
use crate::hooks::LogHook;
use crate::persistence::LocalStorageStore;
use crate::renderer::JsonRenderer;
use crate::sim::TickInput;

/// Set up console logging and panic reporting
#[wasm_bindgen]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Game handle exported to JavaScript
#[wasm_bindgen]
pub struct WebGame {
    driver: FrameDriver<LocalStorageStore, JsonRenderer>,
    input: TickInput,
}

#[wasm_bindgen]
impl WebGame {
    /// Create a game; `config_json` overrides tuning values
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<WebGame, JsValue> {
        let config = match config_json {
            Some(json) => GameConfig::from_json(&json),
            None => Ok(GameConfig::default()),
        }
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let mut game = Game::new(config, LocalStorageStore::default())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        game.add_hook(LogHook);

        // The page draws the idle arena before the first start
        let mut driver = FrameDriver::new(game, JsonRenderer::default());
        driver.present();

        Ok(WebGame {
            driver,
            input: TickInput::default(),
        })
    }

    /// Start button
    pub fn start(&mut self) -> bool {
        self.driver.start()
    }

    /// Stop scheduling (tab hidden or torn down)
    pub fn stop(&mut self) {
        self.driver.stop();
    }

    /// Returns true when the key is used by the game (caller should
    /// `preventDefault` to stop page scrolling)
    pub fn key_down(&mut self, code: &str) -> bool {
        self.input.set_key(code, true)
    }

    pub fn key_up(&mut self, code: &str) -> bool {
        self.input.set_key(code, false)
    }

    /// Refresh callback; returns the frame to draw as JSON
    pub fn frame(&mut self, dt: f32) -> String {
        self.driver.frame(dt, &self.input);
        // Restart is a one-shot press
        self.input.restart = false;
        self.driver.renderer().json().to_string()
    }

    /// Whether the page should keep requesting animation frames
    pub fn is_running(&self) -> bool {
        self.driver.is_scheduled()
    }

    pub fn score(&self) -> f64 {
        self.driver.game().score() as f64
    }

    pub fn high_score(&self) -> f64 {
        self.driver.game().high_score() as f64
    }
}
