//! Space Dodger entry point
//!
//! Natively this runs a headless attract-mode session: the autopilot plays
//! until it is hit (or a time limit passes) and the final frame is printed.
//! In the browser the page drives `platform::web::WebGame` instead.
//!
//! Usage: `space-dodger [config.json] [highscore.json]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use space_dodger::consts::SIM_DT;
    use space_dodger::hooks::LogHook;
    use space_dodger::persistence::JsonFileStore;
    use space_dodger::renderer::AsciiRenderer;
    use space_dodger::sim::autopilot;
    use space_dodger::{FrameDriver, Game, GameConfig};

    /// Two minutes of simulated play at most
    const MAX_FRAMES: u32 = 60 * 120;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => match GameConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("{}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => GameConfig::default(),
    };
    let score_path = args
        .next()
        .unwrap_or_else(|| "space_dodger_highscore.json".to_string());

    let mut game = match Game::new(config, JsonFileStore::new(score_path)) {
        Ok(game) => game,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };
    game.add_hook(LogHook);

    let mut driver = FrameDriver::new(game, AsciiRenderer::new(64, 24));
    driver.start();

    let mut frames = 0;
    while driver.is_scheduled() && frames < MAX_FRAMES {
        let input = autopilot::steer(driver.game().state());
        driver.frame(SIM_DT, &input);
        frames += 1;
    }
    if driver.is_scheduled() {
        log::info!("Time limit reached, stopping");
        driver.stop();
    }

    println!("{}", driver.renderer().last_frame());
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser builds are driven through `space_dodger::platform::web::WebGame`
}
