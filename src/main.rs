//! Ring Escape entry point
//!
//! On the web this wires the page and waits for the Start button. Natively
//! it runs the simulation headless for a fixed span of simulated time and
//! prints a JSON summary.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

    log::info!("Ring Escape starting...");
    match ring_escape::platform::web::launch() {
        // The button listeners keep the app alive
        Ok(_app) => log::info!("Ring Escape ready"),
        Err(e) => log::error!("Failed to start: {:?}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use serde::Serialize;

    use ring_escape::platform::HeadlessHost;
    use ring_escape::platform::headless::DrawLog;
    use ring_escape::{AnimationDriver, Settings};

    /// Simulated seconds when none are given
    const DEFAULT_SECONDS: f64 = 20.0;
    /// Callback period of the simulated display (60 Hz)
    const DISPLAY_PERIOD_MS: f64 = 1000.0 / 60.0;

    #[derive(Debug, Serialize)]
    struct RunSummary {
        seed: u64,
        velocity_clamp: &'static str,
        simulated_ms: f64,
        frames_stepped: u64,
        elapsed_seconds: u32,
        balls: usize,
        escaped: u64,
        draw: DrawLog,
    }

    /// `ring-escape [settings.json] [seconds]`
    pub fn run() -> Result<(), String> {
        let mut args = std::env::args().skip(1);

        let settings = match args.next() {
            Some(path) => {
                let json = std::fs::read_to_string(&path)
                    .map_err(|e| format!("could not read {}: {}", path, e))?;
                let settings = Settings::from_json(&json).map_err(|e| e.to_string())?;
                log::info!("Loaded settings from {}", path);
                settings
            }
            None => {
                log::info!("Using default settings");
                Settings::default()
            }
        };

        let seconds = match args.next() {
            Some(s) => s
                .parse::<f64>()
                .map_err(|e| format!("invalid seconds {:?}: {}", s, e))?,
            None => DEFAULT_SECONDS,
        };

        let seed = settings.seed.unwrap_or_else(rand::random);
        log::info!("Running {}s headless with seed {}", seconds, seed);

        let mut driver = AnimationDriver::new(settings, seed);
        let mut host = HeadlessHost::new();
        driver.start(&mut host);
        host.run(&mut driver, seconds * 1000.0, DISPLAY_PERIOD_MS);
        driver.stop(&mut host);

        let state = driver.state();
        let summary = RunSummary {
            seed: state.seed,
            velocity_clamp: state.settings.velocity_clamp.as_str(),
            simulated_ms: host.now_ms(),
            frames_stepped: driver.frames_stepped(),
            elapsed_seconds: driver.elapsed_seconds(),
            balls: driver.ball_count(),
            escaped: driver.escaped_count(),
            draw: host.draw_log().clone(),
        };
        let json = serde_json::to_string_pretty(&summary).map_err(|e| e.to_string())?;
        println!("{}", json);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Ring Escape (native) starting...");

    if let Err(e) = native::run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
