//! Broccoli Runner entry point
//!
//! Loads settings, opens the window and runs the frame loop until quit.

use broccoli_runner::flow::{Flow, Game};
use broccoli_runner::native::{FrameLimiter, MacroquadBackend};
use broccoli_runner::settings::{SETTINGS_PATH, Settings};
use macroquad::Window;
use macroquad::prelude::Conf;

fn window_conf(settings: &Settings) -> Conf {
    Conf {
        window_title: "Broccoli Runner".to_string(),
        window_width: settings.screen_width,
        window_height: settings.screen_height,
        window_resizable: false,
        ..Default::default()
    }
}

/// Seed from the wall clock when the settings don't pin one
fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

async fn run(settings: Settings) {
    let seed = settings.seed.unwrap_or_else(clock_seed);
    let mut backend = MacroquadBackend::load(&settings).await;
    let mut limiter = FrameLimiter::new(&settings);
    let mut game = Game::new(settings, seed);

    loop {
        limiter.begin_frame();
        if game.frame(&mut backend) == Flow::Quit {
            break;
        }
        limiter.wait();
        macroquad::window::next_frame().await;
    }
    log::info!("Broccoli Runner exiting");
}

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();
    log::info!("Broccoli Runner starting...");

    let settings = match Settings::load(SETTINGS_PATH) {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("broccoli-runner: {}", e);
            std::process::exit(1);
        }
    };

    Window::from_config(window_conf(&settings), run(settings));
}
