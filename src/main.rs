//! Street Brawler: a side-scrolling platformer prototype
//!
//! One street, two platforms, a player who can walk, jump and attack, and
//! two patrolling enemies. Runs on macroquad (native and WASM).
//!
//! Startup is three phases: load registers the resource manifest, setup
//! builds the world, then the frame loop ticks it once per frame.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod asset;
mod config;
mod error;
mod game;
mod input;

use macroquad::miniquad::conf::AppleGfxApi;
use macroquad::prelude::*;

use config::{GameConfig, RendererMode, CONFIG_PATH};
use error::Result;
use game::{GameRuntime, RenderContext, FrameTimings};
use input::InputState;

fn window_conf() -> Conf {
    // Logging isn't up yet; main loads the config again and reports errors
    #[cfg(not(target_arch = "wasm32"))]
    let config = GameConfig::load(CONFIG_PATH).unwrap_or_default();
    #[cfg(target_arch = "wasm32")]
    let config = GameConfig::default();

    let mut conf = Conf {
        window_title: format!("Street Brawler v{}", VERSION),
        window_width: config.width as i32,
        window_height: config.height as i32,
        window_resizable: false,
        high_dpi: false,
        ..Default::default()
    };
    match config.renderer {
        RendererMode::Auto => {}
        RendererMode::OpenGl => conf.platform.apple_gfx_api = AppleGfxApi::OpenGl,
        RendererMode::Metal => conf.platform.apple_gfx_api = AppleGfxApi::Metal,
    }
    conf
}

#[cfg(not(target_arch = "wasm32"))]
fn init_logging() {
    // Initialize crash logging FIRST (before any other code)
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

#[cfg(target_arch = "wasm32")]
fn init_logging() {
    // No logger backend in the browser; macroquad's console shows panics
}

async fn load_config() -> Result<GameConfig> {
    #[cfg(not(target_arch = "wasm32"))]
    {
        GameConfig::load(CONFIG_PATH)
    }
    #[cfg(target_arch = "wasm32")]
    {
        GameConfig::load_bundled(CONFIG_PATH).await
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    init_logging();
    log::info!("=== Street Brawler v{} ===", VERSION);

    if let Err(e) = run().await {
        log::error!("{}", e);
    }
}

async fn run() -> Result<()> {
    let config = load_config().await?;

    // Load phase
    let resources = asset::load(&config.resources)?;
    let textures = asset::load_textures(&resources, &config).await?;

    // Setup phase
    let world = game::setup(&resources, &config)?;
    let mut runtime = GameRuntime::new(world);
    let mut input = InputState::new();
    input.poll();
    if input.has_gamepad() {
        log::info!("Gamepad detected, d-pad/left stick to move, South to attack");
    }

    let ctx = RenderContext {
        resources: &resources,
        textures: &textures,
        debug: config.debug,
    };

    // Frame phase
    loop {
        let frame_start = get_time();

        let t = FrameTimings::start();
        input.poll();
        let snapshot = input.snapshot(&runtime.world.bindings);
        runtime.frame_timings.input_ms = FrameTimings::elapsed_ms(t);

        let t = FrameTimings::start();
        runtime.tick(snapshot, config.clamp_delta(get_frame_time()));
        runtime.log_events();
        runtime.frame_timings.logic_ms = FrameTimings::elapsed_ms(t);

        let t = FrameTimings::start();
        game::draw_world(&runtime.world, &ctx);
        runtime.frame_timings.render_ms = FrameTimings::elapsed_ms(t);

        runtime.frame_timings.total_ms = FrameTimings::elapsed_ms(frame_start);
        if config.debug && runtime.frame % 300 == 0 {
            log::debug!("Frame {}: {:?}", runtime.frame, runtime.frame_timings);
        }

        // FPS limiting
        if let Some(target_frame_time) = config.fps_limit.frame_time() {
            let elapsed = get_time() - frame_start;
            let remaining = target_frame_time - elapsed;

            if remaining > 0.0 {
                // Native: use sleep for bulk, then spin-wait for precision
                #[cfg(not(target_arch = "wasm32"))]
                {
                    let spin_margin = 0.002; // 2ms
                    while get_time() - frame_start + spin_margin < target_frame_time {
                        std::thread::sleep(std::time::Duration::from_millis(1));
                    }
                    while get_time() - frame_start < target_frame_time {
                        std::hint::spin_loop();
                    }
                }
                // WASM: just spin-wait (no thread::sleep available)
                #[cfg(target_arch = "wasm32")]
                {
                    while get_time() - frame_start < target_frame_time {
                        // Busy wait - browser will handle frame pacing
                    }
                }
            }
        }

        next_frame().await;
    }
}
