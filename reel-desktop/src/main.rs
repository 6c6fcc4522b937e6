mod config_gen;
mod setup;

use std::env;
use std::sync::Arc;

use anyhow::{Context, Result};
use reel_core::config::{Frontend, StageConfig, SystemConfig};
use reel_core::{Driver, SceneRegistry, TerminalCanvas};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let arg_terminal = args.iter().any(|a| a == "--terminal");

    setup::init_config();
    let sys_cfg = SystemConfig::load();
    let frontend = if arg_terminal || !cfg!(feature = "skia") {
        Frontend::Terminal
    } else {
        sys_cfg.frontend
    };
    setup::init_logger(&sys_cfg, frontend == Frontend::Terminal);
    log::info!(">>> Reel Desktop Launcher Started (frontend: {:?}) <<<", frontend);

    let registry = SceneRegistry::load_dir(&sys_cfg.script_dir)
        .context("Cannot load animation files. Please check script_dir in config.toml")?;
    if registry.is_empty() {
        log::warn!("No animation files found in {}", sys_cfg.script_dir);
    }
    let stage = StageConfig::load();

    match frontend {
        Frontend::Terminal => {
            log::info!("Mode: Terminal");
            run_terminal(registry, stage);
            Ok(())
        }
        Frontend::Window => {
            log::info!("Mode: Window");
            run_window(registry, stage, &sys_cfg)
        }
    }
}

fn run_terminal(registry: SceneRegistry, stage: StageConfig) {
    let played = Driver::new(registry, Arc::new(TerminalCanvas::new()), stage).run();
    log::info!("Played scenes: {:?}", played);
}

/// The window owns the main thread; the driver runs beside it.
#[cfg(feature = "skia")]
fn run_window(registry: SceneRegistry, stage: StageConfig, sys_cfg: &SystemConfig) -> Result<()> {
    use std::thread;

    use reel_skia_renderer::config::WindowConfig;
    use reel_skia_renderer::renderer::event_loop;
    use reel_skia_renderer::{SkiaCanvas, SkiaRenderer};

    let event_loop = event_loop()?;
    let canvas = Arc::new(SkiaCanvas::new(&event_loop));
    let app = SkiaRenderer::new(WindowConfig::load(), &sys_cfg.assets_dir, &canvas);

    let driver_canvas = Arc::clone(&canvas);
    let driver = thread::Builder::new()
        .name("driver".into())
        .spawn(move || Driver::new(registry, driver_canvas, stage).run())
        .context("Failed to start driver thread")?;
    let ran = app.run(event_loop);
    // The window may close between an install and its delivery.
    canvas.close_window();
    ran?;

    let played = driver.join().map_err(|_| anyhow::anyhow!("driver thread panicked"))?;
    log::info!("Played scenes: {:?}", played);
    Ok(())
}

#[cfg(not(feature = "skia"))]
fn run_window(registry: SceneRegistry, stage: StageConfig, _sys_cfg: &SystemConfig) -> Result<()> {
    log::warn!("Built without the window front end, falling back to the terminal");
    run_terminal(registry, stage);
    Ok(())
}
