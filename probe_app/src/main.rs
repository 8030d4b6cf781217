//! GL context probe
//!
//! Negotiates a context through GLFW, presents a few frames and tears
//! everything down again. Usage: `gl_probe [config.toml|config.ron]`.
//! The process exits with the initialization status code.

use gl_context::context::WindowError;
use gl_context::foundation::logging;
use gl_context::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
enum ProbeError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("window system error: {0}")]
    Window(#[from] WindowError),
}

fn load_config() -> Result<ContextConfig, ProbeError> {
    match std::env::args().nth(1) {
        Some(path) => Ok(ContextConfig::load_from_file(&path)?),
        None => Ok(ContextConfig::default()),
    }
}

fn run() -> Result<i32, ProbeError> {
    let config = load_config()?;
    logging::init_with_config(&config.logging);

    let target = config.resolve_target();
    log::info!("Probing {:?} via {:?}", target.api, target.surface);

    let window_system = GlfwWindowSystem::new()?;
    let mut gfx = GraphicsContext::new(window_system, target)
        .with_candidates(config.candidates())
        .with_min_desktop_version(config.min_desktop_version);

    let mut features = RequiredExtensions::new(config.required_extensions.iter().cloned());
    let mut error_message = String::new();
    let status = gfx.init_status(
        &config.window.to_params(),
        &mut features,
        &mut PresentOnlyFactory,
        &mut error_message,
    );
    if status != 0 {
        log::error!("Initialization failed with status {status}: {error_message}");
        return Ok(status);
    }

    if let Some(version) = gfx.negotiated_version() {
        log::info!(
            "Negotiated {version} ({})",
            if gfx.is_core_context() { "core" } else { "no core profile" }
        );
    }

    let mut presented = 0;
    for _ in 0..config.probe_frames {
        gfx.with_window_system(GlfwWindowSystem::poll_events);
        if gfx.with_rendering(|r| r.window().should_close()).unwrap_or(true) {
            log::info!("Window closed");
            break;
        }
        gfx.present();
        presented += 1;
    }
    log::info!("Presented {presented} frame(s)");

    gfx.shutdown();
    gfx.shutdown_from_render_thread();
    Ok(0)
}

fn main() {
    let status = match run() {
        Ok(status) => status,
        Err(e) => {
            logging::init();
            log::error!("{e}");
            1
        }
    };
    std::process::exit(status);
}
