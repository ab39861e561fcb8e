//! Space Sim entry point
//!
//! Native builds have no window; the simulation runs headless for the
//! configured number of frames and logs its progress.
//!
//! Usage: `space-sim [PRESET | SETTINGS.json]`

use std::path::Path;
use std::process::ExitCode;

use space_sim::platform::{HeadlessFrontend, run};
use space_sim::{Preset, SimSettings};

/// Resolve settings from the first CLI argument, falling back to defaults
fn load_settings(arg: Option<&str>) -> SimSettings {
    let Some(arg) = arg else {
        log::info!("Using default settings ({})", Preset::default().as_str());
        return SimSettings::default();
    };

    if let Some(preset) = Preset::from_str(arg) {
        log::info!("Using preset: {}", preset.as_str());
        return SimSettings::from_preset(preset);
    }

    match SimSettings::load(Path::new(arg)) {
        Ok(settings) => settings,
        Err(e) => {
            log::warn!("{} - using default settings", e);
            SimSettings::default()
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Space Sim (native) starting...");

    let arg = std::env::args().nth(1);
    let settings = load_settings(arg.as_deref());
    let mut frontend = HeadlessFrontend::from_settings(&settings);

    match run(&mut frontend, &settings) {
        Ok(summary) => {
            log::info!(
                "{} wall hits, {} vertices ({} bytes) in last frame, {} bytes presented",
                summary.wall_hits,
                frontend.last_frame().len(),
                frontend.last_frame_bytes().len(),
                frontend.bytes_presented()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Simulation failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
