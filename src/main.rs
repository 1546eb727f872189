//! Headless demo driver
//!
//! Stands in for the excluded rendering/input shell: unpauses a simulation,
//! holds a spawn point for a couple of seconds, steps at a fixed cadence,
//! and dumps the final particle snapshot as JSON for external drawing.
//!
//! Usage: `gravity-pit [config.json] [seed]`

use std::process::ExitCode;
use std::{env, fs};

use glam::DVec2;
use gravity_pit::{SimConfig, Simulation};

/// Frame cadence of the demo loop, seconds
const FRAME_DT: f64 = 1.0 / 60.0;
/// Total frames to run
const FRAMES: u32 = 600;
/// Frames the spawn point stays held
const SPAWN_HOLD_FRAMES: u32 = 120;

fn main() -> ExitCode {
    env_logger::init();

    let mut args = env::args().skip(1);
    let config = match args.next() {
        Some(path) => match load_config(&path) {
            Ok(config) => config,
            Err(err) => {
                log::error!("failed to load {path}: {err}");
                return ExitCode::FAILURE;
            }
        },
        None => SimConfig::default(),
    };
    if let Err(err) = config.validate() {
        log::error!("invalid config: {err}");
        return ExitCode::FAILURE;
    }

    let seed = match args.next() {
        Some(raw) => match raw.parse() {
            Ok(seed) => seed,
            Err(_) => {
                log::error!("seed must be an unsigned integer, got {raw:?}");
                return ExitCode::FAILURE;
            }
        },
        None => 0xC0FFEE,
    };

    log::info!(
        "starting: seed {seed}, world {}x{}, time scale {}",
        config.world_width,
        config.world_height,
        config.time_scale
    );

    let mut sim = Simulation::new(config, seed);
    // The headless run has no permission prompt to wait on
    sim.set_paused(false);
    sim.set_spawn_held(Some(DVec2::new(0.0, 100.0)));

    for frame in 0..FRAMES {
        if frame == SPAWN_HOLD_FRAMES {
            sim.set_spawn_held(None);
            log::info!(
                "spawn released after {SPAWN_HOLD_FRAMES} frames, {} particles",
                sim.particles().len()
            );
        }
        sim.step(FRAME_DT);
    }

    let snapshot = sim.particles();
    log::info!("{} particles after {FRAMES} frames", snapshot.len());

    match serde_json::to_string_pretty(snapshot) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("snapshot serialization failed: {err}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(path: &str) -> Result<SimConfig, Box<dyn std::error::Error>> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}
