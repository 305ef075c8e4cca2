//! Ember - A real-time entity/component simulation runtime
//!
//! Usage: `ember [config.toml]` runs the demo world with the given (or the
//! default) configuration. `ember --write-config [path]` writes the default
//! configuration and exits.

mod demo;
mod settings;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use ember_core::MonotonicTimeSource;
use ember_sim::{DriveMode, FrameHost, LoopDriver, PacedFrameHost, Simulation, SimulationConfig};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    let mut args = std::env::args_os().skip(1);
    let first = args.next().map(PathBuf::from);
    if first.as_deref() == Some(Path::new("--write-config")) {
        let path = match args.next() {
            Some(path) => PathBuf::from(path),
            None => settings::default_path().context("Could not determine config directory")?,
        };
        return settings::save(&SimulationConfig::default(), &path);
    }

    info!("Starting Ember...");
    let config = settings::load(first);

    let mut world = config
        .build_world()
        .context("Failed to build the simulation world")?;
    let hero = demo::populate(&mut world, &config)?;
    let simulation = Simulation::with_reference_systems(world).into_shared();

    let mode = config.driver.drive_mode();
    let host: Option<Box<dyn FrameHost>> = match mode {
        DriveMode::PresentationSync => Some(Box::new(PacedFrameHost::new(
            Duration::from_secs_f64(config.driver.frame_interval_ms / 1000.0),
        ))),
        DriveMode::FixedRate { .. } => None,
    };
    let running = LoopDriver::new(simulation.clone(), Arc::new(MonotonicTimeSource::new()))
        .with_max_ticks(config.driver.max_ticks)
        .start(mode, host)
        .context("Failed to start the loop driver")?;
    let stop = running.stop_handle();

    let mut finished = tokio::task::spawn_blocking(move || running.join());
    let ticks = tokio::select! {
        result = &mut finished => result??,
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted, stopping after the current tick");
            stop.stop();
            finished.await??
        }
    };
    info!(ticks, "Driver finished");

    demo::report(simulation.lock().world(), hero);
    Ok(())
}
