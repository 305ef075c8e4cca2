//! Locating and loading the simulation configuration
//!
//! The file is looked up at the path given on the command line, else at
//! `~/.config/ember/simulation.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use ember_sim::SimulationConfig;
use tracing::{info, warn};

/// Get the config directory path
fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("ember"))
}

/// Get the default configuration file path
pub fn default_path() -> Option<PathBuf> {
    config_dir().map(|p| p.join("simulation.toml"))
}

/// Load the configuration, or return defaults if it is missing or invalid
pub fn load(explicit: Option<PathBuf>) -> SimulationConfig {
    let path = match explicit {
        Some(path) => path,
        None => {
            let Some(path) = default_path() else {
                warn!("Could not determine config directory, using defaults");
                return SimulationConfig::default();
            };
            if !path.exists() {
                info!("No configuration file found, using defaults");
                return SimulationConfig::default();
            }
            path
        }
    };

    match SimulationConfig::load(&path) {
        Ok(config) => {
            info!("Loaded configuration from {:?}", path);
            config
        }
        Err(e) => {
            warn!("{}, using defaults", e);
            SimulationConfig::default()
        }
    }
}

/// Write `config` to `path`, creating parent directories as needed
pub fn save(config: &SimulationConfig, path: &Path) -> anyhow::Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.exists() {
            fs::create_dir_all(dir)?;
        }
    }
    fs::write(path, config.to_toml_string()?)?;
    info!("Saved configuration to {:?}", path);
    Ok(())
}
