//! Simulation configuration, read from TOML.
//!
//! ```toml
//! [driver]
//! mode = "fixed_rate"        # or "presentation_sync"
//! ticks_per_second = 60.0
//! max_ticks = 600
//!
//! [world]
//! max_entities = 100000
//! velocity = { kind = "dense", reserve = 100000 }
//!
//! [time]
//! time_scale = 1.0
//!
//! [progression]
//! threshold = 100.0
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use ember_core::{Clock, TimeConfig};
use ember_ecs::{EcsError, World};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::components::WorldLayout;
use crate::driver::{DriveMode, DEFAULT_TICKS_PER_SECOND};
use crate::systems::ProgressionRules;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriveModeKind {
    #[default]
    FixedRate,
    PresentationSync,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    pub mode: DriveModeKind,
    /// Used in fixed-rate mode.
    pub ticks_per_second: f64,
    /// Frame interval of the headless presentation host, in milliseconds.
    pub frame_interval_ms: f64,
    /// Stop after this many ticks. Runs until interrupted when absent.
    pub max_ticks: Option<u64>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            mode: DriveModeKind::FixedRate,
            ticks_per_second: DEFAULT_TICKS_PER_SECOND,
            frame_interval_ms: 1000.0 / DEFAULT_TICKS_PER_SECOND,
            max_ticks: None,
        }
    }
}

impl DriverConfig {
    pub fn drive_mode(&self) -> DriveMode {
        match self.mode {
            DriveModeKind::FixedRate => DriveMode::FixedRate {
                ticks_per_second: self.ticks_per_second,
            },
            DriveModeKind::PresentationSync => DriveMode::PresentationSync,
        }
    }
}

/// The demo population spawned by the binary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Wanderers spawned next to the hero.
    pub wanderers: u32,
    pub seed: u64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            wanderers: 16,
            seed: 0x5eed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub driver: DriverConfig,
    pub world: WorldLayout,
    pub time: TimeConfig,
    pub progression: ProgressionRules,
    pub demo: DemoConfig,
}

impl SimulationConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(name: &str, value: f64) -> Result<(), ConfigError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid(format!(
                    "{name} must be positive, got {value}"
                )))
            }
        }

        if self.driver.mode == DriveModeKind::FixedRate {
            positive("driver.ticks_per_second", self.driver.ticks_per_second)?;
        } else {
            positive("driver.frame_interval_ms", self.driver.frame_interval_ms)?;
        }
        if self.world.max_entities == 0 {
            return Err(ConfigError::Invalid(
                "world.max_entities must be at least 1".into(),
            ));
        }
        if !(self.time.time_scale.is_finite() && self.time.time_scale >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "time.time_scale must be zero or positive, got {}",
                self.time.time_scale
            )));
        }
        if let Some(max) = self.time.max_delta_ms {
            positive("time.max_delta_ms", max)?;
        }
        positive("progression.threshold", self.progression.threshold)?;
        positive(
            "progression.millis_per_point",
            self.progression.millis_per_point,
        )?;
        if self.demo.wanderers >= self.world.max_entities {
            return Err(ConfigError::Invalid(format!(
                "demo.wanderers ({}) plus the hero exceed world.max_entities ({})",
                self.demo.wanderers, self.world.max_entities
            )));
        }
        Ok(())
    }

    /// A world laid out per `[world]`, with `[time]` and `[progression]` applied.
    pub fn build_world(&self) -> Result<World, EcsError> {
        let mut world = self.world.build(Clock::new(self.time.clone()))?;
        world.insert_resource(self.progression.clone());
        Ok(world)
    }
}
