//! Ember Sim - The reference simulation
//!
//! Components, the movement/progression/cull systems, the per-tick body that
//! runs them, and the loop drivers that call it repeatedly.

pub mod components;
pub mod config;
pub mod driver;
pub mod simulation;
pub mod systems;

pub use components::{Health, Player, Position, Velocity, WorldLayout};
pub use config::{ConfigError, DriveModeKind, SimulationConfig};
pub use driver::{
    ChannelFrameHost, DriveMode, DriverError, FrameHost, LoopDriver, PacedFrameHost,
    RunningDriver, StopHandle,
};
pub use simulation::{SharedSimulation, Simulation};
pub use systems::ProgressionRules;
