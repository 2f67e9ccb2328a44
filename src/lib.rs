pub mod catalog;
pub mod config;
pub mod constants;
pub mod environment;
pub mod errors;
pub mod telemetry_system;
pub mod trajectory_system;
pub mod vehicle;

pub use catalog::{kerbin, Catalog, Preset};
pub use config::SimulationConfig;
pub use constants::*;
pub use environment::atmosphere::Atmosphere;
pub use environment::planet::{EscapeBudget, Planet};
pub use errors::SimulationError;

// Re-export commonly used items from vehicle
pub use vehicle::component::{Capability, Component, ComponentRef, Plain, Tank};
pub use vehicle::parachute::{ChuteState, Parachute};
pub use vehicle::propulsion::{Engine, SolidBooster};
pub use vehicle::stage::{Stage, StageReport};

// Re-export commonly used items from trajectory_system
pub use trajectory_system::simulator::{Sample, Samples, Simulator};

// Re-export commonly used items from telemetry_system
pub use telemetry_system::telemetry::Telemetry;
