use crate::constants::{MAX_SIMULATION_TIME, TIME_STEP};
use crate::errors::{ensure_positive, SimulationError};

/// Settings for a complete simulated flight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    pub time_step: f64,
    pub max_time: f64,
}

impl SimulationConfig {
    pub fn new(time_step: f64, max_time: f64) -> Result<Self, SimulationError> {
        Ok(SimulationConfig {
            time_step: ensure_positive("time step", time_step)?,
            max_time: ensure_positive("max time", max_time)?,
        })
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            time_step: TIME_STEP,
            max_time: MAX_SIMULATION_TIME,
        }
    }
}
