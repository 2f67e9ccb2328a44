use crate::errors::{ensure_non_negative, SimulationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChuteState {
    Stowed,
    Deployed,
}

/// Source of drag. Starts stowed.
#[derive(Debug, Clone, PartialEq)]
pub struct Parachute {
    mass: f64,
    drag_stowed: f64,
    drag_deployed: f64,
    state: ChuteState,
}

impl Parachute {
    pub fn new(mass: f64, drag_stowed: f64, drag_deployed: f64) -> Result<Self, SimulationError> {
        Ok(Parachute {
            mass: ensure_non_negative("mass", mass)?,
            drag_stowed: ensure_non_negative("stowed drag", drag_stowed)?,
            drag_deployed: ensure_non_negative("deployed drag", drag_deployed)?,
            state: ChuteState::Stowed,
        })
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn drag(&self) -> f64 {
        match self.state {
            ChuteState::Stowed => self.drag_stowed,
            ChuteState::Deployed => self.drag_deployed,
        }
    }

    pub fn drag_stowed(&self) -> f64 {
        self.drag_stowed
    }

    pub fn drag_deployed(&self) -> f64 {
        self.drag_deployed
    }

    pub fn state(&self) -> ChuteState {
        self.state
    }

    pub fn deploy(&mut self) {
        self.state = ChuteState::Deployed;
    }

    pub fn stow(&mut self) {
        self.state = ChuteState::Stowed;
    }
}
