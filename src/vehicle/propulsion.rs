use std::fmt;

use crate::constants::STANDARD_GRAVITY;
use crate::errors::{ensure_non_negative, ensure_positive, SimulationError};

/// A separate liquid engine, fed from tanks elsewhere in the stage.
#[derive(Debug, Clone, PartialEq)]
pub struct Engine {
    mass: f64,
    drag: f64,
    thrust: f64,
    isp_atm: f64,
    isp_vac: f64,
}

impl Engine {
    pub fn new(
        mass: f64,
        drag: f64,
        thrust: f64,
        isp_atm: f64,
        isp_vac: f64,
    ) -> Result<Self, SimulationError> {
        Ok(Engine {
            mass: ensure_non_negative("mass", mass)?,
            drag: ensure_non_negative("drag", drag)?,
            thrust: ensure_non_negative("thrust", thrust)?,
            isp_atm: ensure_positive("atmospheric isp", isp_atm)?,
            isp_vac: ensure_positive("vacuum isp", isp_vac)?,
        })
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn drag(&self) -> f64 {
        self.drag
    }

    pub fn thrust(&self) -> f64 {
        self.thrust
    }

    pub fn isp_atm(&self) -> f64 {
        self.isp_atm
    }

    pub fn isp_vac(&self) -> f64 {
        self.isp_vac
    }
}

/// A solid rocket booster: engine and tank in one casing.
///
/// `full_mass` is the declared mass with a full load; `current_mass` drops as
/// propellant burns and never goes below the dry mass
/// (`full_mass - fuel_mass`). `fuel_mass` stays the initial load.
#[derive(Debug, Clone, PartialEq)]
pub struct SolidBooster {
    full_mass: f64,
    current_mass: f64,
    drag: f64,
    fuel_mass: f64,
    thrust: f64,
    isp_atm: f64,
    isp_vac: f64,
}

impl SolidBooster {
    pub fn new(
        mass: f64,
        drag: f64,
        fuel_mass: f64,
        thrust: f64,
        isp_atm: f64,
        isp_vac: f64,
    ) -> Result<Self, SimulationError> {
        let full_mass = ensure_non_negative("mass", mass)?;
        let fuel_mass = ensure_non_negative("fuel mass", fuel_mass)?;
        if fuel_mass > full_mass {
            return Err(SimulationError::InvalidParameter(format!(
                "fuel mass {} exceeds booster mass {}",
                fuel_mass, full_mass
            )));
        }

        Ok(SolidBooster {
            full_mass,
            current_mass: full_mass,
            drag: ensure_non_negative("drag", drag)?,
            fuel_mass,
            thrust: ensure_positive("thrust", thrust)?,
            isp_atm: ensure_positive("atmospheric isp", isp_atm)?,
            isp_vac: ensure_positive("vacuum isp", isp_vac)?,
        })
    }

    pub fn mass(&self) -> f64 {
        self.current_mass
    }

    pub fn full_mass(&self) -> f64 {
        self.full_mass
    }

    pub fn dry_mass(&self) -> f64 {
        self.full_mass - self.fuel_mass
    }

    pub fn drag(&self) -> f64 {
        self.drag
    }

    pub fn fuel_mass(&self) -> f64 {
        self.fuel_mass
    }

    pub fn remaining_fuel(&self) -> f64 {
        self.current_mass - self.dry_mass()
    }

    pub fn isp_atm(&self) -> f64 {
        self.isp_atm
    }

    pub fn isp_vac(&self) -> f64 {
        self.isp_vac
    }

    pub fn is_on(&self) -> bool {
        self.current_mass > self.dry_mass()
    }

    pub fn thrust(&self) -> f64 {
        if self.is_on() {
            self.thrust
        } else {
            0.0
        }
    }

    /// Thrust while burning, regardless of the remaining propellant.
    pub fn rated_thrust(&self) -> f64 {
        self.thrust
    }

    /// Linear blend between vacuum (`pressure = 0`) and sea level
    /// (`pressure = 1`) specific impulse.
    pub fn isp(&self, pressure: f64) -> f64 {
        (self.isp_atm - self.isp_vac) * pressure + self.isp_vac
    }

    /// Seconds to burn a full load at the given pressure.
    pub fn burn_time(&self, pressure: f64) -> f64 {
        self.fuel_mass / self.thrust * self.isp(pressure) * STANDARD_GRAVITY
    }

    /// Burns propellant for `duration` seconds. Pressures far above sea level
    /// can push the blended Isp to zero or below; no propellant is burned then,
    /// so the mass never grows.
    pub fn tick(&mut self, duration: f64, pressure: f64) {
        let isp = self.isp(pressure);
        if !self.is_on() || duration <= 0.0 || isp <= 0.0 {
            return;
        }
        let burned = self.thrust / (isp * STANDARD_GRAVITY) * duration;
        self.current_mass = (self.current_mass - burned)
            .min(self.current_mass)
            .max(self.dry_mass());
    }

    pub fn refill(&mut self) {
        self.current_mass = self.full_mass;
    }
}

impl fmt::Display for SolidBooster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Engine info:")?;
        writeln!(f, "  Fuel mass = {}", self.fuel_mass)?;
        writeln!(f, "  Isp (vac) = {}", self.isp(0.0))?;
        writeln!(f, "  Isp (atm) = {}", self.isp(1.0))?;
        writeln!(f, "  Thrust    = {}", self.thrust())?;
        writeln!(f, "  Burn time (vac)    = {:.2}", self.burn_time(0.0))?;
        write!(f, "  Burn time (atm)    = {:.2}", self.burn_time(1.0))
    }
}
