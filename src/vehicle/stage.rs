use std::fmt;
use std::rc::Rc;

use tracing::debug;

use super::component::{Capability, Component, ComponentRef};
use crate::environment::planet::Planet;
use crate::errors::SimulationError;

/// A discrete rocket stage.
///
/// Members are partitioned once by capability; a solid booster lands in both
/// the engine and the tank lists. Every aggregate is recomputed on access,
/// since boosters lose mass as they burn.
#[derive(Debug, Clone)]
pub struct Stage {
    components: Vec<ComponentRef>,
    engines: Vec<ComponentRef>,
    tanks: Vec<ComponentRef>,
    chutes: Vec<ComponentRef>,
}

impl Stage {
    pub fn new(components: Vec<ComponentRef>) -> Result<Self, SimulationError> {
        for (index, component) in components.iter().enumerate() {
            if components[..index].iter().any(|other| Rc::ptr_eq(other, component)) {
                return Err(SimulationError::InvalidParameter(format!(
                    "component at position {} is already part of the stage",
                    index
                )));
            }
        }

        let select = |capability: Capability| -> Vec<ComponentRef> {
            components
                .iter()
                .filter(|component| component.borrow().has(capability))
                .cloned()
                .collect()
        };
        let engines = select(Capability::Thrust);
        let tanks = select(Capability::Fuel);
        let chutes = select(Capability::Chute);

        debug!(
            components = components.len(),
            engines = engines.len(),
            tanks = tanks.len(),
            chutes = chutes.len(),
            "stage assembled"
        );

        Ok(Stage {
            components,
            engines,
            tanks,
            chutes,
        })
    }

    pub fn components(&self) -> &[ComponentRef] {
        &self.components
    }

    pub fn engines(&self) -> &[ComponentRef] {
        &self.engines
    }

    pub fn tanks(&self) -> &[ComponentRef] {
        &self.tanks
    }

    pub fn chutes(&self) -> &[ComponentRef] {
        &self.chutes
    }

    pub fn mass(&self) -> f64 {
        self.components.iter().map(|c| c.borrow().mass()).sum()
    }

    pub fn fuel_mass(&self) -> f64 {
        self.tanks
            .iter()
            .filter_map(|c| c.borrow().fuel_mass())
            .sum()
    }

    /// Mass-weighted average drag coefficient.
    pub fn drag(&self) -> Result<f64, SimulationError> {
        let mass = self.checked_mass()?;
        let weighted: f64 = self
            .components
            .iter()
            .map(|c| {
                let component = c.borrow();
                component.mass() * component.drag()
            })
            .sum();
        Ok(weighted / mass)
    }

    pub fn thrust(&self) -> f64 {
        self.engines
            .iter()
            .filter_map(|c| c.borrow().thrust())
            .sum()
    }

    pub fn is_thrusting(&self) -> bool {
        self.engines.iter().any(|c| c.borrow().is_on())
    }

    pub fn isp_atm(&self) -> Result<f64, SimulationError> {
        self.combined_isp(Component::isp_atm)
    }

    pub fn isp_vac(&self) -> Result<f64, SimulationError> {
        self.combined_isp(Component::isp_vac)
    }

    pub fn dv_atm(&self, planet: &Planet) -> Result<f64, SimulationError> {
        self.delta_v(planet, Self::isp_atm)
    }

    pub fn dv_vac(&self, planet: &Planet) -> Result<f64, SimulationError> {
        self.delta_v(planet, Self::isp_vac)
    }

    /// Delta-v accounting for the part of the flight spent leaving the
    /// atmosphere, using the planet's escape budget.
    pub fn dv_true(&self, planet: &Planet) -> Result<f64, SimulationError> {
        let budget = planet.escape().ok_or_else(|| {
            SimulationError::PreconditionUnavailable(format!(
                "{} has no escape delta-v budget",
                planet.name()
            ))
        })?;

        let dv_atm = self.dv_atm(planet)?;
        if dv_atm == 0.0 {
            return Err(SimulationError::Degenerate(
                "stage has no atmospheric delta-v to split".to_string(),
            ));
        }
        let dv_vac = self.dv_vac(planet)?;
        Ok((dv_atm - budget.dv_out) / dv_atm * dv_vac + budget.dv_out)
    }

    pub fn twr(&self, planet: &Planet) -> Result<f64, SimulationError> {
        let mass = self.checked_mass()?;
        Ok(self.thrust() / (mass * planet.gravity()))
    }

    /// Longest full-load burn among the stage's solid boosters.
    pub fn burn_time(&self, pressure: f64) -> Option<f64> {
        self.engines
            .iter()
            .filter_map(|c| c.borrow().as_solid_booster().map(|b| b.burn_time(pressure)))
            .reduce(f64::max)
    }

    pub fn deploy_chutes(&self) {
        for chute in &self.chutes {
            chute.borrow_mut().deploy();
        }
    }

    pub fn stow_chutes(&self) {
        for chute in &self.chutes {
            chute.borrow_mut().stow();
        }
    }

    /// Burns propellant in every engine that carries its own.
    pub fn burn(&self, duration: f64, pressure: f64) {
        for engine in &self.engines {
            engine.borrow_mut().burn(duration, pressure);
        }
    }

    /// Refills every solid booster to its full load.
    pub fn reset(&self) {
        for engine in &self.engines {
            engine.borrow_mut().refill();
        }
    }

    fn checked_mass(&self) -> Result<f64, SimulationError> {
        let mass = self.mass();
        if mass > 0.0 {
            Ok(mass)
        } else {
            Err(SimulationError::Degenerate("stage has no mass".to_string()))
        }
    }

    fn combined_isp(&self, isp: fn(&Component) -> Option<f64>) -> Result<f64, SimulationError> {
        let thrust = self.thrust();
        if thrust <= 0.0 {
            return Err(SimulationError::Degenerate(
                "stage has no thrust to combine isp over".to_string(),
            ));
        }

        let mut denominator = 0.0;
        for engine in &self.engines {
            let component = engine.borrow();
            if let (Some(engine_thrust), Some(engine_isp)) =
                (component.thrust(), isp(&*component))
            {
                denominator += engine_thrust / engine_isp;
            }
        }
        Ok(thrust / denominator)
    }

    fn delta_v(
        &self,
        planet: &Planet,
        isp: fn(&Self) -> Result<f64, SimulationError>,
    ) -> Result<f64, SimulationError> {
        let full = self.checked_mass()?;
        let fuel = self.fuel_mass();
        if fuel == 0.0 {
            return Ok(0.0);
        }

        let empty = full - fuel;
        if empty <= 0.0 {
            return Err(SimulationError::Degenerate(format!(
                "stage mass {} does not exceed its fuel mass {}",
                full, fuel
            )));
        }
        Ok((full / empty).ln() * isp(self)? * planet.gravity())
    }
}

/// Human-readable summary of a stage flying from `planet`.
pub struct StageReport<'a> {
    pub stage: &'a Stage,
    pub planet: &'a Planet,
}

impl fmt::Display for StageReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn value(result: Result<f64, SimulationError>) -> String {
            match result {
                Ok(value) => format!("{:.2}", value),
                Err(_) => "n/a".to_string(),
            }
        }

        let stage = self.stage;
        writeln!(f, "Stage info:")?;
        writeln!(f, "  mass        : {:.3}", stage.mass())?;
        writeln!(f, "  fuel mass   : {:.3}", stage.fuel_mass())?;
        writeln!(f, "  thrust      : {:.2}", stage.thrust())?;
        writeln!(f, "  Isp (atm)   : {}", value(stage.isp_atm()))?;
        writeln!(f, "  Isp (vac)   : {}", value(stage.isp_vac()))?;
        writeln!(f, "  dv (vac)    : {}", value(stage.dv_vac(self.planet)))?;
        writeln!(f, "  dv (atm)    : {}", value(stage.dv_atm(self.planet)))?;
        writeln!(
            f,
            "  dv ({})  : {}",
            self.planet.name(),
            value(stage.dv_true(self.planet))
        )?;
        write!(f, "  TWR         : {}", value(stage.twr(self.planet)))
    }
}
