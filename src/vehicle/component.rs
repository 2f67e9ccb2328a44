use std::cell::RefCell;
use std::rc::Rc;

use super::parachute::Parachute;
use super::propulsion::{Engine, SolidBooster};
use crate::errors::{ensure_non_negative, SimulationError};

/// Shared handle to a part. A stage holds handles, never copies, so state
/// changes made through any handle are seen by every holder.
pub type ComponentRef = Rc<RefCell<Component>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Mass,
    Drag,
    Thrust,
    Fuel,
    Chute,
    Burn,
}

/// Dead weight: a pod, a decoupler, a science part.
#[derive(Debug, Clone, PartialEq)]
pub struct Plain {
    mass: f64,
    drag: f64,
}

impl Plain {
    pub fn new(mass: f64, drag: f64) -> Result<Self, SimulationError> {
        Ok(Plain {
            mass: ensure_non_negative("mass", mass)?,
            drag: ensure_non_negative("drag", drag)?,
        })
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn drag(&self) -> f64 {
        self.drag
    }
}

/// A fuel tank. `mass` includes the fuel it carries.
#[derive(Debug, Clone, PartialEq)]
pub struct Tank {
    mass: f64,
    drag: f64,
    fuel_mass: f64,
}

impl Tank {
    pub fn new(mass: f64, drag: f64, fuel_mass: f64) -> Result<Self, SimulationError> {
        let mass = ensure_non_negative("mass", mass)?;
        let fuel_mass = ensure_non_negative("fuel mass", fuel_mass)?;
        if fuel_mass > mass {
            return Err(SimulationError::InvalidParameter(format!(
                "fuel mass {} exceeds tank mass {}",
                fuel_mass, mass
            )));
        }

        Ok(Tank {
            mass,
            drag: ensure_non_negative("drag", drag)?,
            fuel_mass,
        })
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn drag(&self) -> f64 {
        self.drag
    }

    pub fn fuel_mass(&self) -> f64 {
        self.fuel_mass
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Component {
    Plain(Plain),
    Parachute(Parachute),
    Tank(Tank),
    Engine(Engine),
    SolidBooster(SolidBooster),
}

impl Component {
    pub fn into_ref(self) -> ComponentRef {
        Rc::new(RefCell::new(self))
    }

    pub fn capabilities(&self) -> &'static [Capability] {
        use Capability::*;
        match self {
            Component::Plain(_) => &[Mass, Drag],
            Component::Parachute(_) => &[Mass, Drag, Chute],
            Component::Tank(_) => &[Mass, Drag, Fuel],
            Component::Engine(_) => &[Mass, Drag, Thrust],
            Component::SolidBooster(_) => &[Mass, Drag, Thrust, Fuel, Burn],
        }
    }

    pub fn has(&self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }

    pub fn mass(&self) -> f64 {
        match self {
            Component::Plain(part) => part.mass(),
            Component::Parachute(chute) => chute.mass(),
            Component::Tank(tank) => tank.mass(),
            Component::Engine(engine) => engine.mass(),
            Component::SolidBooster(booster) => booster.mass(),
        }
    }

    pub fn drag(&self) -> f64 {
        match self {
            Component::Plain(part) => part.drag(),
            Component::Parachute(chute) => chute.drag(),
            Component::Tank(tank) => tank.drag(),
            Component::Engine(engine) => engine.drag(),
            Component::SolidBooster(booster) => booster.drag(),
        }
    }

    pub fn thrust(&self) -> Option<f64> {
        match self {
            Component::Engine(engine) => Some(engine.thrust()),
            Component::SolidBooster(booster) => Some(booster.thrust()),
            _ => None,
        }
    }

    pub fn isp_atm(&self) -> Option<f64> {
        match self {
            Component::Engine(engine) => Some(engine.isp_atm()),
            Component::SolidBooster(booster) => Some(booster.isp_atm()),
            _ => None,
        }
    }

    pub fn isp_vac(&self) -> Option<f64> {
        match self {
            Component::Engine(engine) => Some(engine.isp_vac()),
            Component::SolidBooster(booster) => Some(booster.isp_vac()),
            _ => None,
        }
    }

    pub fn fuel_mass(&self) -> Option<f64> {
        match self {
            Component::Tank(tank) => Some(tank.fuel_mass()),
            Component::SolidBooster(booster) => Some(booster.fuel_mass()),
            _ => None,
        }
    }

    /// Whether the part is producing thrust. Liquid engines have no
    /// propellant model and count as on whenever they have thrust.
    pub fn is_on(&self) -> bool {
        match self {
            Component::Engine(engine) => engine.thrust() > 0.0,
            Component::SolidBooster(booster) => booster.is_on(),
            _ => false,
        }
    }

    /// Burns propellant for `duration` seconds. Parts without a burn model
    /// are left untouched.
    pub fn burn(&mut self, duration: f64, pressure: f64) {
        if let Component::SolidBooster(booster) = self {
            booster.tick(duration, pressure);
        }
    }

    pub fn refill(&mut self) {
        if let Component::SolidBooster(booster) = self {
            booster.refill();
        }
    }

    pub fn deploy(&mut self) {
        if let Component::Parachute(chute) = self {
            chute.deploy();
        }
    }

    pub fn stow(&mut self) {
        if let Component::Parachute(chute) = self {
            chute.stow();
        }
    }

    pub fn as_solid_booster(&self) -> Option<&SolidBooster> {
        match self {
            Component::SolidBooster(booster) => Some(booster),
            _ => None,
        }
    }
}

impl From<Plain> for Component {
    fn from(part: Plain) -> Self {
        Component::Plain(part)
    }
}

impl From<Parachute> for Component {
    fn from(chute: Parachute) -> Self {
        Component::Parachute(chute)
    }
}

impl From<Tank> for Component {
    fn from(tank: Tank) -> Self {
        Component::Tank(tank)
    }
}

impl From<Engine> for Component {
    fn from(engine: Engine) -> Self {
        Component::Engine(engine)
    }
}

impl From<SolidBooster> for Component {
    fn from(booster: SolidBooster) -> Self {
        Component::SolidBooster(booster)
    }
}
