use std::collections::BTreeMap;

use crate::environment::atmosphere::Atmosphere;
use crate::environment::planet::Planet;
use crate::errors::SimulationError;
use crate::vehicle::component::{Component, ComponentRef, Plain, Tank};
use crate::vehicle::parachute::Parachute;
use crate::vehicle::propulsion::{Engine, SolidBooster};
use crate::vehicle::stage::Stage;

/// Numeric description of a catalog entry. Parts are built fresh on every
/// lookup, so two stages never share a part by accident.
#[derive(Debug, Clone, PartialEq)]
pub enum Preset {
    Plain {
        mass: f64,
        drag: f64,
    },
    Parachute {
        mass: f64,
        drag_stowed: f64,
        drag_deployed: f64,
    },
    Tank {
        mass: f64,
        drag: f64,
        fuel_mass: f64,
    },
    Engine {
        mass: f64,
        drag: f64,
        thrust: f64,
        isp_atm: f64,
        isp_vac: f64,
    },
    SolidBooster {
        mass: f64,
        drag: f64,
        fuel_mass: f64,
        thrust: f64,
        isp_atm: f64,
        isp_vac: f64,
    },
    Body {
        mass: f64,
        radius: f64,
        atmosphere: Option<(f64, f64)>, // (sea level pressure, scale height)
    },
}

impl Preset {
    pub fn build_part(&self) -> Option<Result<Component, SimulationError>> {
        let part = match *self {
            Preset::Plain { mass, drag } => Plain::new(mass, drag).map(Component::from),
            Preset::Parachute {
                mass,
                drag_stowed,
                drag_deployed,
            } => Parachute::new(mass, drag_stowed, drag_deployed).map(Component::from),
            Preset::Tank {
                mass,
                drag,
                fuel_mass,
            } => Tank::new(mass, drag, fuel_mass).map(Component::from),
            Preset::Engine {
                mass,
                drag,
                thrust,
                isp_atm,
                isp_vac,
            } => Engine::new(mass, drag, thrust, isp_atm, isp_vac).map(Component::from),
            Preset::SolidBooster {
                mass,
                drag,
                fuel_mass,
                thrust,
                isp_atm,
                isp_vac,
            } => SolidBooster::new(mass, drag, fuel_mass, thrust, isp_atm, isp_vac)
                .map(Component::from),
            Preset::Body { .. } => return None,
        };
        Some(part)
    }

    pub fn build_body(&self, name: &str) -> Option<Result<Planet, SimulationError>> {
        match *self {
            Preset::Body {
                mass,
                radius,
                atmosphere,
            } => Some(
                atmosphere
                    .map(|(pressure, scale_height)| Atmosphere::new(pressure, scale_height))
                    .transpose()
                    .and_then(|atmosphere| Planet::new(name, mass, radius, atmosphere)),
            ),
            _ => None,
        }
    }
}

/// Read-only registry of named parts and bodies.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: BTreeMap<String, Preset>,
}

impl Catalog {
    pub fn new() -> Self {
        Catalog::default()
    }

    /// Stock parts and the home planet.
    pub fn standard() -> Self {
        let mut catalog = Catalog::new();

        catalog.insert("Kerbin", KERBIN);

        // Command modules
        catalog.insert("CommandPodMk1", Preset::Plain { mass: 0.84, drag: 0.2 });
        catalog.insert("CommandPodMk1-2", Preset::Plain { mass: 4.0, drag: 0.2 });
        catalog.insert("StayputnikMk1", Preset::Plain { mass: 0.05, drag: 0.2 });

        // Decouplers
        catalog.insert("TR-18A", Preset::Plain { mass: 0.05, drag: 0.2 });
        catalog.insert("TT-38K", Preset::Plain { mass: 0.025, drag: 0.2 });

        // Parachutes
        for (name, mass) in [("Mk16", 0.1), ("Mk16-XL", 0.3), ("Mk2-R", 0.15)] {
            catalog.insert(
                name,
                Preset::Parachute {
                    mass,
                    drag_stowed: 0.22,
                    drag_deployed: 500.0,
                },
            );
        }

        // Science
        catalog.insert("Goo", Preset::Plain { mass: 0.15, drag: 0.1 });
        catalog.insert("ScienceJr", Preset::Plain { mass: 0.2, drag: 0.2 });
        catalog.insert("Communotron16", Preset::Plain { mass: 0.005, drag: 0.2 });
        catalog.insert("CommsDTS-M1", Preset::Plain { mass: 0.03, drag: 0.2 });

        // Liquid engines
        for (name, mass, thrust, isp_atm, isp_vac) in [
            ("LV-909", 0.5, 50.0, 300.0, 390.0),
            ("LV-T30", 1.25, 215.0, 320.0, 370.0),
            ("LV-T45", 1.5, 200.0, 320.0, 370.0),
        ] {
            catalog.insert(
                name,
                Preset::Engine {
                    mass,
                    drag: 0.2,
                    thrust,
                    isp_atm,
                    isp_vac,
                },
            );
        }

        // Liquid tanks
        for (name, mass, fuel_mass) in [
            ("FL-T100", 0.5625, 0.49),
            ("FL-T200", 1.125, 1.0),
            ("FL-T400", 2.25, 2.0),
            ("FL-T800", 4.5, 4.0),
        ] {
            catalog.insert(
                name,
                Preset::Tank {
                    mass,
                    drag: 0.2,
                    fuel_mass,
                },
            );
        }

        // Solid rockets
        catalog.insert(
            "RT-10",
            Preset::SolidBooster {
                mass: 3.7475,
                drag: 0.3,
                fuel_mass: 3.25,
                thrust: 250.0,
                isp_atm: 225.0,
                isp_vac: 240.0,
            },
        );
        catalog.insert("BACC", BACC);

        catalog
    }

    pub fn insert(&mut self, name: impl Into<String>, preset: Preset) {
        self.entries.insert(name.into(), preset);
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn preset(&self, name: &str) -> Result<&Preset, SimulationError> {
        self.entries
            .get(name)
            .ok_or_else(|| SimulationError::UnknownEntry(name.to_string()))
    }

    /// A new instance of the named part.
    pub fn part(&self, name: &str) -> Result<ComponentRef, SimulationError> {
        match self.preset(name)?.build_part() {
            Some(part) => Ok(part?.into_ref()),
            None => Err(SimulationError::TypeIncompatible(format!(
                "{} is a celestial body, not a rocket part",
                name
            ))),
        }
    }

    pub fn body(&self, name: &str) -> Result<Planet, SimulationError> {
        match self.preset(name)?.build_body(name) {
            Some(body) => body,
            None => Err(SimulationError::TypeIncompatible(format!(
                "{} is a rocket part, not a celestial body",
                name
            ))),
        }
    }

    /// Builds a stage from fresh instances of the named parts.
    pub fn stage(&self, names: &[&str]) -> Result<Stage, SimulationError> {
        let parts = names
            .iter()
            .map(|name| self.part(name))
            .collect::<Result<Vec<_>, _>>()?;
        Stage::new(parts)
    }
}

// Bodies carry no escape budget: there are no reference dv_out/dv_escape figures,
// so callers attach one with `Planet::with_escape_budget`.
const KERBIN: Preset = Preset::Body {
    mass: 5.2915793e22,
    radius: 600_000.0,
    atmosphere: Some((1.0, 5000.0)),
};

const BACC: Preset = Preset::SolidBooster {
    mass: 7.875,
    drag: 0.3,
    fuel_mass: 6.37,
    thrust: 315.0,
    isp_atm: 230.0,
    isp_vac: 250.0,
};

/// The reference planet for stage figures.
pub fn kerbin() -> Result<Planet, SimulationError> {
    KERBIN.build_body("Kerbin").unwrap_or_else(|| {
        Err(SimulationError::TypeIncompatible(
            "Kerbin preset is not a body".to_string(),
        ))
    })
}
