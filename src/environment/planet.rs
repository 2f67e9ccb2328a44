use std::fmt;

use super::atmosphere::Atmosphere;
use crate::constants::{
    AIR_DENSITY_PER_ATM, DRAG_AREA_PER_MASS, GRAVITATIONAL_CONSTANT,
    TERMINAL_VELOCITY_REFERENCE_MASS,
};
use crate::errors::{ensure_non_negative, ensure_positive, SimulationError};

/// Delta-v needed to leave a planet's atmosphere and to escape it entirely.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EscapeBudget {
    pub dv_out: f64,
    pub dv_escape: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Planet {
    name: String,
    mass: f64,
    radius: f64, // equatorial, m
    atmosphere: Option<Atmosphere>,
    escape: Option<EscapeBudget>,
    gravity: f64,
}

impl Planet {
    pub fn new(
        name: impl Into<String>,
        mass: f64,
        radius: f64,
        atmosphere: Option<Atmosphere>,
    ) -> Result<Self, SimulationError> {
        let mass = ensure_positive("planet mass", mass)?;
        let radius = ensure_positive("planet radius", radius)?;

        Ok(Planet {
            name: name.into(),
            mass,
            radius,
            atmosphere,
            escape: None,
            gravity: GRAVITATIONAL_CONSTANT * mass / radius.powi(2),
        })
    }

    pub fn with_escape_budget(
        mut self,
        dv_out: f64,
        dv_escape: f64,
    ) -> Result<Self, SimulationError> {
        self.escape = Some(EscapeBudget {
            dv_out: ensure_non_negative("dv out", dv_out)?,
            dv_escape: ensure_non_negative("dv escape", dv_escape)?,
        });
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn atmosphere(&self) -> Option<&Atmosphere> {
        self.atmosphere.as_ref()
    }

    pub fn escape(&self) -> Option<EscapeBudget> {
        self.escape
    }

    /// Surface gravitational acceleration.
    pub fn gravity(&self) -> f64 {
        self.gravity
    }

    /// Gravitational pull on a body of `mass` at `altitude` above the surface.
    pub fn g_force(&self, altitude: f64, mass: f64) -> f64 {
        let distance = self.radius + altitude;
        GRAVITATIONAL_CONSTANT * mass * self.mass / distance.powi(2)
    }

    pub fn pressure(&self, altitude: f64) -> f64 {
        self.atmosphere
            .as_ref()
            .map_or(0.0, |atmosphere| atmosphere.pressure(altitude))
    }

    pub fn air_density(&self, altitude: f64) -> f64 {
        self.pressure(altitude) * AIR_DENSITY_PER_ATM
    }

    /// Drag magnitude; the cross-section scales with mass.
    pub fn drag_force(&self, altitude: f64, velocity: f64, mass: f64, drag: f64) -> f64 {
        if self.atmosphere.is_none() {
            return 0.0;
        }
        let area = DRAG_AREA_PER_MASS * mass;
        0.5 * self.air_density(altitude) * velocity.powi(2) * area * drag
    }

    pub fn terminal_velocity(&self, altitude: f64, drag: f64) -> f64 {
        if self.atmosphere.is_none() {
            return f64::INFINITY;
        }
        let rho = self.air_density(altitude);
        (self.g_force(altitude, TERMINAL_VELOCITY_REFERENCE_MASS) / (rho * drag)).sqrt()
    }
}

impl fmt::Display for Planet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Planetary info for {}", self.name)?;
        writeln!(f, "  mass              : {}", self.mass)?;
        writeln!(f, "  equatorial radius : {}", self.radius)?;
        writeln!(f, "  surface gravity   : {:.4}", self.gravity)?;
        match &self.atmosphere {
            Some(atmosphere) => write!(f, "{}", atmosphere),
            None => write!(f, "  No atmosphere"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn kerbin() -> Planet {
        Planet::new(
            "Kerbin",
            5.2915793e22,
            600_000.0,
            Some(Atmosphere::new(1.0, 5000.0).unwrap()),
        )
        .unwrap()
    }

    #[test]
    fn test_surface_gravity() {
        let planet = kerbin();
        assert_abs_diff_eq!(planet.gravity(), 9.81, epsilon = 1e-2);
        assert_eq!(planet.gravity(), planet.g_force(0.0, 1.0));
    }

    #[test]
    fn test_gravity_falls_with_altitude() {
        let planet = kerbin();
        let ratio = planet.g_force(600_000.0, 1.0) / planet.g_force(0.0, 1.0);
        assert_relative_eq!(ratio, 0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_drag_force_at_sea_level() {
        let planet = kerbin();
        let expected = 0.5 * AIR_DENSITY_PER_ATM * 100.0_f64.powi(2) * (0.008 * 10.0) * 0.2;
        assert_relative_eq!(planet.drag_force(0.0, 100.0, 10.0, 0.2), expected);
    }

    #[test]
    fn test_drag_vanishes_outside_atmosphere() {
        let planet = kerbin();
        let height = planet.atmosphere().unwrap().height();
        assert_eq!(planet.drag_force(height + 0.5, 2000.0, 10.0, 0.2), 0.0);
        assert_eq!(planet.drag_force(200_000.0, 2000.0, 10.0, 0.2), 0.0);
    }

    #[test]
    fn test_airless_planet() {
        let mun = Planet::new("Mun", 9.7599066e20, 200_000.0, None).unwrap();
        assert_eq!(mun.pressure(0.0), 0.0);
        assert_eq!(mun.drag_force(0.0, 500.0, 5.0, 0.2), 0.0);
        assert!(mun.terminal_velocity(0.0, 0.2).is_infinite());
    }

    #[test]
    fn test_terminal_velocity() {
        let planet = kerbin();
        let expected = (planet.g_force(0.0, 250.0) / (AIR_DENSITY_PER_ATM * 0.2)).sqrt();
        assert_relative_eq!(planet.terminal_velocity(0.0, 0.2), expected);
        assert!(planet.terminal_velocity(10_000.0, 0.2) > planet.terminal_velocity(0.0, 0.2));
    }

    #[test]
    fn test_escape_budget() {
        let planet = kerbin().with_escape_budget(4500.0, 950.0).unwrap();
        assert_eq!(
            planet.escape(),
            Some(EscapeBudget {
                dv_out: 4500.0,
                dv_escape: 950.0
            })
        );
        assert!(kerbin().with_escape_budget(-1.0, 0.0).is_err());
    }

    #[test]
    fn test_gravity_matches_accessors() {
        let planet = kerbin().with_escape_budget(4500.0, 950.0).unwrap();
        assert_eq!(planet.name(), "Kerbin");
        assert_eq!(planet.mass(), 5.2915793e22);
        assert_eq!(planet.radius(), 600_000.0);
        assert_relative_eq!(
            planet.gravity(),
            GRAVITATIONAL_CONSTANT * planet.mass() / planet.radius().powi(2)
        );
        assert_eq!(planet.gravity(), planet.g_force(0.0, 1.0));
    }

    #[test]
    fn test_rejects_invalid_planets() {
        assert!(matches!(
            Planet::new("Nowhere", 0.0, 1000.0, None),
            Err(SimulationError::InvalidParameter(_))
        ));
        assert!(matches!(
            Planet::new("Nowhere", 1.0e20, -1.0, None),
            Err(SimulationError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_display_mentions_atmosphere() {
        let text = kerbin().to_string();
        assert!(text.starts_with("Planetary info for Kerbin"));
        assert!(text.contains("Atmosphere info"));
    }
}
