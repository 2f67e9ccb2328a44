use std::fmt;

use crate::constants::ATMOSPHERE_CUTOFF_RATIO;
use crate::errors::{ensure_positive, SimulationError};

/// Exponential atmosphere of a single planet.
///
/// Pressure is expressed in atmospheres. Above `height` the atmosphere is
/// considered to have ended and pressure reads exactly zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Atmosphere {
    sea_level_pressure: f64,
    scale_height: f64,
    height: f64,
}

impl Atmosphere {
    pub fn new(sea_level_pressure: f64, scale_height: f64) -> Result<Self, SimulationError> {
        let sea_level_pressure = ensure_positive("sea level pressure", sea_level_pressure)?;
        let scale_height = ensure_positive("scale height", scale_height)?;
        let height = -(ATMOSPHERE_CUTOFF_RATIO / sea_level_pressure).ln() * scale_height;

        Ok(Atmosphere {
            sea_level_pressure,
            scale_height,
            height,
        })
    }

    pub fn pressure(&self, altitude: f64) -> f64 {
        if altitude > self.height {
            return 0.0;
        }
        self.sea_level_pressure * (-altitude / self.scale_height).exp()
    }

    pub fn sea_level_pressure(&self) -> f64 {
        self.sea_level_pressure
    }

    pub fn scale_height(&self) -> f64 {
        self.scale_height
    }

    /// Altitude at which the atmosphere ends.
    pub fn height(&self) -> f64 {
        self.height
    }
}

impl fmt::Display for Atmosphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  Atmosphere info")?;
        writeln!(f, "    pressure (sea level) : {}", self.sea_level_pressure)?;
        writeln!(f, "    atmosphere height    : {:.2}", self.height)?;
        write!(f, "    scale height         : {}", self.scale_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use rand::Rng;

    #[test]
    fn test_sea_level_pressure() {
        let atmosphere = Atmosphere::new(1.0, 5000.0).unwrap();
        assert_eq!(atmosphere.pressure(0.0), 1.0);
    }

    #[test]
    fn test_height_matches_cutoff() {
        let atmosphere = Atmosphere::new(1.0, 5000.0).unwrap();
        assert_relative_eq!(atmosphere.height(), 69_077.552_789_821_37, epsilon = 1e-6);
        assert_relative_eq!(
            atmosphere.pressure(atmosphere.height()),
            1.0e-6,
            max_relative = 1e-9
        );
    }

    #[test]
    fn test_pressure_above_height_is_zero() {
        let atmosphere = Atmosphere::new(5.0, 7000.0).unwrap();
        assert_eq!(atmosphere.pressure(atmosphere.height() + 1.0), 0.0);
        assert_eq!(atmosphere.pressure(1.0e7), 0.0);
    }

    #[test]
    fn test_pressure_at_scale_height() {
        let atmosphere = Atmosphere::new(2.0, 3000.0).unwrap();
        assert_abs_diff_eq!(
            atmosphere.pressure(3000.0),
            2.0 / std::f64::consts::E,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_pressure_is_monotonic() {
        let mut rng = rand::thread_rng();
        for _ in 0..50 {
            let atmosphere =
                Atmosphere::new(rng.gen_range(0.01..10.0), rng.gen_range(100.0..20_000.0)).unwrap();
            let mut previous = atmosphere.pressure(0.0);
            let mut altitude = 0.0;
            while altitude < atmosphere.height() * 1.2 {
                altitude += rng.gen_range(1.0..500.0);
                let current = atmosphere.pressure(altitude);
                assert!(current <= previous, "pressure rose at {} m", altitude);
                previous = current;
            }
        }
    }

    #[test]
    fn test_rejects_non_positive_inputs() {
        assert!(matches!(
            Atmosphere::new(0.0, 5000.0),
            Err(SimulationError::InvalidParameter(_))
        ));
        assert!(matches!(
            Atmosphere::new(1.0, -5.0),
            Err(SimulationError::InvalidParameter(_))
        ));
    }
}
