use tracing::{info, warn};

use crate::config::SimulationConfig;
use crate::environment::planet::Planet;
use crate::errors::{ensure_positive, SimulationError};
use crate::telemetry_system::telemetry::Telemetry;
use crate::vehicle::component::Capability;
use crate::vehicle::stage::Stage;

/// State of the flight after one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub time: f64,
    pub altitude: f64,
    pub velocity: f64,
    pub terminal_velocity: f64,
    pub thrust: f64,
}

/// Vertical flight of a single stage, integrated with a fixed step.
///
/// Each tick applies thrust, gravity and drag, moves the craft with the
/// velocity from before the tick, then updates velocity, then burns
/// propellant at the pressure of the new altitude. That order is part of the
/// model: changing it changes trajectories.
pub struct Simulator<'a> {
    stage: &'a Stage,
    planet: &'a Planet,
    pub altitude: f64,
    pub velocity: f64,
    pub elapsed_time: f64,
}

impl<'a> Simulator<'a> {
    pub fn new(stage: &'a Stage, planet: &'a Planet) -> Result<Self, SimulationError> {
        if stage.mass() <= 0.0 {
            return Err(SimulationError::InvalidParameter(
                "cannot fly a stage without mass".to_string(),
            ));
        }
        if let Some(engine) = stage
            .engines()
            .iter()
            .find(|engine| !engine.borrow().has(Capability::Burn))
        {
            return Err(SimulationError::TypeIncompatible(format!(
                "engine {:?} has no propellant burn model",
                engine.borrow()
            )));
        }

        Ok(Simulator {
            stage,
            planet,
            altitude: 0.0,
            velocity: 0.0,
            elapsed_time: 0.0,
        })
    }

    pub fn stage(&self) -> &Stage {
        self.stage
    }

    pub fn planet(&self) -> &Planet {
        self.planet
    }

    /// True while an engine burns or the craft is above the surface.
    pub fn running(&self) -> bool {
        self.stage.is_thrusting() || self.altitude > 0.0
    }

    pub fn tick(&mut self, dt: f64) -> Result<(), SimulationError> {
        let dt = ensure_positive("time step", dt)?;
        let mass = self.stage.mass();
        if mass <= 0.0 {
            return Err(SimulationError::Degenerate("stage has no mass".to_string()));
        }
        let drag = self.stage.drag()?;
        let thrusting = self.stage.is_thrusting();
        let rising = self.velocity > 0.0;

        let drag_factor = if self.velocity < 0.0 { -1.0 } else { 1.0 };
        let force = self.stage.thrust()
            - self.planet.g_force(self.altitude, mass)
            - drag_factor
                * self
                    .planet
                    .drag_force(self.altitude, self.velocity, mass, drag);
        let acceleration = force / mass;

        self.altitude += self.velocity * dt;
        self.velocity += acceleration * dt;
        self.elapsed_time += dt;

        self.stage.burn(dt, self.planet.pressure(self.altitude));

        if thrusting && !self.stage.is_thrusting() {
            info!(
                time = self.elapsed_time,
                altitude = self.altitude,
                velocity = self.velocity,
                "burnout"
            );
        }
        if rising && self.velocity <= 0.0 {
            info!(time = self.elapsed_time, altitude = self.altitude, "apex");
        }
        if !self.running() {
            info!(
                time = self.elapsed_time,
                velocity = self.velocity,
                "touchdown"
            );
        }
        Ok(())
    }

    pub fn sample(&self) -> Result<Sample, SimulationError> {
        let drag = self.stage.drag()?;
        Ok(Sample {
            time: self.elapsed_time,
            altitude: self.altitude,
            velocity: self.velocity,
            terminal_velocity: self.planet.terminal_velocity(self.altitude, drag),
            thrust: self.stage.thrust(),
        })
    }

    /// Lazily ticks the flight, yielding a sample after every tick until the
    /// craft is back on the ground. Dropping the iterator pauses the flight;
    /// calling `samples` again resumes it.
    pub fn samples(&mut self, dt: f64) -> Samples<'_, 'a> {
        Samples {
            simulator: self,
            dt,
            failed: false,
        }
    }

    /// Puts the craft back on the launch pad with full boosters.
    pub fn reset(&mut self) {
        self.altitude = 0.0;
        self.velocity = 0.0;
        self.elapsed_time = 0.0;
        self.stage.reset();
    }

    /// Flies until touchdown or until `max_time` has elapsed, recording
    /// every sample.
    pub fn run(&mut self, config: &SimulationConfig) -> Result<Telemetry, SimulationError> {
        let mut telemetry = Telemetry::new();
        let max_time = config.max_time;

        for sample in self.samples(config.time_step) {
            let sample = sample?;
            telemetry.record(sample);
            if sample.time >= max_time {
                warn!(
                    time = sample.time,
                    altitude = sample.altitude,
                    "flight stopped at the time limit"
                );
                break;
            }
        }
        Ok(telemetry)
    }
}

pub struct Samples<'s, 'a> {
    simulator: &'s mut Simulator<'a>,
    dt: f64,
    failed: bool,
}

impl Iterator for Samples<'_, '_> {
    type Item = Result<Sample, SimulationError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || !self.simulator.running() {
            return None;
        }
        let result = self
            .simulator
            .tick(self.dt)
            .and_then(|_| self.simulator.sample());
        if result.is_err() {
            self.failed = true;
        }
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::atmosphere::Atmosphere;
    use crate::vehicle::component::{Component, ComponentRef, Plain};
    use crate::vehicle::propulsion::{Engine, SolidBooster};
    use approx::assert_relative_eq;

    fn kerbin() -> Planet {
        Planet::new(
            "Kerbin",
            5.2915793e22,
            600_000.0,
            Some(Atmosphere::new(1.0, 5000.0).unwrap()),
        )
        .unwrap()
    }

    fn part(component: impl Into<Component>) -> ComponentRef {
        let component: Component = component.into();
        component.into_ref()
    }

    fn bacc_stage() -> Stage {
        Stage::new(vec![
            part(Plain::new(0.84, 0.2).unwrap()),
            part(SolidBooster::new(7.875, 0.3, 6.37, 315.0, 230.0, 250.0).unwrap()),
        ])
        .unwrap()
    }

    #[test]
    fn test_initial_state() {
        let stage = bacc_stage();
        let planet = kerbin();
        let simulator = Simulator::new(&stage, &planet).unwrap();
        assert_eq!(simulator.altitude, 0.0);
        assert_eq!(simulator.velocity, 0.0);
        assert_eq!(simulator.elapsed_time, 0.0);
        assert!(simulator.running());
    }

    #[test]
    fn test_first_tick_order() {
        let stage = bacc_stage();
        let planet = kerbin();
        let mut simulator = Simulator::new(&stage, &planet).unwrap();
        let mass = stage.mass();
        let expected_acceleration = (315.0 - planet.g_force(0.0, mass)) / mass;

        simulator.tick(0.1).unwrap();

        // Position moves with the velocity from before the tick.
        assert_eq!(simulator.altitude, 0.0);
        assert_relative_eq!(simulator.velocity, expected_acceleration * 0.1);
        assert_relative_eq!(simulator.elapsed_time, 0.1);

        let burned = 315.0 / (230.0 * 9.82) * 0.1;
        assert_relative_eq!(stage.mass(), mass - burned, epsilon = 1e-12);

        simulator.tick(0.1).unwrap();
        assert_relative_eq!(simulator.altitude, expected_acceleration * 0.1 * 0.1);
    }

    #[test]
    fn test_drag_opposes_motion() {
        let stage = Stage::new(vec![part(Plain::new(1.0, 0.2).unwrap())]).unwrap();
        let planet = kerbin();
        let mut simulator = Simulator::new(&stage, &planet).unwrap();
        simulator.altitude = 1000.0;
        simulator.velocity = -100.0;

        simulator.tick(0.01).unwrap();

        let gravity = planet.g_force(1000.0, 1.0);
        let drag = planet.drag_force(1000.0, -100.0, 1.0, 0.2);
        assert_relative_eq!(simulator.velocity, -100.0 + (drag - gravity) * 0.01);
        assert_relative_eq!(simulator.altitude, 999.0);
    }

    #[test]
    fn test_rejects_liquid_engines() {
        let stage = Stage::new(vec![part(Engine::new(0.5, 0.2, 50.0, 300.0, 390.0).unwrap())])
            .unwrap();
        let planet = kerbin();
        assert!(matches!(
            Simulator::new(&stage, &planet),
            Err(SimulationError::TypeIncompatible(_))
        ));
    }

    #[test]
    fn test_rejects_massless_stage() {
        let stage = Stage::new(Vec::new()).unwrap();
        let planet = kerbin();
        assert!(matches!(
            Simulator::new(&stage, &planet),
            Err(SimulationError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_rejects_bad_time_step() {
        let stage = bacc_stage();
        let planet = kerbin();
        let mut simulator = Simulator::new(&stage, &planet).unwrap();
        assert!(simulator.tick(0.0).is_err());
        assert_eq!(simulator.elapsed_time, 0.0);

        let mut samples = simulator.samples(-1.0);
        assert!(matches!(
            samples.next(),
            Some(Err(SimulationError::InvalidParameter(_)))
        ));
        assert!(samples.next().is_none());
    }

    #[test]
    fn test_inert_stage_on_ground_is_not_running() {
        let stage = Stage::new(vec![part(Plain::new(1.0, 0.2).unwrap())]).unwrap();
        let planet = kerbin();
        let mut simulator = Simulator::new(&stage, &planet).unwrap();
        assert!(!simulator.running());
        assert_eq!(simulator.samples(0.1).count(), 0);
    }

    #[test]
    fn test_dense_atmosphere_keeps_booster_mass() {
        let planet = Planet::new(
            "Eve",
            5.2915793e22,
            600_000.0,
            Some(Atmosphere::new(5.0, 7000.0).unwrap()),
        )
        .unwrap();
        let stage = Stage::new(vec![part(
            SolidBooster::new(7.875, 0.3, 6.37, 315.0, 100.0, 300.0).unwrap(),
        )])
        .unwrap();
        let mut simulator = Simulator::new(&stage, &planet).unwrap();

        simulator.tick(0.1).unwrap();
        assert!(stage.mass() <= 7.875);
    }

    #[test]
    fn test_samples_resume_and_reset() {
        let stage = bacc_stage();
        let planet = kerbin();
        let mut simulator = Simulator::new(&stage, &planet).unwrap();

        let first: Vec<Sample> = simulator
            .samples(0.05)
            .take(10)
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(first.len(), 10);
        assert_relative_eq!(first[9].time, 0.5, epsilon = 1e-9);

        let next = simulator.samples(0.05).next().unwrap().unwrap();
        assert_relative_eq!(next.time, 0.55, epsilon = 1e-9);

        simulator.reset();
        assert_eq!(simulator.elapsed_time, 0.0);
        let again = simulator.samples(0.05).next().unwrap().unwrap();
        assert_eq!(again, first[0]);
    }

    #[test]
    fn test_run_respects_time_limit() {
        let stage = bacc_stage();
        let planet = kerbin();
        let mut simulator = Simulator::new(&stage, &planet).unwrap();
        let config = SimulationConfig::new(0.1, 5.0).unwrap();

        let telemetry = simulator.run(&config).unwrap();
        assert!(simulator.running());
        assert!(telemetry.flight_time() >= 5.0);
        assert!(telemetry.flight_time() < 5.2);
    }
}
