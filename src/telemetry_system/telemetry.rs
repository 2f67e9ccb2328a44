use std::fmt;

use crate::trajectory_system::simulator::Sample;

// Decimal places shown for every figure in the log.
const PRECISION: usize = 2;

/// Flight log built from the simulator's samples.
#[derive(Debug, Default)]
pub struct Telemetry {
    samples: Vec<Sample>,
    max_altitude: f64,
    max_speed: f64,
    apex_time: f64,
    burnout_time: Option<f64>,
}

impl Telemetry {
    pub fn new() -> Self {
        Telemetry::default()
    }

    pub fn record(&mut self, sample: Sample) {
        if sample.altitude > self.max_altitude {
            self.max_altitude = sample.altitude;
            self.apex_time = sample.time;
        }
        if sample.velocity.abs() > self.max_speed {
            self.max_speed = sample.velocity.abs();
        }
        if self.burnout_time.is_none() && sample.thrust == 0.0 {
            self.burnout_time = Some(sample.time);
        }
        self.samples.push(sample);
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn max_altitude(&self) -> f64 {
        self.max_altitude
    }

    pub fn max_speed(&self) -> f64 {
        self.max_speed
    }

    pub fn apex_time(&self) -> f64 {
        self.apex_time
    }

    /// Time of the first sample taken without thrust.
    pub fn burnout_time(&self) -> Option<f64> {
        self.burnout_time
    }

    pub fn flight_time(&self) -> f64 {
        self.samples.last().map_or(0.0, |sample| sample.time)
    }

    /// Speed at the last recorded sample; the impact speed once landed.
    pub fn final_speed(&self) -> f64 {
        self.samples.last().map_or(0.0, |sample| sample.velocity.abs())
    }

    /// Clock-style duration, e.g. `1h 2m 5.50s`.
    pub fn format_time(seconds: f64) -> String {
        let minutes = (seconds / 60.0).floor();
        let rest = format!("{:.*}s", PRECISION, seconds - minutes * 60.0);
        if minutes >= 60.0 {
            format!("{:.0}h {:.0}m {}", (minutes / 60.0).floor(), minutes % 60.0, rest)
        } else if minutes >= 1.0 {
            format!("{:.0}m {}", minutes, rest)
        } else {
            rest
        }
    }

    pub fn format_altitude(altitude: f64) -> String {
        let (value, unit) = if altitude.abs() >= 1000.0 {
            (altitude / 1000.0, "km")
        } else {
            (altitude, "m")
        };
        format!("{:.*} {}", PRECISION, value, unit)
    }

    pub fn format_speed(speed: f64) -> String {
        format!("{:.*} m/s", PRECISION, speed)
    }
}

impl fmt::Display for Telemetry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Flight Summary ---")?;
        writeln!(f, "Samples: {}", self.samples.len())?;
        match self.burnout_time {
            Some(time) => writeln!(f, "Burnout: {}", Self::format_time(time))?,
            None => writeln!(f, "Burnout: not reached")?,
        }
        writeln!(
            f,
            "Max Altitude: {} at {}",
            Self::format_altitude(self.max_altitude),
            Self::format_time(self.apex_time)
        )?;
        writeln!(f, "Max Speed: {}", Self::format_speed(self.max_speed))?;
        writeln!(f, "Flight Time: {}", Self::format_time(self.flight_time()))?;
        write!(f, "Final Speed: {}", Self::format_speed(self.final_speed()))
    }
}
