// Physical Constants
pub const GRAVITATIONAL_CONSTANT: f64 = 6.6725985e-11; // N⋅m²/kg²
pub const STANDARD_GRAVITY: f64 = 9.82; // m/s², used for Isp <-> mass flow

// Atmosphere Constants
pub const AIR_DENSITY_PER_ATM: f64 = 1.2230948554874; // kg/m³ per atm
// Fraction of sea level pressure where the atmosphere ends
pub const ATMOSPHERE_CUTOFF_RATIO: f64 = 1.0e-6;

// Aerodynamic Constants
pub const DRAG_AREA_PER_MASS: f64 = 0.008; // m² per tonne
pub const TERMINAL_VELOCITY_REFERENCE_MASS: f64 = 250.0;

// Simulation Parameters
pub const TIME_STEP: f64 = 1.0 / 30.0; // s
pub const MAX_SIMULATION_TIME: f64 = 3600.0; // s
