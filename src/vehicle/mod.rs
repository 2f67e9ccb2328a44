pub mod component;
pub mod parachute;
pub mod propulsion;
pub mod stage;
