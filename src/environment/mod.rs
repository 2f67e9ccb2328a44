pub mod atmosphere;
pub mod planet;
