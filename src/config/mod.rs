//! Configuration module for uln2003-stepper.
//!
//! Provides types for loading and validating motor and program configurations
//! from TOML files (with `std` feature) or pre-parsed data.

mod motor;
mod program;
mod system;
pub mod units;
#[cfg(feature = "std")]
mod loader;
mod validation;

pub use motor::MotorConfig;
pub use program::{MoveConfig, ProgramConfig, ProgramPolicy, MAX_MOVES};
pub use system::SystemConfig;
pub use validation::validate_config;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::PhaseDelay;
