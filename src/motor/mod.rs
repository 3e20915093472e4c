//! Motor module for uln2003-stepper.
//!
//! Provides the phase tables, the ULN2003 motor driver, and the config-driven
//! motor system facade.

mod builder;
mod driver;
pub mod phase;
mod stepper;
mod system;

pub use builder::MotorUnitBuilder;
pub use driver::MotorUnit;
pub use phase::{PhasePattern, PhaseTable, StepMode, FULL_STEP, HALF_STEP};
pub use stepper::PhaseStepper;
pub use system::MotorSystem;
