//! Object-safe phase-stepping interface.
//!
//! The scheduler drives motors through this trait so one run can mix motors
//! with different pin and delay types.

use crate::error::Result;
use crate::motion::Direction;

use super::phase::StepMode;

/// A motor that can be advanced one phase pattern at a time.
pub trait PhaseStepper {
    /// Motor name, used to match program moves.
    fn name(&self) -> &str;

    /// Stepping mode of the motor's phase table.
    ///
    /// Distances given in revolutions are converted with this mode.
    fn mode(&self) -> StepMode;

    /// Apply the pattern for phase-step `step` of the current burst, then pause.
    ///
    /// `step` counts from zero at the start of the burst; the motor keeps no
    /// cursor of its own.
    fn phase_step(&mut self, step: u32, direction: Direction) -> Result<()>;

    /// Drive all four coil inputs low.
    fn deenergize(&mut self) -> Result<()>;
}
