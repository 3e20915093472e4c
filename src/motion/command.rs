//! Step commands - one motor's pending work within a run.

use crate::error::{MotorError, Result};
use crate::motor::PhaseStepper;

use super::direction::Direction;

/// Pending work for one motor: how many phase-steps remain and which way.
///
/// Borrows the motor for the duration of a run; the motor outlives it.
pub struct StepCommand<'a> {
    /// Motor being driven.
    motor: &'a mut (dyn PhaseStepper + 'a),

    /// Steps requested at creation.
    total: u32,

    /// Steps still to emit.
    remaining: u32,

    /// Traversal direction.
    direction: Direction,
}

impl<'a> StepCommand<'a> {
    /// Create a command for `steps` phase-steps.
    pub fn new(motor: &'a mut (dyn PhaseStepper + 'a), steps: u32, direction: Direction) -> Self {
        Self {
            motor,
            total: steps,
            remaining: steps,
            direction,
        }
    }

    /// Create a command from a signed step count.
    ///
    /// # Errors
    ///
    /// Returns `MotorError::NegativeStepCount` if `steps < 0`.
    pub fn try_new(
        motor: &'a mut (dyn PhaseStepper + 'a),
        steps: i64,
        direction: Direction,
    ) -> Result<Self> {
        if steps < 0 {
            return Err(MotorError::NegativeStepCount(steps).into());
        }
        let steps = u32::try_from(steps).unwrap_or(u32::MAX);
        Ok(Self::new(motor, steps, direction))
    }

    /// Name of the commanded motor.
    #[inline]
    pub fn motor_name(&self) -> &str {
        self.motor.name()
    }

    /// Traversal direction.
    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Steps still to emit.
    #[inline]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Steps already emitted.
    #[inline]
    pub fn taken(&self) -> u32 {
        self.total - self.remaining
    }

    /// Check if no steps remain.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.remaining == 0
    }

    /// Get progress as a fraction (0.0 to 1.0).
    #[inline]
    pub fn progress(&self) -> f32 {
        if self.total == 0 {
            1.0
        } else {
            self.taken() as f32 / self.total as f32
        }
    }

    /// Emit one phase-step.
    ///
    /// The burst cursor continues from the previous step of this command. The
    /// motor is de-energized right after the last step.
    ///
    /// Returns `true` once the command is complete.
    pub fn step(&mut self) -> Result<bool> {
        if self.is_complete() {
            return Ok(true);
        }

        self.motor.phase_step(self.taken(), self.direction)?;
        self.remaining -= 1;

        if self.remaining == 0 {
            self.motor.deenergize()?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Emit every remaining step (blocking).
    pub fn run_to_completion(&mut self) -> Result<u32> {
        let mut emitted = 0;
        while !self.is_complete() {
            self.step()?;
            emitted += 1;
        }
        Ok(emitted)
    }
}
