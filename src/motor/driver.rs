//! ULN2003 stepper motor driver.
//!
//! Generic over embedded-hal 1.0 pin and delay types.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{Error as _, OutputPin};

use crate::config::PhaseDelay;
use crate::error::{truncated, MotorError, Result};
use crate::motion::Direction;

use super::phase::{PhasePattern, PhaseTable, StepMode};
use super::stepper::PhaseStepper;

/// One 28BYJ-48 on a ULN2003 board.
///
/// Generic over:
/// - `PIN`: coil input pin type (must implement `OutputPin`)
/// - `DELAY`: Delay provider (must implement `DelayNs`)
///
/// The motor owns its four pins. Dropping it drives them low.
pub struct MotorUnit<PIN, DELAY>
where
    PIN: OutputPin,
    DELAY: DelayNs,
{
    /// IN1..IN4, in table column order.
    pins: [PIN; 4],

    /// Delay provider for phase timing.
    delay: DELAY,

    /// Stepping mode the table was taken from.
    mode: StepMode,

    table: &'static PhaseTable,

    /// Pause after each applied pattern.
    phase_delay: PhaseDelay,

    /// Motor name for logging/debugging.
    name: heapless::String<32>,

    /// Whether traversal order is swapped.
    invert_direction: bool,
}

impl<PIN, DELAY> MotorUnit<PIN, DELAY>
where
    PIN: OutputPin,
    DELAY: DelayNs,
{
    /// Create a motor from a stepping mode, its four pins (IN1..IN4) and a delay.
    ///
    /// The pins are left untouched until the first write.
    pub fn new(mode: StepMode, pins: [PIN; 4], delay: DELAY, phase_delay: PhaseDelay) -> Self {
        Self {
            pins,
            delay,
            mode,
            table: mode.table(),
            phase_delay,
            name: truncated("motor"),
            invert_direction: false,
        }
    }

    pub(crate) fn with_identity(mut self, name: heapless::String<32>, invert_direction: bool) -> Self {
        self.name = name;
        self.invert_direction = invert_direction;
        self
    }

    /// Get the motor name.
    #[inline]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Get the stepping mode.
    #[inline]
    pub fn mode(&self) -> StepMode {
        self.mode
    }

    /// Get the phase table in use.
    #[inline]
    pub fn table(&self) -> &'static PhaseTable {
        self.table
    }

    /// Get the per-phase delay.
    #[inline]
    pub fn phase_delay(&self) -> PhaseDelay {
        self.phase_delay
    }

    /// Change the per-phase delay (and therefore the step rate).
    pub fn set_phase_delay(&mut self, delay: PhaseDelay) {
        self.phase_delay = delay;
    }

    /// Emit `count` phase-steps in `direction`, then de-energize.
    ///
    /// The burst starts at the first table pattern (forward) or the last
    /// (backward) and wraps around. Nothing carries over between calls, so
    /// reversing direction restarts at the opposite end of the table.
    ///
    /// # Errors
    ///
    /// Returns `MotorError::Pin` on the first failed write; the coils are
    /// left as they were at that point.
    pub fn advance(&mut self, count: u32, direction: Direction) -> Result<()> {
        #[cfg(feature = "defmt")]
        defmt::debug!("{=str}: {} phase-steps {}", self.name.as_str(), count, direction);

        for step in 0..count {
            self.apply_step(step, direction)?;
        }
        self.deenergize()
    }

    /// Rotate the output shaft by a number of revolutions.
    pub fn rotate_revolutions(&mut self, revolutions: f32, direction: Direction) -> Result<()> {
        let count = self.mode.revolutions_to_steps(revolutions);
        self.advance(count, direction)
    }

    /// Drive all four coil inputs low.
    pub fn deenergize(&mut self) -> Result<()> {
        self.write_pattern(PhasePattern::DEENERGIZED)
    }

    fn apply_step(&mut self, step: u32, direction: Direction) -> Result<()> {
        let direction = if self.invert_direction {
            direction.reversed()
        } else {
            direction
        };
        let pattern = self.table.pattern_at(step, direction);
        self.write_pattern(pattern)?;
        self.delay.delay_us(self.phase_delay.as_micros());
        Ok(())
    }

    fn write_pattern(&mut self, pattern: PhasePattern) -> Result<()> {
        for (coil, pin) in self.pins.iter_mut().enumerate() {
            let written = if pattern.level(coil) {
                pin.set_high()
            } else {
                pin.set_low()
            };
            written.map_err(|e| MotorError::Pin {
                coil: coil as u8,
                kind: e.kind(),
            })?;
        }
        Ok(())
    }
}

impl<PIN, DELAY> PhaseStepper for MotorUnit<PIN, DELAY>
where
    PIN: OutputPin,
    DELAY: DelayNs,
{
    fn name(&self) -> &str {
        self.name.as_str()
    }

    fn mode(&self) -> StepMode {
        self.mode
    }

    fn phase_step(&mut self, step: u32, direction: Direction) -> Result<()> {
        self.apply_step(step, direction)
    }

    fn deenergize(&mut self) -> Result<()> {
        self.write_pattern(PhasePattern::DEENERGIZED)
    }
}

impl<PIN, DELAY> Drop for MotorUnit<PIN, DELAY>
where
    PIN: OutputPin,
    DELAY: DelayNs,
{
    fn drop(&mut self) {
        // Geared motors need no holding current; never leave coils energized.
        let _ = self.write_pattern(PhasePattern::DEENERGIZED);
    }
}
