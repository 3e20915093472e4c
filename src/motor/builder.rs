//! Builder pattern for MotorUnit.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::config::{MotorConfig, PhaseDelay, SystemConfig};
use crate::error::{truncated, ConfigError, Error, Result};

use super::driver::MotorUnit;
use super::phase::StepMode;

/// Builder for creating MotorUnit instances.
pub struct MotorUnitBuilder<PIN, DELAY>
where
    PIN: OutputPin,
    DELAY: DelayNs,
{
    pins: Option<[PIN; 4]>,
    delay: Option<DELAY>,
    name: Option<heapless::String<32>>,
    mode: StepMode,
    phase_delay: PhaseDelay,
    invert_direction: bool,
}

impl<PIN, DELAY> Default for MotorUnitBuilder<PIN, DELAY>
where
    PIN: OutputPin,
    DELAY: DelayNs,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<PIN, DELAY> MotorUnitBuilder<PIN, DELAY>
where
    PIN: OutputPin,
    DELAY: DelayNs,
{
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            pins: None,
            delay: None,
            name: None,
            mode: StepMode::HalfStep,
            phase_delay: PhaseDelay::DEFAULT,
            invert_direction: false,
        }
    }

    /// Set the four coil pins, IN1..IN4.
    pub fn pins(mut self, pins: [PIN; 4]) -> Self {
        self.pins = Some(pins);
        self
    }

    /// Set the delay provider.
    pub fn delay(mut self, delay: DELAY) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Set the motor name, keeping at most its first 32 bytes.
    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(truncated(name));
        self
    }

    /// Set the stepping mode.
    pub fn mode(mut self, mode: StepMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the pause after each phase pattern.
    pub fn phase_delay(mut self, delay: PhaseDelay) -> Self {
        self.phase_delay = delay;
        self
    }

    /// Set direction inversion.
    pub fn invert_direction(mut self, invert: bool) -> Self {
        self.invert_direction = invert;
        self
    }

    /// Configure from a MotorConfig.
    pub fn from_motor_config(mut self, config: &MotorConfig) -> Self {
        self.name = Some(config.name.clone());
        self.mode = config.mode;
        self.phase_delay = config.delay;
        self.invert_direction = config.invert_direction;
        self
    }

    /// Configure from SystemConfig by motor key.
    pub fn from_config(self, config: &SystemConfig, motor_name: &str) -> Result<Self> {
        let motor_config = config.motor(motor_name).ok_or_else(|| {
            Error::Config(ConfigError::MotorNotFound(truncated(motor_name)))
        })?;

        Ok(self.from_motor_config(motor_config))
    }

    /// Build the MotorUnit.
    ///
    /// # Errors
    ///
    /// Returns an error if the pins or delay provider are missing.
    pub fn build(self) -> Result<MotorUnit<PIN, DELAY>> {
        let pins = self.pins.ok_or_else(|| missing("pins are required"))?;
        let delay = self.delay.ok_or_else(|| missing("delay is required"))?;

        let name = self.name.unwrap_or_else(|| truncated("motor"));

        Ok(MotorUnit::new(self.mode, pins, delay, self.phase_delay)
            .with_identity(name, self.invert_direction))
    }
}

fn missing(what: &str) -> Error {
    Error::Config(ConfigError::ParseError(truncated(what)))
}
