//! Motor system facade for multi-motor configuration.
//!
//! Provides a high-level API for building motors and running named programs
//! from a single configuration.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use heapless::Vec;

use crate::config::{MotorConfig, ProgramConfig, ProgramPolicy, SystemConfig, MAX_MOVES};
use crate::error::{truncated, ConfigError, Error, Result, ScheduleError};
use crate::motion::{InterleavingScheduler, RunSummary, StepCommand};

use super::builder::MotorUnitBuilder;
use super::driver::MotorUnit;
use super::stepper::PhaseStepper;

/// A facade over a [`SystemConfig`].
///
/// `MotorSystem` provides:
/// - Building motors from named configurations
/// - Looking up programs by name
/// - Running programs against caller-owned motors
///
/// # Example
///
/// ```rust,ignore
/// use uln2003_stepper::motor::{MotorSystem, PhaseStepper};
///
/// let config = uln2003_stepper::load_config("steppers.toml")?;
/// let system = MotorSystem::from_config(config);
///
/// let mut left = system.build_motor("left", left_pins, delay_a)?;
/// let mut right = system.build_motor("right", right_pins, delay_b)?;
///
/// system.run_program("spin", &mut [&mut left, &mut right])?;
/// ```
pub struct MotorSystem {
    /// The system configuration.
    config: SystemConfig,
}

impl MotorSystem {
    /// Create a new motor system from configuration.
    ///
    /// Motors are not created here; their pins belong to the caller and are
    /// handed over in [`MotorSystem::build_motor`].
    pub fn from_config(config: SystemConfig) -> Self {
        Self { config }
    }

    /// Get the system configuration.
    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    /// Validate the underlying configuration.
    pub fn validate(&self) -> Result<()> {
        crate::config::validate_config(&self.config)
    }

    /// Get a motor configuration by name.
    ///
    /// Returns `None` if no motor with that name exists in the configuration.
    pub fn motor_config(&self, name: &str) -> Option<&MotorConfig> {
        self.config.motor(name)
    }

    /// Check if a motor name exists in the configuration.
    pub fn has_motor(&self, name: &str) -> bool {
        self.config.motor(name).is_some()
    }

    /// List all configured motor names.
    pub fn motor_names(&self) -> impl Iterator<Item = &str> {
        self.config.motor_names()
    }

    /// List all configured program names.
    pub fn program_names(&self) -> impl Iterator<Item = &str> {
        self.config.program_names()
    }

    /// Build a motor from configuration.
    ///
    /// The motor is named after its configuration key so programs can find it.
    ///
    /// # Errors
    ///
    /// Returns an error if the motor name doesn't exist in the configuration.
    pub fn build_motor<PIN, DELAY>(
        &self,
        name: &str,
        pins: [PIN; 4],
        delay: DELAY,
    ) -> Result<MotorUnit<PIN, DELAY>>
    where
        PIN: OutputPin,
        DELAY: DelayNs,
    {
        MotorUnitBuilder::new()
            .from_config(&self.config, name)?
            .name(name)
            .pins(pins)
            .delay(delay)
            .build()
    }

    /// Get a program by name, with error if not found.
    pub fn program(&self, name: &str) -> Result<&ProgramConfig> {
        self.config
            .program(name)
            .ok_or_else(|| Error::Config(ConfigError::ProgramNotFound(truncated(name))))
    }

    /// Run a named program against the supplied motors (blocking).
    ///
    /// Motors are matched to moves by [`PhaseStepper::name`]. Step counts for
    /// `revolutions` moves use the stepping mode of the supplied motor.
    ///
    /// # Errors
    ///
    /// Returns an error if the program is unknown or cannot run as a whole,
    /// a move's motor is not supplied, a step count is invalid, or a pin
    /// write fails.
    pub fn run_program(
        &self,
        name: &str,
        motors: &mut [&mut dyn PhaseStepper],
    ) -> Result<RunSummary> {
        let program = self.program(name)?;
        program.check_runnable(name)?;

        #[cfg(feature = "defmt")]
        defmt::info!("running program {=str} ({})", name, program.policy);

        match program.policy {
            ProgramPolicy::Interleaved => Self::run_interleaved(program, motors),
            ProgramPolicy::Sequential => Self::run_sequential(program, motors),
        }
    }

    fn run_interleaved(
        program: &ProgramConfig,
        motors: &mut [&mut dyn PhaseStepper],
    ) -> Result<RunSummary> {
        // One command per move, in program order; each motor is borrowed once.
        let mut slots: [Option<StepCommand<'_>>; MAX_MOVES] = Default::default();
        for motor in motors.iter_mut() {
            let motor: &mut dyn PhaseStepper = &mut **motor;
            let found = program
                .moves
                .iter()
                .enumerate()
                .position(|(i, m)| m.motor.as_str() == motor.name() && slots[i].is_none());
            if let Some(index) = found {
                let mv = &program.moves[index];
                let steps = mv.step_count(motor.mode())?;
                slots[index] = Some(StepCommand::new(motor, steps, mv.direction));
            }
        }

        if let Some(mv) = program
            .moves
            .iter()
            .zip(slots.iter())
            .find_map(|(mv, slot)| slot.is_none().then_some(mv))
        {
            return Err(ScheduleError::MotorNotFound(mv.motor.clone()).into());
        }

        // At most MAX_MOVES filled slots
        let mut commands: Vec<StepCommand<'_>, MAX_MOVES> = slots.into_iter().flatten().collect();
        InterleavingScheduler::run(&mut commands)
    }

    fn run_sequential(
        program: &ProgramConfig,
        motors: &mut [&mut dyn PhaseStepper],
    ) -> Result<RunSummary> {
        let mut summary = RunSummary::default();
        for mv in program.moves.iter() {
            let motor = motors
                .iter_mut()
                .find(|m| m.name() == mv.motor.as_str())
                .ok_or_else(|| ScheduleError::MotorNotFound(mv.motor.clone()))?;
            let steps = mv.step_count(motor.mode())?;

            let mut command = [StepCommand::new(&mut **motor, steps, mv.direction)];
            let part = InterleavingScheduler::run_sequential(&mut command)?;
            summary.phase_steps += part.phase_steps;
            summary.rounds += part.rounds;
        }
        Ok(summary)
    }
}
