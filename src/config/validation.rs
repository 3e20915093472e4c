//! Configuration validation.

use heapless::String;

use crate::error::{ConfigError, Error, Result};

use super::SystemConfig;

/// Validate a system configuration.
///
/// Checks:
/// - No pin identifier is shared, within a motor or across motors
/// - Programs reference existing motors
/// - Each move has exactly one non-negative distance
/// - Programs fit in `MAX_MOVES` moves
/// - Interleaved programs drive each motor at most once
pub fn validate_config(config: &SystemConfig) -> Result<()> {
    validate_pins(config)?;

    for (name, program) in config.programs.iter() {
        validate_program(name, program, config)?;
    }

    Ok(())
}

fn validate_pins(config: &SystemConfig) -> Result<()> {
    let mut seen = [false; 256];
    for motor in config.motors.values() {
        for &pin in motor.pins.iter() {
            if seen[pin as usize] {
                return Err(Error::Config(ConfigError::DuplicatePin(pin)));
            }
            seen[pin as usize] = true;
        }
    }
    Ok(())
}

fn validate_program(
    name: &String<32>,
    program: &super::ProgramConfig,
    config: &SystemConfig,
) -> Result<()> {
    program.check_runnable(name.as_str())?;

    for (index, mv) in program.moves.iter().enumerate() {
        // Motor must exist
        if config.motor(mv.motor.as_str()).is_none() {
            return Err(Error::Config(ConfigError::MotorNotFound(mv.motor.clone())));
        }

        if !mv.is_well_formed() {
            return Err(Error::Config(ConfigError::InvalidMove {
                program: name.clone(),
                index,
            }));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MotorConfig, PhaseDelay};
    use crate::motor::StepMode;

    fn motor(name: &str, pins: [u8; 4]) -> MotorConfig {
        MotorConfig {
            name: String::try_from(name).unwrap(),
            mode: StepMode::HalfStep,
            pins,
            delay: PhaseDelay::DEFAULT,
            invert_direction: false,
        }
    }

    #[test]
    fn test_shared_pin_rejected() {
        let mut config = SystemConfig::default();
        config
            .motors
            .insert(String::try_from("a").unwrap(), motor("A", [4, 17, 27, 22]))
            .unwrap();
        config
            .motors
            .insert(String::try_from("b").unwrap(), motor("B", [14, 15, 18, 22]))
            .unwrap();

        assert_eq!(
            validate_config(&config),
            Err(Error::Config(ConfigError::DuplicatePin(22)))
        );
    }

    #[test]
    fn test_repeated_pin_within_motor_rejected() {
        let mut config = SystemConfig::default();
        config
            .motors
            .insert(String::try_from("a").unwrap(), motor("A", [4, 4, 27, 22]))
            .unwrap();

        assert!(matches!(
            validate_config(&config),
            Err(Error::Config(ConfigError::DuplicatePin(4)))
        ));
    }
}
