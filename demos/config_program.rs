//! Example: running a configured program.
//!
//! Demonstrates how to:
//! - Describe motors and programs in TOML
//! - Build motors from configuration
//! - Run a named program across several motors
//!
//! Run with: `cargo run --example config_program --features std`

use uln2003_stepper::{parse_config, MotorSystem, PhaseStepper, Result};

struct NoDelay;

impl embedded_hal::delay::DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

/// Output pin that counts its writes.
#[derive(Default)]
struct CountingPin {
    writes: u32,
}

impl embedded_hal::digital::OutputPin for CountingPin {
    fn set_high(&mut self) -> core::result::Result<(), Self::Error> {
        self.writes += 1;
        Ok(())
    }

    fn set_low(&mut self) -> core::result::Result<(), Self::Error> {
        self.writes += 1;
        Ok(())
    }
}

impl embedded_hal::digital::ErrorType for CountingPin {
    type Error = core::convert::Infallible;
}

fn main() -> Result<()> {
    println!("=== Config-Driven Program Example ===\n");

    let toml_content = r#"
[motors.s1]
name = "Stepper 1"
mode = "half_step"
pins = [4, 17, 27, 22]
delay_ms = 1.0

[motors.s2]
name = "Stepper 2"
mode = "half_step"
pins = [14, 15, 18, 23]
delay_ms = 1.0

# Both motors turn one revolution at the same time, in opposite directions
[programs.together]
moves = [
    { motor = "s1", revolutions = 1.0 },
    { motor = "s2", revolutions = 1.0, direction = "backward" },
]

# One motor after the other
[programs.one_by_one]
policy = "sequential"
moves = [
    { motor = "s1", revolutions = 1.0 },
    { motor = "s2", revolutions = 1.0, direction = "backward" },
]
"#;

    let config = parse_config(toml_content)?;
    let system = MotorSystem::from_config(config);

    for name in system.motor_names() {
        if let Some(motor) = system.motor_config(name) {
            println!(
                "Motor '{}': {:?}, pins {:?}, {:.2} rpm",
                name,
                motor.mode,
                motor.pins,
                motor.rpm()
            );
        }
    }

    let mut s1 = system.build_motor::<CountingPin, _>("s1", Default::default(), NoDelay)?;
    let mut s2 = system.build_motor::<CountingPin, _>("s2", Default::default(), NoDelay)?;

    for program in ["together", "one_by_one"] {
        let mut motors: [&mut dyn PhaseStepper; 2] = [&mut s1, &mut s2];
        let summary = system.run_program(program, &mut motors)?;
        println!(
            "Program '{}': {} phase-steps, {} rounds",
            program, summary.phase_steps, summary.rounds
        );
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
