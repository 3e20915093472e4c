//! Two 28BYJ-48 motors turning at the same time.
//!
//! Uses printing pins instead of real GPIO so it runs anywhere.
//!
//! Run with: `cargo run --example interleaved`

use uln2003_stepper::{
    Direction, InterleavingScheduler, MotorUnitBuilder, PhaseDelay, StepCommand, StepMode,
};

/// Delay provider that really sleeps.
struct SleepDelay;

impl embedded_hal::delay::DelayNs for SleepDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(std::time::Duration::from_nanos(ns as u64));
    }
}

/// Output pin that only remembers its level.
struct DemoPin {
    state: bool,
}

impl DemoPin {
    fn new() -> Self {
        Self { state: false }
    }
}

impl embedded_hal::digital::OutputPin for DemoPin {
    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.state = true;
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.state = false;
        Ok(())
    }
}

impl embedded_hal::digital::ErrorType for DemoPin {
    type Error = core::convert::Infallible;
}

fn pins() -> [DemoPin; 4] {
    [DemoPin::new(), DemoPin::new(), DemoPin::new(), DemoPin::new()]
}

fn main() -> uln2003_stepper::Result<()> {
    println!("=== Interleaved Motors Example ===\n");

    let mut s1 = MotorUnitBuilder::new()
        .name("s1")
        .mode(StepMode::HalfStep)
        .pins(pins())
        .delay(SleepDelay)
        .phase_delay(PhaseDelay::from_millis(1))
        .build()?;

    let mut s2 = MotorUnitBuilder::new()
        .name("s2")
        .mode(StepMode::HalfStep)
        .pins(pins())
        .delay(SleepDelay)
        .phase_delay(StepMode::HalfStep.recommended_delay())
        .build()?;

    let quarter = StepMode::HalfStep.revolutions_to_steps(0.25);
    println!("Quarter turn = {} half-steps", quarter);

    // One after the other
    s1.advance(quarter, Direction::Forward)?;
    s2.advance(quarter, Direction::Backward)?;
    println!("Sequential moves done");

    // Together
    let mut commands = [
        StepCommand::new(&mut s1, quarter, Direction::Backward),
        StepCommand::new(&mut s2, quarter / 2, Direction::Forward),
    ];
    let summary = InterleavingScheduler::run(&mut commands)?;
    println!(
        "Interleaved run: {} phase-steps in {} rounds",
        summary.phase_steps, summary.rounds
    );

    println!("\n=== Example Complete ===");
    Ok(())
}
