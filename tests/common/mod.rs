//! Shared test doubles: pins and delays that record every call.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorKind, ErrorType, OutputPin};

use uln2003_stepper::{MotorUnit, PhaseDelay, PhasePattern, StepMode};

/// One `set_high` / `set_low` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinWrite {
    pub pin: u8,
    pub high: bool,
}

pub type WriteLog = Rc<RefCell<Vec<PinWrite>>>;
pub type DelayLog = Rc<RefCell<Vec<u32>>>;

/// Host-side pin failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinFault;

impl embedded_hal::digital::Error for PinFault {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// Output pin that appends each write to a shared log.
pub struct RecordingPin {
    id: u8,
    log: WriteLog,
    writes: usize,
    fail_at: Option<usize>,
}

impl RecordingPin {
    pub fn new(id: u8, log: &WriteLog) -> Self {
        Self {
            id,
            log: Rc::clone(log),
            writes: 0,
            fail_at: None,
        }
    }

    /// Fail on this pin's `n`-th write (0-based) and every write after it.
    pub fn failing_at(mut self, n: usize) -> Self {
        self.fail_at = Some(n);
        self
    }

    fn write(&mut self, high: bool) -> Result<(), PinFault> {
        let index = self.writes;
        self.writes += 1;
        if self.fail_at.map_or(false, |n| index >= n) {
            return Err(PinFault);
        }
        self.log.borrow_mut().push(PinWrite { pin: self.id, high });
        Ok(())
    }
}

impl ErrorType for RecordingPin {
    type Error = PinFault;
}

impl OutputPin for RecordingPin {
    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.write(true)
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.write(false)
    }
}

/// Delay that records requested microseconds instead of sleeping.
pub struct RecordingDelay {
    log: DelayLog,
}

impl RecordingDelay {
    pub fn new(log: &DelayLog) -> Self {
        Self {
            log: Rc::clone(log),
        }
    }
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.log.borrow_mut().push(ns / 1_000);
    }

    fn delay_us(&mut self, us: u32) {
        self.log.borrow_mut().push(us);
    }
}

pub type TestMotor = MotorUnit<RecordingPin, RecordingDelay>;

/// Pin identifiers for motor `index`: `10 * index + 1 ..= 10 * index + 4`.
pub fn pin_ids(index: u8) -> [u8; 4] {
    let base = 10 * index + 1;
    [base, base + 1, base + 2, base + 3]
}

pub fn recording_pins(index: u8, log: &WriteLog) -> [RecordingPin; 4] {
    pin_ids(index).map(|id| RecordingPin::new(id, log))
}

pub fn test_motor(index: u8, mode: StepMode, log: &WriteLog, delays: &DelayLog) -> TestMotor {
    MotorUnit::new(
        mode,
        recording_pins(index, log),
        RecordingDelay::new(delays),
        PhaseDelay::from_millis(1),
    )
}

pub fn new_logs() -> (WriteLog, DelayLog) {
    (Rc::default(), Rc::default())
}

/// Group the write log into whole patterns, tagged with the motor index.
///
/// Panics if writes are not issued IN1..IN4 in order for a single motor.
pub fn decode(log: &WriteLog) -> Vec<(u8, PhasePattern)> {
    let writes = log.borrow();
    assert_eq!(writes.len() % 4, 0, "partial pattern in log: {:?}", *writes);
    writes
        .chunks(4)
        .map(|chunk| {
            let motor = chunk[0].pin / 10;
            for (coil, write) in chunk.iter().enumerate() {
                assert_eq!(write.pin, pin_ids(motor)[coil], "out-of-order write: {:?}", chunk);
            }
            let levels = [chunk[0].high, chunk[1].high, chunk[2].high, chunk[3].high];
            (motor, PhasePattern(levels))
        })
        .collect()
}

/// Patterns for a single motor, ignoring the motor tag.
pub fn patterns(log: &WriteLog) -> Vec<PhasePattern> {
    decode(log).into_iter().map(|(_, p)| p).collect()
}
