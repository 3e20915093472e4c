//! Error types for uln2003-stepper.
//!
//! Provides unified error handling across configuration, motor output, and scheduling.

use core::fmt;

use embedded_hal::digital::ErrorKind;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all uln2003-stepper operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Motor output error
    Motor(MotorError),
    /// Scheduler or program execution error
    Schedule(ScheduleError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Motor name not found in configuration
    MotorNotFound(heapless::String<32>),
    /// Program name not found in configuration
    ProgramNotFound(heapless::String<32>),
    /// Per-phase delay must be finite and > 0 ms
    InvalidPhaseDelay(f32),
    /// Pin identifier used more than once
    DuplicatePin(u8),
    /// A move in a program is malformed
    InvalidMove {
        /// Program name
        program: heapless::String<32>,
        /// Index of the move in the program
        index: usize,
    },
    /// Program has more moves than can be scheduled at once
    TooManyMoves(heapless::String<32>),
    /// Interleaved program drives the same motor twice
    MotorReused {
        /// Program name
        program: heapless::String<32>,
        /// Motor referenced more than once
        motor: heapless::String<32>,
    },
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Motor output errors.
#[derive(Debug, Clone, PartialEq)]
pub enum MotorError {
    /// Host rejected a pin write
    Pin {
        /// Coil input index (0 = IN1 .. 3 = IN4)
        coil: u8,
        /// Error kind reported by the pin implementation
        kind: ErrorKind,
    },
    /// Step counts cannot be negative
    NegativeStepCount(i64),
    /// Direction sign must be +1 or -1
    InvalidDirection(i8),
}

/// Scheduler and program execution errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ScheduleError {
    /// Program references a motor that was not supplied
    MotorNotFound(heapless::String<32>),
}

/// Keep the head of `s` that fits into `N` bytes, on a char boundary.
///
/// heapless strings reject oversized input outright.
pub(crate) fn truncated<const N: usize>(s: &str) -> heapless::String<N> {
    let mut end = s.len().min(N);
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    let mut out = heapless::String::new();
    // Cannot fail: `end <= N`
    let _ = out.push_str(&s[..end]);
    out
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Motor(e) => write!(f, "Motor error: {}", e),
            Error::Schedule(e) => write!(f, "Schedule error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::MotorNotFound(name) => write!(f, "Motor '{}' not found", name),
            ConfigError::ProgramNotFound(name) => write!(f, "Program '{}' not found", name),
            ConfigError::InvalidPhaseDelay(v) => {
                write!(f, "Invalid phase delay: {} ms. Must be > 0", v)
            }
            ConfigError::DuplicatePin(pin) => write!(f, "Pin {} is assigned more than once", pin),
            ConfigError::InvalidMove { program, index } => write!(
                f,
                "Move {} of program '{}' needs exactly one non-negative 'steps' or 'revolutions'",
                index, program
            ),
            ConfigError::TooManyMoves(name) => write!(f, "Program '{}' has too many moves", name),
            ConfigError::MotorReused { program, motor } => write!(
                f,
                "Interleaved program '{}' drives motor '{}' more than once",
                program, motor
            ),
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for MotorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotorError::Pin { coil, kind } => {
                write!(f, "GPIO write to IN{} failed: {}", coil + 1, kind)
            }
            MotorError::NegativeStepCount(n) => write!(f, "Step count {} is negative", n),
            MotorError::InvalidDirection(s) => {
                write!(f, "Invalid direction sign {}. Must be 1 or -1", s)
            }
        }
    }
}

impl fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleError::MotorNotFound(name) => write!(f, "No motor named '{}' supplied", name),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<MotorError> for Error {
    fn from(e: MotorError) -> Self {
        Error::Motor(e)
    }
}

impl From<ScheduleError> for Error {
    fn from(e: ScheduleError) -> Self {
        Error::Schedule(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for MotorError {}

#[cfg(feature = "std")]
impl std::error::Error for ScheduleError {}
