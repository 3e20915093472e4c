//! # uln2003-stepper
//!
//! Phase-table driver and interleaving scheduler for 28BYJ-48 stepper motors
//! on ULN2003 boards, with embedded-hal 1.0 support.
//!
//! ## Features
//!
//! - **Phase tables**: Half-step (8 phases) and full-step (4 phases) cycles
//! - **embedded-hal 1.0**: Uses four `OutputPin`s per motor, `DelayNs` for timing
//! - **no_std compatible**: Core library works without standard library
//! - **Interleaving**: Several motors advance one phase-step per round
//! - **Configuration-driven**: Define motors and programs in TOML files
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use uln2003_stepper::{Direction, InterleavingScheduler, MotorUnit, PhaseDelay, StepCommand, StepMode};
//!
//! let mut left = MotorUnit::new(StepMode::HalfStep, left_pins, delay_a, PhaseDelay::from_millis(1));
//! let mut right = MotorUnit::new(StepMode::HalfStep, right_pins, delay_b, PhaseDelay::from_millis(1));
//!
//! // One motor on its own
//! left.advance(4076, Direction::Forward)?;
//!
//! // Both together
//! let mut commands = [
//!     StepCommand::new(&mut left, 4076, Direction::Forward),
//!     StepCommand::new(&mut right, 4076, Direction::Backward),
//! ];
//! InterleavingScheduler::run(&mut commands)?;
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O and TOML parsing
//! - `alloc`: Enables heap allocation for no_std with allocator
//! - `defmt`: Enables defmt logging for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

#[cfg(feature = "alloc")]
extern crate alloc;

// Core modules
pub mod config;
pub mod error;
pub mod motion;
pub mod motor;

// Re-exports for ergonomic API
pub use config::{validate_config, MotorConfig, PhaseDelay, ProgramConfig, SystemConfig};
pub use error::{Error, Result};
pub use motion::{Direction, InterleavingScheduler, RunSummary, StepCommand};
pub use motor::{
    MotorSystem, MotorUnit, MotorUnitBuilder, PhasePattern, PhaseStepper, PhaseTable, StepMode,
};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};
