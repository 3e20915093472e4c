//! Motion module for uln2003-stepper.
//!
//! Provides directions, step commands, and the interleaving scheduler.

mod command;
mod direction;
mod scheduler;

pub use command::StepCommand;
pub use direction::Direction;
pub use scheduler::{InterleavingScheduler, RunSummary};
