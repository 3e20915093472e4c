//! Round-robin interleaving of step commands.

use crate::error::Result;

use super::command::StepCommand;

/// Outcome of a scheduler run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RunSummary {
    /// Phase-steps emitted across all motors.
    pub phase_steps: u64,

    /// Round-robin passes over the command list, or commands run when sequential.
    pub rounds: u32,
}

/// Drives several motors so they advance together rather than one after another.
///
/// Each round visits every unfinished command once and emits exactly one
/// phase-step for it, so a command with twice the work gets twice the rounds.
/// Finished commands simply drop out of rotation.
#[derive(Debug, Clone, Copy, Default)]
pub struct InterleavingScheduler;

impl InterleavingScheduler {
    /// Run all commands to completion, interleaved (blocking).
    ///
    /// Commands with zero steps are skipped and cause no pin activity; an
    /// empty slice returns immediately.
    ///
    /// # Errors
    ///
    /// Stops at the first failed pin write. Motors are not de-energized on
    /// failure.
    pub fn run(commands: &mut [StepCommand<'_>]) -> Result<RunSummary> {
        let total: u64 = commands.iter().map(|c| u64::from(c.remaining())).sum();

        #[cfg(feature = "defmt")]
        defmt::debug!("interleaving {} commands, {} phase-steps", commands.len(), total);

        let mut summary = RunSummary::default();
        while summary.phase_steps < total {
            summary.rounds += 1;
            for command in commands.iter_mut() {
                if command.is_complete() {
                    continue;
                }
                command.step()?;
                summary.phase_steps += 1;
            }
        }

        Ok(summary)
    }

    /// Run the commands one after another, each to completion (blocking).
    pub fn run_sequential(commands: &mut [StepCommand<'_>]) -> Result<RunSummary> {
        let mut summary = RunSummary::default();
        for command in commands.iter_mut() {
            let emitted = command.run_to_completion()?;
            if emitted > 0 {
                summary.phase_steps += u64::from(emitted);
                summary.rounds += 1;
            }
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("sequential run done, {} phase-steps", summary.phase_steps);

        Ok(summary)
    }
}
