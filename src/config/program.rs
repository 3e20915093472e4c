//! Program configuration from TOML.
//!
//! A program is a named batch of moves run either interleaved (all motors
//! advancing together) or sequentially (each move runs to completion).

use core::fmt;

use heapless::{String, Vec};
use serde::de::{SeqAccess, Visitor};
use serde::{Deserialize, Deserializer};

use crate::error::{truncated, ConfigError, MotorError, Result};
use crate::motion::Direction;
use crate::motor::StepMode;

/// Maximum number of moves in one program.
pub const MAX_MOVES: usize = 8;

/// How the moves of a program are executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProgramPolicy {
    /// All moves share the scheduler, one phase-step per motor per round.
    #[default]
    Interleaved,
    /// Each move runs to completion before the next starts.
    Sequential,
}

/// One motor move inside a program.
#[derive(Debug, Clone, Deserialize)]
pub struct MoveConfig {
    /// Target motor name (must match a motor in config).
    pub motor: String<32>,

    /// Phase-step count. Mutually exclusive with `revolutions`.
    #[serde(default)]
    pub steps: Option<i64>,

    /// Output shaft revolutions. Mutually exclusive with `steps`.
    #[serde(default)]
    pub revolutions: Option<f32>,

    /// Traversal direction.
    #[serde(default)]
    pub direction: Direction,
}

impl MoveConfig {
    /// Whether exactly one well-formed distance is given.
    pub fn is_well_formed(&self) -> bool {
        match (self.steps, self.revolutions) {
            (Some(steps), None) => steps >= 0 && steps <= u32::MAX as i64,
            (None, Some(revs)) => revs.is_finite() && revs >= 0.0,
            _ => false,
        }
    }

    /// Resolve the move into a phase-step count for a motor in `mode`.
    ///
    /// # Errors
    ///
    /// Returns `MotorError::NegativeStepCount` for negative step counts.
    pub fn step_count(&self, mode: StepMode) -> Result<u32> {
        match (self.steps, self.revolutions) {
            (Some(steps), _) if steps < 0 => Err(MotorError::NegativeStepCount(steps).into()),
            (Some(steps), _) => Ok(u32::try_from(steps).unwrap_or(u32::MAX)),
            (None, Some(revs)) => Ok(mode.revolutions_to_steps(revs)),
            (None, None) => Ok(0),
        }
    }
}

/// A named program from configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "RawProgram")]
pub struct ProgramConfig {
    /// Execution policy.
    pub policy: ProgramPolicy,

    /// Moves in execution order.
    pub moves: Vec<MoveConfig, MAX_MOVES>,

    /// Moves listed in the source, including any beyond `MAX_MOVES`.
    declared_moves: usize,
}

impl ProgramConfig {
    /// Create a program from its policy and moves.
    pub fn new(policy: ProgramPolicy, moves: Vec<MoveConfig, MAX_MOVES>) -> Self {
        let declared_moves = moves.len();
        Self {
            policy,
            moves,
            declared_moves,
        }
    }

    /// Number of moves the source listed; larger than `moves.len()` when
    /// the program did not fit.
    pub fn declared_moves(&self) -> usize {
        self.declared_moves
    }

    /// First motor referenced more than once, if any.
    pub fn reused_motor(&self) -> Option<&str> {
        self.moves.iter().enumerate().find_map(|(i, m)| {
            self.moves[i + 1..]
                .iter()
                .any(|other| other.motor == m.motor)
                .then(|| m.motor.as_str())
        })
    }

    /// Check that the program, registered as `name`, can be run as a whole.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::TooManyMoves` if moves were cut off, and
    /// `ConfigError::MotorReused` if an interleaved program drives a motor twice.
    pub fn check_runnable(&self, name: &str) -> Result<()> {
        if self.declared_moves > self.moves.len() {
            return Err(ConfigError::TooManyMoves(truncated(name)).into());
        }

        // Two commands may not borrow the same motor in one scheduler run
        if self.policy == ProgramPolicy::Interleaved {
            if let Some(motor) = self.reused_motor() {
                return Err(ConfigError::MotorReused {
                    program: truncated(name),
                    motor: truncated(motor),
                }
                .into());
            }
        }

        Ok(())
    }
}

#[derive(Deserialize)]
struct RawProgram {
    #[serde(default)]
    policy: ProgramPolicy,
    moves: MoveList,
}

impl From<RawProgram> for ProgramConfig {
    fn from(raw: RawProgram) -> Self {
        Self {
            policy: raw.policy,
            moves: raw.moves.moves,
            declared_moves: raw.moves.declared,
        }
    }
}

/// Move list that keeps the first `MAX_MOVES` entries and counts the rest,
/// so overflow surfaces as a validation error rather than a parse error.
struct MoveList {
    moves: Vec<MoveConfig, MAX_MOVES>,
    declared: usize,
}

impl<'de> Deserialize<'de> for MoveList {
    fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct MoveListVisitor;

        impl<'de> Visitor<'de> for MoveListVisitor {
            type Value = MoveList;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a list of moves")
            }

            fn visit_seq<A>(self, mut seq: A) -> core::result::Result<MoveList, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut list = MoveList {
                    moves: Vec::new(),
                    declared: 0,
                };
                while let Some(mv) = seq.next_element::<MoveConfig>()? {
                    list.declared += 1;
                    // Overflow is counted, not stored
                    let _ = list.moves.push(mv);
                }
                Ok(list)
            }
        }

        deserializer.deserialize_seq(MoveListVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_move(steps: Option<i64>, revolutions: Option<f32>) -> MoveConfig {
        MoveConfig {
            motor: String::try_from("m").unwrap(),
            steps,
            revolutions,
            direction: Direction::Forward,
        }
    }

    #[test]
    fn test_step_count_from_revolutions() {
        let m = make_move(None, Some(0.5));
        assert_eq!(m.step_count(StepMode::HalfStep).unwrap(), 2038);
        assert_eq!(m.step_count(StepMode::FullStep).unwrap(), 1019);
    }

    #[test]
    fn test_negative_steps_rejected() {
        let m = make_move(Some(-3), None);
        assert!(!m.is_well_formed());
        assert_eq!(
            m.step_count(StepMode::HalfStep),
            Err(MotorError::NegativeStepCount(-3).into())
        );
    }

    #[test]
    fn test_new_counts_moves() {
        let mut moves = Vec::new();
        moves.push(make_move(Some(1), None)).unwrap();
        let program = ProgramConfig::new(ProgramPolicy::Sequential, moves);
        assert_eq!(program.declared_moves(), 1);
        assert!(program.check_runnable("p").is_ok());
    }

    #[test]
    fn test_reused_motor_only_blocks_interleaved() {
        let mut moves = Vec::new();
        moves.push(make_move(Some(1), None)).unwrap();
        moves.push(make_move(Some(2), None)).unwrap();

        let sequential = ProgramConfig::new(ProgramPolicy::Sequential, moves.clone());
        assert!(sequential.check_runnable("p").is_ok());

        let interleaved = ProgramConfig::new(ProgramPolicy::Interleaved, moves);
        assert_eq!(interleaved.reused_motor(), Some("m"));
        assert!(matches!(
            interleaved.check_runnable("p"),
            Err(crate::Error::Config(ConfigError::MotorReused { .. }))
        ));
    }

    #[test]
    fn test_both_distances_is_malformed() {
        assert!(!make_move(Some(1), Some(1.0)).is_well_formed());
        assert!(!make_move(None, None).is_well_formed());
        assert!(make_move(Some(0), None).is_well_formed());
    }
}
