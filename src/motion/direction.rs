//! Traversal direction over a phase table.

use serde::Deserialize;

use crate::error::MotorError;

/// Direction of motor rotation.
///
/// Realized purely by the order a phase table is walked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Walk the table from its first pattern.
    #[default]
    Forward,
    /// Walk the table from its last pattern.
    Backward,
}

impl Direction {
    /// Get direction from a `+1` / `-1` sign.
    ///
    /// # Errors
    ///
    /// Returns `MotorError::InvalidDirection` for any other value.
    pub fn from_sign(sign: i8) -> Result<Self, MotorError> {
        match sign {
            1 => Ok(Direction::Forward),
            -1 => Ok(Direction::Backward),
            other => Err(MotorError::InvalidDirection(other)),
        }
    }

    /// Get the sign multiplier.
    #[inline]
    pub fn sign(self) -> i8 {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }

    /// The opposite direction.
    #[inline]
    pub fn reversed(self) -> Self {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }
}
