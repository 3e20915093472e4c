//! Unit types for timing values.
//!
//! Keeps per-phase delays in one representation so millisecond configuration
//! values and `DelayNs` calls cannot be confused.

use serde::{Deserialize, Deserializer};

use crate::error::ConfigError;

/// Pause applied after each phase pattern, with microsecond resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhaseDelay(u32);

impl PhaseDelay {
    /// Default delay between phase patterns (2 ms).
    pub const DEFAULT: Self = Self(2_000);

    /// Create from whole microseconds.
    #[inline]
    pub const fn from_micros(us: u32) -> Self {
        Self(us)
    }

    /// Create from whole milliseconds.
    #[inline]
    pub const fn from_millis(ms: u32) -> Self {
        Self(ms.saturating_mul(1_000))
    }

    /// Create from fractional milliseconds.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidPhaseDelay` if the value is not finite,
    /// not positive, or rounds to zero microseconds.
    pub fn from_millis_f32(ms: f32) -> Result<Self, ConfigError> {
        if !ms.is_finite() || ms <= 0.0 || ms > (u32::MAX / 1_000) as f32 {
            return Err(ConfigError::InvalidPhaseDelay(ms));
        }
        let us = libm::roundf(ms * 1_000.0) as u32;
        if us == 0 {
            return Err(ConfigError::InvalidPhaseDelay(ms));
        }
        Ok(Self(us))
    }

    /// Delay in microseconds.
    #[inline]
    pub const fn as_micros(self) -> u32 {
        self.0
    }

    /// Delay in fractional milliseconds.
    #[inline]
    pub fn as_millis_f32(self) -> f32 {
        self.0 as f32 / 1_000.0
    }
}

impl Default for PhaseDelay {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl<'de> Deserialize<'de> for PhaseDelay {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let ms = f32::deserialize(deserializer)?;
        PhaseDelay::from_millis_f32(ms).map_err(|_| {
            serde::de::Error::custom("delay_ms must be a positive number of milliseconds")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fractional_millis() {
        let delay = PhaseDelay::from_millis_f32(1.5).unwrap();
        assert_eq!(delay.as_micros(), 1_500);
        assert!((delay.as_millis_f32() - 1.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_invalid_delays_rejected() {
        for ms in [0.0, -1.0, f32::NAN, f32::INFINITY, 0.0001] {
            assert!(matches!(
                PhaseDelay::from_millis_f32(ms),
                Err(ConfigError::InvalidPhaseDelay(_))
            ));
        }
    }

    #[test]
    fn test_default_is_two_millis() {
        assert_eq!(PhaseDelay::default(), PhaseDelay::from_millis(2));
    }
}
