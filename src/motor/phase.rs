//! Phase tables for unipolar steppers on a ULN2003 board.
//!
//! A table is an ordered cycle of coil patterns. Rotation direction is chosen
//! by the order the cycle is walked, never by a second table.

use serde::Deserialize;

use crate::motion::Direction;

/// Output half-steps per output shaft revolution of a 28BYJ-48 (64 × 63.68 gear train).
pub const HALF_STEPS_PER_REVOLUTION: f32 = 4075.772_8;

/// Levels applied to IN1..IN4 at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhasePattern(pub [bool; 4]);

impl PhasePattern {
    /// All coils off.
    pub const DEENERGIZED: Self = Self([false; 4]);

    /// Build a pattern from four 0/1 levels.
    pub const fn from_levels(levels: [u8; 4]) -> Self {
        Self([levels[0] != 0, levels[1] != 0, levels[2] != 0, levels[3] != 0])
    }

    /// Level for coil `i` (0 = IN1).
    #[inline]
    pub const fn level(self, coil: usize) -> bool {
        self.0[coil]
    }

    /// Number of energized coils.
    pub fn active_coils(self) -> usize {
        self.0.iter().filter(|&&on| on).count()
    }

    /// Number of coils whose level differs from `other`.
    pub fn distance(self, other: Self) -> usize {
        self.0
            .iter()
            .zip(other.0.iter())
            .filter(|(a, b)| a != b)
            .count()
    }

    /// Whether all coils are off.
    #[inline]
    pub fn is_deenergized(self) -> bool {
        self == Self::DEENERGIZED
    }
}

/// An ordered, immutable cycle of phase patterns.
#[derive(Debug, PartialEq, Eq)]
pub struct PhaseTable {
    patterns: &'static [PhasePattern],
}

impl PhaseTable {
    const fn new(patterns: &'static [PhasePattern]) -> Self {
        Self { patterns }
    }

    /// Number of patterns in one cycle.
    #[inline]
    pub const fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Tables are never empty; provided for API completeness.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// All patterns in forward order.
    #[inline]
    pub const fn patterns(&self) -> &'static [PhasePattern] {
        self.patterns
    }

    /// Pattern applied at phase-step `step` of a burst.
    ///
    /// Forward bursts start at the first pattern, backward bursts at the last,
    /// and both wrap around the cycle.
    pub fn pattern_at(&self, step: u32, direction: Direction) -> PhasePattern {
        let len = self.patterns.len();
        // Reduce in u32 first; usize may be 16 bits
        let offset = (step % len as u32) as usize;
        match direction {
            Direction::Forward => self.patterns[offset],
            Direction::Backward => self.patterns[len - 1 - offset],
        }
    }

    /// Walk the table once in the given direction.
    pub fn traverse(&self, direction: Direction) -> impl Iterator<Item = PhasePattern> + '_ {
        (0..self.patterns.len() as u32).map(move |i| self.pattern_at(i, direction))
    }
}

static HALF_STEP_PATTERNS: [PhasePattern; 8] = [
    PhasePattern::from_levels([0, 0, 0, 1]),
    PhasePattern::from_levels([0, 0, 1, 1]),
    PhasePattern::from_levels([0, 0, 1, 0]),
    PhasePattern::from_levels([0, 1, 1, 0]),
    PhasePattern::from_levels([0, 1, 0, 0]),
    PhasePattern::from_levels([1, 1, 0, 0]),
    PhasePattern::from_levels([1, 0, 0, 0]),
    PhasePattern::from_levels([1, 0, 0, 1]),
];

static FULL_STEP_PATTERNS: [PhasePattern; 4] = [
    PhasePattern::from_levels([1, 0, 1, 0]),
    PhasePattern::from_levels([0, 1, 1, 0]),
    PhasePattern::from_levels([0, 1, 0, 1]),
    PhasePattern::from_levels([1, 0, 0, 1]),
];

/// Half-step table: eight patterns alternating one and two active coils.
pub static HALF_STEP: PhaseTable = PhaseTable::new(&HALF_STEP_PATTERNS);

/// Full-step table: four patterns, two coils active in each.
pub static FULL_STEP: PhaseTable = PhaseTable::new(&FULL_STEP_PATTERNS);

/// Stepping resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StepMode {
    /// Eight-phase cycle, finer resolution and smoother at low speed.
    #[default]
    HalfStep,
    /// Four-phase cycle, more torque, coarser resolution.
    FullStep,
}

impl StepMode {
    /// Phase table for this mode.
    #[inline]
    pub fn table(self) -> &'static PhaseTable {
        match self {
            StepMode::HalfStep => &HALF_STEP,
            StepMode::FullStep => &FULL_STEP,
        }
    }

    /// Phase-steps per output shaft revolution.
    pub fn steps_per_revolution(self) -> f32 {
        match self {
            StepMode::HalfStep => HALF_STEPS_PER_REVOLUTION,
            StepMode::FullStep => HALF_STEPS_PER_REVOLUTION / 2.0,
        }
    }

    /// Convert output revolutions into a whole number of phase-steps.
    ///
    /// Negative or non-finite inputs yield zero.
    pub fn revolutions_to_steps(self, revolutions: f32) -> u32 {
        if !revolutions.is_finite() || revolutions <= 0.0 {
            return 0;
        }
        libm::roundf(revolutions * self.steps_per_revolution()) as u32
    }

    /// Per-phase delay that reliably keeps a 28BYJ-48 in sync.
    pub fn recommended_delay(self) -> crate::config::PhaseDelay {
        match self {
            StepMode::HalfStep => crate::config::PhaseDelay::from_millis(1),
            StepMode::FullStep => crate::config::PhaseDelay::from_millis(10),
        }
    }
}
