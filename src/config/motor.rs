//! Motor configuration from TOML.

use heapless::String;
use serde::Deserialize;

use crate::motor::StepMode;

use super::units::PhaseDelay;

/// Complete motor configuration from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct MotorConfig {
    /// Human-readable name (max 32 chars).
    pub name: String<32>,

    /// Stepping resolution.
    #[serde(default)]
    pub mode: StepMode,

    /// Host pin identifiers wired to IN1..IN4.
    pub pins: [u8; 4],

    /// Pause after each phase pattern, in milliseconds.
    #[serde(default, rename = "delay_ms")]
    pub delay: PhaseDelay,

    /// Walk the phase table in the opposite order.
    #[serde(default)]
    pub invert_direction: bool,
}

impl MotorConfig {
    /// Phase-steps per output shaft revolution in the configured mode.
    pub fn steps_per_revolution(&self) -> f32 {
        self.mode.steps_per_revolution()
    }

    /// Phase-steps emitted per second at the configured delay.
    pub fn phase_rate_hz(&self) -> f32 {
        1_000_000.0 / self.delay.as_micros() as f32
    }

    /// Output shaft speed in revolutions per minute.
    pub fn rpm(&self) -> f32 {
        self.phase_rate_hz() * 60.0 / self.steps_per_revolution()
    }
}
