//! Host-supplied configuration
//!
//! Timing knobs for the scheduler and the screen size the board layout is
//! computed from. Defaults come from the constants in the types crate.

use std::time::Duration;

use crate::error::{ConfigError, Result};
use crate::types::{ANOMALOUS_DELTA, DEFAULT_FIXED_STEP, DEFAULT_MAX_FRAME_SKIP};

/// Upper bound accepted for `max_frame_skip`
pub const MAX_FRAME_SKIP_LIMIT: u32 = 60;

/// Timing configuration for [`crate::scheduler::TimestepScheduler`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Virtual time consumed per fixed update
    pub fixed_step: Duration,
    /// Extra catch-up updates allowed per tick
    pub max_frame_skip: u32,
    /// Real deltas above this are replaced by one fixed step
    pub anomalous_delta: Duration,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            fixed_step: DEFAULT_FIXED_STEP,
            max_frame_skip: DEFAULT_MAX_FRAME_SKIP,
            anomalous_delta: ANOMALOUS_DELTA,
        }
    }
}

impl SimulationConfig {
    /// Default configuration stepping at `hz` updates per second
    pub fn from_hz(hz: f64) -> Result<Self> {
        if !hz.is_finite() || hz <= 0.0 {
            return Err(ConfigError::InvalidRate(hz));
        }
        let config = Self {
            fixed_step: Duration::from_secs_f64(1.0 / hz),
            ..Self::default()
        };
        config.validate()
    }

    pub fn with_max_frame_skip(mut self, max_frame_skip: u32) -> Self {
        self.max_frame_skip = max_frame_skip;
        self
    }

    /// Check invariants, returning the config unchanged when valid.
    pub fn validate(self) -> Result<Self> {
        if self.fixed_step.is_zero() {
            return Err(ConfigError::NonPositiveStep(self.fixed_step));
        }
        if self.fixed_step > self.anomalous_delta {
            return Err(ConfigError::StepAboveThreshold {
                step: self.fixed_step,
                threshold: self.anomalous_delta,
            });
        }
        if self.max_frame_skip > MAX_FRAME_SKIP_LIMIT {
            return Err(ConfigError::FrameSkipOutOfRange {
                value: self.max_frame_skip,
                max: MAX_FRAME_SKIP_LIMIT,
            });
        }
        Ok(self)
    }
}

/// Drawable area in screen units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenSize {
    pub width: f32,
    pub height: f32,
}

impl ScreenSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn validate(self) -> Result<Self> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(ConfigError::DegenerateScreen {
                width: self.width,
                height: self.height,
            });
        }
        Ok(self)
    }
}
