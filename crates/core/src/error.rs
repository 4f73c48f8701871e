//! Error types for configuration

use thiserror::Error;

/// Rejected host configuration
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("fixed step must be positive, got {0:?}")]
    NonPositiveStep(std::time::Duration),

    #[error("fixed step {step:?} exceeds the anomalous-delta threshold {threshold:?}")]
    StepAboveThreshold {
        step: std::time::Duration,
        threshold: std::time::Duration,
    },

    #[error("max frame skip must be at most {max}, got {value}")]
    FrameSkipOutOfRange { value: u32, max: u32 },

    #[error("update rate must be a positive finite number of hertz, got {0}")]
    InvalidRate(f64),

    #[error("screen {width}x{height} is too small to hold a board")]
    DegenerateScreen { width: f32, height: f32 },
}

/// Result type alias for configuration
pub type Result<T> = std::result::Result<T, ConfigError>;
