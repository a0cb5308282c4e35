//! Error type for the ranking and posture algorithms.
//!
//! Absent keypoints and empty shelter lists are normal inputs and never
//! surface here; only data that would otherwise turn into NaN or Infinity
//! results is rejected.

use thiserror::Error;

/// Result alias for algorithm entry points.
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Errors raised by the pure algorithm layer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// Input data that cannot be processed (non-finite coordinates,
    /// malformed keypoints, out-of-range sensitivities).
    #[error("invalid input: {message}")]
    InvalidInput {
        /// What was wrong with the input.
        message: String,
    },
}

impl AnalysisError {
    /// Creates a generic invalid-input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Creates an error for a coordinate that is NaN or infinite.
    pub fn invalid_coordinate(latitude: f64, longitude: f64) -> Self {
        Self::invalid_input(format!(
            "coordinate ({latitude}, {longitude}) must be finite"
        ))
    }

    /// Creates an error for a keypoint with unusable position or score.
    pub fn invalid_keypoint(part: impl std::fmt::Display, reason: &str) -> Self {
        Self::invalid_input(format!("keypoint '{part}': {reason}"))
    }

    /// Creates an error for a detection sensitivity outside 1..=10.
    pub fn invalid_sensitivity(name: &str, value: u8) -> Self {
        Self::invalid_input(format!("{name} sensitivity {value} is outside 1..=10"))
    }

    /// Human-readable message without the category prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::InvalidInput { message } => message,
        }
    }
}
