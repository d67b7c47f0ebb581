//! Error types for curve construction and animator configuration.

use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum AnimationError {
    /// A timing curve control point lies outside the unit time interval, so the
    /// x-cubic is not guaranteed to be monotonic.
    #[error("control point {index} has x = {x}, expected a value in [0, 1]")]
    NonMonotonicCurve { index: usize, x: f64 },

    /// Durations must be finite and strictly positive.
    #[error("invalid animation duration: {seconds}s")]
    InvalidDuration { seconds: f64 },
}

impl AnimationError {
    /// Get error category for logging.
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::NonMonotonicCurve { .. } => "curve",
            Self::InvalidDuration { .. } => "timing",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_categories() {
        let curve = AnimationError::NonMonotonicCurve { index: 1, x: 1.5 };
        assert_eq!(curve.category(), "curve");
        assert_eq!(
            curve.to_string(),
            "control point 1 has x = 1.5, expected a value in [0, 1]"
        );

        let timing = AnimationError::InvalidDuration { seconds: 0.0 };
        assert_eq!(timing.category(), "timing");
    }
}
