// fusion_core/src/error.rs

//! Error types for the fusion kernels.

use thiserror::Error;

/// Caller-contract violations of the math kernels, plus configuration failures.
///
/// Numerical validation (see [`crate::math::check_cov`]) never produces an
/// error; it reports through a boolean and a diagnostic instead.
#[derive(Debug, Error)]
pub enum FusionError {
    /// An operation that needs at least one input received none.
    #[error("empty input: {0}")]
    EmptyInput(String),

    /// A truncated series was requested with fewer than one term.
    #[error("invalid series order {order}: must be at least 1")]
    InvalidSeriesOrder {
        /// The rejected order.
        order: u32,
    },

    /// A finite-difference step was zero or not finite.
    #[error("invalid time step dt = {dt}: must be finite and non-zero")]
    InvalidTimeStep {
        /// The rejected time step in seconds.
        dt: f64,
    },

    /// A subsampling stride of zero.
    #[error("invalid stride {nth}: must be at least 1")]
    InvalidStride {
        /// The rejected stride.
        nth: usize,
    },

    /// A matrix operation that needs a square matrix received a rectangular one.
    #[error("matrix must be square, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    /// A timestamp that is NaN or infinite and so cannot be ordered.
    #[error("non-finite timestamp {t}")]
    NonFiniteTimestamp { t: f64 },

    /// The kernel configuration could not be loaded or parsed.
    #[error("configuration error: {0}")]
    Config(#[from] figment::Error),
}

impl FusionError {
    /// Creates an empty input error.
    #[must_use]
    pub fn empty_input(what: impl Into<String>) -> Self {
        Self::EmptyInput(what.into())
    }
}

/// Result type for fusion kernel operations.
pub type Result<T> = std::result::Result<T, FusionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_empty_input() {
        let err = FusionError::empty_input("quaternion list");
        assert!(err.to_string().contains("empty input"));
        assert!(err.to_string().contains("quaternion list"));
    }

    #[test]
    fn error_invalid_series_order() {
        let err = FusionError::InvalidSeriesOrder { order: 0 };
        assert!(err.to_string().contains("invalid series order 0"));
    }

    #[test]
    fn error_invalid_time_step() {
        let err = FusionError::InvalidTimeStep { dt: 0.0 };
        assert!(err.to_string().contains("dt = 0"));
    }

    #[test]
    fn error_invalid_stride() {
        let err = FusionError::InvalidStride { nth: 0 };
        assert!(err.to_string().contains("invalid stride"));
    }

    #[test]
    fn error_not_square() {
        let err = FusionError::NotSquare { rows: 2, cols: 3 };
        assert_eq!(err.to_string(), "matrix must be square, got 2x3");
    }

    #[test]
    fn error_non_finite_timestamp() {
        let err = FusionError::NonFiniteTimestamp { t: f64::NAN };
        assert!(err.to_string().contains("NaN"));
    }
}
