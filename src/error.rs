//! Error types for the edge detection pipeline.
//!
//! Threshold errors are raised before any grid is allocated, so a failed
//! call never leaves partially processed output behind.

use thiserror::Error;

/// Errors that can occur while running the Canny pipeline.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CannyError {
    /// Low threshold above the high threshold
    #[error("invalid thresholds: low ({low}) must not exceed high ({high})")]
    InvalidThresholds {
        /// Requested low threshold
        low: i32,
        /// Requested high threshold
        high: i32,
    },

    /// One of the thresholds is below zero
    #[error("invalid thresholds: low ({low}) and high ({high}) must be non-negative")]
    NegativeThreshold {
        /// Requested low threshold
        low: i32,
        /// Requested high threshold
        high: i32,
    },

    /// Buffer length or grid shapes do not agree
    #[error("shape error: {0}")]
    Shape(String),
}

impl From<ndarray::ShapeError> for CannyError {
    fn from(err: ndarray::ShapeError) -> Self {
        CannyError::Shape(err.to_string())
    }
}

/// Result type for pipeline operations
pub type CannyResult<T> = Result<T, CannyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_both_thresholds() {
        let err = CannyError::InvalidThresholds { low: 60, high: 40 };
        let msg = err.to_string();
        assert!(msg.contains("60"));
        assert!(msg.contains("40"));
    }

    #[test]
    fn test_shape_error_converts() {
        let err = ndarray::Array2::<u8>::from_shape_vec((2, 2), vec![0u8; 3]).unwrap_err();
        let converted: CannyError = err.into();
        assert!(matches!(converted, CannyError::Shape(_)));
    }
}
