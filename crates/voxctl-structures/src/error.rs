// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Error types for controller construction

/// Error raised when a controller, grid or converter pipeline is assembled from
/// inconsistent parts.
///
/// These errors are only produced at construction (or reconfiguration) time.
/// Stepping a controller never fails.
///
/// # Examples
/// ```
/// use voxctl_structures::ConfigurationError;
///
/// fn check_converters(converters: usize, inputs: usize) -> Result<(), ConfigurationError> {
///     if converters != inputs {
///         return Err(ConfigurationError::DimensionMismatch {
///             what: "input converters".into(),
///             expected: inputs,
///             actual: converters,
///         });
///     }
///     Ok(())
/// }
///
/// assert!(check_converters(3, 2).is_err());
/// assert!(check_converters(2, 2).is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigurationError {
    /// Two sizes that must agree do not
    #[error("Dimension mismatch for {what}: expected {expected}, got {actual}")]
    DimensionMismatch {
        what: String,
        expected: usize,
        actual: usize,
    },

    /// Two grids that must share a shape do not
    #[error(
        "Grid shape mismatch for {what}: expected {expected_width}x{expected_height}, got {actual_width}x{actual_height}"
    )]
    GridShapeMismatch {
        what: String,
        expected_width: usize,
        expected_height: usize,
        actual_width: usize,
        actual_height: usize,
    },

    /// Position outside the grid
    #[error("Out of bounds: position ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },

    /// Position inside the grid, but no cell lives there
    #[error("No cell at position ({x}, {y})")]
    EmptyCell { x: i32, y: i32 },

    /// A scalar parameter is outside its valid range
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl ConfigurationError {
    pub fn dimension_mismatch(what: impl Into<String>, expected: usize, actual: usize) -> Self {
        ConfigurationError::DimensionMismatch {
            what: what.into(),
            expected,
            actual,
        }
    }
}
