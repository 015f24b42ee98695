//! Error types for density map construction
//!
//! Provides a unified error type for all pixhist crates.

use thiserror::Error;

/// Axis of a bounding box or grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
        }
    }
}

/// Core error type for histogram operations
///
/// Every variant except `Execution` and `Other` is raised by argument
/// validation before any grid is allocated.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid argument provided to a function
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Array sources of differing lengths
    #[error("Length mismatch: x has {x_len} values, y has {y_len}")]
    LengthMismatch { x_len: usize, y_len: usize },

    /// Range estimation drew no finite samples
    #[error("Empty sample: none of the {drawn} drawn samples were finite")]
    EmptySample { drawn: usize },

    /// Bounding box with zero or negative extent on an axis
    #[error("Degenerate range on {axis} axis: [{low}, {high}]")]
    DegenerateRange { axis: Axis, low: f64, high: f64 },

    /// Threading or parallelization error
    #[error("Execution error: {0}")]
    Execution(String),

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

// Helper functions for common error patterns

impl Error {
    /// Create an error for a parameter that must be strictly positive
    pub fn non_positive(name: &str, value: impl std::fmt::Display) -> Self {
        Self::InvalidArgument(format!("{name} must be positive, got {value}"))
    }

    /// Create an error for a parameter that must be finite
    pub fn non_finite(name: &str) -> Self {
        Self::InvalidArgument(format!("{name} contains NaN or infinite values"))
    }

    /// Create an error for array sources of differing lengths
    pub fn length_mismatch(x_len: usize, y_len: usize) -> Self {
        Self::LengthMismatch { x_len, y_len }
    }

    /// Create an error for a collapsed axis
    pub fn degenerate(axis: Axis, low: f64, high: f64) -> Self {
        Self::DegenerateRange { axis, low, high }
    }
}
