//! Configuration errors
//!
//! Caller bugs inside the numeric kernels (shape mismatches, out-of-range
//! interpolation, NaN fields) panic. Only configuration problems, which can
//! come from user input, are reported as values.

use std::fmt;

/// A simulation or solver configuration that cannot be used
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The grid leaves no interior once the one-cell border is removed.
    EmptyInterior {
        /// Full grid height in cells
        height: usize,
        /// Full grid width in cells
        width: usize,
    },
    /// A physical or numerical parameter that must be strictly positive.
    NonPositive {
        /// Parameter name
        name: &'static str,
        /// Rejected value
        value: f64,
    },
    /// The solver was given no iterations to work with.
    ZeroIterations,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInterior { height, width } => write!(
                f,
                "grid {height}x{width} has no interior cells (need at least 3x3)"
            ),
            Self::NonPositive { name, value } => {
                write!(f, "{name} must be positive and finite, got {value}")
            }
            Self::ZeroIterations => write!(f, "maximum PCG iterations must be at least 1"),
        }
    }
}

impl std::error::Error for ConfigError {}
