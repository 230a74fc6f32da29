//! Error types for spindrift.
//!
//! Configuration setters clamp out-of-range values silently; errors only
//! surface at construction time, when geometry or parameter ranges are
//! degenerate enough that no simulation could run with them.

use std::fmt;

/// Errors reported when building an emitter, attractor, or particle system.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A parameter range is empty or inverted (`min >= max`).
    EmptyRange {
        /// Name of the offending parameter.
        name: &'static str,
        /// Range start.
        min: f32,
        /// Range end.
        max: f32,
    },
    /// A parameter is NaN or infinite.
    NonFinite {
        /// Name of the offending parameter.
        name: &'static str,
    },
    /// A parameter that must be strictly positive is zero or negative.
    NonPositive {
        /// Name of the offending parameter.
        name: &'static str,
        /// The rejected value.
        value: f32,
    },
    /// A direction vector has (near-)zero length and cannot be normalized.
    ZeroVector {
        /// Name of the offending parameter.
        name: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyRange { name, min, max } => {
                write!(f, "Empty range for {}: {}..{}", name, min, max)
            }
            ConfigError::NonFinite { name } => {
                write!(f, "Non-finite value for {}", name)
            }
            ConfigError::NonPositive { name, value } => {
                write!(f, "{} must be positive, got {}", name, value)
            }
            ConfigError::ZeroVector { name } => {
                write!(f, "{} has zero length and cannot be normalized", name)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
