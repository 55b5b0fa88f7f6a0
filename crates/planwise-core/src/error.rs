//! Error types for planwise-core.
//!
//! The scheduling engine itself is total: every computation returns a value
//! for any valid snapshot. Errors only arise at the construction boundary,
//! where collaborator-supplied input is validated before it enters the core.

use thiserror::Error;

/// Validation errors raised by boundary constructors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Work-hour range must be a forward interval
    #[error("Invalid work hours: end hour ({end}) must be greater than start hour ({start})")]
    InvalidWorkHours { start: u32, end: u32 },

    /// Invalid value for a named field
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Result type alias for ValidationError
pub type Result<T, E = ValidationError> = std::result::Result<T, E>;
