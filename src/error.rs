//! Configuration error types.
//!
//! The simulation itself has no recoverable failures; only settings coming
//! from outside the crate (JSON text) can be rejected.

use std::fmt;

/// Error returned when settings cannot be parsed or fail validation
#[derive(Debug)]
pub enum SettingsError {
    /// The JSON text was malformed or had a field of the wrong type.
    Parse(serde_json::Error),

    /// A field parsed but is outside the range the simulation can run with.
    Invalid {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
        /// Human-readable constraint.
        reason: &'static str,
    },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Parse(e) => write!(f, "could not parse settings: {e}"),
            SettingsError::Invalid {
                field,
                value,
                reason,
            } => write!(f, "invalid setting `{field}` = {value}: {reason}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Parse(e) => Some(e),
            SettingsError::Invalid { .. } => None,
        }
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e)
    }
}
