//! Error types for state sequence operations.
//!
//! Operations over typed sequences are total. Errors only surface at the dynamic
//! boundary, where untyped JSON input has to be turned into records.

use thiserror::Error;

/// Structured error types for state sequence operations.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum StatesError {
    /// An argument did not have the shape the operation requires
    #[error("Invalid argument '{argument}': expected {expected}, found {actual}")]
    InvalidArgument {
        argument: String,
        expected: String,
        actual: String,
    },
}

impl StatesError {
    /// Check if this error was caused by an argument of the wrong shape
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, StatesError::InvalidArgument { .. })
    }

    /// Get the name of the offending argument
    pub fn argument(&self) -> Option<&str> {
        match self {
            StatesError::InvalidArgument { argument, .. } => Some(argument),
        }
    }

    pub(crate) fn invalid_argument(
        argument: impl Into<String>,
        expected: &str,
        actual: &serde_json::Value,
    ) -> Self {
        StatesError::InvalidArgument {
            argument: argument.into(),
            expected: expected.to_string(),
            actual: json_type_name(actual).to_string(),
        }
    }
}

/// Returns a human-readable name for the type of a JSON value
pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

// Conversion from StatesError to the main Error type
impl From<StatesError> for crate::Error {
    fn from(err: StatesError) -> Self {
        crate::Error::States(err)
    }
}
