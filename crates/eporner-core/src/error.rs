//! Error types for the Eporner API client
//!
//! Provides a comprehensive error enum with human-readable messages
//! and JSON-friendly serialization.

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Boxed cause of a transport failure
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A request parameter outside its closed value domain
///
/// Always raised before any network call is made.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationError {
    /// Wire name of the offending parameter (e.g. `per_page`)
    pub field: String,
    /// The rejected value, stringified
    pub value: String,
    /// Human-readable description including the expected domain
    pub message: String,
}

impl ValidationError {
    pub fn new(
        field: impl Into<String>,
        value: impl ToString,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            value: value.to_string(),
            message: message.into(),
        }
    }

    /// Value not in an enumerated set
    pub fn not_one_of(field: &str, value: impl ToString, valid: &[impl ToString]) -> Self {
        let value = value.to_string();
        let valid = valid
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        let message = format!("Invalid {field} '{value}'. Valid values are: {valid}");
        Self::new(field, value, message)
    }

    /// Number outside an inclusive range
    pub fn out_of_range(field: &str, value: impl ToString, min: u32, max: u32) -> Self {
        let value = value.to_string();
        let message = format!("Invalid {field} '{value}'. Valid range is: {min}-{max}");
        Self::new(field, value, message)
    }
}

/// Error type for all Eporner client operations
///
/// Implements Display for human-readable messages and Serialize
/// so errors can be handed across a JSON boundary.
#[derive(Error, Debug)]
pub enum EpornerError {
    /// Parameter failed validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Network-level failure (DNS, connect, timeout, ...)
    #[error("HTTP request failed: {0}")]
    Transport(#[source] BoxError),

    /// Server answered with a non-success status code
    #[error("API returned status code: {status}")]
    Status { status: u16, body: String },

    /// Response body could not be decoded
    #[error("{0}")]
    Parse(String),

    /// Decoded record lacks a mandatory field
    #[error("Missing required field: {0}")]
    MissingField(String),
}

impl From<reqwest::Error> for EpornerError {
    fn from(error: reqwest::Error) -> Self {
        EpornerError::Transport(Box::new(error))
    }
}

impl Serialize for EpornerError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Result type alias for Eporner client operations
pub type Result<T> = std::result::Result<T, EpornerError>;
