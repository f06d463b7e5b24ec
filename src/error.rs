use serde::Serialize;
use std::io;
use thiserror::Error;

/// Rejection of a request before any analysis work happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Text is required")]
    TextRequired,
}

/// Failures of the command-line transport while loading a request.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("Invalid request body: {0}")]
    MalformedRequest(#[from] serde_json::Error),

    #[error("Failed to read input from {source_name}: {error}")]
    Read {
        source_name: String,
        #[source]
        error: io::Error,
    },
}

impl InputError {
    /// Whether the caller sent something unusable, as opposed to a local fault.
    pub fn is_client_error(&self) -> bool {
        matches!(self, InputError::MalformedRequest(_))
    }
}

/// Serialized error body, `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

impl From<ValidationError> for ErrorResponse {
    fn from(err: ValidationError) -> Self {
        Self::new(err.to_string())
    }
}

impl From<&InputError> for ErrorResponse {
    fn from(err: &InputError) -> Self {
        Self::new(err.to_string())
    }
}
