//! Tool-specific error types.

use thiserror::Error;

use crate::domains::instrument::InstrumentError;

/// Errors that can occur during tool operations.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Invalid arguments were provided to the tool.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// The instrument could not produce a reading.
    #[error("Instrument call failed: {0}")]
    Instrument(#[from] InstrumentError),

    /// The result could not be turned into structured content.
    #[error("Failed to serialize reading: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl ToolError {
    /// Create a new "invalid arguments" error.
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }
}
