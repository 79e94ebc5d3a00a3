//! Instrument-specific error types.

use thiserror::Error;

use super::reading::Channel;

/// Result type for instrument operations.
pub type InstrumentResult<T> = Result<T, InstrumentError>;

/// Errors that can occur while talking to the instrument.
///
/// `Request`, `Status` and `Decode` describe a single failed attempt. Once the
/// retry policy gives up, the last of those is wrapped in `Unavailable`.
#[derive(Debug, Error)]
pub enum InstrumentError {
    /// The request could not be sent or no response arrived.
    #[error("Request failed: {0}")]
    Request(String),

    /// The endpoint answered with a non-2xx status.
    #[error("Instrument returned HTTP {0}")]
    Status(u16),

    /// The body was not JSON or lacked the `out` channel mapping.
    #[error("Could not decode instrument response: {0}")]
    Decode(String),

    /// Every attempt failed.
    #[error("Instrument unavailable after {attempts} attempt(s): {last}")]
    Unavailable {
        attempts: u32,
        #[source]
        last: Box<InstrumentError>,
    },

    /// The reading did not contain a channel the projection needs.
    #[error("Reading has no '{0}' channel")]
    MissingChannel(Channel),
}

impl InstrumentError {
    /// Create a request error.
    pub fn request(msg: impl Into<String>) -> Self {
        Self::Request(msg.into())
    }

    /// Create a decode error.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Wrap the last attempt's failure once retries are exhausted.
    pub fn unavailable(attempts: u32, last: Self) -> Self {
        Self::Unavailable {
            attempts,
            last: Box::new(last),
        }
    }
}
