//! Error types and handling for the MCP server.
//!
//! The binary's two entry points, serving and editing the host config, both
//! report through this type.

use thiserror::Error;

/// A specialized Result type for MCP server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// Error editing the host config.
    #[error("Registration error: {0}")]
    Registration(#[from] crate::domains::registration::RegistrationError),

    /// Error from the transport layer.
    #[error("Transport error: {0}")]
    Transport(#[from] super::transport::TransportError),
}
