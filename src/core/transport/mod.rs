//! Transport layer for the MCP server.
//!
//! The desktop assistant launches the server and speaks JSON-RPC over its
//! stdin/stdout. One host, one connection, served until the pipe closes.

mod error;
pub mod stdio;

pub use error::{TransportError, TransportResult};
pub use stdio::StdioTransport;
