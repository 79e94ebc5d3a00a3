//! MCP server handler.
//!
//! Tools are defined in `domains/tools/definitions/`, one file per tool, and
//! the router is assembled in `domains/tools/router.rs`. Adding a tool does
//! not require modifying this file.

use rmcp::{
    ServerHandler, handler::server::tool::ToolRouter, model::*, tool_handler,
};
use std::sync::Arc;

use super::config::Config;
use crate::domains::instrument::{Fetcher, HttpFetcher, Instrument};
use crate::domains::tools::build_tool_router;

const INSTRUCTIONS: &str = "Claude-Light is a remote instrument: an RGB LED shining on a spectral \
light sensor. Use the `rgb` tool to set the red, green and blue channels (0 to 1) and read the \
intensities at 415nm, 445nm, 480nm, 515nm, 555nm, 590nm, 630nm, 680nm, clear and nir. \
Use `about` for a description of the instrument.";

/// The MCP server handler.
#[derive(Clone)]
pub struct ClaudeLightServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl ClaudeLightServer {
    /// Create a server talking to the instrument described by `config`.
    pub fn new(config: Config) -> Self {
        let instrument = config.instrument.build();
        Self::with_instrument(config, instrument)
    }

    /// Create a server around an existing instrument client.
    pub fn with_instrument<F: Fetcher + 'static>(config: Config, instrument: Instrument<F>) -> Self {
        Self {
            config: Arc::new(config),
            tool_router: build_tool_router::<Self, F>(instrument),
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Names of the tools this server exposes.
    pub fn tool_names(&self) -> Vec<String> {
        self.tool_router
            .list_all()
            .into_iter()
            .map(|t| t.name.to_string())
            .collect()
    }
}

impl Default for ClaudeLightServer {
    fn default() -> Self {
        Self::with_instrument(Config::default(), Instrument::<HttpFetcher>::default())
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for ClaudeLightServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_exposes_two_tools() {
        let server = ClaudeLightServer::new(Config::default());
        let mut names = server.tool_names();
        names.sort();
        assert_eq!(names, ["about", "rgb"]);
    }

    #[test]
    fn test_server_info() {
        let server = ClaudeLightServer::default();
        assert_eq!(server.name(), "claude-light");
        assert_eq!(server.version(), env!("CARGO_PKG_VERSION"));

        let info = server.get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.instructions.unwrap().contains("rgb"));
    }
}
