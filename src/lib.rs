//! Claude-Light MCP server library.
//!
//! Client and MCP integration for Claude-Light, a remote instrument made of
//! an RGB LED and a ten-channel spectral light sensor behind one HTTP
//! endpoint.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the MCP server handler and its stdio transport
//! - **domains**:
//!   - **instrument**: retried fetches and the four instrument shapes
//!   - **registration**: editing the desktop assistant's config file
//!   - **tools**: the `about` and `rgb` MCP tools
//! - **cli**: the serve / `install` / `uninstall` entry points
//!
//! # Example
//!
//! ```rust,no_run
//! use claude_light_mcp::Config;
//!
//! let instrument = Config::from_env().instrument.build();
//! let [red, green, blue] = instrument.rgb(0.5, 0.5, 0.5)?;
//! println!("630nm={red} 515nm={green} 445nm={blue}");
//! # Ok::<(), claude_light_mcp::domains::instrument::InstrumentError>(())
//! ```

pub mod cli;
pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{ClaudeLightServer, Config, Error, Result};
