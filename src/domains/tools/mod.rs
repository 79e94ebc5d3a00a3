//! Tools domain module.
//!
//! Tools the desktop assistant can call:
//! - `about` - static description of the instrument
//! - `rgb` - set the three LED channels and return every sensor channel
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `router.rs` - ToolRouter builder used by the server handler
//! - `error.rs` - Tool-specific error types

pub mod definitions;
mod error;
pub mod router;

pub use error::ToolError;
pub use router::build_tool_router;
