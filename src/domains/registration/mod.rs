//! Registration domain module.
//!
//! Adds or removes this server from the desktop assistant's
//! `claude_desktop_config.json` without disturbing anything else in it.
//!
//! - `platform.rs` - supported platforms and the config file location
//! - `registrar.rs` - read-modify-write of the `mcpServers` entry
//! - `error.rs` - registration error types

mod error;
pub mod platform;
pub mod registrar;

pub use error::{RegistrationError, RegistrationResult};
pub use platform::Platform;
pub use registrar::Registrar;
