//! Command-line surface.
//!
//! `cl_mcp` takes at most one positional argument:
//!
//! | argument    | action                                              |
//! |-------------|-----------------------------------------------------|
//! | (none)      | serve the tools over stdio until the host hangs up  |
//! | `install`   | register this executable in the host config         |
//! | `uninstall` | remove the registration                             |
//! | other       | print a usage hint                                  |

use std::path::{Path, PathBuf};

use clap::Parser;

use crate::core::{ClaudeLightServer, Config, Result, StdioTransport};
use crate::domains::registration::registrar::render;
use crate::domains::registration::{Registrar, RegistrationError};

/// Printed for unrecognized arguments.
pub const USAGE: &str =
    "I am not sure what you are trying to do. Please use install or uninstall.";

#[derive(Debug, Parser)]
#[command(name = "cl_mcp")]
#[command(about = "MCP server for the Claude-Light remote instrument", version)]
pub struct Cli {
    /// `install` or `uninstall`. Omit to serve the tools over stdio.
    #[arg(allow_hyphen_values = true)]
    pub command: Option<String>,
}

/// What the process was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Serve,
    Install,
    Uninstall,
    Unknown(String),
}

impl Command {
    pub fn from_arg(arg: Option<&str>) -> Self {
        match arg {
            None => Self::Serve,
            Some("install") => Self::Install,
            Some("uninstall") => Self::Uninstall,
            Some(other) => Self::Unknown(other.to_string()),
        }
    }
}

impl Cli {
    pub fn command(&self) -> Command {
        Command::from_arg(self.command.as_deref())
    }
}

/// Path of the running executable, as registered in the host config.
pub fn current_executable() -> std::result::Result<PathBuf, RegistrationError> {
    let exe = std::env::current_exe().map_err(|e| RegistrationError::Executable(e.to_string()))?;
    Ok(exe.canonicalize().unwrap_or(exe))
}

/// Serve the tools over stdio until the host hangs up.
pub async fn serve(config: Config) -> Result<()> {
    StdioTransport::run(ClaudeLightServer::new(config)).await?;
    Ok(())
}

/// Register `executable` and return the resulting document, rendered.
pub fn install(registrar: &Registrar, executable: &Path) -> Result<String> {
    let doc = registrar.install(executable)?;
    Ok(render(&doc)?)
}

/// Remove the registration and return the resulting document, rendered.
pub fn uninstall(registrar: &Registrar) -> Result<String> {
    let doc = registrar.uninstall()?;
    Ok(render(&doc)?)
}
