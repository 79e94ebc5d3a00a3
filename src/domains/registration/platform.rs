//! Locating the desktop assistant's config file.

use std::path::PathBuf;

use super::error::{RegistrationError, RegistrationResult};

/// File name the desktop assistant reads its MCP servers from.
pub const HOST_CONFIG_FILE: &str = "claude_desktop_config.json";

/// Operating systems, as far as registration is concerned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Platform {
    MacOs,
    Windows,
    Other(String),
}

impl Platform {
    /// The platform this binary was built for.
    pub fn current() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    /// Map an `std::env::consts::OS` value.
    pub fn from_os(os: &str) -> Self {
        match os {
            "macos" => Self::MacOs,
            "windows" => Self::Windows,
            other => Self::Other(other.to_string()),
        }
    }

    /// Fail unless the desktop assistant exists on this platform.
    pub fn ensure_supported(&self) -> RegistrationResult<()> {
        match self {
            Self::MacOs | Self::Windows => Ok(()),
            Self::Other(os) => Err(RegistrationError::UnsupportedPlatform(os.clone())),
        }
    }

    /// Default host config location.
    ///
    /// - macOS: `~/Library/Application Support/Claude/claude_desktop_config.json`
    /// - Windows: `%APPDATA%\Claude\claude_desktop_config.json`
    pub fn host_config_path(&self) -> RegistrationResult<PathBuf> {
        let base = match self {
            Self::MacOs => dirs::home_dir()
                .map(|home| home.join("Library").join("Application Support"))
                .ok_or_else(|| RegistrationError::ConfigDirUnavailable("no home directory".into()))?,
            Self::Windows => std::env::var_os("APPDATA")
                .map(PathBuf::from)
                .or_else(dirs::config_dir)
                .ok_or_else(|| RegistrationError::ConfigDirUnavailable("APPDATA is not set".into()))?,
            Self::Other(os) => return Err(RegistrationError::UnsupportedPlatform(os.clone())),
        };

        Ok(base.join("Claude").join(HOST_CONFIG_FILE))
    }
}
