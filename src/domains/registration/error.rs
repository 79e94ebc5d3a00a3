//! Registration-specific error types.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for host config operations.
pub type RegistrationResult<T> = Result<T, RegistrationError>;

/// Errors that can occur while editing the host's config file.
///
/// Every variant is raised before the file is written.
#[derive(Debug, Error)]
pub enum RegistrationError {
    /// The desktop assistant only ships for macOS and Windows.
    #[error("Unsupported platform '{0}': only macOS and Windows are supported")]
    UnsupportedPlatform(String),

    /// The per-user directory holding the host config could not be located.
    #[error("Could not locate the user configuration directory: {0}")]
    ConfigDirUnavailable(String),

    /// No config file at the expected location.
    #[error("Host config not found at {}. Start the desktop app once so it creates it.", .0.display())]
    ConfigNotFound(PathBuf),

    /// The file exists but cannot be merged into safely.
    #[error("Host config at {} is not usable: {reason}", path.display())]
    ConfigParse { path: PathBuf, reason: String },

    /// The executable path to register could not be resolved.
    #[error("Could not resolve executable path: {0}")]
    Executable(String),

    /// The merged document could not be rendered.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O errors while reading or writing the file.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl RegistrationError {
    /// Create a parse error for `path`.
    pub fn parse(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::ConfigParse {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create an I/O error for `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
