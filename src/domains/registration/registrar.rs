//! Install and uninstall the server entry in the host config.
//!
//! The host config is owned by another application. Each operation reads the
//! whole document, changes `mcpServers.<server_key>` and nothing else, then
//! replaces the file in one rename. Key order and number text are kept
//! (`serde_json` is built with `preserve_order` and `arbitrary_precision`).

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{Map, Value, json};
use tracing::{debug, info, instrument, warn};

use super::error::{RegistrationError, RegistrationResult};
use super::platform::Platform;
use crate::core::config::RegistrationConfig;

/// Sub-object of the host config listing managed servers.
pub const MCP_SERVERS_KEY: &str = "mcpServers";

/// Set `mcpServers.<server_key>` to a launch descriptor for `command`.
///
/// Creates `mcpServers` when absent. Fails without touching `doc` when the
/// document or `mcpServers` is not a JSON object.
pub fn merge_entry(doc: &mut Value, server_key: &str, command: &str) -> Result<(), String> {
    let root = doc
        .as_object_mut()
        .ok_or_else(|| "top level is not a JSON object".to_string())?;

    let servers = root
        .entry(MCP_SERVERS_KEY)
        .or_insert_with(|| Value::Object(Map::new()))
        .as_object_mut()
        .ok_or_else(|| format!("'{MCP_SERVERS_KEY}' is not a JSON object"))?;

    servers.insert(server_key.to_string(), json!({ "command": command }));
    Ok(())
}

/// Remove `mcpServers.<server_key>` if present. Returns whether it was there.
pub fn remove_entry(doc: &mut Value, server_key: &str) -> Result<bool, String> {
    let root = doc
        .as_object_mut()
        .ok_or_else(|| "top level is not a JSON object".to_string())?;

    match root.get_mut(MCP_SERVERS_KEY) {
        Some(Value::Object(servers)) => Ok(servers.shift_remove(server_key).is_some()),
        Some(_) => {
            warn!("'{}' is not a JSON object, leaving it alone", MCP_SERVERS_KEY);
            Ok(false)
        }
        None => Ok(false),
    }
}

/// Render a document the way it is written to disk (4-space indent).
pub fn render(doc: &Value) -> RegistrationResult<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    doc.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Edits one host config file.
#[derive(Debug, Clone)]
pub struct Registrar {
    path: PathBuf,
    server_key: String,
}

impl Registrar {
    pub fn new(path: impl Into<PathBuf>, server_key: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            server_key: server_key.into(),
        }
    }

    /// Registrar for the host config on `platform`.
    ///
    /// The platform check runs first, so an unsupported platform never
    /// reaches the file system, even with an explicit path configured.
    pub fn for_platform(platform: &Platform, config: &RegistrationConfig) -> RegistrationResult<Self> {
        platform.ensure_supported()?;

        let path = match &config.host_config_path {
            Some(path) => path.clone(),
            None => platform.host_config_path()?,
        };

        Ok(Self::new(path, config.server_key.clone()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn server_key(&self) -> &str {
        &self.server_key
    }

    /// Register `executable` as the launch command. Idempotent.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn install(&self, executable: &Path) -> RegistrationResult<Value> {
        let mut doc = self.read()?;

        let command = executable.to_str().ok_or_else(|| {
            RegistrationError::Executable(format!(
                "{} is not valid UTF-8",
                executable.display()
            ))
        })?;
        merge_entry(&mut doc, &self.server_key, command)
            .map_err(|reason| RegistrationError::parse(&self.path, reason))?;

        self.write(&doc)?;
        info!("Installed '{}' -> {}", self.server_key, command);
        Ok(doc)
    }

    /// Remove the registration. The file is rewritten even when nothing was
    /// removed.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn uninstall(&self) -> RegistrationResult<Value> {
        let mut doc = self.read()?;

        let removed = remove_entry(&mut doc, &self.server_key)
            .map_err(|reason| RegistrationError::parse(&self.path, reason))?;

        self.write(&doc)?;
        if removed {
            info!("Uninstalled '{}'", self.server_key);
        } else {
            info!("'{}' was not installed", self.server_key);
        }
        Ok(doc)
    }

    fn read(&self) -> RegistrationResult<Value> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(RegistrationError::ConfigNotFound(self.path.clone()));
            }
            Err(e) => return Err(RegistrationError::io(&self.path, e)),
        };

        serde_json::from_str(&text)
            .map_err(|e| RegistrationError::parse(&self.path, format!("invalid JSON: {e}")))
    }

    /// Write to a temp file beside the real config, then rename it over.
    ///
    /// A symlinked config is resolved first so the link stays in place and
    /// its target is what gets replaced. The target's permissions carry over.
    fn write(&self, doc: &Value) -> RegistrationResult<()> {
        let rendered = render(doc)?;

        let target =
            fs::canonicalize(&self.path).map_err(|e| RegistrationError::io(&self.path, e))?;
        let permissions = fs::metadata(&target)
            .map_err(|e| RegistrationError::io(&target, e))?
            .permissions();

        let file_name = target
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "config.json".to_string());
        let tmp = target.with_file_name(format!(".{file_name}.tmp"));

        fs::write(&tmp, rendered).map_err(|e| RegistrationError::io(&tmp, e))?;
        let replaced =
            fs::set_permissions(&tmp, permissions).and_then(|()| fs::rename(&tmp, &target));
        if let Err(e) = replaced {
            let _ = fs::remove_file(&tmp);
            return Err(RegistrationError::io(&target, e));
        }

        debug!("Wrote {}", target.display());
        Ok(())
    }
}
