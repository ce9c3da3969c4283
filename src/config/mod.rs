mod session;
mod settings;

pub use session::Session;
pub use settings::{ApiSettings, Config, DownloadSettings, LogSettings};

use crate::error::{DashboardError, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "config.toml";
const SESSION_FILE: &str = "session.toml";

/// Get the config directory path (~/.invdash/)
pub fn config_dir() -> Result<PathBuf> {
    // First try XDG-style directories
    if let Some(proj_dirs) = ProjectDirs::from("", "", "invdash") {
        return Ok(proj_dirs.config_dir().to_path_buf());
    }

    // Fallback to ~/.invdash/
    let home = dirs_home().ok_or_else(|| {
        DashboardError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine home directory",
        ))
    })?;

    Ok(home.join(".invdash"))
}

fn dirs_home() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

/// Expand ~ in paths
pub fn expand_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs_home() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Resolve the download directory; relative paths are taken from the
/// current working directory.
pub fn resolve_output_dir(output_dir: &str) -> PathBuf {
    expand_path(output_dir)
}

/// Load config.toml
pub fn load_config(config_dir: &Path) -> Result<Config> {
    if !config_dir.exists() {
        return Err(DashboardError::ConfigNotFound(config_dir.to_path_buf()));
    }
    let path = config_dir.join(CONFIG_FILE);
    if !path.exists() {
        return Err(DashboardError::ConfigFileNotFound(path));
    }
    let content = fs::read_to_string(&path)?;
    toml::from_str(&content).map_err(|e| DashboardError::ConfigParse { path, source: e })
}

/// Load session.toml, `None` when logged out
pub fn load_session(config_dir: &Path) -> Result<Option<Session>> {
    let path = config_dir.join(SESSION_FILE);
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&path)?;
    toml::from_str(&content)
        .map(Some)
        .map_err(|e| DashboardError::ConfigParse { path, source: e })
}

/// Save session.toml
pub fn save_session(config_dir: &Path, session: &Session) -> Result<()> {
    let path = config_dir.join(SESSION_FILE);
    let content = toml::to_string_pretty(session).map_err(|e| {
        DashboardError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            e.to_string(),
        ))
    })?;
    fs::write(path, content)?;
    Ok(())
}

/// Remove session.toml. Returns whether a session existed.
pub fn clear_session(config_dir: &Path) -> Result<bool> {
    let path = config_dir.join(SESSION_FILE);
    if !path.exists() {
        return Ok(false);
    }
    fs::remove_file(path)?;
    tracing::info!("stored session cleared");
    Ok(true)
}

/// Template content for config.toml
pub const CONFIG_TEMPLATE: &str = r#"[api]
base_url = "http://localhost:8080/api"   # backend root, endpoints are appended
timeout_secs = 30

[download]
output_dir = "."   # where exported spreadsheets are saved, ~ is expanded

[log]
level = "warn"     # error, warn, info, debug or trace
"#;
