//! Where levelbind keeps its files
//!
//! Everything lives in one directory:
//! - `$LEVELBIND_CONFIG_DIR` when set (sandboxed runs, CI)
//! - `$XDG_CONFIG_HOME/levelbind` or `~/.config/levelbind` on Unix/macOS
//! - `%APPDATA%\levelbind` on Windows

use std::{
    env, fs,
    path::{Path, PathBuf},
};

const APP_DIR: &str = "levelbind";

/// Overrides the whole directory lookup
pub const CONFIG_DIR_ENV: &str = "LEVELBIND_CONFIG_DIR";

/// Prefix of the daily-rotated log files (`levelbind.log.YYYY-MM-DD`)
pub const LOG_FILE_PREFIX: &str = "levelbind.log";

pub fn config_dir() -> Option<PathBuf> {
    if let Some(dir) = env::var_os(CONFIG_DIR_ENV).filter(|d| !d.is_empty()) {
        return Some(PathBuf::from(dir));
    }
    platform_config_root().map(|root| root.join(APP_DIR))
}

#[cfg(target_os = "windows")]
fn platform_config_root() -> Option<PathBuf> {
    env::var_os("APPDATA")
        .map(PathBuf::from)
        .or_else(dirs::config_dir)
}

#[cfg(not(target_os = "windows"))]
fn platform_config_root() -> Option<PathBuf> {
    env::var_os("XDG_CONFIG_HOME")
        .filter(|d| !d.is_empty())
        .map(PathBuf::from)
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
}

/// Engine settings, `config.yaml`
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.yaml"))
}

/// Keybind table, `keybinds.yaml`
pub fn keybinds_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("keybinds.yaml"))
}

pub fn logs_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("logs"))
}

/// Newest rotated log file, if any have been written
pub fn latest_log_file() -> Option<PathBuf> {
    newest_log_in(&logs_dir()?)
}

/// Rotated names end in `YYYY-MM-DD`, so the lexical maximum is the newest
fn newest_log_in(dir: &Path) -> Option<PathBuf> {
    fs::read_dir(dir)
        .ok()?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with(LOG_FILE_PREFIX))
        })
        .max()
}

fn ensure_dir(path: PathBuf) -> Result<PathBuf, String> {
    fs::create_dir_all(&path)
        .map_err(|e| format!("Failed to create directory {}: {}", path.display(), e))?;
    Ok(path)
}

/// Create the config directory if needed, returning it
pub fn ensure_config_dir() -> Result<PathBuf, String> {
    let dir = config_dir().ok_or_else(|| "No config directory available".to_string())?;
    ensure_dir(dir)
}

/// Create the logs directory if needed, returning it
pub fn ensure_logs_dir() -> Result<PathBuf, String> {
    ensure_dir(ensure_config_dir()?.join("logs"))
}
