// photoview platform abstraction
// Provides platform-specific config and data directories for Windows, macOS, and Linux.
//
// `PHOTOVIEW_CONFIG_DIR` and `PHOTOVIEW_DATA_DIR` override the defaults on every platform.

use std::env;
use std::path::PathBuf;

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "macos")]
mod macos;

#[cfg(target_os = "windows")]
mod windows;

pub const CONFIG_DIR_ENV: &str = "PHOTOVIEW_CONFIG_DIR";
pub const DATA_DIR_ENV: &str = "PHOTOVIEW_DATA_DIR";

fn env_override(name: &str) -> Option<PathBuf> {
    env::var_os(name)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Directory holding `window-state.json`.
///
/// - **Linux**: `~/.config/photoview` (or `$XDG_CONFIG_HOME/photoview`)
/// - **macOS**: `~/Library/Application Support/Photoview`
/// - **Windows**: `%APPDATA%/Photoview`
pub fn get_config_dir() -> PathBuf {
    if let Some(dir) = env_override(CONFIG_DIR_ENV) {
        return dir;
    }
    #[cfg(target_os = "linux")]
    {
        linux::get_config_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_config_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_config_dir()
    }
}

/// Directory holding logs.
///
/// - **Linux**: `~/.local/share/photoview` (or `$XDG_DATA_HOME/photoview`)
/// - **macOS**: `~/Library/Application Support/Photoview`
/// - **Windows**: `%LOCALAPPDATA%/Photoview`
pub fn get_data_dir() -> PathBuf {
    if let Some(dir) = env_override(DATA_DIR_ENV) {
        return dir;
    }
    #[cfg(target_os = "linux")]
    {
        linux::get_data_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_data_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_data_dir()
    }
}
