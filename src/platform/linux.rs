// photoview platform paths for Linux
// Config: ~/.config/photoview
// Data:   ~/.local/share/photoview

use std::env;
use std::path::PathBuf;

fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

/// Uses `$XDG_CONFIG_HOME/photoview` if set, otherwise `~/.config/photoview`.
pub fn get_config_dir() -> PathBuf {
    match env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg).join("photoview"),
        _ => home_dir().join(".config").join("photoview"),
    }
}

/// Uses `$XDG_DATA_HOME/photoview` if set, otherwise `~/.local/share/photoview`.
pub fn get_data_dir() -> PathBuf {
    match env::var("XDG_DATA_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg).join("photoview"),
        _ => home_dir().join(".local").join("share").join("photoview"),
    }
}
