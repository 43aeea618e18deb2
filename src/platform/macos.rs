// photoview platform paths for macOS
// Config: ~/Library/Application Support/Photoview
// Data:   ~/Library/Application Support/Photoview

use std::env;
use std::path::PathBuf;

fn app_support_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
        .join("Library")
        .join("Application Support")
        .join("Photoview")
}

/// `~/Library/Application Support/Photoview`
pub fn get_config_dir() -> PathBuf {
    app_support_dir()
}

/// `~/Library/Application Support/Photoview`
pub fn get_data_dir() -> PathBuf {
    app_support_dir()
}
