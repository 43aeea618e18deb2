// photoview Window State Store
// Persists the main window's last bounds so the next launch can restore its placement.
// Stored as a small JSON file at the platform-specific config path.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::platform;
use crate::types::errors::WindowStateError;
use crate::types::window::WindowBounds;

pub const STATE_FILE_NAME: &str = "window-state.json";

/// On-disk layout of the state file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    #[serde(default)]
    pub window_bounds: Option<WindowBounds>,
}

/// Trait defining the window state store interface.
pub trait WindowStateStoreTrait {
    fn load(&mut self) -> Result<Option<WindowBounds>, WindowStateError>;
    fn save_bounds(&mut self, bounds: WindowBounds) -> Result<(), WindowStateError>;
    fn bounds(&self) -> Option<WindowBounds>;
    fn path(&self) -> &Path;
}

/// JSON-file backed store for [`PersistedState`].
pub struct WindowStateStore {
    path: PathBuf,
    state: PersistedState,
}

impl WindowStateStore {
    /// Creates a store.
    ///
    /// If `path_override` is `Some`, that file is used. Otherwise the file
    /// lives in the platform config directory.
    pub fn new(path_override: Option<PathBuf>) -> Self {
        let path = path_override.unwrap_or_else(|| platform::get_config_dir().join(STATE_FILE_NAME));
        Self {
            path,
            state: PersistedState::default(),
        }
    }

    fn write(&self) -> Result<(), WindowStateError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                WindowStateError::IoError(format!("Failed to create config directory: {}", e))
            })?;
        }

        let json = serde_json::to_string_pretty(&self.state).map_err(|e| {
            WindowStateError::SerializationError(format!("Failed to serialize state: {}", e))
        })?;

        fs::write(&self.path, json)
            .map_err(|e| WindowStateError::IoError(format!("Failed to write state file: {}", e)))
    }
}

impl WindowStateStoreTrait for WindowStateStore {
    /// Loads the state file.
    ///
    /// A missing file is not an error and yields `None`. Bounds with a zero
    /// dimension are discarded.
    fn load(&mut self) -> Result<Option<WindowBounds>, WindowStateError> {
        if !self.path.exists() {
            self.state = PersistedState::default();
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)
            .map_err(|e| WindowStateError::IoError(format!("Failed to read state file: {}", e)))?;

        let mut state: PersistedState = serde_json::from_str(&content).map_err(|e| {
            WindowStateError::SerializationError(format!("Failed to parse state file: {}", e))
        })?;
        state.window_bounds = state.window_bounds.filter(WindowBounds::is_valid);

        self.state = state;
        Ok(self.state.window_bounds)
    }

    /// Records new bounds and writes the file immediately.
    fn save_bounds(&mut self, bounds: WindowBounds) -> Result<(), WindowStateError> {
        if !bounds.is_valid() || self.state.window_bounds == Some(bounds) {
            return Ok(());
        }
        self.state.window_bounds = Some(bounds);
        self.write()
    }

    fn bounds(&self) -> Option<WindowBounds> {
        self.state.window_bounds
    }

    fn path(&self) -> &Path {
        &self.path
    }
}
