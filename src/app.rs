//! Host controller core for photoview.
//!
//! Owns every host-side decision without touching a real window: bridge
//! messages and shortcut presses go in, [`HostAction`]s come out, and the UI
//! layer carries them out. File work is exposed as async functions so the UI
//! can run it on the runtime while the event loop keeps going.

use std::future::Future;
use std::path::{Path, PathBuf};

use crate::bridge::{DisplayMessage, HostEvent, Reply};
use crate::display::SurfaceMode;
use crate::managers::shortcut_manager::{
    HotkeyRegistrar, ShortcutAction, ShortcutManager, ShortcutManagerTrait,
};
use crate::managers::window_layout;
use crate::services::image_loader;
use crate::services::window_state::{WindowStateStore, WindowStateStoreTrait};
use crate::types::errors::{ImageError, ShortcutError};
use crate::types::image::ImagePayload;
use crate::types::window::{Placement, WindowBounds};

/// An instruction for the UI layer.
#[derive(Debug, Clone, PartialEq)]
pub enum HostAction {
    Minimize,
    ToggleMaximize,
    Quit,
    SetBounds(WindowBounds),
    SendToMain(HostEvent),
    TogglePreview(String),
    ClosePreview,
    ShowAbout,
    ShowContextMenu(String),
}

/// Central host state.
pub struct App {
    pub window_state: WindowStateStore,
    /// Global shortcuts, keyed by the ids `global-hotkey` hands out.
    pub shortcuts: ShortcutManager<u32>,
    /// Current-image pulls sent to the main surface and not yet answered.
    pending_pulls: u32,
}

impl App {
    /// `state_path` overrides where window bounds are persisted.
    pub fn new(state_path: Option<PathBuf>) -> Self {
        Self {
            window_state: WindowStateStore::new(state_path),
            shortcuts: ShortcutManager::new(),
            pending_pulls: 0,
        }
    }

    /// Load persisted bounds and decide where the main window opens.
    pub fn startup(&mut self, displays: &[WindowBounds]) -> Placement {
        let stored = match self.window_state.load() {
            Ok(bounds) => bounds,
            Err(e) => {
                tracing::warn!(error = %e, "ignoring unreadable window state");
                None
            }
        };
        let placement = window_layout::initial_placement(stored, displays);
        tracing::info!(?placement, "main window placement");
        placement
    }

    /// Persist the main window's bounds after a move or resize.
    pub fn record_bounds(&mut self, bounds: WindowBounds) {
        if let Err(e) = self.window_state.save_bounds(bounds) {
            tracing::error!(error = %e, "failed to persist window bounds");
        }
    }

    /// React to a fire-and-forget message from a surface.
    ///
    /// A preview surface may only ask to be closed.
    pub fn handle_display_message(
        &mut self,
        origin: SurfaceMode,
        message: DisplayMessage,
    ) -> Vec<HostAction> {
        if origin == SurfaceMode::Preview && message != DisplayMessage::ClosePreview {
            tracing::debug!(?message, "preview surface sent a main-only message");
            return Vec::new();
        }

        match message {
            DisplayMessage::Minimize => vec![HostAction::Minimize],
            DisplayMessage::ToggleMaximize => vec![HostAction::ToggleMaximize],
            DisplayMessage::Close => vec![HostAction::ClosePreview, HostAction::Quit],
            DisplayMessage::OpenAbout => vec![HostAction::ShowAbout],
            DisplayMessage::ClosePreview => vec![HostAction::ClosePreview],
            DisplayMessage::ShowContextMenu(image) => vec![HostAction::ShowContextMenu(image)],
            DisplayMessage::CurrentImage(image) => {
                let Some(remaining) = self.pending_pulls.checked_sub(1) else {
                    tracing::debug!("unsolicited current-image message");
                    return Vec::new();
                };
                self.pending_pulls = remaining;
                match image {
                    Some(image) => vec![HostAction::TogglePreview(image)],
                    None => {
                        tracing::info!("no image loaded, nothing to preview");
                        Vec::new()
                    }
                }
            }
        }
    }

    /// React to a global shortcut. `work_area` is the primary display's usable area.
    pub fn handle_shortcut(
        &mut self,
        action: ShortcutAction,
        work_area: WindowBounds,
    ) -> Vec<HostAction> {
        match action {
            ShortcutAction::TogglePreview => {
                self.pending_pulls = self.pending_pulls.saturating_add(1);
                vec![HostAction::SendToMain(HostEvent::RequestCurrentImage)]
            }
            ShortcutAction::SnapLeft => {
                vec![HostAction::SetBounds(window_layout::snap_left(&work_area))]
            }
            ShortcutAction::SnapRight => {
                vec![HostAction::SetBounds(window_layout::snap_right(&work_area))]
            }
            ShortcutAction::ResizeAndCenter => {
                vec![HostAction::SetBounds(window_layout::resize_and_center(&work_area))]
            }
        }
    }

    /// Register the fixed shortcut table with the platform.
    pub fn register_shortcuts<R>(&mut self, registrar: &mut R) -> Result<(), ShortcutError>
    where
        R: HotkeyRegistrar<Id = u32>,
    {
        self.shortcuts.register_all(registrar)
    }

    /// Release every shortcut. Called unconditionally on quit.
    pub fn release_shortcuts<R>(&mut self, registrar: &mut R)
    where
        R: HotkeyRegistrar<Id = u32>,
    {
        self.shortcuts.unregister_all(registrar);
        tracing::info!("global shortcuts released");
    }

    /// A registered hotkey fired. Unknown ids are ignored.
    pub fn handle_hotkey(&mut self, id: u32, work_area: WindowBounds) -> Vec<HostAction> {
        match self.shortcuts.action_for(id) {
            Some(action) => self.handle_shortcut(action, work_area),
            None => {
                tracing::debug!(id, "hotkey with no registered action");
                Vec::new()
            }
        }
    }

    /// The main window is gone: take the preview with it and exit.
    pub fn on_main_closed(&mut self) -> Vec<HostAction> {
        tracing::info!("main window closed");
        vec![HostAction::ClosePreview, HostAction::Quit]
    }

    /// Load the file the user picked. `None` means the dialog was cancelled.
    pub async fn open_image(path: Option<PathBuf>) -> Result<Option<ImagePayload>, ImageError> {
        match path {
            Some(path) => image_loader::load_image(&path).await.map(Some),
            None => {
                tracing::debug!("open dialog cancelled");
                Ok(None)
            }
        }
    }

    /// Write `encoded_image` to the path the user picked. `None` means cancelled.
    pub async fn save_image_as(
        path: Option<&Path>,
        encoded_image: &str,
    ) -> Result<Option<u64>, ImageError> {
        match path {
            Some(path) => image_loader::save_image(path, encoded_image).await.map(Some),
            None => Ok(None),
        }
    }

    /// Wait for the open dialog, then load whatever was picked.
    ///
    /// `picked` resolves when the user confirms or cancels; nothing here
    /// runs on the event loop.
    pub async fn open_picked<F>(request_id: u64, picked: F) -> Reply
    where
        F: Future<Output = Option<PathBuf>>,
    {
        let path = picked.await;
        Self::reply_for(request_id, Self::open_image(path).await)
    }

    /// Wait for the save dialog, then write `encoded_image` to the pick.
    pub async fn save_picked<F>(picked: F, encoded_image: String) -> Result<Option<u64>, ImageError>
    where
        F: Future<Output = Option<PathBuf>>,
    {
        let path = picked.await;
        Self::save_image_as(path.as_deref(), &encoded_image).await
    }

    /// Turn an open result into the reply sent back to the surface.
    ///
    /// Failures are logged and answered with an empty reply so the surface
    /// never waits forever.
    pub fn reply_for(id: u64, result: Result<Option<ImagePayload>, ImageError>) -> Reply {
        let image = result.unwrap_or_else(|e| {
            tracing::error!(error = %e, "failed to open image");
            None
        });
        Reply { id, image }
    }
}
