//! The host-rendered context menu shown on right-click over an image.

use muda::{ContextMenu, Menu, MenuItem};
use tao::window::Window;

use crate::types::errors::UiError;

pub const SAVE_IMAGE_AS_ID: &str = "save-image-as";

pub struct ImageContextMenu {
    menu: Menu,
}

impl ImageContextMenu {
    pub fn new() -> Result<Self, UiError> {
        let menu = Menu::new();
        let save = MenuItem::with_id(SAVE_IMAGE_AS_ID, "Save Image As…", true, None);
        menu.append(&save)
            .map_err(|e| UiError::Window(format!("context menu: {}", e)))?;
        Ok(Self { menu })
    }

    /// Pop the menu up at the cursor over `window`.
    pub fn show(&self, window: &Window) {
        #[cfg(target_os = "linux")]
        {
            use tao::platform::unix::WindowExtUnix;
            self.menu
                .show_context_menu_for_gtk_window(window.gtk_window().as_ref(), None);
        }
        #[cfg(target_os = "windows")]
        {
            use tao::platform::windows::WindowExtWindows;
            unsafe {
                self.menu.show_context_menu_for_hwnd(window.hwnd() as _, None);
            }
        }
        #[cfg(target_os = "macos")]
        {
            use tao::platform::macos::WindowExtMacOS;
            unsafe {
                self.menu.show_context_menu_for_nsview(window.ns_view() as _, None);
            }
        }
    }
}
