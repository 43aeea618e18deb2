//! Native file dialogs.
//!
//! Each dialog is created against its parent window on the event loop
//! thread and handed back as a future, so the loop keeps running while the
//! dialog is up. The future resolves to `None` when the user cancels.

use std::future::Future;
use std::path::PathBuf;

use rfd::AsyncFileDialog;
use tao::window::Window;

use crate::services::image_loader::{DEFAULT_SAVE_NAME, OPEN_EXTENSIONS, SAVE_EXTENSIONS};

/// Ask for an image to open.
pub fn pick_image(parent: &Window) -> impl Future<Output = Option<PathBuf>> + Send + 'static {
    let dialog = AsyncFileDialog::new()
        .set_title("Open Image")
        .add_filter("Images", &OPEN_EXTENSIONS)
        .set_parent(parent)
        .pick_file();
    async move { dialog.await.map(|file| file.path().to_path_buf()) }
}

/// Ask where to save an image.
pub fn pick_save_path(parent: &Window) -> impl Future<Output = Option<PathBuf>> + Send + 'static {
    let dialog = AsyncFileDialog::new()
        .set_title("Save Image")
        .set_file_name(DEFAULT_SAVE_NAME)
        .add_filter("Images", &SAVE_EXTENSIONS)
        .set_parent(parent)
        .save_file();
    async move { dialog.await.map(|file| file.path().to_path_buf()) }
}
