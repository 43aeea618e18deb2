// photoview state managers
// Managers own host-side state and policy: global shortcuts, the preview window, window placement.

pub mod preview_manager;
pub mod shortcut_manager;
pub mod window_layout;
