//! photoview UI layer.
//!
//! Uses `wry` for cross-platform WebView rendering:
//! - Windows: WebView2
//! - Linux: WebKitGTK
//! - macOS: WKWebView
//!
//! Each window hosts one page served from the `pv://` custom protocol. Pages
//! talk to Rust through `window.ipc.postMessage()`; Rust talks back with
//! `evaluate_script`. Native pieces (dialogs, context menu, global hotkeys)
//! come from `rfd`, `muda` and `global-hotkey`.

pub mod context_menu;
pub mod dialogs;
pub mod host_app;
pub mod hotkeys;
pub mod pages;
