//! Messages between a webview page and its [`DisplaySurface`](super::DisplaySurface).
//!
//! The page only reports raw user intents and applies render commands; all
//! state lives on the Rust side.

use serde::{Deserialize, Serialize};

/// A user intent reported by the page via `window.ipc.postMessage`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ViewEvent {
    /// The page finished loading and can take render commands.
    Ready,
    /// Mouse down on the title bar of a frameless window.
    DragWindow,
    Minimize,
    ToggleMaximize,
    Close,
    OpenImage,
    About,
    /// Wheel over the image area; `modifier` is the zoom key (Ctrl).
    Wheel {
        #[serde(rename = "deltaY")]
        delta_y: f64,
        modifier: bool,
    },
    ContextMenu,
    PreviewClick,
}

impl ViewEvent {
    /// Decode a page message, dropping anything unrecognised.
    pub fn parse(raw: &str) -> Option<ViewEvent> {
        match serde_json::from_str(raw) {
            Ok(event) => Some(event),
            Err(e) => {
                tracing::debug!(error = %e, "dropping unknown view event");
                None
            }
        }
    }
}

/// Something the page should draw.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum RenderCommand {
    ShowImage {
        src: String,
    },
    ShowDetails {
        name: String,
        size: String,
        dimensions: String,
    },
    SetZoom {
        scale: f64,
    },
    SetBusy {
        busy: bool,
    },
}

impl RenderCommand {
    /// Script that applies this command inside the page.
    pub fn to_script(&self) -> String {
        let json = serde_json::to_string(self).unwrap_or_else(|_| "null".to_string());
        format!("if(window.__pv)window.__pv.render({})", json)
    }
}
