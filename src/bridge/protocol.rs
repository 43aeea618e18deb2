//! The closed message set allowed between the host and a display surface.
//!
//! Each direction is a serde-tagged enum serialized as
//! `{"channel": <name>, "data": <value>}`. A channel name that is not a
//! variant simply fails to deserialize, which is how the allow-list is
//! enforced.

use serde::{Deserialize, Serialize};

use crate::types::image::ImagePayload;

/// Fire-and-forget messages from a display surface to the host.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "channel", content = "data")]
pub enum DisplayMessage {
    #[serde(rename = "window:minimize")]
    Minimize,
    #[serde(rename = "window:toggle-maximize")]
    ToggleMaximize,
    #[serde(rename = "window:close")]
    Close,
    /// Answer to [`HostEvent::RequestCurrentImage`].
    #[serde(rename = "preview:current-image")]
    CurrentImage(Option<String>),
    #[serde(rename = "about:open")]
    OpenAbout,
    #[serde(rename = "preview:close")]
    ClosePreview,
    /// Carries the data URL of the image that was right-clicked.
    #[serde(rename = "image:context-menu")]
    ShowContextMenu(String),
}

/// Request/response calls from a display surface to the host.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "channel")]
pub enum HostRequest {
    #[serde(rename = "image:open")]
    OpenImage,
}

/// A [`HostRequest`] tagged with the id its [`Reply`] will carry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Invocation {
    pub id: u64,
    pub request: HostRequest,
}

/// Host answer to an [`Invocation`]. `image` is `None` when the dialog was cancelled.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Reply {
    pub id: u64,
    pub image: Option<ImagePayload>,
}

/// Fire-and-forget messages from the host to a display surface.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "channel", content = "data")]
pub enum HostEvent {
    /// Pull: the surface should answer with [`DisplayMessage::CurrentImage`].
    #[serde(rename = "preview:request-image")]
    RequestCurrentImage,
    #[serde(rename = "preview:show-image")]
    ShowPreviewImage(String),
}

/// Subscription key for [`HostEvent`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostChannel {
    RequestCurrentImage,
    ShowPreviewImage,
}

impl HostEvent {
    pub fn channel(&self) -> HostChannel {
        match self {
            HostEvent::RequestCurrentImage => HostChannel::RequestCurrentImage,
            HostEvent::ShowPreviewImage(_) => HostChannel::ShowPreviewImage,
        }
    }
}
