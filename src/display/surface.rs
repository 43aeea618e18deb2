//! Per-window display state machine.
//!
//! A surface is created in one [`SurfaceMode`] and never changes it. It
//! consumes page intents, host events and replies, and answers with
//! [`SurfaceEffect`]s for the UI layer to carry out.

use crate::bridge::{DisplayMessage, HostEvent, HostRequest, Invocation, Reply};
use crate::types::image::ImagePayload;

use super::view::{RenderCommand, ViewEvent};
use super::zoom::ZoomLevel;

/// Which page a surface is showing, fixed at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceMode {
    Main,
    Preview,
}

impl SurfaceMode {
    /// Read the mode from a page URL query such as `mode=preview`.
    pub fn from_query(query: Option<&str>) -> Self {
        let is_preview = query
            .unwrap_or("")
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .any(|(key, value)| key == "mode" && value == "preview");
        if is_preview {
            SurfaceMode::Preview
        } else {
            SurfaceMode::Main
        }
    }

    pub fn as_query(self) -> &'static str {
        match self {
            SurfaceMode::Main => "mode=main",
            SurfaceMode::Preview => "mode=preview",
        }
    }
}

/// Output of a surface.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEffect {
    Send(DisplayMessage),
    Invoke(Invocation),
    Render(RenderCommand),
}

#[derive(Debug)]
pub struct DisplaySurface {
    mode: SurfaceMode,
    current_image: Option<ImagePayload>,
    preview_image: Option<String>,
    zoom: ZoomLevel,
    pending_open: Option<u64>,
    next_request_id: u64,
}

impl DisplaySurface {
    pub fn new(mode: SurfaceMode) -> Self {
        Self {
            mode,
            current_image: None,
            preview_image: None,
            zoom: ZoomLevel::default(),
            pending_open: None,
            next_request_id: 0,
        }
    }

    pub fn mode(&self) -> SurfaceMode {
        self.mode
    }

    pub fn current_image(&self) -> Option<&ImagePayload> {
        self.current_image.as_ref()
    }

    pub fn preview_image(&self) -> Option<&str> {
        self.preview_image.as_deref()
    }

    pub fn zoom(&self) -> ZoomLevel {
        self.zoom
    }

    /// An `image:open` request is in flight.
    pub fn is_busy(&self) -> bool {
        self.pending_open.is_some()
    }

    pub fn handle_view(&mut self, event: ViewEvent) -> Vec<SurfaceEffect> {
        if event == ViewEvent::Ready {
            return self.snapshot();
        }
        match self.mode {
            SurfaceMode::Main => self.handle_main_view(event),
            SurfaceMode::Preview => match event {
                ViewEvent::PreviewClick => vec![SurfaceEffect::Send(DisplayMessage::ClosePreview)],
                _ => Vec::new(),
            },
        }
    }

    fn handle_main_view(&mut self, event: ViewEvent) -> Vec<SurfaceEffect> {
        match event {
            ViewEvent::Minimize => vec![SurfaceEffect::Send(DisplayMessage::Minimize)],
            ViewEvent::ToggleMaximize => vec![SurfaceEffect::Send(DisplayMessage::ToggleMaximize)],
            ViewEvent::Close => vec![SurfaceEffect::Send(DisplayMessage::Close)],
            ViewEvent::About => vec![SurfaceEffect::Send(DisplayMessage::OpenAbout)],
            ViewEvent::OpenImage => {
                if self.pending_open.is_some() {
                    return Vec::new();
                }
                self.next_request_id += 1;
                let id = self.next_request_id;
                self.pending_open = Some(id);
                vec![
                    SurfaceEffect::Render(RenderCommand::SetBusy { busy: true }),
                    SurfaceEffect::Invoke(Invocation {
                        id,
                        request: HostRequest::OpenImage,
                    }),
                ]
            }
            ViewEvent::Wheel { delta_y, modifier } => {
                if self.current_image.is_none() || !modifier {
                    return Vec::new();
                }
                let next = self.zoom.apply_wheel(delta_y);
                if next == self.zoom {
                    return Vec::new();
                }
                self.zoom = next;
                vec![SurfaceEffect::Render(RenderCommand::SetZoom {
                    scale: next.value(),
                })]
            }
            ViewEvent::ContextMenu => match &self.current_image {
                Some(image) => vec![SurfaceEffect::Send(DisplayMessage::ShowContextMenu(
                    image.encoded_image.clone(),
                ))],
                None => Vec::new(),
            },
            ViewEvent::PreviewClick | ViewEvent::Ready | ViewEvent::DragWindow => Vec::new(),
        }
    }

    /// Render commands that redraw the page from current state. Sent when a
    /// page (re)loads, since scripts evaluated before that are lost.
    pub fn snapshot(&self) -> Vec<SurfaceEffect> {
        let mut effects = Vec::new();
        match self.mode {
            SurfaceMode::Main => {
                if let Some(image) = &self.current_image {
                    effects.extend(image_effects(image, self.zoom));
                }
                if self.is_busy() {
                    effects.push(SurfaceEffect::Render(RenderCommand::SetBusy { busy: true }));
                }
            }
            SurfaceMode::Preview => {
                if let Some(src) = &self.preview_image {
                    effects.push(SurfaceEffect::Render(RenderCommand::ShowImage {
                        src: src.clone(),
                    }));
                }
            }
        }
        effects
    }

    pub fn handle_host_event(&mut self, event: &HostEvent) -> Vec<SurfaceEffect> {
        match (self.mode, event) {
            (SurfaceMode::Main, HostEvent::RequestCurrentImage) => {
                let current = self.current_image.as_ref().map(|i| i.encoded_image.clone());
                vec![SurfaceEffect::Send(DisplayMessage::CurrentImage(current))]
            }
            (SurfaceMode::Preview, HostEvent::ShowPreviewImage(src)) => {
                self.preview_image = Some(src.clone());
                vec![SurfaceEffect::Render(RenderCommand::ShowImage { src: src.clone() })]
            }
            _ => Vec::new(),
        }
    }

    pub fn handle_reply(&mut self, reply: Reply) -> Vec<SurfaceEffect> {
        if self.pending_open != Some(reply.id) {
            tracing::debug!(id = reply.id, "ignoring reply with no matching request");
            return Vec::new();
        }
        self.pending_open = None;
        let mut effects = vec![SurfaceEffect::Render(RenderCommand::SetBusy { busy: false })];
        let Some(image) = reply.image else {
            return effects;
        };

        self.zoom = ZoomLevel::default();
        effects.extend(image_effects(&image, self.zoom));
        self.current_image = Some(image);
        effects
    }
}

fn image_effects(image: &ImagePayload, zoom: ZoomLevel) -> [SurfaceEffect; 3] {
    [
        SurfaceEffect::Render(RenderCommand::ShowImage {
            src: image.encoded_image.clone(),
        }),
        SurfaceEffect::Render(RenderCommand::ShowDetails {
            name: image.file_name.clone(),
            size: image.size_label(),
            dimensions: image.dimensions_label(),
        }),
        SurfaceEffect::Render(RenderCommand::SetZoom {
            scale: zoom.value(),
        }),
    ]
}
