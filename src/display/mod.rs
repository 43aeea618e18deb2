//! Display surfaces: the state behind each webview page.
//!
//! A surface never touches the filesystem or the OS. It reaches the host
//! only through [`crate::bridge`] messages and reaches its page only through
//! [`RenderCommand`]s.

pub mod surface;
pub mod view;
pub mod zoom;

pub use surface::{DisplaySurface, SurfaceEffect, SurfaceMode};
pub use view::{RenderCommand, ViewEvent};
pub use zoom::ZoomLevel;
