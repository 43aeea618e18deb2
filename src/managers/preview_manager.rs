//! Preview Manager for photoview.
//!
//! Owns the optional always-on-top preview window. Opening and closing are
//! the only transitions; the handle type is whatever the UI layer uses for a
//! live window (dropping it closes the window).

/// Fixed size of the preview window in logical pixels.
pub const PREVIEW_SIZE: u32 = 200;

/// Result of a toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewTransition {
    Opened,
    Closed,
}

/// Trait defining preview window operations.
pub trait PreviewManagerTrait<H> {
    /// Close the preview if it is open, otherwise open it with `open`.
    fn toggle<E, F>(&mut self, image: &str, open: F) -> Result<PreviewTransition, E>
    where
        F: FnOnce(&str) -> Result<H, E>;
    /// Close the preview, handing back its handle for teardown.
    fn close(&mut self) -> Option<H>;
    fn is_open(&self) -> bool;
    fn handle(&self) -> Option<&H>;
    fn image(&self) -> Option<&str>;
}

/// Singleton holder for the preview window.
pub struct PreviewManager<H> {
    open: Option<(H, String)>,
}

impl<H> PreviewManager<H> {
    pub fn new() -> Self {
        Self { open: None }
    }
}

impl<H> Default for PreviewManager<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> PreviewManagerTrait<H> for PreviewManager<H> {
    fn toggle<E, F>(&mut self, image: &str, open: F) -> Result<PreviewTransition, E>
    where
        F: FnOnce(&str) -> Result<H, E>,
    {
        if self.open.take().is_some() {
            tracing::info!("preview window closed by toggle");
            return Ok(PreviewTransition::Closed);
        }
        let handle = open(image)?;
        self.open = Some((handle, image.to_string()));
        tracing::info!("preview window opened");
        Ok(PreviewTransition::Opened)
    }

    fn close(&mut self) -> Option<H> {
        self.open.take().map(|(handle, _)| handle)
    }

    fn is_open(&self) -> bool {
        self.open.is_some()
    }

    fn handle(&self) -> Option<&H> {
        self.open.as_ref().map(|(handle, _)| handle)
    }

    fn image(&self) -> Option<&str> {
        self.open.as_ref().map(|(_, image)| image.as_str())
    }
}
