use std::fmt;

// === ImageError ===

/// Errors raised while loading, encoding or saving an image.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageError {
    /// The file could not be read or written.
    Io(String),
    /// The bytes are not an image format the dimension sniffer understands.
    UnsupportedFormat(String),
    /// The encoded image string is not a base64 data URL.
    InvalidDataUrl(String),
    /// A background task panicked or was cancelled.
    Task(String),
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageError::Io(msg) => write!(f, "Image I/O error: {}", msg),
            ImageError::UnsupportedFormat(msg) => write!(f, "Unsupported image format: {}", msg),
            ImageError::InvalidDataUrl(msg) => write!(f, "Invalid data URL: {}", msg),
            ImageError::Task(msg) => write!(f, "Image task failed: {}", msg),
        }
    }
}

impl std::error::Error for ImageError {}

// === WindowStateError ===

/// Errors related to persisting the main window's bounds.
#[derive(Debug, Clone, PartialEq)]
pub enum WindowStateError {
    /// Reading or writing the state file failed.
    IoError(String),
    /// The state file could not be serialized or parsed.
    SerializationError(String),
}

impl fmt::Display for WindowStateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowStateError::IoError(msg) => write!(f, "Window state I/O error: {}", msg),
            WindowStateError::SerializationError(msg) => {
                write!(f, "Window state serialization error: {}", msg)
            }
        }
    }
}

impl std::error::Error for WindowStateError {}

// === ShortcutError ===

/// Errors related to global shortcut registration.
#[derive(Debug, Clone, PartialEq)]
pub enum ShortcutError {
    /// The platform refused to register a key combination.
    Registration(String),
    /// The platform refused to release a key combination.
    Unregistration(String),
}

impl fmt::Display for ShortcutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShortcutError::Registration(keys) => {
                write!(f, "Failed to register shortcut: {}", keys)
            }
            ShortcutError::Unregistration(keys) => {
                write!(f, "Failed to unregister shortcut: {}", keys)
            }
        }
    }
}

impl std::error::Error for ShortcutError {}

// === UiError ===

/// Errors raised while setting up the windowing layer.
#[derive(Debug, Clone, PartialEq)]
pub enum UiError {
    /// The event loop or a platform service could not be initialized.
    EventLoop(String),
    /// A native window could not be created.
    Window(String),
    /// A webview could not be attached to its window.
    WebView(String),
    /// The background runtime could not be started.
    Runtime(String),
}

impl fmt::Display for UiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UiError::EventLoop(msg) => write!(f, "Event loop error: {}", msg),
            UiError::Window(msg) => write!(f, "Window creation failed: {}", msg),
            UiError::WebView(msg) => write!(f, "WebView creation failed: {}", msg),
            UiError::Runtime(msg) => write!(f, "Runtime error: {}", msg),
        }
    }
}

impl std::error::Error for UiError {}
