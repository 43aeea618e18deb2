use serde::{Deserialize, Serialize};

/// Window position and size in physical pixels.
///
/// Also used for display areas, where `x`/`y` is the display origin.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct WindowBounds {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl WindowBounds {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Both dimensions are non-zero.
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    fn right(&self) -> i64 {
        self.x as i64 + self.width as i64
    }

    fn bottom(&self) -> i64 {
        self.y as i64 + self.height as i64
    }

    /// `other` lies entirely within `self`.
    pub fn contains(&self, other: &WindowBounds) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// A window of `width` x `height` centered inside `self`.
    pub fn centered(&self, width: u32, height: u32) -> WindowBounds {
        let x = self.x as i64 + (self.width as i64 - width as i64) / 2;
        let y = self.y as i64 + (self.height as i64 - height as i64) / 2;
        WindowBounds {
            x: x as i32,
            y: y as i32,
            width,
            height,
        }
    }
}

/// Where the main window should appear at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Restore stored bounds as-is.
    Restore(WindowBounds),
    /// Use this size, centered on the primary display.
    Center { width: u32, height: u32 },
}

pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_HEIGHT: u32 = 600;
