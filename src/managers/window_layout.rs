// photoview window placement
// Stateless geometry for the snap and resize shortcuts and for startup placement.

use crate::types::window::{Placement, WindowBounds, DEFAULT_HEIGHT, DEFAULT_WIDTH};

/// Left half of the work area, full height.
pub fn snap_left(work_area: &WindowBounds) -> WindowBounds {
    WindowBounds {
        x: work_area.x,
        y: work_area.y,
        width: work_area.width / 2,
        height: work_area.height,
    }
}

/// Right half of the work area, full height.
pub fn snap_right(work_area: &WindowBounds) -> WindowBounds {
    let half = work_area.width / 2;
    WindowBounds {
        x: work_area.x + half as i32,
        y: work_area.y,
        width: half,
        height: work_area.height,
    }
}

/// Two thirds of the work area in each dimension, centered.
pub fn resize_and_center(work_area: &WindowBounds) -> WindowBounds {
    let width = (work_area.width as u64 * 2 / 3) as u32;
    let height = (work_area.height as u64 * 2 / 3) as u32;
    work_area.centered(width, height)
}

/// Stored bounds are usable only if some display fully contains them.
pub fn is_on_screen(bounds: &WindowBounds, displays: &[WindowBounds]) -> bool {
    displays.iter().any(|display| display.contains(bounds))
}

/// Decide where the main window opens.
pub fn initial_placement(stored: Option<WindowBounds>, displays: &[WindowBounds]) -> Placement {
    match stored {
        Some(bounds) if bounds.is_valid() && is_on_screen(&bounds, displays) => {
            Placement::Restore(bounds)
        }
        Some(bounds) if bounds.is_valid() => Placement::Center {
            width: bounds.width,
            height: bounds.height,
        },
        _ => Placement::Center {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        },
    }
}
