/// Smallest scale the viewer allows.
pub const MIN_ZOOM: f64 = 0.1;
/// Scale change per wheel tick.
pub const ZOOM_STEP: f64 = 0.1;

/// Uniform scale applied to the displayed image.
///
/// Values stay on the 0.1 grid so repeated steps never drift below the floor.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct ZoomLevel(f64);

impl ZoomLevel {
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self::default();
        }
        Self(snap(value).max(MIN_ZOOM))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn zoom_in(self) -> Self {
        Self::new(self.0 + ZOOM_STEP)
    }

    pub fn zoom_out(self) -> Self {
        Self::new(self.0 - ZOOM_STEP)
    }

    /// One wheel tick: scrolling down (`delta_y > 0`) zooms out, up zooms in.
    pub fn apply_wheel(self, delta_y: f64) -> Self {
        if delta_y > 0.0 {
            self.zoom_out()
        } else if delta_y < 0.0 {
            self.zoom_in()
        } else {
            self
        }
    }
}

impl Default for ZoomLevel {
    fn default() -> Self {
        Self(1.0)
    }
}

fn snap(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
