// Canvas camera driven by pinch transitions and the zoom buttons
use crate::gesture::GestureState;

pub const MIN_ZOOM: f64 = 0.25;
pub const MAX_ZOOM: f64 = 8.0;

/// Zoom as a whole percentage for display.
pub fn zoom_percent(zoom: f64) -> u32 {
    (zoom * 100.0).round() as u32
}

pub fn can_zoom_in(zoom: f64) -> bool {
    zoom < MAX_ZOOM
}

pub fn can_zoom_out(zoom: f64) -> bool {
    zoom > MIN_ZOOM
}

#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub zoom: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    pub initialized: bool,
    /// Zoom when the running pinch began; `None` outside a pinch.
    pinch_base: Option<f64>,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
            initialized: false,
            pinch_base: None,
        }
    }
}

impl Camera {
    pub fn pinching(&self) -> bool {
        self.pinch_base.is_some()
    }

    /// Zoom to `zoom` keeping the world point under (ax, ay) fixed.
    pub fn zoom_about(&mut self, zoom: f64, ax: f64, ay: f64) {
        let zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        let ratio = zoom / self.zoom;
        self.offset_x = ax - (ax - self.offset_x) * ratio;
        self.offset_y = ay - (ay - self.offset_y) * ratio;
        self.zoom = zoom;
    }

    /// Follow a pinch: zoom is the base zoom times the gesture's cumulative
    /// scale. A cancelled pinch snaps back to where it started.
    pub fn apply_pinch(&mut self, state: GestureState, scale: f64, ax: f64, ay: f64) {
        match state {
            GestureState::Began => {
                self.pinch_base = Some(self.zoom);
                self.zoom_about(self.zoom * scale, ax, ay);
            }
            GestureState::Changed => {
                if let Some(base) = self.pinch_base {
                    self.zoom_about(base * scale, ax, ay);
                }
            }
            GestureState::Cancelled => {
                if let Some(base) = self.pinch_base.take() {
                    self.zoom_about(base, ax, ay);
                }
            }
            GestureState::Ended | GestureState::Failed => self.pinch_base = None,
            GestureState::Possible => {}
        }
    }

    pub fn center_on(&mut self, wx: f64, wy: f64, width: f64, height: f64) {
        self.offset_x = width * 0.5 - self.zoom * wx;
        self.offset_y = height * 0.5 - self.zoom * wy;
        self.initialized = true;
    }
}
