//! Screen-to-document coordinate mapping.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 10.0;

/// Where the document sits on screen: `screen = document * zoom + pan`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub pan_x: f64,
    pub pan_y: f64,
    /// Zoom level (1.0 = 100%)
    pub zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            pan_x: 0.0,
            pan_y: 0.0,
            zoom: 1.0,
        }
    }
}

impl Viewport {
    /// Map a pointer position to document space. No clamping is applied.
    pub fn to_document(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.pan_x) / self.zoom,
            y: (screen.y - self.pan_y) / self.zoom,
        }
    }

    pub fn to_screen(&self, doc: Point) -> Point {
        Point {
            x: doc.x * self.zoom + self.pan_x,
            y: doc.y * self.zoom + self.pan_y,
        }
    }

    /// Shift the view. Moves that would leave the offset non-finite are ignored.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        let (x, y) = (self.pan_x + dx, self.pan_y + dy);
        if x.is_finite() && y.is_finite() {
            self.pan_x = x;
            self.pan_y = y;
        }
    }

    /// Set the zoom, clamped to `MIN_ZOOM..=MAX_ZOOM`. NaN is ignored.
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom.is_nan() {
            return;
        }
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_by_default() {
        let vp = Viewport::default();
        assert_eq!(vp.to_document(Point::new(12.0, 34.0)), Point::new(12.0, 34.0));
    }

    #[test]
    fn test_pan_and_zoom_inverse() {
        let mut vp = Viewport::default();
        vp.pan(100.0, 50.0);
        vp.set_zoom(2.0);
        let doc = vp.to_document(Point::new(140.0, 90.0));
        assert_eq!(doc, Point::new(20.0, 20.0));
        assert_eq!(vp.to_screen(doc), Point::new(140.0, 90.0));
    }

    #[test]
    fn test_out_of_canvas_not_clamped() {
        let mut vp = Viewport::default();
        vp.pan(10.0, 10.0);
        assert_eq!(vp.to_document(Point::new(-500.0, 0.0)), Point::new(-510.0, -10.0));
    }

    #[test]
    fn test_zoom_bounds() {
        let mut vp = Viewport::default();
        vp.set_zoom(0.0);
        assert_eq!(vp.zoom, MIN_ZOOM);
        vp.set_zoom(1000.0);
        assert_eq!(vp.zoom, MAX_ZOOM);
        vp.set_zoom(f64::INFINITY);
        assert_eq!(vp.zoom, MAX_ZOOM);
    }

    #[test]
    fn test_non_finite_input_ignored() {
        let mut vp = Viewport::default();
        vp.set_zoom(f64::NAN);
        assert_eq!(vp.zoom, 1.0);
        vp.pan(f64::NAN, 5.0);
        vp.pan(f64::INFINITY, 0.0);
        assert_eq!((vp.pan_x, vp.pan_y), (0.0, 0.0));
        vp.pan(f64::MAX, 0.0);
        vp.pan(f64::MAX, 0.0);
        assert_eq!(vp.pan_x, f64::MAX);

        let p = vp.to_document(Point::new(10.0, 10.0));
        assert!(p.x.is_finite() && p.y.is_finite());
    }
}
