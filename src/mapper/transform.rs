//! Linear mapping from calibrated geographic space to image pixels.

use crate::calibration::{CalibrationCorners, GeoPoint};

/// Integer pixel position; may lie outside the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelPosition {
    pub x: i64,
    pub y: i64,
}

impl PixelPosition {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Whether the position is inside `[0, width) x [0, height)`.
    pub fn is_within(&self, width: u32, height: u32) -> bool {
        (0..i64::from(width)).contains(&self.x) && (0..i64::from(height)).contains(&self.y)
    }
}

/// Interpolates between the left-top corner (pixel origin) and the
/// right-bottom corner (pixel extent).
///
/// Degenerate corners (equal longitude or latitude) are not guarded against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoTransform {
    origin: GeoPoint,
    extent: GeoPoint,
    width: u32,
    height: u32,
}

impl GeoTransform {
    pub fn new(corners: &CalibrationCorners, width: u32, height: u32) -> Self {
        Self {
            origin: corners.left_top,
            extent: corners.right_bottom,
            width,
            height,
        }
    }

    /// Fractional pixel coordinates; infinite or NaN for degenerate corners.
    pub fn project(&self, point: GeoPoint) -> (f64, f64) {
        let x = (point.lon - self.origin.lon) / (self.extent.lon - self.origin.lon)
            * f64::from(self.width);
        let y = (point.lat - self.origin.lat) / (self.extent.lat - self.origin.lat)
            * f64::from(self.height);
        (x, y)
    }

    /// Pixel coordinates truncated toward zero.
    ///
    /// The right-bottom corner lands on `(width, height)`, one past the last
    /// pixel. Returns `None` when the projection is not finite.
    pub fn to_pixel(&self, point: GeoPoint) -> Option<PixelPosition> {
        let (x, y) = self.project(point);
        if !x.is_finite() || !y.is_finite() {
            return None;
        }
        Some(PixelPosition::new(x.trunc() as i64, y.trunc() as i64))
    }

    pub fn image_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}
