//! Shared geometry calculations for annotations
//!
//! This module contains constants and math shared between the drawing
//! tools and the decorator.

use crate::domain::{LatLng, Projection, ScreenPoint};

/// Arrow head constants for the arrow drawing tool
pub mod arrow {
    /// Half of the head's base in pixels
    pub const HALF_WIDTH: f64 = 10.0;
    /// Head height in pixels
    pub const HEIGHT: f64 = 20.0;
    /// Icon box size in pixels
    pub const ICON_SIZE: (f64, f64) = (20.0, 20.0);
    /// Pixel of the icon that sits on the arrow's end point
    pub const ANCHOR: (f64, f64) = (10.0, 13.0);
    /// Rotation pivot as a fraction of the glyph box
    pub const PIVOT: (f64, f64) = (0.5, 0.66);
    /// A triangle drawn pointing up needs this extra turn to follow a bearing
    pub const BEARING_OFFSET: f64 = 90.0;
}

/// Polygon preview constants
pub mod preview {
    pub const OPACITY: f32 = 0.5;
    pub const DASH: &str = "5, 5";
}

/// Screen-space bearing from `from` to `to` in degrees
pub fn screen_bearing(projection: &impl Projection, from: LatLng, to: LatLng) -> f64 {
    projection.project(from).bearing_to(projection.project(to))
}

/// Rotate `p` clockwise (y pointing down) by `degrees` around `pivot`
pub fn rotate_about(p: ScreenPoint, pivot: ScreenPoint, degrees: f64) -> ScreenPoint {
    let (sin, cos) = degrees.to_radians().sin_cos();
    let dx = p.x - pivot.x;
    let dy = p.y - pivot.y;
    ScreenPoint::new(pivot.x + dx * cos - dy * sin, pivot.y + dx * sin + dy * cos)
}

/// Vertices of an upward triangle glyph placed with its icon anchor on `at`
/// and rotated around its pivot
///
/// Returns (apex, base_left, base_right).
pub fn triangle_points(
    at: ScreenPoint,
    half_width: f64,
    height: f64,
    anchor: (f64, f64),
    rotation: f64,
) -> (ScreenPoint, ScreenPoint, ScreenPoint) {
    // Glyph box top-left in screen space
    let ox = at.x - anchor.0;
    let oy = at.y - anchor.1;
    let pivot = ScreenPoint::new(
        ox + 2.0 * half_width * arrow::PIVOT.0,
        oy + height * arrow::PIVOT.1,
    );

    let apex = ScreenPoint::new(ox + half_width, oy);
    let left = ScreenPoint::new(ox, oy + height);
    let right = ScreenPoint::new(ox + 2.0 * half_width, oy + height);

    (
        rotate_about(apex, pivot, rotation),
        rotate_about(left, pivot, rotation),
        rotate_about(right, pivot, rotation),
    )
}
