//! Geographic and screen-space coordinate types

use geo::{Coord, HaversineDistance, Point};
use serde::{Deserialize, Serialize};

/// Initial map centre
pub const LITHUANIA_CENTER: LatLng = LatLng {
    lat: 55.17,
    lon: 23.88,
};

/// Initial map zoom
pub const DEFAULT_ZOOM: f64 = 8.0;

/// Geographic coordinate in degrees
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lon: f64,
}

impl LatLng {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Great-circle distance in metres
    pub fn distance_to(&self, other: LatLng) -> f64 {
        Point::from(*self).haversine_distance(&Point::from(other))
    }
}

impl From<LatLng> for Point<f64> {
    fn from(p: LatLng) -> Self {
        Point::new(p.lon, p.lat)
    }
}

impl From<LatLng> for Coord<f64> {
    fn from(p: LatLng) -> Self {
        Coord { x: p.lon, y: p.lat }
    }
}

impl From<Coord<f64>> for LatLng {
    fn from(c: Coord<f64>) -> Self {
        Self { lat: c.y, lon: c.x }
    }
}

/// Axis-aligned geographic bounds
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LatLngBounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl LatLngBounds {
    /// Bounds spanning two arbitrary corners
    pub fn from_corners(a: LatLng, b: LatLng) -> Self {
        let (south, north) = if a.lat < b.lat {
            (a.lat, b.lat)
        } else {
            (b.lat, a.lat)
        };
        let (west, east) = if a.lon < b.lon {
            (a.lon, b.lon)
        } else {
            (b.lon, a.lon)
        };
        Self {
            south,
            west,
            north,
            east,
        }
    }

    pub fn lat_span(&self) -> f64 {
        (self.north - self.south).abs()
    }

    pub fn lon_span(&self) -> f64 {
        (self.east - self.west).abs()
    }

    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.south + self.north) * 0.5,
            (self.west + self.east) * 0.5,
        )
    }

    /// Check if the bounds contain a coordinate (edges inclusive)
    pub fn contains(&self, p: LatLng) -> bool {
        p.lat >= self.south && p.lat <= self.north && p.lon >= self.west && p.lon <= self.east
    }
}

/// Pixel position in the map's layer space
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: ScreenPoint) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Bearing towards `other` in degrees, measured like `atan2(dy, dx)`
    /// with y pointing down
    pub fn bearing_to(&self, other: ScreenPoint) -> f64 {
        (other.y - self.y).atan2(other.x - self.x).to_degrees()
    }
}

/// Conversion from geographic to screen coordinates
pub trait Projection {
    fn project(&self, p: LatLng) -> ScreenPoint;
}

/// Spherical Web-Mercator with 256 px tiles, as used by slippy-map widgets
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WebMercator {
    pub zoom: f64,
}

impl WebMercator {
    const MAX_LATITUDE: f64 = 85.051_128_779_806_6;
    const TILE_SIZE: f64 = 256.0;

    pub fn new(zoom: f64) -> Self {
        Self { zoom }
    }

    fn scale(&self) -> f64 {
        Self::TILE_SIZE * 2f64.powf(self.zoom)
    }
}

impl Default for WebMercator {
    fn default() -> Self {
        Self::new(DEFAULT_ZOOM)
    }
}

impl Projection for WebMercator {
    fn project(&self, p: LatLng) -> ScreenPoint {
        let lat = p
            .lat
            .clamp(-Self::MAX_LATITUDE, Self::MAX_LATITUDE)
            .to_radians();
        let x = p.lon / 360.0 + 0.5;
        let y = 0.5 - (std::f64::consts::FRAC_PI_4 + lat / 2.0).tan().ln() / std::f64::consts::TAU;
        let scale = self.scale();
        ScreenPoint::new(x * scale, y * scale)
    }
}

/// Map viewport the host should show
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MapView {
    /// Centre on a coordinate at a zoom level
    Center(LatLng, f64),
    /// Fit the given bounds
    Fit(LatLngBounds),
}

impl Default for MapView {
    fn default() -> Self {
        MapView::Center(LITHUANIA_CENTER, DEFAULT_ZOOM)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_from_corners_normalizes() {
        let b = LatLngBounds::from_corners(LatLng::new(55.0, 25.0), LatLng::new(54.0, 23.0));
        assert_eq!(b.south, 54.0);
        assert_eq!(b.north, 55.0);
        assert_eq!(b.west, 23.0);
        assert_eq!(b.east, 25.0);
        assert!(b.contains(LatLng::new(54.5, 24.0)));
        assert!(!b.contains(LatLng::new(56.0, 24.0)));
    }

    #[test]
    fn test_web_mercator_origin_and_doubling() {
        let z0 = WebMercator::new(0.0);
        let p = z0.project(LatLng::new(0.0, 0.0));
        assert!((p.x - 128.0).abs() < 1e-9);
        assert!((p.y - 128.0).abs() < 1e-9);

        let a = LatLng::new(55.0, 24.0);
        let b = LatLng::new(55.0, 25.0);
        let d8 = WebMercator::new(8.0).project(a).distance_to(WebMercator::new(8.0).project(b));
        let d9 = WebMercator::new(9.0).project(a).distance_to(WebMercator::new(9.0).project(b));
        assert!((d9 / d8 - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_north_is_up_on_screen() {
        let proj = WebMercator::default();
        let south = proj.project(LatLng::new(54.0, 24.0));
        let north = proj.project(LatLng::new(56.0, 24.0));
        assert!(north.y < south.y);
        assert!((south.bearing_to(north) + 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_haversine_distance_one_degree_latitude() {
        let d = LatLng::new(55.0, 24.0).distance_to(LatLng::new(56.0, 24.0));
        assert!((d - 111_195.0).abs() < 200.0, "got {d}");
    }
}
