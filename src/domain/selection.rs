//! Searched locations and their highlight overlays

use crate::config::ShapeColor;
use crate::domain::geometry::{LatLng, LatLngBounds, MapView};

/// Bounding boxes wider than this (degrees, either axis) become rectangles
pub const RECTANGLE_SPAN_THRESHOLD: f64 = 0.5;

/// Zoom used when a location has no bounding box
pub const LOCATION_ZOOM: f64 = 10.0;

/// A place returned by location search
#[derive(Clone, Debug, PartialEq)]
pub struct Location {
    pub name: String,
    pub display_name: String,
    pub position: LatLng,
    pub bounding_box: Option<LatLngBounds>,
    /// Place type, e.g. `city`, `village`
    pub place_type: String,
    pub osm_type: Option<String>,
}

impl Location {
    /// First three comma-separated parts of the display name
    pub fn short_name(&self) -> String {
        self.display_name
            .split(',')
            .take(3)
            .collect::<Vec<_>>()
            .join(",")
    }

    /// View the map should move to when this location is picked
    pub fn view(&self) -> MapView {
        match self.bounding_box {
            Some(bounds) => MapView::Fit(bounds),
            None => MapView::Center(self.position, LOCATION_ZOOM),
        }
    }
}

/// Highlight radius in metres for a place type
pub fn radius_for_type(place_type: &str) -> f64 {
    match place_type {
        "city" => 10_000.0,
        "town" => 5_000.0,
        "village" => 2_000.0,
        "suburb" => 3_000.0,
        "municipality" => 8_000.0,
        "country" => 100_000.0,
        "state" => 50_000.0,
        "region" => 40_000.0,
        _ => 5_000.0,
    }
}

/// Geometry of a location overlay
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OverlayShape {
    Rectangle(LatLngBounds),
    /// Centre and radius in metres
    Circle(LatLng, f64),
}

/// Paint of a location overlay
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlayStyle {
    pub color: ShapeColor,
    pub fill_opacity: f32,
    pub weight: u32,
}

/// A location highlighted on the map
#[derive(Clone, Debug, PartialEq)]
pub struct SelectedRegion {
    pub location: Location,
    pub color: ShapeColor,
    pub border_only: bool,
    pub shape: OverlayShape,
    pub style: OverlayStyle,
}

impl SelectedRegion {
    /// Build the overlay for a location: a rectangle for large bounding
    /// boxes, otherwise a circle sized by place type
    pub fn new(location: Location, color: ShapeColor, border_only: bool) -> Self {
        let weight = if border_only { 4 } else { 2 };
        let large_box = location.bounding_box.filter(|b| {
            b.lat_span() > RECTANGLE_SPAN_THRESHOLD || b.lon_span() > RECTANGLE_SPAN_THRESHOLD
        });

        let (shape, fill_opacity) = match large_box {
            Some(bounds) => (
                OverlayShape::Rectangle(bounds),
                if border_only { 0.0 } else { 0.3 },
            ),
            None => (
                OverlayShape::Circle(location.position, radius_for_type(&location.place_type)),
                if border_only { 0.0 } else { 0.5 },
            ),
        };

        Self {
            location,
            color,
            border_only,
            shape,
            style: OverlayStyle {
                color,
                fill_opacity,
                weight,
            },
        }
    }

    /// Subtitle in the selected regions list
    pub fn subtitle(&self) -> String {
        if self.border_only {
            format!("{} (border)", self.location.place_type)
        } else {
            self.location.place_type.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location(place_type: &str, bbox: Option<LatLngBounds>) -> Location {
        Location {
            name: "Kaunas".to_string(),
            display_name: "Kaunas, Kauno miesto savivaldybė, Kauno apskritis, Lietuva".to_string(),
            position: LatLng::new(54.9, 23.9),
            bounding_box: bbox,
            place_type: place_type.to_string(),
            osm_type: Some("relation".to_string()),
        }
    }

    #[test]
    fn test_short_name_keeps_three_parts() {
        assert_eq!(
            location("city", None).short_name(),
            "Kaunas, Kauno miesto savivaldybė, Kauno apskritis"
        );
    }

    #[test]
    fn test_large_bbox_becomes_rectangle() {
        let bbox = LatLngBounds {
            south: 54.0,
            west: 23.0,
            north: 54.2,
            east: 23.8,
        };
        let region = SelectedRegion::new(location("state", Some(bbox)), ShapeColor::default(), false);
        assert_eq!(region.shape, OverlayShape::Rectangle(bbox));
        assert_eq!(region.style.fill_opacity, 0.3);
        assert_eq!(region.style.weight, 2);
    }

    #[test]
    fn test_small_bbox_becomes_typed_circle() {
        let bbox = LatLngBounds {
            south: 54.8,
            west: 23.7,
            north: 55.0,
            east: 24.1,
        };
        let region = SelectedRegion::new(location("village", Some(bbox)), ShapeColor::default(), true);
        assert_eq!(region.shape, OverlayShape::Circle(LatLng::new(54.9, 23.9), 2_000.0));
        assert_eq!(region.style.fill_opacity, 0.0);
        assert_eq!(region.style.weight, 4);
        assert_eq!(region.subtitle(), "village (border)");
    }

    #[test]
    fn test_unknown_type_radius_default() {
        assert_eq!(radius_for_type("hamlet"), 5_000.0);
        assert_eq!(radius_for_type("city"), 10_000.0);
    }
}
