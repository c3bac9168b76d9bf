//! Geocoded data points shown as markers

use serde::{Deserialize, Serialize};

use crate::config::ShapeColor;
use crate::domain::geometry::LatLng;

/// Vertical gap between a marker's edge and its label
const LABEL_GAP: u32 = 15;

/// Circle marker style of a data point
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarkerStyle {
    pub radius: u32,
    pub fill: ShapeColor,
    pub stroke: ShapeColor,
    pub weight: u32,
    pub opacity: f32,
    pub fill_opacity: f32,
}

impl MarkerStyle {
    pub fn new(radius: u32, fill: ShapeColor) -> Self {
        Self {
            radius,
            fill,
            stroke: ShapeColor::WHITE,
            weight: 2,
            opacity: 1.0,
            fill_opacity: 0.9,
        }
    }
}

/// Non-interactive label drawn above a marker
#[derive(Clone, Debug, PartialEq)]
pub struct LabelStyle {
    pub text: String,
    pub border: ShapeColor,
    /// Icon anchor in pixels, the label sits this far above the point
    pub anchor: (i32, i32),
}

impl LabelStyle {
    pub fn new(text: String, border: ShapeColor, dot_size: u32) -> Self {
        Self {
            text,
            border,
            anchor: (0, (dot_size + LABEL_GAP) as i32),
        }
    }
}

/// A geocoded place with its label, date and optional group
#[derive(Clone, Debug, PartialEq)]
pub struct DataPoint {
    pub city: String,
    pub date: String,
    pub position: LatLng,
    pub group: Option<String>,
    pub name_tag: Option<String>,
    pub color: ShapeColor,
    pub marker: MarkerStyle,
    pub label: LabelStyle,
}

impl DataPoint {
    /// Name shown in listings: the name tag if present, otherwise the city
    pub fn display_name(&self) -> &str {
        self.name_tag.as_deref().unwrap_or(&self.city)
    }

    /// Popup lines: city, then group, then date
    pub fn popup_lines(&self) -> Vec<String> {
        let mut lines = vec![self.city.clone()];
        if let Some(group) = &self.group {
            lines.push(format!("{group} gubernija"));
        }
        lines.push(self.date.clone());
        lines
    }

    /// Redraw marker radius and label offset for a new dot size
    pub fn resize(&mut self, dot_size: u32) {
        self.marker.radius = dot_size;
        self.label = LabelStyle::new(self.label.text.clone(), self.color, dot_size);
    }

    pub fn to_record(&self) -> PointRecord {
        PointRecord {
            lat: self.position.lat,
            lon: self.position.lon,
            city: self.city.clone(),
            date: self.date.clone(),
            gubernija: self.group.clone(),
            name_tag: self.name_tag.clone(),
        }
    }
}

/// Entry of the pre-geocoded points file
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointRecord {
    pub lat: f64,
    pub lon: f64,
    pub city: String,
    #[serde(default)]
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gubernija: Option<String>,
    #[serde(rename = "nameTag", default, skip_serializing_if = "Option::is_none")]
    pub name_tag: Option<String>,
}
