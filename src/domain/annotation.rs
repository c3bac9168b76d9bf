//! Annotation types for drawing on the map
//!
//! All annotation types store positions as geographic coordinates so they
//! stay anchored to the map while panning and zooming.

use crate::config::ShapeColor;
use crate::domain::geometry::{LatLng, LatLngBounds};
use crate::render::decorator::ArrowGlyph;

/// Fill opacity of closed shapes (circle, rectangle, polygon)
pub const SHAPE_FILL_OPACITY: f32 = 0.3;

/// Stroke style captured when the annotation was committed
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeStyle {
    pub color: ShapeColor,
    /// Stroke weight in pixels
    pub weight: u32,
    pub opacity: f32,
    /// None for open paths
    pub fill_opacity: Option<f32>,
}

/// Arrow: a two-point segment with a triangular head at the end
#[derive(Clone, Debug, PartialEq)]
pub struct ArrowAnnotation {
    pub start: LatLng,
    pub end: LatLng,
    /// Head glyph placed at `end`
    pub head: ArrowGlyph,
    pub style: StrokeStyle,
}

/// Plain two-point line
#[derive(Clone, Debug, PartialEq)]
pub struct LineAnnotation {
    pub start: LatLng,
    pub end: LatLng,
    pub style: StrokeStyle,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CircleAnnotation {
    pub center: LatLng,
    /// Radius in metres
    pub radius: f64,
    pub style: StrokeStyle,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RectangleAnnotation {
    pub bounds: LatLngBounds,
    pub style: StrokeStyle,
}

/// Closed polygon, first vertex is not repeated at the end
#[derive(Clone, Debug, PartialEq)]
pub struct PolygonAnnotation {
    pub vertices: Vec<LatLng>,
    pub style: StrokeStyle,
}

/// Text label pinned to a coordinate
#[derive(Clone, Debug, PartialEq)]
pub struct TextAnnotation {
    pub position: LatLng,
    pub text: String,
    /// Font size in pixels
    pub size: u32,
    /// Border colour of the label box
    pub color: ShapeColor,
}

/// Unified annotation type kept by the drawing layer
#[derive(Clone, Debug, PartialEq)]
pub enum Annotation {
    Arrow(ArrowAnnotation),
    Line(LineAnnotation),
    Circle(CircleAnnotation),
    Rectangle(RectangleAnnotation),
    Polygon(PolygonAnnotation),
    Text(TextAnnotation),
}

impl Annotation {
    pub fn kind(&self) -> &'static str {
        match self {
            Annotation::Arrow(_) => "arrow",
            Annotation::Line(_) => "line",
            Annotation::Circle(_) => "circle",
            Annotation::Rectangle(_) => "rectangle",
            Annotation::Polygon(_) => "polygon",
            Annotation::Text(_) => "text",
        }
    }
}
