//! Polyline decoration with arrow-head symbols
//!
//! A plain function over a vertex sequence and a style descriptor. The host
//! map widget draws the returned placements however it likes.

use crate::config::ShapeColor;
use crate::domain::{LatLng, Projection, ScreenPoint};
use crate::render::geometry::{self, arrow};

/// Triangular head glyph, drawn pointing up and then rotated
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArrowGlyph {
    pub color: ShapeColor,
    pub opacity: f32,
    /// Half of the base in pixels
    pub half_width: f64,
    /// Apex-to-base height in pixels
    pub height: f64,
    pub icon_size: (f64, f64),
    /// Pixel of the icon placed on the decorated coordinate
    pub anchor: (f64, f64),
    /// Clockwise rotation in degrees
    pub rotation: f64,
}

impl ArrowGlyph {
    /// Head used by the arrow drawing tool for a segment with `bearing`
    pub fn arrow_head(color: ShapeColor, bearing: f64) -> Self {
        Self {
            color,
            opacity: 1.0,
            half_width: arrow::HALF_WIDTH,
            height: arrow::HEIGHT,
            icon_size: arrow::ICON_SIZE,
            anchor: arrow::ANCHOR,
            rotation: bearing + arrow::BEARING_OFFSET,
        }
    }

    /// Glyph for a decorator symbol
    pub fn from_symbol(symbol: &SymbolStyle, bearing: f64) -> Self {
        let s = symbol.pixel_size;
        Self {
            color: symbol.color,
            opacity: symbol.fill_opacity,
            half_width: s,
            height: s * 1.5,
            icon_size: (s * 2.0, s * 2.0),
            anchor: (s, s * 1.33),
            rotation: bearing + arrow::BEARING_OFFSET,
        }
    }

    /// Segment bearing this glyph was oriented for
    pub fn bearing(&self) -> f64 {
        self.rotation - arrow::BEARING_OFFSET
    }

    /// Triangle (apex, base_left, base_right) when anchored at `at`
    pub fn triangle(&self, at: ScreenPoint) -> (ScreenPoint, ScreenPoint, ScreenPoint) {
        geometry::triangle_points(at, self.half_width, self.height, self.anchor, self.rotation)
    }
}

/// Style descriptor of a decorator symbol
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SymbolStyle {
    pub pixel_size: f64,
    pub color: ShapeColor,
    pub fill_opacity: f32,
}

impl Default for SymbolStyle {
    fn default() -> Self {
        Self {
            pixel_size: 10.0,
            color: ShapeColor::default(),
            fill_opacity: 1.0,
        }
    }
}

/// Where symbols go along a line
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pattern {
    /// Fraction of the line length (1.0 = end)
    pub offset: f64,
    /// Spacing between repeats, 0 for a single symbol
    pub repeat: f64,
    pub symbol: SymbolStyle,
}

impl Pattern {
    /// Build a pattern from textual values like `"100%"` or `"0"`
    pub fn parse(offset: &str, repeat: &str, symbol: SymbolStyle) -> Option<Self> {
        Some(Self {
            offset: parse_pattern_value(offset)?,
            repeat: parse_pattern_value(repeat)?,
            symbol,
        })
    }
}

/// `"50%"` → 0.5, `"12"` → 12.0
pub fn parse_pattern_value(value: &str) -> Option<f64> {
    let value = value.trim();
    match value.strip_suffix('%') {
        Some(percent) => percent.trim().parse::<f64>().ok().map(|p| p / 100.0),
        None => value.parse().ok(),
    }
}

/// One symbol to draw
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SymbolPlacement {
    pub position: LatLng,
    pub glyph: ArrowGlyph,
}

/// Place pattern symbols along `vertices`
///
/// Only end-of-line patterns (offset at or past 100 %) produce a symbol,
/// oriented along the last segment.
pub fn decorate(
    vertices: &[LatLng],
    patterns: &[Pattern],
    projection: &impl Projection,
) -> Vec<SymbolPlacement> {
    let [.., before_last, last] = vertices else {
        return Vec::new();
    };

    patterns
        .iter()
        .filter(|pattern| pattern.offset >= 1.0)
        .map(|pattern| {
            let bearing = geometry::screen_bearing(projection, *before_last, *last);
            SymbolPlacement {
                position: *last,
                glyph: ArrowGlyph::from_symbol(&pattern.symbol, bearing),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::WebMercator;

    #[test]
    fn test_parse_pattern_value() {
        assert_eq!(parse_pattern_value("100%"), Some(1.0));
        assert_eq!(parse_pattern_value(" 25 % "), Some(0.25));
        assert_eq!(parse_pattern_value("12"), Some(12.0));
        assert_eq!(parse_pattern_value("abc"), None);
    }

    #[test]
    fn test_decorate_places_head_at_end() {
        let line = [
            LatLng::new(55.0, 23.0),
            LatLng::new(55.0, 24.0),
            LatLng::new(55.0, 25.0),
        ];
        let pattern = Pattern::parse("100%", "0", SymbolStyle::default()).unwrap();
        let placed = decorate(&line, &[pattern], &WebMercator::default());
        assert_eq!(placed.len(), 1);
        assert_eq!(placed[0].position, line[2]);
        // Due east on screen
        assert!(placed[0].glyph.bearing().abs() < 1e-9);
        assert_eq!(placed[0].glyph.height, 15.0);
    }

    #[test]
    fn test_decorate_skips_short_lines_and_inner_offsets() {
        let proj = WebMercator::default();
        let pattern = Pattern::parse("50%", "0", SymbolStyle::default()).unwrap();
        let line = [LatLng::new(55.0, 23.0), LatLng::new(55.0, 24.0)];
        assert!(decorate(&line, &[pattern], &proj).is_empty());

        let end = Pattern::parse("100%", "0", SymbolStyle::default()).unwrap();
        assert!(decorate(&line[..1], &[end], &proj).is_empty());
    }

    #[test]
    fn test_east_arrow_head_points_east() {
        let glyph = ArrowGlyph::arrow_head(ShapeColor::default(), 0.0);
        let tip = ScreenPoint::new(200.0, 200.0);
        let (apex, left, right) = glyph.triangle(tip);
        assert!(apex.x > tip.x);
        assert!((apex.y - tip.y).abs() < 0.5);
        assert!(left.x < apex.x && right.x < apex.x);
    }
}
