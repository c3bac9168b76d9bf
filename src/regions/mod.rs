//! Administrative boundary layers
//!
//! - `membership`: point-in-region tests
//! - `overlay`: highlights for searched locations

pub mod membership;
pub mod overlay;

use std::path::Path;

use anyhow::{Context, Result};
use geo::Coord;
use geojson::{Feature, GeoJson};

use crate::config::{LayerStyle, ShapeColor};
use crate::domain::{AdminLevel, DataPoint, RegionBoundary};

/// Dash pattern of municipality outlines
pub const MUNICIPALITY_DASH: &str = "3";

/// Resolved paint of one region
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RegionStyle {
    pub color: ShapeColor,
    pub weight: u32,
    pub fill_color: ShapeColor,
    pub fill_opacity: f32,
    pub dash: Option<&'static str>,
}

/// One level of boundaries sharing a style
#[derive(Debug)]
pub struct AdminLayer {
    pub level: AdminLevel,
    regions: Vec<RegionBoundary>,
    style: LayerStyle,
}

impl AdminLayer {
    pub fn new(level: AdminLevel, regions: Vec<RegionBoundary>, style: LayerStyle) -> Self {
        Self {
            level,
            regions,
            style,
        }
    }

    /// Read a GeoJSON feature collection from disk
    pub fn load(level: AdminLevel, path: &Path, style: LayerStyle) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read boundaries: {}", path.display()))?;
        let regions = parse_boundaries(level, &json)
            .with_context(|| format!("Invalid boundaries file: {}", path.display()))?;
        log::info!(
            "Loaded {} {} boundaries from {}",
            regions.len(),
            level.label().to_lowercase(),
            path.display()
        );
        Ok(Self::new(level, regions, style))
    }

    pub fn regions(&self) -> &[RegionBoundary] {
        &self.regions
    }

    pub fn find(&self, name: &str) -> Option<&RegionBoundary> {
        self.regions.iter().find(|r| r.name == name)
    }

    pub fn layer_style(&self) -> LayerStyle {
        self.style
    }

    /// Replace the style of every region at once
    pub fn set_style(&mut self, style: LayerStyle) {
        self.style = style;
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.style.visible = visible;
    }

    pub fn is_visible(&self) -> bool {
        self.style.visible
    }

    /// Paint of every region in this layer
    pub fn style(&self) -> RegionStyle {
        RegionStyle {
            color: self.style.color,
            weight: self.style.weight,
            fill_color: self.style.color,
            fill_opacity: self.style.fill_opacity(),
            dash: match self.level {
                AdminLevel::County => None,
                AdminLevel::Municipality => Some(MUNICIPALITY_DASH),
            },
        }
    }

    /// Paint of a hovered region
    pub fn highlight_style(&self) -> RegionStyle {
        RegionStyle {
            weight: self.style.weight + 2,
            fill_opacity: 0.3,
            ..self.style()
        }
    }
}

/// Parse a feature collection into region boundaries
///
/// Features without a usable name are skipped. Only outer rings are kept.
pub fn parse_boundaries(level: AdminLevel, json: &str) -> Result<Vec<RegionBoundary>> {
    let features = match json.parse::<GeoJson>()? {
        GeoJson::FeatureCollection(collection) => collection.features,
        GeoJson::Feature(feature) => vec![feature],
        GeoJson::Geometry(_) => anyhow::bail!("Expected features, found a bare geometry"),
    };

    Ok(features
        .iter()
        .filter_map(|feature| region_from_feature(level, feature))
        .collect())
}

fn string_property(feature: &Feature, key: &str) -> Option<String> {
    feature
        .property(key)
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn region_from_feature(level: AdminLevel, feature: &Feature) -> Option<RegionBoundary> {
    let (name_key, parent, kind) = match level {
        AdminLevel::County => ("NAME_1", None, string_property(feature, "TYPE_1")),
        AdminLevel::Municipality => ("NAME_2", string_property(feature, "NAME_1"), None),
    };
    let Some(name) = string_property(feature, name_key).or_else(|| string_property(feature, "name"))
    else {
        log::debug!("Skipping boundary feature without a name");
        return None;
    };

    Some(RegionBoundary {
        name,
        level,
        parent,
        kind,
        rings: feature
            .geometry
            .as_ref()
            .map(|g| outer_rings(&g.value))
            .unwrap_or_default(),
    })
}

fn outer_rings(value: &geojson::Value) -> Vec<Vec<Coord<f64>>> {
    let to_ring = |ring: &Vec<Vec<f64>>| -> Vec<Coord<f64>> {
        ring.iter()
            .filter(|pos| pos.len() >= 2)
            .map(|pos| Coord {
                x: pos[0],
                y: pos[1],
            })
            .collect()
    };

    match value {
        geojson::Value::Polygon(rings) => rings.first().map(to_ring).into_iter().collect(),
        geojson::Value::MultiPolygon(polygons) => polygons
            .iter()
            .filter_map(|rings| rings.first().map(to_ring))
            .collect(),
        _ => Vec::new(),
    }
}

/// One row of a region's member table
#[derive(Clone, Debug, PartialEq)]
pub struct MemberRow {
    pub name: String,
    pub date: String,
}

/// Contents of the region detail panel
#[derive(Clone, Debug, PartialEq)]
pub struct FeatureInfo {
    pub title: String,
    pub details: String,
    pub members: Vec<MemberRow>,
    /// `Total: N point(s)`, the empty-area notice, or nothing when no
    /// points are loaded
    pub footer: Option<String>,
}

impl FeatureInfo {
    pub fn build(region: &RegionBoundary, points: &[DataPoint]) -> Self {
        let members: Vec<MemberRow> = membership::find_members(points, region)
            .into_iter()
            .map(|p| MemberRow {
                name: p.display_name().to_string(),
                date: p.date.clone(),
            })
            .collect();

        let footer = match members.len() {
            0 if points.is_empty() => None,
            0 => Some("No data points in this area".to_string()),
            1 => Some("Total: 1 point".to_string()),
            n => Some(format!("Total: {n} points")),
        };

        Self {
            title: region.name.clone(),
            details: region.details(),
            members,
            footer,
        }
    }
}

/// County and municipality layers
#[derive(Debug, Default)]
pub struct AdminLayers {
    pub counties: Option<AdminLayer>,
    pub municipalities: Option<AdminLayer>,
}

impl AdminLayers {
    pub fn layer(&self, level: AdminLevel) -> Option<&AdminLayer> {
        match level {
            AdminLevel::County => self.counties.as_ref(),
            AdminLevel::Municipality => self.municipalities.as_ref(),
        }
    }

    pub fn layer_mut(&mut self, level: AdminLevel) -> Option<&mut AdminLayer> {
        match level {
            AdminLevel::County => self.counties.as_mut(),
            AdminLevel::Municipality => self.municipalities.as_mut(),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.counties.is_some() && self.municipalities.is_some()
    }

    /// Load both levels; on any failure neither layer is kept
    pub fn load(
        counties_path: &Path,
        municipalities_path: &Path,
        counties_style: LayerStyle,
        municipalities_style: LayerStyle,
    ) -> Result<Self> {
        let counties = AdminLayer::load(AdminLevel::County, counties_path, counties_style)?;
        let municipalities = AdminLayer::load(
            AdminLevel::Municipality,
            municipalities_path,
            municipalities_style,
        )?;
        Ok(Self {
            counties: Some(counties),
            municipalities: Some(municipalities),
        })
    }
}
