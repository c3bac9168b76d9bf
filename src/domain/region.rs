//! Administrative region boundaries

use geo::Coord;

/// Administrative subdivision level
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AdminLevel {
    /// GADM level 1 (apskritis)
    County,
    /// GADM level 2 (savivaldybė)
    Municipality,
}

impl AdminLevel {
    pub fn label(self) -> &'static str {
        match self {
            AdminLevel::County => "County",
            AdminLevel::Municipality => "Municipality",
        }
    }
}

/// A named area with one outer ring per polygon part
///
/// Ring vertices are `(x = longitude, y = latitude)`. Holes are not kept.
#[derive(Clone, Debug, PartialEq)]
pub struct RegionBoundary {
    pub name: String,
    pub level: AdminLevel,
    /// Parent county name, set for municipalities
    pub parent: Option<String>,
    /// Region type label, set for counties
    pub kind: Option<String>,
    pub rings: Vec<Vec<Coord<f64>>>,
}

impl RegionBoundary {
    /// Second line of the region's info panel
    pub fn details(&self) -> String {
        match self.level {
            AdminLevel::County => format!("Type: {}", self.kind.as_deref().unwrap_or("County")),
            AdminLevel::Municipality => {
                format!("County: {}", self.parent.as_deref().unwrap_or(""))
            }
        }
    }

    /// Hover tooltip: name, plus the parent county for municipalities
    pub fn tooltip(&self) -> String {
        match (&self.level, &self.parent) {
            (AdminLevel::Municipality, Some(parent)) => format!("{}\n{}", self.name, parent),
            _ => self.name.clone(),
        }
    }
}
