//! Data-point layer
//!
//! Owns every imported or preloaded point, their marker styles and the
//! group legend.

pub mod colors;

use std::path::Path;

use anyhow::{Context, Result};

use crate::domain::{DataPoint, LabelStyle, LatLng, MarkerStyle, PointRecord};

pub use colors::{group_color, point_color};

/// One legend row
#[derive(Clone, Debug, PartialEq)]
pub struct LegendEntry {
    pub group: String,
    pub color: crate::config::ShapeColor,
    pub count: usize,
}

/// Point count plus per-group rows in first-appearance order
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Legend {
    pub total: usize,
    pub entries: Vec<LegendEntry>,
}

#[derive(Debug, Default)]
pub struct PointLayer {
    points: Vec<DataPoint>,
    dot_size: u32,
}

impl PointLayer {
    pub fn new(dot_size: u32) -> Self {
        Self {
            points: Vec::new(),
            dot_size,
        }
    }

    /// Add a point and return a reference to it
    ///
    /// The label shows the name tag when given, otherwise the date. Empty
    /// group and name tag count as absent.
    pub fn add(
        &mut self,
        position: LatLng,
        city: &str,
        date: &str,
        group: Option<&str>,
        name_tag: Option<&str>,
    ) -> &DataPoint {
        let group = group.filter(|g| !g.is_empty());
        let name_tag = name_tag.filter(|t| !t.is_empty());
        let color = point_color(group);
        let label_text = name_tag.unwrap_or(date).to_string();
        self.points.push(DataPoint {
            city: city.to_string(),
            date: date.to_string(),
            position,
            group: group.map(str::to_string),
            name_tag: name_tag.map(str::to_string),
            color,
            marker: MarkerStyle::new(self.dot_size, color),
            label: LabelStyle::new(label_text, color, self.dot_size),
        });
        &self.points[self.points.len() - 1]
    }

    pub fn add_record(&mut self, record: &PointRecord) -> &DataPoint {
        self.add(
            LatLng::new(record.lat, record.lon),
            &record.city,
            &record.date,
            record.gubernija.as_deref(),
            record.name_tag.as_deref(),
        )
    }

    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn dot_size(&self) -> u32 {
        self.dot_size
    }

    /// Restyle every marker and label for a new dot size
    pub fn set_dot_size(&mut self, dot_size: u32) {
        self.dot_size = dot_size;
        for point in &mut self.points {
            point.resize(dot_size);
        }
    }

    pub fn legend(&self) -> Legend {
        let mut entries: Vec<LegendEntry> = Vec::new();
        for group in self.points.iter().filter_map(|p| p.group.as_deref()) {
            match entries.iter_mut().find(|e| e.group == group) {
                Some(entry) => entry.count += 1,
                None => entries.push(LegendEntry {
                    group: group.to_string(),
                    color: group_color(group),
                    count: 1,
                }),
            }
        }
        Legend {
            total: self.points.len(),
            entries,
        }
    }

    /// Load a pre-geocoded points file
    ///
    /// A missing file is not an error; returns the number of points added.
    pub fn load_file(&mut self, path: &Path) -> Result<usize> {
        if !path.exists() {
            log::info!("Pre-geocoded data not found at {}", path.display());
            return Ok(0);
        }
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read points file: {}", path.display()))?;
        let records: Vec<PointRecord> = serde_json::from_str(&json)
            .with_context(|| format!("Invalid points file: {}", path.display()))?;
        for record in &records {
            self.add_record(record);
        }
        log::info!("Loaded {} pre-geocoded points", records.len());
        Ok(records.len())
    }

    /// Write all points in the pre-geocoded file format
    pub fn save_file(&self, path: &Path) -> Result<()> {
        let records: Vec<PointRecord> = self.points.iter().map(DataPoint::to_record).collect();
        let json = serde_json::to_string_pretty(&records)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write points file: {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_prefers_name_tag() {
        let mut layer = PointLayer::new(6);
        let p = layer.add(LatLng::new(54.9, 23.9), "Kaunas", "1863-01-22", Some("Kauno"), Some("Jonas"));
        assert_eq!(p.label.text, "Jonas");
        assert_eq!(p.display_name(), "Jonas");
        assert_eq!(p.marker.fill.to_string(), "#e74c3c");
        assert_eq!(p.label.anchor, (0, 21));

        let q = layer.add(LatLng::new(54.6, 25.3), "Vilnius", "1863", None, None);
        assert_eq!(q.label.text, "1863");
        assert_eq!(q.display_name(), "Vilnius");
        assert_eq!(q.popup_lines(), vec!["Vilnius", "1863"]);
    }

    #[test]
    fn test_empty_group_in_record_uses_default_color() {
        let record: PointRecord = serde_json::from_str(
            r#"{"city":"Kaunas","date":"1863","lat":54.9,"lon":23.9,"gubernija":"","nameTag":""}"#,
        )
        .unwrap();
        let mut layer = PointLayer::new(6);
        let p = layer.add_record(&record);
        assert_eq!(p.group, None);
        assert_eq!(p.color.to_string(), "#e74c3c");
        assert_eq!(p.label.text, "1863");
        assert!(layer.legend().entries.is_empty());
    }

    #[test]
    fn test_dot_size_restyles_all_points() {
        let mut layer = PointLayer::new(6);
        layer.add(LatLng::new(54.9, 23.9), "Kaunas", "d1", Some("Kauno"), None);
        layer.add(LatLng::new(54.6, 25.3), "Vilnius", "d2", Some("Vilniaus"), None);
        layer.set_dot_size(10);
        for p in layer.points() {
            assert_eq!(p.marker.radius, 10);
            assert_eq!(p.label.anchor, (0, 25));
            assert_eq!(p.label.border, p.color);
        }
        assert_eq!(layer.points()[1].label.text, "d2");
    }

    #[test]
    fn test_legend_counts_in_first_seen_order() {
        let mut layer = PointLayer::new(6);
        layer.add(LatLng::default(), "a", "", Some("Vilniaus"), None);
        layer.add(LatLng::default(), "b", "", None, None);
        layer.add(LatLng::default(), "c", "", Some("Kauno"), None);
        layer.add(LatLng::default(), "d", "", Some("Vilniaus"), None);
        let legend = layer.legend();
        assert_eq!(legend.total, 4);
        let rows: Vec<(&str, usize)> = legend.entries.iter().map(|e| (e.group.as_str(), e.count)).collect();
        assert_eq!(rows, vec![("Vilniaus", 2), ("Kauno", 1)]);
    }

    #[test]
    fn test_points_file_round_trip_and_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data-points.json");

        let mut layer = PointLayer::new(6);
        assert_eq!(layer.load_file(&path).unwrap(), 0);

        layer.add(LatLng::new(54.9, 23.9), "Kaunas", "1863", Some("Kauno"), Some("A"));
        layer.save_file(&path).unwrap();

        let mut reloaded = PointLayer::new(8);
        assert_eq!(reloaded.load_file(&path).unwrap(), 1);
        let p = &reloaded.points()[0];
        assert_eq!(p.city, "Kaunas");
        assert_eq!(p.name_tag.as_deref(), Some("A"));
        assert_eq!(p.marker.radius, 8);

        layer.clear();
        assert!(layer.is_empty());
    }
}
