//! Spreadsheet import
//!
//! Rows are geocoded one at a time with a pause after each, so a large
//! sheet takes a while but never floods the geocoding service.

pub mod dates;
pub mod sheet;

use std::fmt;
use std::path::Path;
use std::time::Duration;

use anyhow::Result;

use crate::geocode::{Geocoder, geocode_city};
use crate::points::PointLayer;

pub use dates::format_date;
pub use sheet::{ColumnMap, Row, read_rows};

/// Pauses and lookup suffix used while importing
#[derive(Clone, Debug)]
pub struct ImportOptions {
    pub country: String,
    pub retry_delay: Duration,
    pub row_delay: Duration,
}

impl ImportOptions {
    pub fn from_config(config: &crate::config::MapConfig) -> Self {
        Self {
            country: config.country_suffix.clone(),
            retry_delay: config.retry_delay(),
            row_delay: config.row_delay(),
        }
    }
}

/// Progress of a running import
#[derive(Clone, Debug, PartialEq)]
pub struct ImportProgress<'a> {
    pub city: &'a str,
    /// 1-based number of the row being geocoded
    pub current: usize,
    /// Data rows in the sheet, skipped ones included
    pub total: usize,
}

impl fmt::Display for ImportProgress<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Geocoding: {} ({}/{})", self.city, self.current, self.total)
    }
}

/// Outcome of an import
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ImportSummary {
    pub imported: usize,
    pub failed: usize,
    pub failed_names: Vec<String>,
}

impl fmt::Display for ImportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Imported {} points.", self.imported)?;
        if self.failed > 0 {
            write!(f, "\nFailed: {}", self.failed)?;
        }
        Ok(())
    }
}

fn cell<'a>(row: &'a [String], index: usize) -> &'a str {
    row.get(index).map_or("", |c| c.trim())
}

fn optional_cell(row: &[String], index: Option<usize>) -> Option<&str> {
    index.map(|i| cell(row, i)).filter(|c| !c.is_empty())
}

/// Geocode every data row and add the hits to `points`
///
/// Rows with an empty city cell are skipped and not counted.
pub async fn import_rows<G, F>(
    rows: &[Row],
    geocoder: &G,
    points: &mut PointLayer,
    options: &ImportOptions,
    mut on_progress: F,
) -> ImportSummary
where
    G: Geocoder,
    F: FnMut(ImportProgress<'_>),
{
    let columns = ColumnMap::detect(rows);
    log::info!("Column indices: {columns:?}");

    let data_rows = rows.get(columns.first_row..).unwrap_or_default();
    let mut summary = ImportSummary::default();

    for row in data_rows {
        let city = cell(row, columns.city);
        if city.is_empty() {
            continue;
        }
        let group = optional_cell(row, columns.group);
        let name_tag = optional_cell(row, columns.name_tag);
        let date = format_date(cell(row, columns.date));

        on_progress(ImportProgress {
            city,
            current: summary.imported + summary.failed + 1,
            total: data_rows.len(),
        });

        match geocode_city(geocoder, city, &options.country, options.retry_delay).await {
            Some(position) => {
                points.add(position, city, &date, group, name_tag);
                summary.imported += 1;
            }
            None => {
                log::warn!("Could not geocode: {city}");
                summary.failed_names.push(city.to_string());
                summary.failed += 1;
            }
        }

        tokio::time::sleep(options.row_delay).await;
    }

    if !summary.failed_names.is_empty() {
        log::info!("Failed cities: {:?}", summary.failed_names);
    }
    summary
}

/// Read a spreadsheet file and import its rows
pub async fn import_file<G: Geocoder>(
    path: &Path,
    geocoder: &G,
    points: &mut PointLayer,
    options: &ImportOptions,
    on_progress: impl FnMut(ImportProgress<'_>),
) -> Result<ImportSummary> {
    let rows = read_rows(path)?;
    Ok(import_rows(&rows, geocoder, points, options, on_progress).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LatLng;
    use crate::geocode::fake::FakeGeocoder;

    fn options() -> ImportOptions {
        ImportOptions {
            country: "Lithuania".to_string(),
            retry_delay: Duration::ZERO,
            row_delay: Duration::ZERO,
        }
    }

    fn rows(cells: &[&[&str]]) -> Vec<Row> {
        cells
            .iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[tokio::test]
    async fn test_one_found_one_failed() {
        let geocoder = FakeGeocoder::default().with_place("Kaunas, Lithuania", LatLng::new(54.9, 23.9));
        let sheet = rows(&[
            &["Vals", "Gubernija", "Data"],
            &["Kaunas", "Kauno", "45000"],
            &["Niekur", "", "1863?"],
        ]);
        let mut points = PointLayer::new(6);
        let summary = import_rows(&sheet, &geocoder, &mut points, &options(), |_| {}).await;

        assert_eq!(summary.imported, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.failed_names, vec!["Niekur"]);
        assert_eq!(summary.to_string(), "Imported 1 points.\nFailed: 1");

        assert_eq!(points.len(), 1);
        let point = &points.points()[0];
        assert_eq!(point.city, "Kaunas");
        assert_eq!(point.date, "2023-03-15");
        assert_eq!(point.group.as_deref(), Some("Kauno"));
    }

    #[tokio::test]
    async fn test_empty_city_rows_skipped_and_progress_reported() {
        let geocoder = FakeGeocoder::default()
            .with_place("Trakai, Lithuania", LatLng::new(54.64, 24.93))
            .with_place("Alytus, Lithuania", LatLng::new(54.4, 24.05));
        let sheet = rows(&[
            &["City", "Date", "Label"],
            &["Trakų", "1863-01-22", " Jonas "],
            &["  ", "1864", ""],
            &["Alytus"],
        ]);
        let mut points = PointLayer::new(6);
        let mut progress = Vec::new();
        let summary = import_rows(&sheet, &geocoder, &mut points, &options(), |p| {
            progress.push(p.to_string());
        })
        .await;

        assert_eq!(summary.to_string(), "Imported 2 points.");
        assert_eq!(
            progress,
            vec!["Geocoding: Trakų (1/3)", "Geocoding: Alytus (2/3)"]
        );
        assert_eq!(points.points()[0].name_tag.as_deref(), Some("Jonas"));
        assert_eq!(points.points()[0].date, "1863-01-22");
        assert_eq!(points.points()[1].name_tag, None);
        assert_eq!(points.points()[1].date, "");
    }

    #[tokio::test]
    async fn test_unnamed_header_is_not_imported() {
        let geocoder = FakeGeocoder::default().with_place("Kaunas, Lithuania", LatLng::new(54.9, 23.9));
        let sheet = rows(&[&["Miestas", "Metai"], &["Kaunas", "1"]]);
        let mut points = PointLayer::new(6);
        let summary = import_rows(&sheet, &geocoder, &mut points, &options(), |_| {}).await;
        assert_eq!(summary.to_string(), "Imported 1 points.");
        assert_eq!(geocoder.queries(), vec!["Kaunas, Lithuania"]);
        assert_eq!(points.points()[0].date, "1899-12-31");
    }

    #[tokio::test(start_paused = true)]
    async fn test_pauses_after_each_geocoded_row() {
        let geocoder = FakeGeocoder::default().with_place("Kaunas, Lithuania", LatLng::new(54.9, 23.9));
        let sheet = rows(&[&["Vals", "Data"], &["Kaunas", ""], &["", ""], &["Niekur", ""]]);
        let options = ImportOptions {
            retry_delay: Duration::from_millis(200),
            row_delay: Duration::from_millis(300),
            ..options()
        };
        let mut points = PointLayer::new(6);
        let start = tokio::time::Instant::now();
        let summary = import_rows(&sheet, &geocoder, &mut points, &options, |_| {}).await;

        assert_eq!((summary.imported, summary.failed), (1, 1));
        // Two geocoded rows, one empty answer for "Niekur", nothing for the blank row
        assert_eq!(start.elapsed().as_millis(), 2 * 300 + 200);
    }

    #[tokio::test]
    async fn test_import_csv_file() {
        use std::io::Write;

        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "Vals,Gubernija,Data").unwrap();
        writeln!(file, "Kaunas,Kauno,45000").unwrap();
        let geocoder = FakeGeocoder::default().with_place("Kaunas, Lithuania", LatLng::new(54.9, 23.9));
        let mut points = PointLayer::new(6);
        let summary = import_file(file.path(), &geocoder, &mut points, &options(), |_| {})
            .await
            .unwrap();
        assert_eq!(summary.imported, 1);
    }
}
