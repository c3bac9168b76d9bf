//! Reading rows from spreadsheet files
//!
//! Every cell becomes text; numbers keep their shortest display form so a
//! serial date `45000` reaches the date parser as `"45000"`.

use std::path::Path;

use anyhow::{Context, Result};
use calamine::{Data, Reader, open_workbook_auto};

/// One sheet row as text cells
pub type Row = Vec<String>;

/// Read the first sheet of a workbook, or a CSV file
pub fn read_rows(path: &Path) -> Result<Vec<Row>> {
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
    if is_csv {
        read_csv(path)
    } else {
        read_workbook(path)
    }
}

fn read_workbook(path: &Path) -> Result<Vec<Row>> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("Failed to open workbook: {}", path.display()))?;
    let range = workbook
        .worksheet_range_at(0)
        .context("Workbook has no sheets")?
        .context("Failed to read the first sheet")?;

    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_text).collect())
        .collect())
}

fn read_csv(path: &Path) -> Result<Vec<Row>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.with_context(|| format!("Malformed CSV in {}", path.display()))?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.as_f64().to_string(),
    }
}

/// Which column holds what
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnMap {
    /// Index of the first data row
    pub first_row: usize,
    pub city: usize,
    pub group: Option<usize>,
    pub date: usize,
    pub name_tag: Option<usize>,
}

impl ColumnMap {
    /// Detect column roles from the header in row 0
    ///
    /// Row 0 is always the header. Roles it does not name fall back to
    /// positions: city column 0, date column 1 (2 with a group column).
    pub fn detect(rows: &[Row]) -> Self {
        let header: Vec<String> = rows
            .first()
            .map(|row| row.iter().map(|h| h.trim().to_lowercase()).collect())
            .unwrap_or_default();

        let find = |keys: &[&str]| header.iter().position(|h| keys.iter().any(|k| h.contains(k)));
        let group = find(&["gubern"]);
        Self {
            first_row: 1,
            city: find(&["vals", "city"]).unwrap_or(0),
            group,
            date: find(&["data", "date"]).unwrap_or(if group.is_some() { 2 } else { 1 }),
            name_tag: find(&["name", "tag", "label"]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn row(cells: &[&str]) -> Row {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_detects_lithuanian_header() {
        let rows = vec![row(&["Vals", "Gubernija", "Data", "Vardas"]), row(&["Kaunas", "", "", ""])];
        assert_eq!(
            ColumnMap::detect(&rows),
            ColumnMap {
                first_row: 1,
                city: 0,
                group: Some(1),
                date: 2,
                name_tag: None,
            }
        );
    }

    #[test]
    fn test_detects_english_header_in_any_order() {
        let rows = vec![row(&["Label", "Date", " CITY "])];
        let map = ColumnMap::detect(&rows);
        assert_eq!(map.city, 2);
        assert_eq!(map.date, 1);
        assert_eq!(map.name_tag, Some(0));
        assert_eq!(map.group, None);
    }

    #[test]
    fn test_date_fallback_depends_on_group_column() {
        let map = ColumnMap::detect(&[row(&["Gubernija", "Vals", "Metai"])]);
        assert_eq!((map.city, map.group, map.date), (1, Some(0), 2));

        let map = ColumnMap::detect(&[row(&["Vals", "Metai"])]);
        assert_eq!(map.date, 1);
    }

    #[test]
    fn test_unnamed_header_uses_positions() {
        let map = ColumnMap::detect(&[row(&["Miestas", "Metai"]), row(&["Kaunas", "45000"])]);
        assert_eq!(map.first_row, 1);
        assert_eq!((map.city, map.group, map.date, map.name_tag), (0, None, 1, None));
        assert_eq!(ColumnMap::detect(&[]).first_row, 1);
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(&Data::Float(45000.0)), "45000");
        assert_eq!(cell_text(&Data::Float(1.5)), "1.5");
        assert_eq!(cell_text(&Data::Int(7)), "7");
        assert_eq!(cell_text(&Data::Empty), "");
        assert_eq!(cell_text(&Data::String("Kaunas".to_string())), "Kaunas");
    }

    #[test]
    fn test_read_csv_rows() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "Vals,Gubernija,Data").unwrap();
        writeln!(file, "Kaunas,Kauno,45000").unwrap();
        writeln!(file, "Trakų").unwrap();
        let rows = read_rows(file.path()).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1], row(&["Kaunas", "Kauno", "45000"]));
        assert_eq!(rows[2], row(&["Trakų"]));
    }

    #[test]
    fn test_missing_workbook_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_rows(&dir.path().join("missing.xlsx")).is_err());
    }
}
