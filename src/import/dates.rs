//! Date cells
//!
//! Spreadsheets store dates as day counts from 1899-12-30. Text dates
//! ("1863-01-22", "1863 m. sausio", "1863?") are kept as typed.

use chrono::{Days, NaiveDate};

/// Serial values outside this range are not treated as dates
const SERIAL_RANGE: std::ops::Range<f64> = 1.0..100_000.0;

fn serial_epoch() -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(1899, 12, 30)
}

/// Normalize a date cell for display
pub fn format_date(cell: &str) -> String {
    let text = cell.trim();
    if text.contains(['-', '?']) || text.chars().any(|c| c.is_ascii_alphabetic()) {
        return text.to_string();
    }

    match text.parse::<f64>() {
        Ok(serial) if SERIAL_RANGE.contains(&serial) => {
            serial_to_date(serial).unwrap_or_else(|| text.to_string())
        }
        _ => text.to_string(),
    }
}

fn serial_to_date(serial: f64) -> Option<String> {
    let date = serial_epoch()?.checked_add_days(Days::new(serial.floor() as u64))?;
    Some(date.format("%Y-%m-%d").to_string())
}
