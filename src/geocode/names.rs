//! Lithuanian place-name cleanup
//!
//! Spreadsheet cells often hold a genitive form ("Šiaulių apskr."), a list
//! of places, or a note in brackets. Cleanup turns one cell into the
//! ordered list of names worth sending to the geocoder.

use std::sync::LazyLock;

use regex::Regex;

/// Separators between listed places: the word `ir`, `;` or `,`
static LIST_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+ir\s+|;\s*|,\s*").expect("valid list separator pattern"));

/// A `(...)` note with the space before it
static NOTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\([^)]*\)").expect("valid note pattern"));

/// A trailing word describing the kind of place rather than naming it
static DESCRIPTOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s+(m\.|k\.|apygardos|gub\.|Lietuviai)$").expect("valid descriptor pattern")
});

/// Genitive endings and the nominative endings to try instead
///
/// Checked in order; only the first matching ending is used.
const GENITIVE_ENDINGS: [(&str, &[&str]); 3] = [
    ("ių", &["iai", "is", "ė", "ys"]),
    ("ų", &["ai", "as", "a", "us", "ys"]),
    ("os", &["a"]),
];

/// Candidate names for one raw cell, best guess first
///
/// The first candidate is always the cleaned name itself.
pub fn clean_place_name(raw: &str) -> Vec<String> {
    let first = LIST_SEPARATOR.split(raw).next().unwrap_or(raw).trim();
    let without_notes = NOTE.replace_all(first, "");
    let cleaned = DESCRIPTOR.replace(without_notes.trim(), "");
    let cleaned = cleaned.trim();

    let mut candidates = vec![cleaned.to_string()];
    if let Some((stem, endings)) = GENITIVE_ENDINGS
        .iter()
        .find_map(|(ending, endings)| cleaned.strip_suffix(ending).map(|stem| (stem, *endings)))
    {
        candidates.extend(endings.iter().map(|e| format!("{stem}{e}")));
    }
    candidates
}
