//! Place lookup against a geocoding service
//!
//! - `names`: candidate names for a raw spreadsheet cell
//! - `nominatim`: HTTP client for Nominatim-compatible services

pub mod names;
pub mod nominatim;

use std::future::Future;
use std::time::Duration;

use anyhow::Result;

use crate::domain::{LatLng, Location};
use crate::session::Rejection;

pub use names::clean_place_name;
pub use nominatim::NominatimClient;

/// Hits returned by an interactive search
pub const SEARCH_LIMIT: usize = 10;

/// Shortest query sent by an interactive search
pub const MIN_QUERY_CHARS: usize = 2;

/// Free-text place lookup
pub trait Geocoder {
    /// Up to `limit` hits for `query`; `details` asks for address and
    /// extra tags
    fn lookup(
        &self,
        query: &str,
        limit: usize,
        details: bool,
    ) -> impl Future<Output = Result<Vec<Location>>> + Send;
}

/// Resolve a raw place name to a coordinate
///
/// Tries every candidate from [`clean_place_name`] in order, each suffixed
/// with `country`. Waits `retry_delay` after an empty answer; failed
/// requests are logged and the next candidate is tried.
pub async fn geocode_city<G: Geocoder>(
    geocoder: &G,
    name: &str,
    country: &str,
    retry_delay: Duration,
) -> Option<LatLng> {
    for candidate in clean_place_name(name) {
        let query = format!("{candidate}, {country}");
        match geocoder.lookup(&query, 1, false).await {
            Ok(hits) => {
                if let Some(hit) = hits.first() {
                    log::info!("Found \"{name}\" as \"{candidate}\"");
                    return Some(hit.position);
                }
                tokio::time::sleep(retry_delay).await;
            }
            Err(e) => log::error!("Geocoding error for \"{query}\": {e:#}"),
        }
    }
    None
}

/// Interactive location search
///
/// Queries shorter than two characters are rejected without a request.
pub async fn search<G: Geocoder>(geocoder: &G, query: &str) -> Result<Vec<Location>> {
    let query = query.trim();
    if query.chars().count() < MIN_QUERY_CHARS {
        return Err(Rejection::QueryTooShort.into());
    }
    let hits = geocoder.lookup(query, SEARCH_LIMIT, true).await?;
    log::debug!("Search \"{query}\" returned {} hits", hits.len());
    Ok(hits)
}
