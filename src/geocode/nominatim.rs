//! Nominatim search API client

use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::config::MapConfig;
use crate::domain::{LatLng, LatLngBounds, Location};
use crate::geocode::Geocoder;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// One hit of `/search?format=json`
///
/// Coordinates and the bounding box arrive as strings.
#[derive(Debug, Deserialize)]
struct SearchHit {
    #[serde(default)]
    name: String,
    display_name: String,
    lat: String,
    lon: String,
    /// south, north, west, east
    #[serde(default)]
    boundingbox: Option<Vec<String>>,
    #[serde(default, rename = "type")]
    place_type: String,
    #[serde(default)]
    osm_type: Option<String>,
}

impl SearchHit {
    fn into_location(self) -> Result<Location> {
        let lat: f64 = self.lat.parse().with_context(|| format!("Bad latitude: {}", self.lat))?;
        let lon: f64 = self.lon.parse().with_context(|| format!("Bad longitude: {}", self.lon))?;
        let bounding_box = self.boundingbox.as_deref().and_then(parse_bbox);
        let name = if self.name.is_empty() {
            self.display_name
                .split(',')
                .next()
                .unwrap_or_default()
                .trim()
                .to_string()
        } else {
            self.name
        };

        Ok(Location {
            name,
            display_name: self.display_name,
            position: LatLng::new(lat, lon),
            bounding_box,
            place_type: self.place_type,
            osm_type: self.osm_type,
        })
    }
}

fn parse_bbox(parts: &[String]) -> Option<LatLngBounds> {
    let [south, north, west, east] = parts else {
        return None;
    };
    Some(LatLngBounds {
        south: south.parse().ok()?,
        north: north.parse().ok()?,
        west: west.parse().ok()?,
        east: east.parse().ok()?,
    })
}

/// Client for a Nominatim-compatible `/search` endpoint
#[derive(Debug, Clone)]
pub struct NominatimClient {
    client: reqwest::Client,
    base_url: String,
}

impl NominatimClient {
    pub fn new(base_url: &str, user_agent: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &MapConfig) -> Result<Self> {
        Self::new(&config.geocoder_url, &config.user_agent)
    }
}

impl Geocoder for NominatimClient {
    async fn lookup(&self, query: &str, limit: usize, details: bool) -> Result<Vec<Location>> {
        let mut params = vec![
            ("q", query.to_string()),
            ("format", "json".to_string()),
            ("limit", limit.to_string()),
        ];
        if details {
            params.push(("addressdetails", "1".to_string()));
            params.push(("extratags", "1".to_string()));
        }

        let url = format!("{}/search", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .with_context(|| format!("Request to {url} failed"))?;
        if !response.status().is_success() {
            anyhow::bail!("Geocoder responded with {}", response.status());
        }
        let hits: Vec<SearchHit> = response
            .json()
            .await
            .context("Invalid geocoder response")?;

        let mut locations = Vec::with_capacity(hits.len());
        for hit in hits {
            match hit.into_location() {
                Ok(location) => locations.push(location),
                Err(e) => log::warn!("Skipping geocoder hit: {e:#}"),
            }
        }
        Ok(locations)
    }
}
