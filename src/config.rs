//! Configuration persistence for litmap settings

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// CSS-compatible colour used for shapes, markers and layers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ShapeColor {
    Rgb(u8, u8, u8),
    /// Hue in degrees, saturation and lightness in percent
    Hsl(u16, u8, u8),
}

impl Default for ShapeColor {
    fn default() -> Self {
        // Same red as ungrouped data points
        ShapeColor::Rgb(0xe7, 0x4c, 0x3c)
    }
}

impl ShapeColor {
    pub const WHITE: ShapeColor = ShapeColor::Rgb(0xff, 0xff, 0xff);

    /// Parse a `#rrggbb` or `#rgb` hex colour
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#')?;
        let channel = |i: usize, len: usize| u8::from_str_radix(hex.get(i..i + len)?, 16).ok();
        match hex.len() {
            6 => Some(ShapeColor::Rgb(channel(0, 2)?, channel(2, 2)?, channel(4, 2)?)),
            3 => Some(ShapeColor::Rgb(
                channel(0, 1)? * 17,
                channel(1, 1)? * 17,
                channel(2, 1)? * 17,
            )),
            _ => None,
        }
    }
}

impl fmt::Display for ShapeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeColor::Rgb(r, g, b) => write!(f, "#{r:02x}{g:02x}{b:02x}"),
            ShapeColor::Hsl(h, s, l) => write!(f, "hsl({h}, {s}%, {l}%)"),
        }
    }
}

impl FromStr for ShapeColor {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Some(color) = ShapeColor::from_hex(s) {
            return Ok(color);
        }
        let inner = s
            .strip_prefix("hsl(")
            .and_then(|rest| rest.strip_suffix(')'))
            .with_context(|| format!("Unrecognized colour: {s}"))?;
        let parts: Vec<&str> = inner.split(',').map(|p| p.trim().trim_end_matches('%')).collect();
        if parts.len() != 3 {
            anyhow::bail!("Unrecognized colour: {s}");
        }
        Ok(ShapeColor::Hsl(
            parts[0].parse().context("Invalid hue")?,
            parts[1].parse().context("Invalid saturation")?,
            parts[2].parse().context("Invalid lightness")?,
        ))
    }
}

impl TryFrom<String> for ShapeColor {
    type Error = anyhow::Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<ShapeColor> for String {
    fn from(c: ShapeColor) -> Self {
        c.to_string()
    }
}

/// Stroke settings for the drawing tools
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawStyle {
    pub color: ShapeColor,
    /// Stroke weight in pixels
    pub weight: u32,
    /// Stroke opacity of lines and arrows (0.0-1.0)
    pub opacity: f32,
    /// Font size of text labels in pixels
    pub text_size: u32,
}

impl Default for DrawStyle {
    fn default() -> Self {
        Self {
            color: ShapeColor::default(),
            weight: 3,
            opacity: 0.8,
            text_size: 14,
        }
    }
}

/// Style of one administrative boundary layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerStyle {
    pub color: ShapeColor,
    /// Fill opacity in percent (0-100)
    pub opacity: u8,
    /// Stroke weight in pixels
    pub weight: u32,
    pub visible: bool,
}

impl LayerStyle {
    pub fn fill_opacity(&self) -> f32 {
        f32::from(self.opacity.min(100)) / 100.0
    }
}

fn default_counties_style() -> LayerStyle {
    LayerStyle {
        color: ShapeColor::Rgb(0x2c, 0x3e, 0x50),
        opacity: 10,
        weight: 2,
        visible: true,
    }
}

fn default_municipalities_style() -> LayerStyle {
    LayerStyle {
        color: ShapeColor::Rgb(0x7f, 0x8c, 0x8d),
        opacity: 5,
        weight: 1,
        visible: false,
    }
}

/// Application configuration persisted between sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// County boundaries (GADM level 1)
    pub counties_path: PathBuf,
    /// Municipality boundaries (GADM level 2)
    pub municipalities_path: PathBuf,
    /// Pre-geocoded data points loaded at startup
    pub points_path: PathBuf,
    /// Base URL of the Nominatim-compatible geocoding service
    pub geocoder_url: String,
    /// User agent sent to the geocoding service
    pub user_agent: String,
    /// Appended to every import lookup
    pub country_suffix: String,
    /// Pause after a geocoding candidate comes back empty
    pub retry_delay_ms: u64,
    /// Pause after every imported row
    pub row_delay_ms: u64,
    /// Screen distance to the first vertex that closes a polygon
    pub close_threshold_px: f64,
    pub initial_zoom: f64,
    pub draw_style: DrawStyle,
    /// Data point marker radius in pixels
    pub dot_size: u32,
    pub counties: LayerStyle,
    pub municipalities: LayerStyle,
}

impl MapConfig {
    /// Directory and file name under the user's config dir
    pub const ID: &'static str = "litmap";
    const FILE_NAME: &'static str = "config.json";

    /// Default location of the config file
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(Self::ID).join(Self::FILE_NAME))
    }

    /// Load configuration from disk, or return defaults if unavailable
    pub fn load() -> Self {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_or_default(&path),
            Some(_) => Self::default(),
            None => {
                log::warn!("Could not determine config directory, using defaults");
                Self::default()
            }
        }
    }

    /// Load configuration from a given file, falling back to defaults
    pub fn load_or_default(path: &Path) -> Self {
        match Self::read(path) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Error loading config, using defaults: {:?}", err);
                Self::default()
            }
        }
    }

    pub fn read(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = serde_json::from_str(&json)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        Ok(config)
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Save configuration to disk
    pub fn save(&self) {
        let Some(path) = Self::default_path() else {
            log::error!("Could not determine config directory for saving");
            return;
        };
        if let Err(err) = self.write(&path) {
            log::error!("Failed to save config: {:?}", err);
        }
    }

    pub fn retry_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.retry_delay_ms)
    }

    pub fn row_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.row_delay_ms)
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            counties_path: PathBuf::from("gadm41_LTU_1.json"),
            municipalities_path: PathBuf::from("gadm41_LTU_2.json"),
            points_path: PathBuf::from("data-points.json"),
            geocoder_url: "https://nominatim.openstreetmap.org".to_string(),
            user_agent: concat!("litmap/", env!("CARGO_PKG_VERSION")).to_string(),
            country_suffix: "Lithuania".to_string(),
            retry_delay_ms: 200,
            row_delay_ms: 300,
            close_threshold_px: 20.0,
            initial_zoom: crate::domain::DEFAULT_ZOOM,
            draw_style: DrawStyle::default(),
            dot_size: 6,
            counties: default_counties_style(),
            municipalities: default_municipalities_style(),
        }
    }
}
