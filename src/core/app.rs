//! Application state aggregate
//!
//! Owns every layer and the drawing controller. The host widget forwards
//! its events here and renders what the layers expose.

use std::path::Path;

use anyhow::Result;

use crate::config::{LayerStyle, MapConfig, ShapeColor};
use crate::domain::{AdminLevel, DEFAULT_ZOOM, LITHUANIA_CENTER, Location, MapView, SelectedRegion};
use crate::geocode::{self, Geocoder};
use crate::import::{self, ImportOptions, ImportProgress, ImportSummary};
use crate::points::{Legend, PointLayer};
use crate::regions::overlay::SelectionLayer;
use crate::regions::{AdminLayers, FeatureInfo};
use crate::session::{DrawEvent, DrawMsg, DrawingController, Rejection};

pub struct MapApp {
    pub config: MapConfig,
    pub admin: AdminLayers,
    pub points: PointLayer,
    pub drawing: DrawingController,
    pub selection: SelectionLayer,
    /// Last view requested from the host
    pub view: MapView,
}

impl MapApp {
    pub fn new(config: MapConfig) -> Self {
        Self {
            admin: AdminLayers::default(),
            points: PointLayer::new(config.dot_size),
            drawing: DrawingController::new(&config),
            selection: SelectionLayer::new(),
            view: MapView::Center(LITHUANIA_CENTER, config.initial_zoom),
            config,
        }
    }

    /// Load boundary layers and pre-geocoded points
    ///
    /// Failures are logged; the map stays usable without them.
    pub fn startup(&mut self) {
        match AdminLayers::load(
            &self.config.counties_path,
            &self.config.municipalities_path,
            self.config.counties,
            self.config.municipalities,
        ) {
            Ok(layers) => self.admin = layers,
            Err(e) => log::error!("Error loading GeoJSON data: {e:#}"),
        }

        let points_path = self.config.points_path.clone();
        if let Err(e) = self.points.load_file(&points_path) {
            log::error!("Error loading pre-geocoded data: {e:#}");
        }
    }

    /// Detail panel for a clicked region, None if no such region is loaded
    pub fn region_clicked(&self, level: AdminLevel, name: &str) -> Option<FeatureInfo> {
        let region = self.admin.layer(level)?.find(name)?;
        Some(FeatureInfo::build(region, self.points.points()))
    }

    pub fn set_layer_style(&mut self, level: AdminLevel, style: LayerStyle) {
        match level {
            AdminLevel::County => self.config.counties = style,
            AdminLevel::Municipality => self.config.municipalities = style,
        }
        if let Some(layer) = self.admin.layer_mut(level) {
            layer.set_style(style);
        }
    }

    pub fn set_dot_size(&mut self, dot_size: u32) {
        self.config.dot_size = dot_size;
        self.points.set_dot_size(dot_size);
    }

    pub fn clear_points(&mut self) {
        self.points.clear();
    }

    pub fn legend(&self) -> Legend {
        self.points.legend()
    }

    /// Forward a drawing message, keeping the view zoom in sync
    pub fn draw(&mut self, msg: DrawMsg) -> Result<DrawEvent, Rejection> {
        if let DrawMsg::SetZoom(zoom) = msg {
            self.view = match self.view {
                MapView::Center(center, _) => MapView::Center(center, zoom),
                fit => fit,
            };
        }
        self.drawing.update(msg)
    }

    pub async fn search<G: Geocoder>(&self, geocoder: &G, query: &str) -> Result<Vec<Location>> {
        geocode::search(geocoder, query).await
    }

    /// Pick a search hit and move the view to it
    pub fn select_location(&mut self, location: Location) -> MapView {
        self.view = self.selection.select(location);
        self.view
    }

    pub fn apply_selection(&mut self, color: ShapeColor, border_only: bool) -> Result<&SelectedRegion, Rejection> {
        self.selection.apply(color, border_only)
    }

    /// Remove overlays and drawings and return to the initial view
    pub fn clear_all(&mut self) -> MapView {
        self.selection.clear();
        self.drawing.reset();
        self.view = MapView::Center(LITHUANIA_CENTER, DEFAULT_ZOOM);
        self.view
    }

    pub async fn import<G: Geocoder>(
        &mut self,
        path: &Path,
        geocoder: &G,
        on_progress: impl FnMut(ImportProgress<'_>),
    ) -> Result<ImportSummary> {
        let options = ImportOptions::from_config(&self.config);
        import::import_file(path, geocoder, &mut self.points, &options, on_progress).await
    }
}
