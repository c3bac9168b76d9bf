//! Selected-location overlays

use crate::config::ShapeColor;
use crate::domain::{Location, MapView, SelectedRegion};
use crate::session::Rejection;

/// Highlights for searched locations, keyed by location name
#[derive(Debug, Default)]
pub struct SelectionLayer {
    selected: Option<Location>,
    regions: Vec<SelectedRegion>,
}

impl SelectionLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember a search hit and return the view to move to
    pub fn select(&mut self, location: Location) -> MapView {
        let view = location.view();
        log::debug!("Selected location {}", location.name);
        self.selected = Some(location);
        view
    }

    pub fn selected(&self) -> Option<&Location> {
        self.selected.as_ref()
    }

    /// Highlight the selected location
    ///
    /// A location already highlighted under the same name is restyled in
    /// place, keeping its position in the list.
    pub fn apply(&mut self, color: ShapeColor, border_only: bool) -> Result<&SelectedRegion, Rejection> {
        let location = self.selected.clone().ok_or(Rejection::NoLocationSelected)?;
        let region = SelectedRegion::new(location, color, border_only);

        let index = match self
            .regions
            .iter()
            .position(|r| r.location.name == region.location.name)
        {
            Some(i) => {
                self.regions[i] = region;
                i
            }
            None => {
                self.regions.push(region);
                self.regions.len() - 1
            }
        };
        Ok(&self.regions[index])
    }

    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.regions.len();
        self.regions.retain(|r| r.location.name != name);
        self.regions.len() != before
    }

    pub fn regions(&self) -> &[SelectedRegion] {
        &self.regions
    }

    /// Drop every overlay and the selected location
    pub fn clear(&mut self) {
        self.regions.clear();
        self.selected = None;
    }
}
