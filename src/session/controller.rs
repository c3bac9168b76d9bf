//! Single owner of the drawing session

use crate::annotations::{AnnotationLayer, handlers};
use crate::config::{DrawStyle, MapConfig};
use crate::domain::WebMercator;
use crate::session::messages::{Cursor, DrawEvent, DrawMsg, Rejection};
use crate::session::state::{DrawingSession, Tool};

/// Owns the drawing layer, the session state machine and the current view
#[derive(Debug)]
pub struct DrawingController {
    pub session: DrawingSession,
    pub layer: AnnotationLayer,
    /// Projection at the host's current zoom
    pub projection: WebMercator,
    /// Polygon close distance in screen pixels
    pub close_threshold: f64,
    pub style: DrawStyle,
}

impl Default for DrawingController {
    fn default() -> Self {
        Self::new(&MapConfig::default())
    }
}

impl DrawingController {
    pub fn new(config: &MapConfig) -> Self {
        Self {
            session: DrawingSession::default(),
            layer: AnnotationLayer::new(),
            projection: WebMercator::new(config.initial_zoom),
            close_threshold: config.close_threshold_px,
            style: config.draw_style,
        }
    }

    /// Feed one host message through the state machine
    pub fn update(&mut self, msg: DrawMsg) -> Result<DrawEvent, Rejection> {
        handlers::handle_draw_msg(self, msg)
    }

    pub fn active_tool(&self) -> Option<Tool> {
        self.session.state.tool()
    }

    pub fn delete_mode(&self) -> bool {
        self.session.delete_mode
    }

    pub fn cursor(&self) -> Cursor {
        self.session.cursor()
    }

    /// Deactivate tools and delete mode, drop all drawings
    pub fn reset(&mut self) {
        self.session.deactivate();
        self.layer.clear();
    }
}
