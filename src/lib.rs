//! Annotated map of Lithuania
//!
//! Boundary overlays with point membership, a drawing tool state machine,
//! location search and spreadsheet imports geocoded through Nominatim.
//! The map widget itself belongs to the host; this crate owns the state.

pub mod annotations;
pub mod config;
pub mod core;
pub mod domain;
pub mod geocode;
pub mod import;
pub mod points;
pub mod regions;
pub mod render;
pub mod session;

pub use crate::core::MapApp;
