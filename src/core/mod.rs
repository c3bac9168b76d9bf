//! Core application module
//!
//! This module contains the MapApp aggregate the host drives.

pub mod app;

pub use app::MapApp;
