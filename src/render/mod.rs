//! Rendering helpers for the host map widget
//!
//! - `geometry`: glyph constants and screen-space math
//! - `decorator`: arrow-head placement along polylines

pub mod decorator;
pub mod geometry;
