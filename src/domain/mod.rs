//! Pure domain types with minimal dependencies
//!
//! This module contains core types used throughout the crate.
//! Types here hold no layer or session state.

pub mod annotation;
pub mod geometry;
pub mod point;
pub mod region;
pub mod selection;

pub use annotation::*;
pub use geometry::*;
pub use point::*;
pub use region::*;
pub use selection::*;
