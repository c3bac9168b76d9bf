//! Drawing session management
//!
//! This module contains:
//! - Session state (active tool, anchors, delete mode)
//! - Message types for drawing interactions
//! - The controller that owns the session and the drawing layer

pub mod controller;
pub mod messages;
pub mod state;

pub use controller::DrawingController;
pub use messages::{Cursor, DrawEvent, DrawMsg, Hint, Rejection};
pub use state::{DrawingSession, DrawingState, Tool};
