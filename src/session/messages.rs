//! Message types for the drawing session
//!
//! This module contains:
//! - DrawMsg for everything the host reports to the drawing controller
//! - DrawEvent for what the controller tells the host back
//! - Rejection for user input that aborts the current action

use std::fmt;

use crate::annotations::AnnotationId;
use crate::config::DrawStyle;
use crate::domain::LatLng;
use crate::session::state::Tool;

// ============================================================================
// Input
// ============================================================================

/// All drawing/annotation messages
#[derive(Debug, Clone)]
pub enum DrawMsg {
    /// Activate a drawing tool, deactivating any other
    Activate(Tool),
    /// Click on the map background
    MapClick(LatLng),
    /// Arm text placement with the typed text
    PlaceText(String),
    /// Leave the active tool, discarding anchors
    Cancel,
    /// Toggle delete mode
    ToggleDeleteMode,
    /// Click on a committed annotation
    AnnotationClicked(AnnotationId),
    /// Remove every annotation
    ClearDrawings,
    /// Map zoom changed
    SetZoom(f64),
    /// Stroke settings changed
    SetStyle(DrawStyle),
}

// ============================================================================
// Output
// ============================================================================

/// Pointer cursor the host should show over the map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    #[default]
    Default,
    Crosshair,
    /// Over deletable annotations while delete mode is on
    Pointer,
}

/// User-facing hint shown after a state change
///
/// Hints and rejections are fixed English strings; the host owns any
/// translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hint {
    PolygonStarted,
    TextArmed,
    DeleteModeOn,
}

impl fmt::Display for Hint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Hint::PolygonStarted => {
                "Click to add points. Click near the first point to close the polygon."
            }
            Hint::TextArmed => "Click on the map to place the text",
            Hint::DeleteModeOn => "Delete mode ON: Click on any drawing to delete it",
        })
    }
}

/// Result of handling one DrawMsg
#[derive(Debug, Clone, PartialEq)]
pub enum DrawEvent {
    /// Nothing visible changed
    None,
    /// State changed and a hint should be shown
    Hint(Hint),
    /// State changed without a hint
    Updated,
    /// An annotation was added to the drawing layer
    Committed(AnnotationId),
    /// An annotation was removed; the click must not reach the map
    Removed(AnnotationId),
    /// The click was not used and should reach the map as usual
    Propagate,
}

// ============================================================================
// Rejections
// ============================================================================

/// User input that cannot be acted on
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("Please enter some text")]
    EmptyText,
    #[error("Please search and select a location first")]
    NoLocationSelected,
    #[error("Please enter at least 2 characters")]
    QueryTooShort,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_messages() {
        assert_eq!(Rejection::EmptyText.to_string(), "Please enter some text");
        assert_eq!(
            Rejection::NoLocationSelected.to_string(),
            "Please search and select a location first"
        );

        let err: anyhow::Error = Rejection::QueryTooShort.into();
        assert_eq!(err.to_string(), "Please enter at least 2 characters");
        assert_eq!(err.downcast_ref::<Rejection>(), Some(&Rejection::QueryTooShort));
    }
}
