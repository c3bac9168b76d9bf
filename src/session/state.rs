use crate::domain::LatLng;
use crate::session::messages::Cursor;

/// Drawing tools offered by the side panel
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tool {
    Arrow,
    Line,
    Circle,
    Rectangle,
    Polygon,
    Text,
}

impl Tool {
    pub const ALL: [Tool; 6] = [
        Tool::Arrow,
        Tool::Line,
        Tool::Circle,
        Tool::Rectangle,
        Tool::Polygon,
        Tool::Text,
    ];

    /// Tools committed by exactly two map clicks
    pub fn is_two_click(self) -> bool {
        matches!(self, Tool::Arrow | Tool::Line | Tool::Circle | Tool::Rectangle)
    }

    pub fn label(self) -> &'static str {
        match self {
            Tool::Arrow => "arrow",
            Tool::Line => "line",
            Tool::Circle => "circle",
            Tool::Rectangle => "rectangle",
            Tool::Polygon => "polygon",
            Tool::Text => "text",
        }
    }
}

/// Transient state between tool activation and commit
#[derive(Clone, Debug, Default, PartialEq)]
pub enum DrawingState {
    #[default]
    Idle,
    /// Two-click tool waiting for its first anchor
    AwaitingFirstPoint(Tool),
    AwaitingSecondPoint { tool: Tool, anchor: LatLng },
    /// Polygon tool, vertices in click order
    AccumulatingVertices(Vec<LatLng>),
    /// Text tool active, text entry shown
    EnteringText,
    /// Text armed; the next map click places it
    AwaitingTextPlacement { text: String, size: u32 },
}

impl DrawingState {
    /// Initial state of a freshly activated tool
    pub fn initial(tool: Tool) -> Self {
        match tool {
            Tool::Polygon => DrawingState::AccumulatingVertices(Vec::new()),
            Tool::Text => DrawingState::EnteringText,
            two_click => DrawingState::AwaitingFirstPoint(two_click),
        }
    }

    /// Tool owning this state, None when idle
    pub fn tool(&self) -> Option<Tool> {
        match self {
            DrawingState::Idle => None,
            DrawingState::AwaitingFirstPoint(tool) | DrawingState::AwaitingSecondPoint { tool, .. } => {
                Some(*tool)
            }
            DrawingState::AccumulatingVertices(_) => Some(Tool::Polygon),
            DrawingState::EnteringText | DrawingState::AwaitingTextPlacement { .. } => Some(Tool::Text),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, DrawingState::Idle)
    }
}

/// Drawing state plus the delete-mode flag
///
/// Delete mode and an active tool never coexist.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DrawingSession {
    pub state: DrawingState,
    pub delete_mode: bool,
}

impl DrawingSession {
    /// Deactivate any tool and leave delete mode
    pub fn deactivate(&mut self) {
        self.state = DrawingState::Idle;
        self.delete_mode = false;
    }

    pub fn activate(&mut self, tool: Tool) {
        self.deactivate();
        self.state = DrawingState::initial(tool);
    }

    /// Flip delete mode, returning the new value
    pub fn toggle_delete_mode(&mut self) -> bool {
        let on = !self.delete_mode;
        self.state = DrawingState::Idle;
        self.delete_mode = on;
        on
    }

    pub fn cursor(&self) -> Cursor {
        if self.delete_mode {
            return Cursor::Pointer;
        }
        match &self.state {
            DrawingState::AwaitingSecondPoint { .. } | DrawingState::AwaitingTextPlacement { .. } => {
                Cursor::Crosshair
            }
            DrawingState::AccumulatingVertices(vertices) if !vertices.is_empty() => Cursor::Crosshair,
            _ => Cursor::Default,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_states() {
        for tool in Tool::ALL {
            let state = DrawingState::initial(tool);
            assert_eq!(state.tool(), Some(tool));
            assert_eq!(tool.is_two_click(), matches!(state, DrawingState::AwaitingFirstPoint(_)));
        }
        assert_eq!(DrawingState::Idle.tool(), None);
    }

    #[test]
    fn test_activation_and_delete_mode_are_exclusive() {
        let mut session = DrawingSession::default();
        session.activate(Tool::Circle);
        assert!(session.toggle_delete_mode());
        assert!(session.state.is_idle());
        assert_eq!(session.cursor(), Cursor::Pointer);

        session.activate(Tool::Line);
        assert!(!session.delete_mode);
        assert_eq!(session.cursor(), Cursor::Default);
    }

    #[test]
    fn test_crosshair_after_first_anchor() {
        let mut session = DrawingSession::default();
        session.activate(Tool::Polygon);
        assert_eq!(session.cursor(), Cursor::Default);
        session.state = DrawingState::AccumulatingVertices(vec![LatLng::new(55.0, 24.0)]);
        assert_eq!(session.cursor(), Cursor::Crosshair);
    }
}
