//! Annotation message handlers
//!
//! Handles DrawMsg for all drawing tools. Each handler consumes the current
//! session state and leaves the next one in place.

use crate::annotations::PreviewPath;
use crate::domain::{
    Annotation, ArrowAnnotation, CircleAnnotation, LatLng, LatLngBounds, LineAnnotation,
    PolygonAnnotation, Projection, RectangleAnnotation, SHAPE_FILL_OPACITY, StrokeStyle,
    TextAnnotation, WebMercator,
};
use crate::render::decorator::ArrowGlyph;
use crate::render::geometry::screen_bearing;
use crate::session::DrawingController;
use crate::session::messages::{DrawEvent, DrawMsg, Hint, Rejection};
use crate::session::state::{DrawingState, Tool};

/// Handle a DrawMsg, modifying the controller
///
/// A rejection leaves the session exactly as it was.
pub fn handle_draw_msg(ctl: &mut DrawingController, msg: DrawMsg) -> Result<DrawEvent, Rejection> {
    let event = match msg {
        DrawMsg::Activate(tool) => handle_activate(ctl, tool),
        DrawMsg::MapClick(at) => handle_map_click(ctl, at),
        DrawMsg::PlaceText(text) => return handle_place_text(ctl, &text),
        DrawMsg::Cancel => {
            ctl.session.state = DrawingState::Idle;
            ctl.layer.clear_preview();
            DrawEvent::Updated
        }
        DrawMsg::ToggleDeleteMode => {
            ctl.layer.clear_preview();
            if ctl.session.toggle_delete_mode() {
                DrawEvent::Hint(Hint::DeleteModeOn)
            } else {
                DrawEvent::Updated
            }
        }
        DrawMsg::AnnotationClicked(id) => {
            // Eligibility depends on the mode at click time
            if ctl.session.delete_mode && ctl.layer.remove(id).is_some() {
                log::debug!("Deleted annotation {id}");
                DrawEvent::Removed(id)
            } else {
                DrawEvent::Propagate
            }
        }
        DrawMsg::ClearDrawings => {
            ctl.layer.clear();
            DrawEvent::Updated
        }
        DrawMsg::SetZoom(zoom) => {
            ctl.projection = WebMercator::new(zoom);
            DrawEvent::None
        }
        DrawMsg::SetStyle(style) => {
            ctl.style = style;
            DrawEvent::None
        }
    };
    Ok(event)
}

fn handle_activate(ctl: &mut DrawingController, tool: Tool) -> DrawEvent {
    ctl.layer.clear_preview();
    ctl.session.activate(tool);
    match tool {
        Tool::Polygon => DrawEvent::Hint(Hint::PolygonStarted),
        _ => DrawEvent::Updated,
    }
}

fn handle_map_click(ctl: &mut DrawingController, at: LatLng) -> DrawEvent {
    if ctl.session.delete_mode {
        return DrawEvent::Propagate;
    }

    match std::mem::take(&mut ctl.session.state) {
        DrawingState::Idle => DrawEvent::Propagate,
        DrawingState::AwaitingFirstPoint(tool) => {
            ctl.session.state = DrawingState::AwaitingSecondPoint { tool, anchor: at };
            DrawEvent::Updated
        }
        DrawingState::AwaitingSecondPoint { tool, anchor } => {
            let annotation = two_click_annotation(ctl, tool, anchor, at);
            DrawEvent::Committed(ctl.layer.add(annotation))
        }
        DrawingState::AccumulatingVertices(vertices) => handle_polygon_click(ctl, vertices, at),
        DrawingState::EnteringText => {
            // Text not armed yet
            ctl.session.state = DrawingState::EnteringText;
            DrawEvent::Propagate
        }
        DrawingState::AwaitingTextPlacement { text, size } => {
            let label = TextAnnotation {
                position: at,
                text,
                size,
                color: ctl.style.color,
            };
            DrawEvent::Committed(ctl.layer.add(Annotation::Text(label)))
        }
    }
}

/// Configured opacity applies to open strokes; closed shapes draw their
/// outline opaque
fn stroke(ctl: &DrawingController, closed: bool) -> StrokeStyle {
    StrokeStyle {
        color: ctl.style.color,
        weight: ctl.style.weight,
        opacity: if closed { 1.0 } else { ctl.style.opacity },
        fill_opacity: closed.then_some(SHAPE_FILL_OPACITY),
    }
}

fn two_click_annotation(ctl: &DrawingController, tool: Tool, anchor: LatLng, at: LatLng) -> Annotation {
    match tool {
        Tool::Arrow => Annotation::Arrow(ArrowAnnotation {
            start: anchor,
            end: at,
            head: ArrowGlyph::arrow_head(
                ctl.style.color,
                screen_bearing(&ctl.projection, anchor, at),
            ),
            style: stroke(ctl, false),
        }),
        Tool::Circle => Annotation::Circle(CircleAnnotation {
            center: anchor,
            radius: anchor.distance_to(at),
            style: stroke(ctl, true),
        }),
        Tool::Rectangle => Annotation::Rectangle(RectangleAnnotation {
            bounds: LatLngBounds::from_corners(anchor, at),
            style: stroke(ctl, true),
        }),
        // Polygon and text never reach the second-anchor state
        Tool::Line | Tool::Polygon | Tool::Text => Annotation::Line(LineAnnotation {
            start: anchor,
            end: at,
            style: stroke(ctl, false),
        }),
    }
}

fn handle_polygon_click(ctl: &mut DrawingController, mut vertices: Vec<LatLng>, at: LatLng) -> DrawEvent {
    if vertices.len() >= 3 {
        let gap = ctl
            .projection
            .project(vertices[0])
            .distance_to(ctl.projection.project(at));
        if gap < ctl.close_threshold {
            ctl.layer.clear_preview();
            let polygon = PolygonAnnotation {
                vertices,
                style: stroke(ctl, true),
            };
            return DrawEvent::Committed(ctl.layer.add(Annotation::Polygon(polygon)));
        }
    }

    vertices.push(at);
    if vertices.len() >= 2 {
        let preview = PreviewPath::new(vertices.clone(), ctl.style.color, ctl.style.weight);
        ctl.layer.set_preview(preview);
    }
    ctl.session.state = DrawingState::AccumulatingVertices(vertices);
    DrawEvent::Updated
}

fn handle_place_text(ctl: &mut DrawingController, text: &str) -> Result<DrawEvent, Rejection> {
    if ctl.session.state.tool() != Some(Tool::Text) {
        return Ok(DrawEvent::None);
    }
    let text = text.trim();
    if text.is_empty() {
        return Err(Rejection::EmptyText);
    }
    ctl.session.state = DrawingState::AwaitingTextPlacement {
        text: text.to_string(),
        size: ctl.style.text_size,
    };
    Ok(DrawEvent::Hint(Hint::TextArmed))
}
