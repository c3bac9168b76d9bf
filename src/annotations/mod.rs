//! Drawing layer and drawing-tool handlers
//!
//! This module provides:
//! - AnnotationLayer, the drawing surface holding committed annotations
//! - The dashed preview path of an unfinished polygon
//! - Message handlers for DrawMsg

pub mod handlers;

use std::fmt;

use crate::config::ShapeColor;
use crate::domain::{Annotation, LatLng};
use crate::render::geometry::preview;

/// Stable handle of a committed annotation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnnotationId(u64);

impl fmt::Display for AnnotationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Dashed path shown while a polygon is being drawn
#[derive(Clone, Debug, PartialEq)]
pub struct PreviewPath {
    pub vertices: Vec<LatLng>,
    pub color: ShapeColor,
    pub weight: u32,
    pub opacity: f32,
    pub dash: &'static str,
}

impl PreviewPath {
    pub fn new(vertices: Vec<LatLng>, color: ShapeColor, weight: u32) -> Self {
        Self {
            vertices,
            color,
            weight,
            opacity: preview::OPACITY,
            dash: preview::DASH,
        }
    }
}

/// Committed annotations in drawing order
#[derive(Debug, Default)]
pub struct AnnotationLayer {
    annotations: Vec<(AnnotationId, Annotation)>,
    next_id: u64,
    preview: Option<PreviewPath>,
}

impl AnnotationLayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, annotation: Annotation) -> AnnotationId {
        let id = AnnotationId(self.next_id);
        self.next_id += 1;
        log::debug!("Committed {} annotation {id}", annotation.kind());
        self.annotations.push((id, annotation));
        id
    }

    pub fn remove(&mut self, id: AnnotationId) -> Option<Annotation> {
        let index = self.annotations.iter().position(|(i, _)| *i == id)?;
        Some(self.annotations.remove(index).1)
    }

    pub fn get(&self, id: AnnotationId) -> Option<&Annotation> {
        self.annotations
            .iter()
            .find(|(i, _)| *i == id)
            .map(|(_, a)| a)
    }

    pub fn iter(&self) -> impl Iterator<Item = (AnnotationId, &Annotation)> {
        self.annotations.iter().map(|(id, a)| (*id, a))
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    /// Remove every annotation and the preview path
    pub fn clear(&mut self) {
        self.annotations.clear();
        self.preview = None;
    }

    pub fn preview(&self) -> Option<&PreviewPath> {
        self.preview.as_ref()
    }

    pub fn set_preview(&mut self, preview: PreviewPath) {
        self.preview = Some(preview);
    }

    pub fn clear_preview(&mut self) {
        self.preview = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TextAnnotation;

    fn text(s: &str) -> Annotation {
        Annotation::Text(TextAnnotation {
            position: LatLng::new(55.0, 24.0),
            text: s.to_string(),
            size: 14,
            color: ShapeColor::default(),
        })
    }

    #[test]
    fn test_ids_stay_unique_after_removal() {
        let mut layer = AnnotationLayer::new();
        let a = layer.add(text("a"));
        let b = layer.add(text("b"));
        assert!(layer.remove(a).is_some());
        assert!(layer.remove(a).is_none());
        let c = layer.add(text("c"));
        assert_ne!(b, c);
        let order: Vec<AnnotationId> = layer.iter().map(|(id, _)| id).collect();
        assert_eq!(order, vec![b, c]);
    }

    #[test]
    fn test_clear_drops_preview() {
        let mut layer = AnnotationLayer::new();
        layer.add(text("a"));
        layer.set_preview(PreviewPath::new(Vec::new(), ShapeColor::default(), 3));
        layer.clear();
        assert!(layer.is_empty());
        assert!(layer.preview().is_none());
    }
}
