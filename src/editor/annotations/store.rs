//! Ownership of every annotation on the canvas.

use bevy::log::debug;

use crate::common::Rgb;
use crate::editor::geometry::Point;

use super::components::{ObjectRef, PendingStroke, Stroke, StrokeId, TextAnnotation, TextId};

/// How an edit session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// The annotation has text and stays in the store.
    Kept(TextId),
    /// The annotation was empty and has been removed.
    Discarded(TextId),
}

/// Strokes and text annotations in insertion order, plus the one annotation
/// currently being edited.
#[derive(Debug, Default)]
pub struct AnnotationStore {
    texts: Vec<TextAnnotation>,
    strokes: Vec<Stroke>,
    editing: Option<TextId>,
    next_id: u64,
}

impl AnnotationStore {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    pub fn texts(&self) -> &[TextAnnotation] {
        &self.texts
    }

    pub fn texts_mut(&mut self) -> impl Iterator<Item = &mut TextAnnotation> {
        self.texts.iter_mut()
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn text(&self, id: TextId) -> Option<&TextAnnotation> {
        self.texts.iter().find(|t| t.id() == id)
    }

    pub fn text_mut(&mut self, id: TextId) -> Option<&mut TextAnnotation> {
        self.texts.iter_mut().find(|t| t.id() == id)
    }

    pub fn stroke(&self, id: StrokeId) -> Option<&Stroke> {
        self.strokes.iter().find(|s| s.id() == id)
    }

    pub fn stroke_mut(&mut self, id: StrokeId) -> Option<&mut Stroke> {
        self.strokes.iter_mut().find(|s| s.id() == id)
    }

    pub fn contains(&self, object: ObjectRef) -> bool {
        match object {
            ObjectRef::Text(id) => self.text(id).is_some(),
            ObjectRef::Stroke(id) => self.stroke(id).is_some(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty() && self.strokes.is_empty()
    }

    /// Add an empty, uncommitted, non-editing text annotation.
    pub fn add_text(&mut self, position: Point, color: Rgb) -> TextId {
        let id = TextId(self.next_id());
        self.texts.push(TextAnnotation::new(id, position, color));
        id
    }

    /// Commit a finished stroke. Strokes with fewer than two points are dropped.
    pub fn add_stroke(&mut self, pending: PendingStroke) -> Option<StrokeId> {
        if !pending.is_drawable() {
            debug!("Discarding stroke with {} point(s)", pending.points.len());
            return None;
        }
        let id = StrokeId(self.next_id());
        self.strokes.push(Stroke::from_pending(id, pending));
        Some(id)
    }

    pub fn editing(&self) -> Option<TextId> {
        self.editing
    }

    pub fn editing_text_mut(&mut self) -> Option<&mut TextAnnotation> {
        let id = self.editing?;
        self.text_mut(id)
    }

    /// Put `id` into edit mode, ending any other edit first.
    ///
    /// Returns false if the annotation does not exist (including when it was the
    /// empty annotation discarded by ending the previous edit).
    pub fn begin_editing(&mut self, id: TextId) -> bool {
        if self.editing == Some(id) {
            return true;
        }
        self.finish_editing(false);
        match self.text_mut(id) {
            Some(text) => {
                text.set_editing(true);
                self.editing = Some(id);
                true
            }
            None => false,
        }
    }

    /// End the current edit. `commit` marks the annotation committed.
    ///
    /// An annotation left empty is removed in either case, so empty text never
    /// outlives its edit session.
    pub fn finish_editing(&mut self, commit: bool) -> Option<EditOutcome> {
        let id = self.editing.take()?;
        let text = self.text_mut(id)?;
        text.set_editing(false);

        if text.is_empty() {
            self.texts.retain(|t| t.id() != id);
            return Some(EditOutcome::Discarded(id));
        }

        if commit {
            text.mark_committed();
        }
        Some(EditOutcome::Kept(id))
    }

    pub fn remove(&mut self, object: ObjectRef) -> bool {
        match object {
            ObjectRef::Text(id) => {
                if self.editing == Some(id) {
                    self.editing = None;
                }
                let before = self.texts.len();
                self.texts.retain(|t| t.id() != id);
                self.texts.len() != before
            }
            ObjectRef::Stroke(id) => {
                let before = self.strokes.len();
                self.strokes.retain(|s| s.id() != id);
                self.strokes.len() != before
            }
        }
    }

    pub fn clear(&mut self) {
        self.texts.clear();
        self.strokes.clear();
        self.editing = None;
    }

    /// Point that follows the pointer while dragging: text position or stroke center.
    pub fn anchor(&self, object: ObjectRef) -> Option<Point> {
        match object {
            ObjectRef::Text(id) => self.text(id).map(TextAnnotation::position),
            ObjectRef::Stroke(id) => self.stroke(id).map(Stroke::center),
        }
    }

    pub fn translate(&mut self, object: ObjectRef, dx: i32, dy: i32) -> bool {
        match object {
            ObjectRef::Text(id) => self.text_mut(id).map(|t| t.move_by(dx, dy)).is_some(),
            ObjectRef::Stroke(id) => self.stroke_mut(id).map(|s| s.translate(dx, dy)).is_some(),
        }
    }

    pub fn recolor(&mut self, object: ObjectRef, color: Rgb) -> bool {
        match object {
            ObjectRef::Text(id) => self.text_mut(id).map(|t| t.color = color).is_some(),
            ObjectRef::Stroke(id) => self.stroke_mut(id).map(|s| s.color = color).is_some(),
        }
    }
}
