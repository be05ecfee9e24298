//! Selection, drag and text-edit state machine.
//!
//! Every pointer gesture is classified exactly once: a press remembers what it
//! landed on, and the first movement decides between dragging that object and
//! drawing a stroke. A release without movement either keeps the selection or
//! opens a new text annotation for editing.
//!
//! - [`input`] - Bevy systems turning mouse and keyboard input into controller calls
//! - [`gizmos`] - selection indicator drawing

mod gizmos;
mod input;


use bevy::log::debug;

use crate::constants::TEXT_MARGIN;
use crate::editor::annotations::{
    pick, AnnotationStore, Brush, EditOutcome, ObjectRef, PendingStroke, SelectionPolicy, TextId,
};
use crate::editor::geometry::Point;
use crate::editor::surface::Surface;
use crate::editor::text::FontMetrics;

pub use gizmos::{configure_selection_gizmos, draw_selection_indicator, SelectionGizmoGroup};
pub use input::{feed_keyboard, feed_pointer, ClickTracker, PointerTracker};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub point: Point,
    pub button: PointerButton,
    /// 1 for a single click, 2 or more when the press continues a click run.
    pub clicks: u8,
}

impl PointerEvent {
    pub fn primary(point: Point) -> Self {
        Self {
            point,
            button: PointerButton::Primary,
            clicks: 1,
        }
    }

    pub fn with_clicks(self, clicks: u8) -> Self {
        Self { clicks, ..self }
    }
}

/// Keys the controller reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKey {
    Character(char),
    Backspace,
    Enter,
    Escape,
    Delete,
}

/// What a pointer release asks of the surrounding canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerUp {
    Handled,
    /// The release completed a double-click; the display mode should toggle.
    DoubleClick,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ControllerState {
    #[default]
    Idle,
    /// Button held, motion not yet classified. `moved` is set when the first
    /// motion could neither drag nor draw, which turns the gesture into a no-op.
    PointerDown {
        origin: Point,
        hit: Option<ObjectRef>,
        moved: bool,
    },
    Dragging {
        target: ObjectRef,
    },
    DrawingStroke {
        stroke: PendingStroke,
    },
    TextEditing {
        target: TextId,
    },
}

impl ControllerState {
    pub fn label(&self) -> &'static str {
        match self {
            ControllerState::Idle => "Idle",
            ControllerState::PointerDown { .. } => "Pressed",
            ControllerState::Dragging { .. } => "Dragging",
            ControllerState::DrawingStroke { .. } => "Drawing",
            ControllerState::TextEditing { .. } => "Editing text",
        }
    }
}

/// Everything the controller reads or mutates while handling one event.
pub struct Workspace<'a> {
    pub store: &'a mut AnnotationStore,
    pub surface: Surface,
    pub brush: Brush,
    pub policy: SelectionPolicy,
    pub metrics: &'a dyn FontMetrics,
}

/// Gesture state plus the single selected object.
///
/// The selection is never the annotation being edited: entering edit mode
/// clears it.
#[derive(Debug, Default)]
pub struct SelectionController {
    state: ControllerState,
    selected: Option<ObjectRef>,
    drag_offset: Option<Point>,
}

impl SelectionController {
    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    pub fn selected(&self) -> Option<ObjectRef> {
        self.selected
    }

    /// Pointer position relative to the selected object's anchor at press time.
    pub fn drag_offset(&self) -> Option<Point> {
        self.drag_offset
    }

    pub fn editing(&self) -> Option<TextId> {
        match self.state {
            ControllerState::TextEditing { target } => Some(target),
            _ => None,
        }
    }

    pub fn pending_stroke(&self) -> Option<&PendingStroke> {
        match &self.state {
            ControllerState::DrawingStroke { stroke } => Some(stroke),
            _ => None,
        }
    }

    pub fn on_pointer_down(&mut self, event: PointerEvent, ws: &mut Workspace) {
        if event.button != PointerButton::Primary {
            return;
        }

        // A press always starts a fresh gesture.
        self.end_edit(ws.store);
        self.state = ControllerState::Idle;

        let surface = ws.surface;
        let hit = pick(
            event.point,
            ws.store,
            |p| surface.max_width_for(p),
            ws.metrics,
            ws.policy,
        );

        self.selected = hit;
        self.drag_offset = hit
            .and_then(|object| ws.store.anchor(object))
            .map(|anchor| event.point - anchor);
        self.state = ControllerState::PointerDown {
            origin: event.point,
            hit,
            moved: false,
        };
    }

    pub fn on_pointer_move(&mut self, point: Point, ws: &mut Workspace) {
        self.state = match std::mem::take(&mut self.state) {
            ControllerState::PointerDown {
                origin,
                hit,
                moved: false,
            } if point != origin => match hit {
                Some(target) => {
                    self.drag_to(target, point, ws);
                    debug!("Dragging {:?}", target);
                    ControllerState::Dragging { target }
                }
                None if ws.surface.contains(origin) && ws.surface.contains(point) => {
                    let mut stroke =
                        PendingStroke::new(origin, ws.brush.stroke_color, ws.brush.stroke_width);
                    stroke.push(point);
                    ControllerState::DrawingStroke { stroke }
                }
                None => ControllerState::PointerDown {
                    origin,
                    hit,
                    moved: true,
                },
            },
            ControllerState::Dragging { target } => {
                self.drag_to(target, point, ws);
                ControllerState::Dragging { target }
            }
            ControllerState::DrawingStroke { mut stroke } => {
                if ws.surface.contains(point) {
                    stroke.push(point);
                }
                ControllerState::DrawingStroke { stroke }
            }
            other => other,
        };
    }

    pub fn on_pointer_up(&mut self, event: PointerEvent, ws: &mut Workspace) -> PointerUp {
        if event.button != PointerButton::Primary {
            return PointerUp::Handled;
        }

        self.state = match std::mem::take(&mut self.state) {
            ControllerState::PointerDown {
                origin,
                hit,
                moved: false,
            } => {
                if event.clicks >= 2 {
                    return PointerUp::DoubleClick;
                }
                match hit {
                    Some(_) => ControllerState::Idle,
                    None if ws.surface.contains(origin) => self.start_text(origin, ws),
                    None => ControllerState::Idle,
                }
            }
            ControllerState::PointerDown { moved: true, .. } => ControllerState::Idle,
            ControllerState::Dragging { target, .. } => {
                debug!("Finished dragging {:?}", target);
                ControllerState::Idle
            }
            ControllerState::DrawingStroke { stroke } => {
                if let Some(id) = ws.store.add_stroke(stroke) {
                    debug!("Committed stroke {:?}", id);
                }
                ControllerState::Idle
            }
            other => other,
        };
        PointerUp::Handled
    }

    pub fn on_key(&mut self, key: EditKey, ws: &mut Workspace) {
        match self.state {
            ControllerState::TextEditing { target } => self.edit_key(target, key, ws.store),
            ControllerState::Idle => match (key, self.selected) {
                (EditKey::Escape, Some(_)) => self.clear_selection(),
                (EditKey::Delete, Some(object)) => {
                    ws.store.remove(object);
                    self.clear_selection();
                }
                (EditKey::Character(_) | EditKey::Backspace, Some(ObjectRef::Text(id))) => {
                    if ws.store.begin_editing(id) {
                        self.clear_selection();
                        self.state = ControllerState::TextEditing { target: id };
                        self.edit_key(id, key, ws.store);
                    }
                }
                _ => {}
            },
            _ => {}
        }
    }

    /// Leave edit mode without committing. Empty annotations are dropped.
    pub fn end_edit(&mut self, store: &mut AnnotationStore) -> Option<EditOutcome> {
        if !matches!(self.state, ControllerState::TextEditing { .. }) {
            return None;
        }
        self.state = ControllerState::Idle;
        store.finish_editing(false)
    }

    /// Drop every reference to `object` after it left the store.
    pub fn forget(&mut self, object: ObjectRef) {
        if self.selected == Some(object) {
            self.clear_selection();
        }
        let owns_gesture = match &self.state {
            ControllerState::Dragging { target, .. } => *target == object,
            ControllerState::TextEditing { target } => ObjectRef::Text(*target) == object,
            ControllerState::PointerDown { hit, .. } => *hit == Some(object),
            _ => false,
        };
        if owns_gesture {
            self.state = ControllerState::Idle;
        }
    }

    /// Abandon any gesture, edit and selection.
    pub fn reset(&mut self) {
        self.state = ControllerState::Idle;
        self.clear_selection();
    }

    fn clear_selection(&mut self) {
        self.selected = None;
        self.drag_offset = None;
    }

    /// Move `target` so it keeps the press offset from the pointer.
    ///
    /// Text stops while at least one glyph still fits before the right margin,
    /// otherwise it could not be laid out, drawn or picked again.
    fn drag_to(&self, target: ObjectRef, point: Point, ws: &mut Workspace) {
        let (Some(anchor), Some(offset)) = (ws.store.anchor(target), self.drag_offset) else {
            return;
        };
        let mut wanted = point - offset;
        if let ObjectRef::Text(_) = target {
            let glyph = ws.metrics.advance_width("M").max(1);
            let right = ws.surface.width - TEXT_MARGIN - glyph;
            wanted = Point::new(wanted.x.min(right.max(anchor.x)), wanted.y);
        }
        let delta = wanted - anchor;
        if delta != Point::ZERO {
            ws.store.translate(target, delta.x, delta.y);
        }
    }

    fn start_text(&mut self, position: Point, ws: &mut Workspace) -> ControllerState {
        let id = ws.store.add_text(position, ws.brush.text_color);
        if !ws.store.begin_editing(id) {
            return ControllerState::Idle;
        }
        self.clear_selection();
        debug!("Editing new text at ({}, {})", position.x, position.y);
        ControllerState::TextEditing { target: id }
    }

    fn edit_key(&mut self, target: TextId, key: EditKey, store: &mut AnnotationStore) {
        let Some(text) = store.text_mut(target) else {
            self.state = ControllerState::Idle;
            return;
        };

        match key {
            EditKey::Character(ch) if !ch.is_control() => text.push_char(ch),
            EditKey::Character(_) => {}
            EditKey::Backspace => {
                text.backspace();
            }
            EditKey::Enter => {
                let outcome = store.finish_editing(true);
                debug!("Text edit committed: {:?}", outcome);
                self.state = ControllerState::Idle;
            }
            EditKey::Escape => {
                let outcome = store.finish_editing(false);
                debug!("Text edit cancelled: {:?}", outcome);
                self.state = ControllerState::Idle;
            }
            EditKey::Delete => {
                store.remove(ObjectRef::Text(target));
                self.state = ControllerState::Idle;
            }
        }
    }
}
