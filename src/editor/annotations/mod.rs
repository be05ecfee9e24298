//! Annotations drawn over the photo: freehand strokes and word-wrapped text.
//!
//! ## Module Structure
//!
//! - [`components`] - value types ([`TextAnnotation`], [`Stroke`], ids, [`Brush`])
//! - [`store`] - [`AnnotationStore`], owner of every annotation and of the edit focus
//! - [`hit_testing`] - stroke geometry and [`pick`]
//! - [`rendering`] - per-frame snapshot and egui painting
//!
//! ## Hit Testing
//!
//! Text is picked by the bounds of its laid-out lines, the same layout the
//! painter draws. Strokes are paint-only unless [`SelectionPolicy`] enables
//! them, in which case a point within half the stroke width of any segment
//! picks it.

mod components;
mod hit_testing;
mod rendering;
mod store;

pub use components::{
    Brush, ObjectRef, PendingStroke, Stroke, StrokeId, TextAnnotation, TextId,
};
pub use hit_testing::{distance_to_segment, pick, point_near_polyline, SelectionPolicy};
pub use rendering::{
    measure_annotation_font, paint_annotations, prepare_canvas_frame, CanvasFrame,
};
pub use store::{AnnotationStore, EditOutcome};
