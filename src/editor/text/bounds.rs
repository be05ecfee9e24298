//! Bounding rectangles derived from a layout.

use crate::editor::geometry::{Point, Rect};

use super::layout::{layout, LayoutResult};
use super::metrics::FontMetrics;

/// Rectangle enclosing an already computed layout of text inserted at `position`.
///
/// The top edge sits one ascent above the first baseline. Empty layouts give a
/// zero-width rectangle one line tall, which is where the edit caret is drawn.
pub fn layout_bounds(position: Point, layout: &LayoutResult, metrics: &dyn FontMetrics) -> Rect {
    Rect::new(
        position.x,
        position.y - metrics.ascent(),
        layout.max_line_width,
        layout.total_height,
    )
}

/// Lay out `text` and return its bounds.
pub fn text_bounds(position: Point, text: &str, max_width: i32, metrics: &dyn FontMetrics) -> Rect {
    let result = layout(text, position, max_width, metrics);
    layout_bounds(position, &result, metrics)
}

/// Bounds remembered together with the width they were computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachedBounds {
    pub rect: Rect,
    pub max_width: i32,
}
