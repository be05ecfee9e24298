//! Hit testing for annotations.

use bevy::math::Vec2;

use crate::editor::geometry::Point;
use crate::editor::text::FontMetrics;

use super::components::ObjectRef;
use super::store::AnnotationStore;

/// Whether strokes take part in picking. Text is always pickable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionPolicy {
    pub strokes_selectable: bool,
}

/// Distance from `point` to the segment `start..end`.
///
/// The projection is clamped to the segment, so points beyond either end
/// measure to the nearer endpoint. A zero-length segment is a point.
pub fn distance_to_segment(point: Vec2, start: Vec2, end: Vec2) -> f32 {
    let segment = end - start;
    let len_sq = segment.length_squared();

    if len_sq < 0.0001 {
        return point.distance(start);
    }

    let t = ((point - start).dot(segment) / len_sq).clamp(0.0, 1.0);
    point.distance(start + segment * t)
}

/// Check if a point is within `tolerance` of any segment of a polyline
pub fn point_near_polyline(point: Point, points: &[Point], tolerance: f32) -> bool {
    let p = point.as_vec2();
    points
        .windows(2)
        .any(|w| distance_to_segment(p, w[0].as_vec2(), w[1].as_vec2()) <= tolerance)
}

/// Topmost annotation under `point`.
///
/// Text annotations are tested in store order and the first whose bounds
/// contain the point wins. An empty annotation being edited is skipped, as is
/// any annotation with no room to lay out. Strokes are only considered when
/// the policy allows it and no text matched.
pub fn pick(
    point: Point,
    store: &mut AnnotationStore,
    max_width_for: impl Fn(Point) -> i32,
    metrics: &dyn FontMetrics,
    policy: SelectionPolicy,
) -> Option<ObjectRef> {
    for text in store.texts_mut() {
        if text.is_editing() && text.is_empty() {
            continue;
        }
        let max_width = max_width_for(text.position());
        if max_width <= 0 {
            continue;
        }
        if text.bounds(max_width, metrics).contains(point) {
            return Some(ObjectRef::Text(text.id()));
        }
    }

    if !policy.strokes_selectable {
        return None;
    }

    store
        .strokes()
        .iter()
        .find(|stroke| stroke.contains_point(point, stroke.hit_tolerance()))
        .map(|stroke| ObjectRef::Stroke(stroke.id()))
}
