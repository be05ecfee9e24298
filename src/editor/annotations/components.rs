//! Annotation value types owned by the [`super::AnnotationStore`].

use crate::common::Rgb;
use crate::constants::DEFAULT_STROKE_WIDTH;
use crate::editor::geometry::{Point, Rect};
use crate::editor::text::{text_bounds, CachedBounds, FontMetrics};

use super::hit_testing::point_near_polyline;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextId(pub(crate) u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StrokeId(pub(crate) u64);

/// Reference to any annotation in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectRef {
    Text(TextId),
    Stroke(StrokeId),
}

/// A positioned, word-wrapped text note.
///
/// `position` is the first baseline's left end. Any change to the text or the
/// position drops the cached bounds.
#[derive(Debug, Clone)]
pub struct TextAnnotation {
    id: TextId,
    position: Point,
    text: String,
    pub color: Rgb,
    editing: bool,
    committed: bool,
    cached_bounds: Option<CachedBounds>,
}

impl TextAnnotation {
    pub(crate) fn new(id: TextId, position: Point, color: Rgb) -> Self {
        Self {
            id,
            position,
            text: String::new(),
            color,
            editing: false,
            committed: false,
            cached_bounds: None,
        }
    }

    pub fn id(&self) -> TextId {
        self.id
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn is_committed(&self) -> bool {
        self.committed
    }

    pub fn cached_bounds(&self) -> Option<CachedBounds> {
        self.cached_bounds
    }

    pub(crate) fn set_editing(&mut self, editing: bool) {
        self.editing = editing;
    }

    pub(crate) fn mark_committed(&mut self) {
        self.committed = true;
    }

    pub fn push_char(&mut self, ch: char) {
        self.text.push(ch);
        self.cached_bounds = None;
    }

    /// Remove the last character. Returns false when there was nothing to remove.
    pub fn backspace(&mut self) -> bool {
        let removed = self.text.pop().is_some();
        if removed {
            self.cached_bounds = None;
        }
        removed
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cached_bounds = None;
    }

    pub fn set_position(&mut self, position: Point) {
        self.position = position;
        self.cached_bounds = None;
    }

    pub fn move_by(&mut self, dx: i32, dy: i32) {
        self.set_position(self.position.offset(dx, dy));
    }

    /// Bounds for `max_width`, recomputed when the cache is empty or was filled
    /// for a different width.
    pub fn bounds(&mut self, max_width: i32, metrics: &dyn FontMetrics) -> Rect {
        match self.cached_bounds {
            Some(cached) if cached.max_width == max_width => cached.rect,
            _ => {
                let rect = text_bounds(self.position, &self.text, max_width, metrics);
                self.record_bounds(rect, max_width);
                rect
            }
        }
    }

    pub(crate) fn invalidate_bounds(&mut self) {
        self.cached_bounds = None;
    }

    /// Remember bounds the renderer derived from the layout it just drew.
    pub(crate) fn record_bounds(&mut self, rect: Rect, max_width: i32) {
        self.cached_bounds = Some(CachedBounds { rect, max_width });
    }
}

/// Style given to newly created annotations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Brush {
    pub stroke_color: Rgb,
    pub text_color: Rgb,
    pub stroke_width: f32,
}

impl Default for Brush {
    fn default() -> Self {
        Self {
            stroke_color: Rgb::BLACK,
            text_color: Rgb::BLACK,
            stroke_width: DEFAULT_STROKE_WIDTH,
        }
    }
}

/// A stroke still being drawn. It only reaches the store once it has two points.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingStroke {
    pub points: Vec<Point>,
    pub color: Rgb,
    pub width: f32,
}

impl PendingStroke {
    pub fn new(start: Point, color: Rgb, width: f32) -> Self {
        Self {
            points: vec![start],
            color,
            width,
        }
    }

    pub fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    pub fn is_drawable(&self) -> bool {
        self.points.len() >= 2
    }
}

/// A committed freehand polyline. Only translation changes it after commit.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    id: StrokeId,
    points: Vec<Point>,
    pub color: Rgb,
    pub width: f32,
}

impl Stroke {
    pub(crate) fn from_pending(id: StrokeId, pending: PendingStroke) -> Self {
        Self {
            id,
            points: pending.points,
            color: pending.color,
            width: pending.width,
        }
    }

    pub fn id(&self) -> StrokeId {
        self.id
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn translate(&mut self, dx: i32, dy: i32) {
        for point in &mut self.points {
            *point = point.offset(dx, dy);
        }
    }

    /// Arithmetic mean of the points, used as the drag anchor.
    pub fn center(&self) -> Point {
        if self.points.is_empty() {
            return Point::ZERO;
        }
        let n = self.points.len() as i64;
        let (sx, sy) = self
            .points
            .iter()
            .fold((0i64, 0i64), |(sx, sy), p| (sx + p.x as i64, sy + p.y as i64));
        Point::new(sx.div_euclid(n) as i32, sy.div_euclid(n) as i32)
    }

    pub fn contains_point(&self, point: Point, tolerance: f32) -> bool {
        point_near_polyline(point, &self.points, tolerance)
    }

    pub fn hit_tolerance(&self) -> f32 {
        self.width / 2.0
    }

    pub fn bounding_rect(&self) -> Option<Rect> {
        Rect::enclosing(self.points.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::text::MonospaceMetrics;

    const METRICS: MonospaceMetrics = MonospaceMetrics::new(10.0, 12, 3, 0);

    fn stroke(points: &[(i32, i32)]) -> Stroke {
        let mut pending = PendingStroke::new(Point::new(points[0].0, points[0].1), Rgb::BLACK, 2.0);
        for &(x, y) in &points[1..] {
            pending.push(Point::new(x, y));
        }
        Stroke::from_pending(StrokeId(1), pending)
    }

    #[test]
    fn test_text_mutation_invalidates_cache() {
        let mut text = TextAnnotation::new(TextId(1), Point::new(10, 20), Rgb::BLACK);
        text.set_text("hello");
        assert_eq!(text.bounds(100, &METRICS), Rect::new(10, 8, 50, 15));
        assert!(text.cached_bounds().is_some());

        text.push_char('!');
        assert!(text.cached_bounds().is_none());
        assert_eq!(text.bounds(100, &METRICS).width, 60);

        text.backspace();
        assert!(text.cached_bounds().is_none());

        text.bounds(100, &METRICS);
        text.move_by(5, 5);
        assert!(text.cached_bounds().is_none());
    }

    #[test]
    fn test_cache_miss_on_different_width() {
        let mut text = TextAnnotation::new(TextId(1), Point::new(0, 12), Rgb::BLACK);
        text.set_text("The quick brown fox");
        let wide = text.bounds(400, &METRICS);
        assert_eq!(wide.width, 190);

        // A narrower surface must not reuse the wide rectangle.
        let narrow = text.bounds(60, &METRICS);
        assert_eq!(narrow.width, 50);
        assert_eq!(narrow.height, 60);
        assert_eq!(text.cached_bounds().map(|c| c.max_width), Some(60));
    }

    #[test]
    fn test_backspace_on_empty_text() {
        let mut text = TextAnnotation::new(TextId(1), Point::ZERO, Rgb::BLACK);
        assert!(!text.backspace());
    }

    #[test]
    fn test_stroke_center_is_mean() {
        let s = stroke(&[(0, 0), (10, 0), (20, 30)]);
        assert_eq!(s.center(), Point::new(10, 10));
    }

    #[test]
    fn test_stroke_translate_moves_every_point() {
        let mut s = stroke(&[(0, 0), (10, 5)]);
        s.translate(3, -2);
        assert_eq!(s.points(), &[Point::new(3, -2), Point::new(13, 3)]);
        assert_eq!(s.bounding_rect(), Some(Rect::new(3, -2, 10, 5)));
    }

    #[test]
    fn test_pending_stroke_needs_two_points() {
        let mut pending = PendingStroke::new(Point::ZERO, Rgb::BLACK, 2.0);
        assert!(!pending.is_drawable());
        pending.push(Point::new(1, 1));
        assert!(pending.is_drawable());
    }
}
