//! Integer image-space geometry shared by layout, hit testing and the controller.
//!
//! Image space has x to the right and y pointing down, with the origin at the
//! top-left corner of the drawable surface.

use std::ops::{Add, Sub};

use bevy::math::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn as_vec2(self) -> Vec2 {
        Vec2::new(self.x as f32, self.y as f32)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Axis-aligned rectangle. Contains its top/left edges but not its bottom/right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    pub fn contains(&self, point: Point) -> bool {
        !self.is_empty()
            && point.x >= self.x
            && point.x < self.right()
            && point.y >= self.y
            && point.y < self.bottom()
    }

    /// Smallest rectangle enclosing every point, or `None` for an empty iterator.
    pub fn enclosing(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let (mut min, mut max) = (first, first);
        for p in iter {
            min = Point::new(min.x.min(p.x), min.y.min(p.y));
            max = Point::new(max.x.max(p.x), max.y.max(p.y));
        }
        Some(Self::new(min.x, min.y, max.x - min.x, max.y - min.y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_arithmetic() {
        let a = Point::new(10, 20);
        let b = Point::new(3, -4);
        assert_eq!(a + b, Point::new(13, 16));
        assert_eq!(a - b, Point::new(7, 24));
        assert_eq!(a.offset(-10, 5), Point::new(0, 25));
    }

    #[test]
    fn test_rect_contains_is_half_open() {
        let rect = Rect::new(10, 10, 20, 10);
        assert!(rect.contains(Point::new(10, 10)));
        assert!(rect.contains(Point::new(29, 19)));
        assert!(!rect.contains(Point::new(30, 15)));
        assert!(!rect.contains(Point::new(15, 20)));
        assert!(!rect.contains(Point::new(9, 15)));
    }

    #[test]
    fn test_zero_width_rect_contains_nothing() {
        let rect = Rect::new(5, 5, 0, 15);
        assert!(!rect.contains(Point::new(5, 6)));
    }

    #[test]
    fn test_rect_enclosing() {
        let rect = Rect::enclosing([Point::new(4, 9), Point::new(-2, 3), Point::new(7, 5)]);
        assert_eq!(rect, Some(Rect::new(-2, 3, 9, 6)));
        assert_eq!(Rect::enclosing(Vec::<Point>::new()), None);
    }
}
