//! The drawable surface and its mapping to Bevy world space.
//!
//! The surface is centered on the world origin. World space is y-up, image
//! space is y-down with the origin at the surface's top-left corner.

use bevy::math::Vec2;

use crate::constants::{DEFAULT_SURFACE_HEIGHT, DEFAULT_SURFACE_WIDTH, TEXT_MARGIN};

use super::geometry::{Point, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Surface {
    pub width: i32,
    pub height: i32,
}

impl Default for Surface {
    fn default() -> Self {
        Self {
            width: DEFAULT_SURFACE_WIDTH,
            height: DEFAULT_SURFACE_HEIGHT,
        }
    }
}

impl Surface {
    pub fn for_image(width: u32, height: u32) -> Self {
        Self {
            width: width.min(i32::MAX as u32) as i32,
            height: height.min(i32::MAX as u32) as i32,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    pub fn contains(&self, point: Point) -> bool {
        self.rect().contains(point)
    }

    /// Width available to text inserted at `position`, keeping a right margin.
    pub fn max_width_for(&self, position: Point) -> i32 {
        self.width - position.x - TEXT_MARGIN
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    pub fn image_to_world(&self, point: Point) -> Vec2 {
        self.image_to_world_f(point.as_vec2())
    }

    /// Same as [`Self::image_to_world`] for fractional image coordinates.
    pub fn image_to_world_f(&self, point: Vec2) -> Vec2 {
        let half = self.size() / 2.0;
        Vec2::new(point.x - half.x, half.y - point.y)
    }

    pub fn world_to_image(&self, world: Vec2) -> Point {
        let half = self.size() / 2.0;
        Point::new(
            (world.x + half.x).floor() as i32,
            (half.y - world.y).floor() as i32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_surface() {
        let surface = Surface::default();
        assert_eq!((surface.width, surface.height), (400, 300));
        assert_eq!(surface.max_width_for(Point::new(30, 50)), 360);
    }

    #[test]
    fn test_contains_is_half_open() {
        let surface = Surface::for_image(100, 50);
        assert!(surface.contains(Point::new(0, 0)));
        assert!(surface.contains(Point::new(99, 49)));
        assert!(!surface.contains(Point::new(100, 10)));
        assert!(!surface.contains(Point::new(10, -1)));
    }

    #[test]
    fn test_world_mapping() {
        let surface = Surface::for_image(200, 100);
        assert_eq!(surface.image_to_world(Point::new(0, 0)), Vec2::new(-100.0, 50.0));
        assert_eq!(surface.image_to_world(Point::new(200, 100)), Vec2::new(100.0, -50.0));
        assert_eq!(surface.world_to_image(Vec2::new(-100.0, 50.0)), Point::new(0, 0));
        assert_eq!(surface.world_to_image(Vec2::new(0.4, -0.4)), Point::new(100, 50));
        assert_eq!(surface.world_to_image(Vec2::new(-0.5, 0.5)), Point::new(99, 49));
    }
}
