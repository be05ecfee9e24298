//! Centralized constants used across the application.

/// Default window width in pixels
pub const DEFAULT_WINDOW_WIDTH: f32 = 1200.0;

/// Default window height in pixels
pub const DEFAULT_WINDOW_HEIGHT: f32 = 800.0;

/// Surface size used when no image is loaded
pub const DEFAULT_SURFACE_WIDTH: i32 = 400;
pub const DEFAULT_SURFACE_HEIGHT: i32 = 300;

/// Gap kept between wrapped text and the right edge of the surface
pub const TEXT_MARGIN: i32 = 10;

/// Checkerboard cell size (pixels) behind a missing image
pub const CHECKER_SIZE: u32 = 20;

pub const DEFAULT_STROKE_WIDTH: f32 = 2.0;
pub const DEFAULT_FONT_SIZE: f32 = 12.0;

/// Maximum pointer travel (pixels) between the clicks of a double-click
pub const DOUBLE_CLICK_SLOP: f32 = 4.0;

/// Z layers for canvas sprites
pub const BACKGROUND_Z: f32 = 0.0;
pub const PHOTO_Z: f32 = 1.0;
