//! Common types shared across multiple modules.
//!
//! [`Rgb`] is the color type of the annotation core and the config file. It
//! converts into egui colors for painting and toolbar swatches.

use bevy_egui::egui;
use serde::{Deserialize, Serialize};

/// Opaque 8-bit sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const GRAY: Rgb = Rgb::new(128, 128, 128);
    pub const LIGHT_GRAY: Rgb = Rgb::new(192, 192, 192);
    pub const RED: Rgb = Rgb::new(255, 0, 0);
    pub const GREEN: Rgb = Rgb::new(0, 160, 0);
    pub const BLUE: Rgb = Rgb::new(0, 0, 255);
    pub const YELLOW: Rgb = Rgb::new(255, 200, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_color32(self) -> egui::Color32 {
        egui::Color32::from_rgb(self.r, self.g, self.b)
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Swatches offered by the toolbar color picker.
pub const PALETTE: [(&str, Rgb); 6] = [
    ("Black", Rgb::BLACK),
    ("Red", Rgb::RED),
    ("Green", Rgb::GREEN),
    ("Blue", Rgb::BLUE),
    ("Yellow", Rgb::YELLOW),
    ("White", Rgb::WHITE),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_default_is_black() {
        assert_eq!(Rgb::default(), Rgb::BLACK);
    }

    #[test]
    fn test_rgb_to_color32() {
        let color = Rgb::new(12, 34, 56).to_color32();
        assert_eq!(color, egui::Color32::from_rgb(12, 34, 56));
    }

    #[test]
    fn test_rgb_serde() {
        let json = serde_json::to_string(&Rgb::RED).unwrap();
        assert_eq!(json, r#"{"r":255,"g":0,"b":0}"#);
        let back: Rgb = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Rgb::RED);
    }
}
