//! Centralized color theme for the application.
//!
//! Annotation colors are chosen by the user; everything else the canvas and
//! the chrome draw comes from here.

use bevy::prelude::Color;

// ============================================================================
// Canvas Colors
// ============================================================================

/// Gray levels of the checkerboard shown when no photo is loaded
pub const CHECKER_LIGHT: u8 = 220;
pub const CHECKER_DARK: u8 = 200;

/// The blank back of a flipped photo
pub const BACK_SIDE_COLOR: Color = Color::WHITE;

/// Thin border around the back side
pub const BACK_BORDER_COLOR: Color = Color::srgb(0.75, 0.75, 0.75);

// ============================================================================
// Selection Colors
// ============================================================================

/// Light blue for the selection rectangle
pub const SELECTION_COLOR: Color = Color::srgb(0.2, 0.6, 1.0);

// ============================================================================
// UI Colors (egui)
// ============================================================================

pub mod ui {
    use bevy_egui::egui;

    /// Text edit caret
    pub const CARET: egui::Color32 = egui::Color32::BLACK;

    /// Dark grey panel background (status bar)
    pub const PANEL_BACKGROUND: egui::Color32 = egui::Color32::from_rgb(45, 45, 48);

    /// Grey for help/hint text
    pub const HINT_TEXT: egui::Color32 = egui::Color32::GRAY;

    /// White for the selected swatch border
    pub const SELECTED_BORDER: egui::Color32 = egui::Color32::WHITE;

    /// Dark grey for unselected swatch borders
    pub const UNSELECTED_BORDER: egui::Color32 = egui::Color32::DARK_GRAY;

    /// Red for error messages
    pub const ERROR_TEXT: egui::Color32 = egui::Color32::RED;
}
