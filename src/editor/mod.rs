//! The annotation editor: the canvas model plus the systems that feed it input
//! and paint it.
//!
//! ## Module Structure
//!
//! - [`geometry`] - integer points and rectangles in image space
//! - [`text`] - font metrics, word-wrap layout and text bounds
//! - [`annotations`] - annotation types, store, hit testing and painting
//! - [`selection`] - the pointer/keyboard state machine and its input plumbing
//! - [`surface`] - the drawable area and its mapping to world space
//! - [`canvas`] - the [`Canvas`] resource tying the above together

pub mod annotations;
mod camera;
pub mod canvas;
mod conditions;
pub mod geometry;
pub mod params;
pub mod selection;
pub mod surface;
pub mod text;

pub use annotations::{Brush, ObjectRef, SelectionPolicy};
pub use camera::EditorCamera;
pub use canvas::{Canvas, CanvasCommand, CanvasSettings, DoubleClickAction, PhotoSide};

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

use crate::config::ConfigLoaded;

pub struct EditorPlugin;

impl Plugin for EditorPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Canvas>()
            .init_resource::<annotations::CanvasFrame>()
            .init_resource::<selection::ClickTracker>()
            .init_resource::<selection::PointerTracker>()
            .add_message::<CanvasCommand>()
            .init_gizmo_group::<selection::SelectionGizmoGroup>()
            .add_systems(
                Startup,
                (
                    camera::spawn_camera,
                    selection::configure_selection_gizmos,
                    canvas::apply_config_to_canvas.after(ConfigLoaded),
                ),
            )
            .add_systems(
                Update,
                (
                    camera::camera_pan,
                    camera::camera_zoom,
                    camera::apply_camera_zoom,
                    camera::fit_camera_on_load,
                ),
            )
            // Input first, then commands, then the frame snapshot everything draws from
            .add_systems(
                Update,
                (
                    (selection::feed_pointer, selection::feed_keyboard)
                        .chain()
                        .run_if(conditions::no_dialog_open),
                    canvas::handle_canvas_commands.run_if(on_message::<CanvasCommand>),
                    annotations::prepare_canvas_frame,
                    selection::draw_selection_indicator,
                )
                    .chain(),
            )
            .add_systems(
                EguiPrimaryContextPass,
                (
                    annotations::measure_annotation_font,
                    annotations::paint_annotations,
                )
                    .chain(),
            );
    }
}
