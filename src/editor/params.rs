//! Common SystemParam bundles for editor systems.
//!
//! - [`CameraParams`]: camera and window access for cursor <-> world conversion
//! - [`is_cursor_over_ui`]: check if the cursor is over egui UI (for input gating)

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::EguiContexts;

use super::camera::EditorCamera;

/// Bundled camera and window queries
#[derive(SystemParam)]
pub struct CameraParams<'w, 's> {
    pub window: Query<'w, 's, &'static Window, With<PrimaryWindow>>,
    pub camera: Query<
        'w,
        's,
        (&'static Camera, &'static GlobalTransform, &'static Projection),
        With<EditorCamera>,
    >,
}

impl CameraParams<'_, '_> {
    /// Get the world position of the cursor, if available
    pub fn cursor_world_pos(&self) -> Option<Vec2> {
        let window = self.window.single().ok()?;
        let (camera, transform, _) = self.camera.single().ok()?;
        let cursor_pos = window.cursor_position()?;
        camera.viewport_to_world_2d(transform, cursor_pos).ok()
    }

    /// Viewport (logical pixel) position of a world point
    pub fn world_to_viewport(&self, world: Vec2) -> Option<Vec2> {
        let (camera, transform, _) = self.camera.single().ok()?;
        camera.world_to_viewport(transform, world.extend(0.0)).ok()
    }

    /// Get the current zoom scale from projection (world units per pixel)
    pub fn zoom_scale(&self) -> f32 {
        self.camera
            .single()
            .ok()
            .and_then(|(_, _, proj)| {
                if let Projection::Orthographic(ortho) = proj {
                    Some(ortho.scale)
                } else {
                    None
                }
            })
            .unwrap_or(1.0)
    }
}

/// Check if the cursor is over egui UI
pub fn is_cursor_over_ui(contexts: &mut EguiContexts) -> bool {
    contexts
        .ctx_mut()
        .map(|ctx| ctx.is_pointer_over_area())
        .unwrap_or(false)
}

/// Check if egui is consuming keyboard input (a text field has focus)
pub fn is_ui_typing(contexts: &mut EguiContexts) -> bool {
    contexts
        .ctx_mut()
        .map(|ctx| ctx.wants_keyboard_input())
        .unwrap_or(false)
}
