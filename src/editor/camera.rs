//! The editor camera: middle-drag pan, wheel zoom, and fitting a new photo
//! into the window.

use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::EguiContexts;

use super::params::is_cursor_over_ui;
use crate::photo::PhotoLoaded;

const MIN_ZOOM: f32 = 0.1;
const MAX_ZOOM: f32 = 20.0;

/// Screen space left around a photo fitted to the window
const FIT_MARGIN: f32 = 1.1;

#[derive(Component)]
pub struct EditorCamera;

/// World units per screen pixel.
#[derive(Component)]
pub struct CameraZoom {
    pub scale: f32,
}

impl Default for CameraZoom {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

/// Zoom at which a `photo` sized image fits a `viewport`, never above 1:1.
pub fn fit_scale(photo: Vec2, viewport: Vec2) -> f32 {
    if viewport.x <= 0.0 || viewport.y <= 0.0 {
        return 1.0;
    }
    let needed = (photo.x / viewport.x).max(photo.y / viewport.y) * FIT_MARGIN;
    needed.clamp(1.0, MAX_ZOOM)
}

pub fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        EditorCamera,
        CameraZoom::default(),
        Transform::from_translation(Vec3::new(0.0, 0.0, 1000.0)),
    ));
}

pub fn camera_pan(
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: MessageReader<MouseMotion>,
    mut camera_query: Query<(&mut Transform, &CameraZoom), With<EditorCamera>>,
) {
    if !mouse_button.pressed(MouseButton::Middle) {
        mouse_motion.clear();
        return;
    }

    let Ok((mut transform, zoom)) = camera_query.single_mut() else {
        return;
    };

    for event in mouse_motion.read() {
        let delta = event.delta * zoom.scale;
        transform.translation.x -= delta.x;
        transform.translation.y += delta.y;
    }
}

pub fn camera_zoom(
    mut scroll_events: MessageReader<MouseWheel>,
    mut camera_query: Query<&mut CameraZoom, With<EditorCamera>>,
    mut contexts: EguiContexts,
) {
    // Let egui panels scroll without zooming the canvas
    if is_cursor_over_ui(&mut contexts) {
        scroll_events.clear();
        return;
    }

    let Ok(mut zoom) = camera_query.single_mut() else {
        return;
    };

    for event in scroll_events.read() {
        let steps = match event.unit {
            MouseScrollUnit::Line => event.y,
            MouseScrollUnit::Pixel => event.y * 0.01,
        };
        // Multiplicative steps
        zoom.scale = (zoom.scale * 0.9f32.powf(steps)).clamp(MIN_ZOOM, MAX_ZOOM);
    }
}

pub fn apply_camera_zoom(
    mut camera_query: Query<
        (&CameraZoom, &mut Projection),
        (With<EditorCamera>, Changed<CameraZoom>),
    >,
) {
    for (zoom, mut projection) in camera_query.iter_mut() {
        if let Projection::Orthographic(ref mut ortho) = *projection {
            ortho.scale = zoom.scale;
        }
    }
}

/// Center a freshly loaded photo and zoom out until it fits the window.
pub fn fit_camera_on_load(
    mut loaded: MessageReader<PhotoLoaded>,
    window: Query<&Window, With<PrimaryWindow>>,
    mut camera_query: Query<(&mut Transform, &mut CameraZoom), With<EditorCamera>>,
) {
    let Some(photo) = loaded.read().last() else {
        return;
    };
    let Ok((mut transform, mut zoom)) = camera_query.single_mut() else {
        return;
    };

    let viewport = window
        .single()
        .map(|w| Vec2::new(w.width(), w.height()))
        .unwrap_or(Vec2::ZERO);
    transform.translation.x = 0.0;
    transform.translation.y = 0.0;
    zoom.scale = fit_scale(Vec2::new(photo.width as f32, photo.height as f32), viewport);
    debug!("Fitted {}x{} photo at zoom {:.2}", photo.width, photo.height, zoom.scale);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_photo_stays_one_to_one() {
        assert_eq!(fit_scale(Vec2::new(400.0, 300.0), Vec2::new(1200.0, 800.0)), 1.0);
    }

    #[test]
    fn test_large_photo_fits_the_tighter_axis() {
        let scale = fit_scale(Vec2::new(4000.0, 1000.0), Vec2::new(1000.0, 800.0));
        assert!((scale - 4.4).abs() < 1e-4);
    }

    #[test]
    fn test_zero_viewport_falls_back_to_one() {
        assert_eq!(fit_scale(Vec2::new(4000.0, 3000.0), Vec2::ZERO), 1.0);
    }
}
