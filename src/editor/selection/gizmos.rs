//! Selection gizmo drawing - a rectangle around the selected annotation.

use bevy::gizmos::config::{GizmoConfigGroup, GizmoConfigStore};
use bevy::prelude::*;

use crate::editor::annotations::CanvasFrame;
use crate::theme::SELECTION_COLOR;

/// Padding between an object's bounds and its selection rectangle (image pixels)
const SELECTION_PADDING: f32 = 2.0;

/// Custom gizmo group for selection indicators
#[derive(Default, Reflect, GizmoConfigGroup)]
pub struct SelectionGizmoGroup;

pub fn configure_selection_gizmos(mut config_store: ResMut<GizmoConfigStore>) {
    let (config, _) = config_store.config_mut::<SelectionGizmoGroup>();
    config.line.width = 1.5;
}

pub fn draw_selection_indicator(mut gizmos: Gizmos<SelectionGizmoGroup>, frame: Res<CanvasFrame>) {
    let Some(rect) = frame.selection else {
        return;
    };

    let top_left = Vec2::new(rect.x as f32, rect.y as f32) - SELECTION_PADDING;
    let size = Vec2::new(rect.width as f32, rect.height as f32) + SELECTION_PADDING * 2.0;
    let center = frame.surface.image_to_world_f(top_left + size / 2.0);

    gizmos.rect_2d(Isometry2d::from_translation(center), size, SELECTION_COLOR);
}
