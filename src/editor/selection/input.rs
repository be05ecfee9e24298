//! Mouse and keyboard plumbing into the canvas.

use bevy::input::keyboard::{Key, KeyboardInput};
use bevy::input::ButtonState;
use bevy::prelude::*;
use bevy_egui::EguiContexts;

use crate::config::AppConfig;
use crate::constants::DOUBLE_CLICK_SLOP;
use crate::editor::canvas::Canvas;
use crate::editor::geometry::Point;
use crate::editor::params::{is_cursor_over_ui, is_ui_typing, CameraParams};

use super::{EditKey, PointerEvent, PointerUp};

/// Counts presses that land close together in time and space.
#[derive(Resource, Default, Debug)]
pub struct ClickTracker {
    last: Option<(f64, Vec2)>,
    count: u8,
}

impl ClickTracker {
    /// Register a press and return its position in the click run (1, 2).
    ///
    /// A run ends after its second click, so a third quick press counts as 1.
    pub fn register(&mut self, now: f64, position: Vec2, interval: f64) -> u8 {
        let continues = matches!(
            self.last,
            Some((at, pos)) if now - at <= interval && pos.distance(position) <= DOUBLE_CLICK_SLOP
        );
        self.count = if continues { self.count + 1 } else { 1 };

        if self.count >= 2 {
            self.last = None;
            let clicks = self.count;
            self.count = 0;
            return clicks;
        }
        self.last = Some((now, position));
        self.count
    }
}

/// The primary-button gesture in flight, in image coordinates.
#[derive(Resource, Default, Debug)]
pub struct PointerTracker {
    pressed: bool,
    last_point: Option<Point>,
    clicks: u8,
}

pub fn feed_pointer(
    mouse_button: Res<ButtonInput<MouseButton>>,
    time: Res<Time>,
    config: Res<AppConfig>,
    camera: CameraParams,
    mut contexts: EguiContexts,
    mut canvas: ResMut<Canvas>,
    mut clicks: ResMut<ClickTracker>,
    mut tracker: ResMut<PointerTracker>,
) {
    let cursor = camera
        .cursor_world_pos()
        .map(|world| canvas.surface().world_to_image(world));

    if mouse_button.just_pressed(MouseButton::Left) {
        if is_cursor_over_ui(&mut contexts) {
            return;
        }
        let Some(point) = cursor else {
            return;
        };
        let count = clicks.register(
            time.elapsed_secs_f64(),
            point.as_vec2(),
            config.data.double_click_secs(),
        );
        tracker.pressed = true;
        tracker.last_point = Some(point);
        tracker.clicks = count;
        canvas.pointer_down(PointerEvent::primary(point).with_clicks(count));
        return;
    }

    if !tracker.pressed {
        return;
    }

    if mouse_button.pressed(MouseButton::Left) {
        if let Some(point) = cursor
            && tracker.last_point != Some(point)
        {
            tracker.last_point = Some(point);
            canvas.pointer_move(point);
        }
        return;
    }

    // Released this frame, or the release happened while the window lost focus.
    tracker.pressed = false;
    let Some(point) = cursor.or(tracker.last_point) else {
        return;
    };
    let outcome = canvas.pointer_up(PointerEvent::primary(point).with_clicks(tracker.clicks));
    if outcome == PointerUp::DoubleClick {
        debug!("Double-click at ({}, {})", point.x, point.y);
    }
}

fn edit_keys(event: &KeyboardInput) -> Vec<EditKey> {
    match &event.logical_key {
        Key::Character(chars) => chars.chars().map(EditKey::Character).collect(),
        Key::Space => vec![EditKey::Character(' ')],
        Key::Backspace => vec![EditKey::Backspace],
        Key::Enter => vec![EditKey::Enter],
        Key::Escape => vec![EditKey::Escape],
        Key::Delete => vec![EditKey::Delete],
        _ => Vec::new(),
    }
}

pub fn feed_keyboard(
    mut keyboard: MessageReader<KeyboardInput>,
    keys: Res<ButtonInput<KeyCode>>,
    mut contexts: EguiContexts,
    mut canvas: ResMut<Canvas>,
) {
    // Don't steal keystrokes from egui text fields
    if is_ui_typing(&mut contexts) {
        keyboard.clear();
        return;
    }

    // Ctrl/Cmd chords are menu shortcuts, not text
    let chord = keys.any_pressed([
        KeyCode::ControlLeft,
        KeyCode::ControlRight,
        KeyCode::SuperLeft,
        KeyCode::SuperRight,
    ]);

    for event in keyboard.read() {
        if event.state != ButtonState::Pressed || chord {
            continue;
        }
        for key in edit_keys(event) {
            canvas.key(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_quick_click_counts_two() {
        let mut tracker = ClickTracker::default();
        assert_eq!(tracker.register(1.0, Vec2::new(10.0, 10.0), 0.4), 1);
        assert_eq!(tracker.register(1.2, Vec2::new(12.0, 11.0), 0.4), 2);
    }

    #[test]
    fn test_slow_or_distant_click_restarts_run() {
        let mut tracker = ClickTracker::default();
        tracker.register(1.0, Vec2::ZERO, 0.4);
        assert_eq!(tracker.register(1.5, Vec2::ZERO, 0.4), 1);
        assert_eq!(tracker.register(1.6, Vec2::new(10.0, 0.0), 0.4), 1);
    }

    #[test]
    fn test_third_click_starts_new_run() {
        let mut tracker = ClickTracker::default();
        tracker.register(1.0, Vec2::ZERO, 0.4);
        assert_eq!(tracker.register(1.1, Vec2::ZERO, 0.4), 2);
        assert_eq!(tracker.register(1.2, Vec2::ZERO, 0.4), 1);
    }
}
