mod dialogs;
pub mod file_menu;
mod status_bar;
mod toolbar;

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

use crate::config::ConfigResetNotification;
use crate::photo::PhotoLoadError;

/// Resource that tracks whether any modal dialog is currently open.
/// Canvas input handlers check this to avoid processing input
/// when the user is interacting with a dialog.
#[derive(Resource, Default)]
pub struct DialogState {
    /// True when any modal dialog is open that should block editor input
    pub any_modal_open: bool,
}

/// System to aggregate all dialog open states into a single resource.
/// Runs in First schedule before input handlers.
fn update_dialog_state(
    file_menu: Res<file_menu::FileMenuState>,
    config_reset: Res<ConfigResetNotification>,
    load_error: Res<PhotoLoadError>,
    mut dialog_state: ResMut<DialogState>,
) {
    dialog_state.any_modal_open = file_menu.pending_open.is_some()
        || config_reset.show
        || load_error.message.is_some();
}

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DialogState>()
            .init_resource::<file_menu::FileMenuState>()
            // Top panels stack in the order they are shown
            .add_systems(
                EguiPrimaryContextPass,
                (
                    file_menu::menu_bar_ui,
                    toolbar::toolbar_ui,
                    status_bar::status_bar_ui,
                )
                    .chain(),
            )
            .add_systems(
                EguiPrimaryContextPass,
                (
                    dialogs::photo_load_error_ui,
                    dialogs::config_reset_notification_ui,
                )
                    .after(status_bar::status_bar_ui),
            )
            .add_systems(
                Update,
                (file_menu::handle_file_shortcuts, file_menu::poll_open_dialog),
            )
            // Update dialog state at the start of each frame
            .add_systems(First, update_dialog_state);
    }
}
