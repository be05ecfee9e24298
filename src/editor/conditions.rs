//! Run conditions for controlling when editor systems execute.

use bevy::prelude::*;

use crate::ui::DialogState;

/// Run condition: returns true when no modal dialog is open.
///
/// Canvas input handlers use this so clicks and keys aimed at a dialog
/// never reach the annotations.
///
/// Usage: `.run_if(no_dialog_open)`
pub fn no_dialog_open(dialog_state: Res<DialogState>) -> bool {
    !dialog_state.any_modal_open
}
