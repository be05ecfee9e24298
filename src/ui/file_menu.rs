use bevy::prelude::*;
use bevy::tasks::{AsyncComputeTaskPool, Task};
use bevy_egui::{egui, EguiContexts};
use futures_lite::future;
use std::path::PathBuf;

use crate::config::AppConfig;
use crate::editor::{Canvas, CanvasCommand};
use crate::photo::{LoadImageRequest, IMAGE_EXTENSIONS};

#[derive(Resource, Default)]
pub struct FileMenuState {
    /// Pending async file dialog for choosing an image
    pub pending_open: Option<Task<Option<PathBuf>>>,
}

impl FileMenuState {
    /// Show the open dialog unless one is already up.
    pub fn request_open(&mut self, config: &AppConfig) {
        if self.pending_open.is_some() {
            return;
        }
        let start_dir = crate::paths::image_dialog_dir(config.data.last_image_dir.as_deref());
        let task_pool = AsyncComputeTaskPool::get();
        self.pending_open = Some(task_pool.spawn(async move {
            let mut dialog = rfd::AsyncFileDialog::new()
                .set_title("Open Image")
                .add_filter("Images", IMAGE_EXTENSIONS);
            if let Some(dir) = start_dir {
                dialog = dialog.set_directory(dir);
            }
            dialog.pick_file().await.map(|h| h.path().to_path_buf())
        }));
    }
}

/// Turn a chosen file into a load request.
pub fn poll_open_dialog(
    mut menu_state: ResMut<FileMenuState>,
    mut load_events: MessageWriter<LoadImageRequest>,
) {
    if let Some(ref mut task) = menu_state.pending_open
        && let Some(result) = future::block_on(future::poll_once(task))
    {
        menu_state.pending_open = None;
        match result {
            Some(path) => {
                load_events.write(LoadImageRequest { path });
            }
            None => debug!("Open dialog cancelled"),
        }
    }
}

/// Ctrl/Cmd+O opens an image, Ctrl/Cmd+Q quits.
pub fn handle_file_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    config: Res<AppConfig>,
    mut menu_state: ResMut<FileMenuState>,
    mut exit: MessageWriter<AppExit>,
) {
    let modifier = keyboard.any_pressed([
        KeyCode::ControlLeft,
        KeyCode::ControlRight,
        KeyCode::SuperLeft,
        KeyCode::SuperRight,
    ]);
    if !modifier {
        return;
    }

    if keyboard.just_pressed(KeyCode::KeyO) {
        menu_state.request_open(&config);
    } else if keyboard.just_pressed(KeyCode::KeyQ) {
        info!("Quit requested");
        exit.write(AppExit::Success);
    }
}

/// Top menu bar
pub fn menu_bar_ui(
    mut contexts: EguiContexts,
    mut menu_state: ResMut<FileMenuState>,
    config: Res<AppConfig>,
    canvas: Res<Canvas>,
    mut canvas_commands: MessageWriter<CanvasCommand>,
    mut exit: MessageWriter<AppExit>,
) -> Result {
    egui::TopBottomPanel::top("menu_bar").show(contexts.ctx_mut()?, |ui| {
        ui.horizontal(|ui| {
            ui.menu_button("File", |ui| {
                if ui.button("Open Image...").clicked() {
                    menu_state.request_open(&config);
                    ui.close();
                }
                if ui
                    .button("Delete")
                    .on_hover_text("Remove the photo and every annotation")
                    .clicked()
                {
                    canvas_commands.write(CanvasCommand::ClearAll);
                    ui.close();
                }

                ui.separator();

                if ui.button("Quit").clicked() {
                    info!("Quit requested");
                    exit.write(AppExit::Success);
                    ui.close();
                }
            });

            ui.menu_button("View", |ui| {
                let flip_label = format!("Show {}", canvas.display().side.flipped().label());
                if ui.button(flip_label).clicked() {
                    canvas_commands.write(CanvasCommand::ToggleFlip);
                    ui.close();
                }
                let visibility_label = if canvas.display().annotations_visible {
                    "Hide Annotations"
                } else {
                    "Show Annotations"
                };
                if ui.button(visibility_label).clicked() {
                    canvas_commands.write(CanvasCommand::ToggleAnnotations);
                    ui.close();
                }
            });
        });
    });

    Ok(())
}
