use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};
use std::path::Path;

use crate::editor::Canvas;
use crate::photo::PhotoState;
use crate::theme;

/// Longest path shown before it is cut from the left
const MAX_PATH_CHARS: usize = 50;

/// Keep the tail of a long path, which holds the file name.
pub fn shorten_path(path: &Path, max_chars: usize) -> String {
    let full = path.to_string_lossy();
    let count = full.chars().count();
    if count <= max_chars {
        return full.into_owned();
    }
    let keep = max_chars.saturating_sub(3);
    let tail: String = full.chars().skip(count - keep).collect();
    format!("...{}", tail)
}

pub fn status_bar_ui(
    mut contexts: EguiContexts,
    canvas: Res<Canvas>,
    photo: Res<PhotoState>,
) -> Result {
    let store = canvas.store();
    let display = canvas.display();

    egui::TopBottomPanel::bottom("status_bar")
        .frame(
            egui::Frame::side_top_panel(&contexts.ctx_mut()?.style())
                .inner_margin(egui::Margin::symmetric(12, 4))
                .fill(theme::ui::PANEL_BACKGROUND),
        )
        .show(contexts.ctx_mut()?, |ui| {
            ui.horizontal(|ui| {
                if let Some(pending) = &photo.pending {
                    ui.spinner();
                    ui.label(format!("Loading {}", shorten_path(&pending.path, MAX_PATH_CHARS)));
                } else if let Some(loaded) = &photo.loaded {
                    let path_str = loaded.path.to_string_lossy();
                    ui.label(format!(
                        "{}  {}x{}",
                        shorten_path(&loaded.path, MAX_PATH_CHARS),
                        loaded.width,
                        loaded.height
                    ))
                    .on_hover_text(path_str.as_ref());
                } else {
                    ui.label("No image");
                }

                ui.separator();
                ui.label(display.side.label());
                if !display.annotations_visible {
                    ui.label(egui::RichText::new("annotations hidden").color(theme::ui::HINT_TEXT));
                }

                ui.separator();
                ui.label(format!(
                    "{} strokes, {} notes",
                    store.strokes().len(),
                    store.texts().len()
                ));

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        egui::RichText::new(canvas.controller().state().label())
                            .color(theme::ui::HINT_TEXT),
                    );
                });
            });
        });

    Ok(())
}
