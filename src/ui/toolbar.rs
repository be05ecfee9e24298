use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::common::PALETTE;
use crate::editor::{Canvas, CanvasCommand, DoubleClickAction, PhotoSide};
use crate::theme;

/// Brush and canvas controls under the menu bar
pub fn toolbar_ui(
    mut contexts: EguiContexts,
    canvas: Res<Canvas>,
    mut canvas_commands: MessageWriter<CanvasCommand>,
) -> Result {
    let brush = canvas.settings().brush;
    let display = canvas.display();
    let has_target =
        canvas.controller().selected().is_some() || canvas.controller().editing().is_some();

    egui::TopBottomPanel::top("main_toolbar")
        .frame(
            egui::Frame::side_top_panel(&contexts.ctx_mut()?.style())
                .inner_margin(egui::Margin::symmetric(12, 6)),
        )
        .show(contexts.ctx_mut()?, |ui| {
            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing.x = 6.0;

                ui.label("Color:");
                for (name, color) in PALETTE {
                    let is_selected = brush.stroke_color == color;
                    let button = egui::Button::new("")
                        .fill(color.to_color32())
                        .min_size(egui::vec2(18.0, 18.0))
                        .stroke(if is_selected {
                            egui::Stroke::new(2.0, theme::ui::SELECTED_BORDER)
                        } else {
                            egui::Stroke::new(1.0, theme::ui::UNSELECTED_BORDER)
                        });

                    let response = ui.add(button);
                    if response.clicked() {
                        canvas_commands.write(CanvasCommand::SetColor(color));
                    }
                    response.on_hover_text(name);
                }

                ui.add_space(12.0);
                ui.separator();
                ui.add_space(12.0);

                ui.label("Width:");
                let mut width = brush.stroke_width;
                let response = ui.add(
                    egui::DragValue::new(&mut width)
                        .range(0.5..=20.0)
                        .speed(0.5)
                        .suffix(" px"),
                );
                if response.changed() && width != brush.stroke_width {
                    canvas_commands.write(CanvasCommand::SetStrokeWidth(width));
                }

                ui.add_space(12.0);
                ui.separator();
                ui.add_space(12.0);

                if ui
                    .add(egui::Button::new("Flip").selected(display.side == PhotoSide::Back))
                    .on_hover_text("Show the other side of the photo")
                    .clicked()
                {
                    canvas_commands.write(CanvasCommand::ToggleFlip);
                }
                if ui
                    .add(egui::Button::new("Annotations").selected(display.annotations_visible))
                    .on_hover_text("Show or hide strokes and text")
                    .clicked()
                {
                    canvas_commands.write(CanvasCommand::ToggleAnnotations);
                }

                ui.add_space(12.0);
                ui.separator();
                ui.add_space(12.0);

                if ui
                    .add_enabled(has_target, egui::Button::new("Delete Selected"))
                    .on_hover_text("Delete")
                    .clicked()
                {
                    canvas_commands.write(CanvasCommand::DeleteSelected);
                }
                if ui.button("Clear All").clicked() {
                    canvas_commands.write(CanvasCommand::ClearAll);
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let double_click = match canvas.settings().double_click {
                        DoubleClickAction::Flip => "flip",
                        DoubleClickAction::ToggleAnnotations => "hide annotations",
                    };
                    ui.label(
                        egui::RichText::new(format!(
                            "Click: text  Drag: draw or move  Double-click: {double_click}"
                        ))
                        .color(theme::ui::HINT_TEXT)
                        .size(11.0),
                    );
                });
            });
        });
    Ok(())
}
