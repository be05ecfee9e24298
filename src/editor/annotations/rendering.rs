//! Annotation painting.
//!
//! Strokes, text and the edit caret are painted on egui's background layer so
//! each stroke keeps its own width and text stays crisp at any zoom. Both read
//! the same [`CanvasFrame`] snapshot, built once per frame from the canvas.

use std::sync::Arc;

use bevy::prelude::*;
use bevy_egui::egui;
use bevy_egui::EguiContexts;

use crate::common::Rgb;
use crate::editor::canvas::{Canvas, Renderables};
use crate::editor::geometry::Point;
use crate::editor::params::CameraParams;
use crate::editor::text::MonospaceMetrics;
use crate::theme;

/// Glyphs in the run measured for the monospace advance.
const MEASURE_RUN: usize = 64;

/// Renderables for the current frame.
#[derive(Resource, Default, Deref, DerefMut)]
pub struct CanvasFrame(pub Renderables);

pub fn prepare_canvas_frame(mut canvas: ResMut<Canvas>, mut frame: ResMut<CanvasFrame>) {
    frame.0 = canvas.renderables();
}

/// Metrics of the monospace font annotations are painted with.
pub fn egui_font_metrics(ctx: &egui::Context, font_size: f32) -> MonospaceMetrics {
    let font = egui::FontId::monospace(font_size);
    let (run_width, row_height) = ctx.fonts_mut(|fonts| {
        let run = "M".repeat(MEASURE_RUN);
        let galley = fonts.layout_no_wrap(run, font.clone(), egui::Color32::WHITE);
        (galley.size().x, fonts.row_height(&font))
    });
    MonospaceMetrics::measured(run_width / MEASURE_RUN as f32, row_height)
}

/// Replace estimated metrics with ones measured from egui's fonts.
pub fn measure_annotation_font(
    mut contexts: EguiContexts,
    mut canvas: ResMut<Canvas>,
) -> Result {
    let Some(font_size) = canvas.font_to_measure() else {
        return Ok(());
    };
    let ctx = contexts.ctx_mut()?;
    let metrics = egui_font_metrics(ctx, font_size);
    debug!(
        "Measured annotation font {}px: advance {:.3}, line height {}",
        font_size,
        metrics.advance,
        metrics.ascent + metrics.descent
    );
    canvas.install_metrics(Arc::new(metrics), font_size);
    Ok(())
}

/// Maps image pixels to egui screen positions through the editor camera.
struct ScreenMapper<'a, 'w, 's> {
    camera: &'a CameraParams<'w, 's>,
    frame: &'a Renderables,
    pixels_per_unit: f32,
}

impl ScreenMapper<'_, '_, '_> {
    fn pos(&self, x: f32, y: f32) -> Option<egui::Pos2> {
        let world = self.frame.surface.image_to_world_f(Vec2::new(x, y));
        let screen = self.camera.world_to_viewport(world)?;
        Some(egui::pos2(screen.x, screen.y))
    }

    fn point(&self, point: Point) -> Option<egui::Pos2> {
        self.pos(point.x as f32, point.y as f32)
    }
}

fn paint_polyline(
    painter: &egui::Painter,
    mapper: &ScreenMapper,
    points: &[Point],
    color: Rgb,
    width: f32,
) {
    let screen: Vec<egui::Pos2> = points.iter().filter_map(|p| mapper.point(*p)).collect();
    if screen.len() < 2 {
        return;
    }
    let stroke = egui::Stroke::new(width * mapper.pixels_per_unit, color.to_color32());
    painter.add(egui::Shape::line(screen, stroke));
}

pub fn paint_annotations(
    mut contexts: EguiContexts,
    camera: CameraParams,
    frame: Res<CanvasFrame>,
) -> Result {
    let ctx = contexts.ctx_mut()?;

    if !frame.display.annotations_visible {
        return Ok(());
    }

    let mapper = ScreenMapper {
        camera: &camera,
        frame: &frame.0,
        pixels_per_unit: 1.0 / camera.zoom_scale(),
    };

    let surface = frame.surface;
    let (Some(top_left), Some(bottom_right)) = (
        mapper.pos(0.0, 0.0),
        mapper.pos(surface.width as f32, surface.height as f32),
    ) else {
        return Ok(());
    };

    // Annotations never paint outside the photo
    let painter = ctx
        .layer_painter(egui::LayerId::background())
        .with_clip_rect(egui::Rect::from_two_pos(top_left, bottom_right));

    for stroke in &frame.strokes {
        paint_polyline(&painter, &mapper, stroke.points(), stroke.color, stroke.width);
    }
    if let Some(pending) = &frame.pending_stroke {
        paint_polyline(&painter, &mapper, &pending.points, pending.color, pending.width);
    }

    let font = egui::FontId::monospace(frame.font_size * mapper.pixels_per_unit);
    let ascent = frame.ascent as f32;
    let descent = frame.descent as f32;

    for text in &frame.texts {
        let left = text.layout.final_cursor.x as f32;
        for line in &text.layout.lines {
            let Some(pos) = mapper.pos(left, line.baseline_y as f32 - ascent) else {
                continue;
            };
            painter.text(
                pos,
                egui::Align2::LEFT_TOP,
                &line.text,
                font.clone(),
                text.color.to_color32(),
            );
        }

        if let Some(caret) = text.caret {
            let x = caret.x as f32 + 1.0;
            let top = mapper.pos(x, caret.y as f32 - ascent);
            let bottom = mapper.pos(x, caret.y as f32 + descent);
            if let (Some(top), Some(bottom)) = (top, bottom) {
                painter.line_segment([top, bottom], egui::Stroke::new(1.0, theme::ui::CARET));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::text::FontMetrics;

    /// Runs `check` inside an egui pass, where fonts are available.
    fn with_egui(mut check: impl FnMut(&egui::Context)) {
        let ctx = egui::Context::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| check(ctx));
    }

    #[test]
    fn test_measured_width_matches_painted_galley() {
        with_egui(|ctx| {
            let metrics = egui_font_metrics(ctx, 12.0);
            let long = "x".repeat(40);
            for text in ["hello world", "The quick brown fox jumps", long.as_str()] {
                let drawn = ctx.fonts_mut(|fonts| {
                    fonts
                        .layout_no_wrap(
                            text.to_owned(),
                            egui::FontId::monospace(12.0),
                            egui::Color32::WHITE,
                        )
                        .size()
                        .x
                });
                let width = metrics.advance_width(text) as f32;
                assert!(width + 0.05 >= drawn, "{text:?}: {width} < {drawn}");
                assert!(width - drawn <= 1.0, "{text:?}: {width} vs {drawn}");
            }
        });
    }

    #[test]
    fn test_measured_line_height_matches_row_height() {
        with_egui(|ctx| {
            let metrics = egui_font_metrics(ctx, 12.0);
            let row = ctx.fonts_mut(|fonts| fonts.row_height(&egui::FontId::monospace(12.0)));
            assert!((metrics.line_height() as f32 - row).abs() <= 0.5);
        });
    }
}
