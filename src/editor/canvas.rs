//! The annotation canvas: store, controller, surface and display state behind
//! one resource, plus the commands the menus and toolbar send to it.

use std::sync::Arc;

use bevy::prelude::*;

use crate::common::Rgb;
use crate::config::{AppConfig, SaveConfigRequest};
use crate::constants::DEFAULT_FONT_SIZE;

use super::annotations::{
    AnnotationStore, Brush, ObjectRef, PendingStroke, SelectionPolicy, Stroke, TextId,
};
use super::geometry::{Point, Rect};
use super::selection::{EditKey, PointerEvent, PointerUp, SelectionController, Workspace};
use super::surface::Surface;
use super::text::{layout, layout_bounds, FontMetrics, LayoutResult, MonospaceMetrics};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PhotoSide {
    #[default]
    Front,
    Back,
}

impl PhotoSide {
    pub fn flipped(self) -> Self {
        match self {
            PhotoSide::Front => PhotoSide::Back,
            PhotoSide::Back => PhotoSide::Front,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PhotoSide::Front => "Front",
            PhotoSide::Back => "Back",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayState {
    pub side: PhotoSide,
    pub annotations_visible: bool,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self {
            side: PhotoSide::Front,
            annotations_visible: true,
        }
    }
}

/// What a double-click toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DoubleClickAction {
    #[default]
    Flip,
    ToggleAnnotations,
}

/// Canvas-wide settings taken from the config file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasSettings {
    pub brush: Brush,
    pub font_size: f32,
    pub policy: SelectionPolicy,
    pub double_click: DoubleClickAction,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            brush: Brush::default(),
            font_size: DEFAULT_FONT_SIZE,
            policy: SelectionPolicy::default(),
            double_click: DoubleClickAction::default(),
        }
    }
}

/// Commands sent by menus, toolbar and shortcuts.
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub enum CanvasCommand {
    ClearAll,
    DeleteSelected,
    ToggleFlip,
    ToggleAnnotations,
    SetColor(Rgb),
    SetStrokeWidth(f32),
}

/// A text annotation ready to paint.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRenderable {
    pub id: TextId,
    pub layout: LayoutResult,
    pub bounds: Rect,
    pub color: Rgb,
    /// Baseline point of the edit caret, only for the annotation being edited.
    pub caret: Option<Point>,
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, Default)]
pub struct Renderables {
    pub surface: Surface,
    pub display: DisplayState,
    pub strokes: Vec<Stroke>,
    pub pending_stroke: Option<PendingStroke>,
    pub texts: Vec<TextRenderable>,
    pub selection: Option<Rect>,
    pub font_size: f32,
    pub ascent: i32,
    pub descent: i32,
}

#[derive(Resource)]
pub struct Canvas {
    store: AnnotationStore,
    controller: SelectionController,
    surface: Surface,
    display: DisplayState,
    settings: CanvasSettings,
    metrics: Arc<dyn FontMetrics>,
    /// Font size the current metrics were measured from the painter's font for.
    measured_font_size: Option<f32>,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(CanvasSettings::default())
    }
}

impl Canvas {
    /// Canvas with estimated metrics until [`Self::install_metrics`] is called.
    pub fn new(settings: CanvasSettings) -> Self {
        let mut canvas = Self::with_metrics(
            settings,
            Arc::new(MonospaceMetrics::for_font_size(settings.font_size)),
        );
        canvas.measured_font_size = None;
        canvas
    }

    pub fn with_metrics(settings: CanvasSettings, metrics: Arc<dyn FontMetrics>) -> Self {
        Self {
            store: AnnotationStore::default(),
            controller: SelectionController::default(),
            surface: Surface::default(),
            display: DisplayState::default(),
            settings,
            metrics,
            measured_font_size: Some(settings.font_size),
        }
    }

    pub fn store(&self) -> &AnnotationStore {
        &self.store
    }

    pub fn controller(&self) -> &SelectionController {
        &self.controller
    }

    pub fn surface(&self) -> Surface {
        self.surface
    }

    pub fn display(&self) -> DisplayState {
        self.display
    }

    pub fn settings(&self) -> CanvasSettings {
        self.settings
    }

    /// Font size still waiting to be measured, if the metrics are an estimate.
    pub fn font_to_measure(&self) -> Option<f32> {
        let size = self.settings.font_size;
        (self.measured_font_size != Some(size)).then_some(size)
    }

    /// Swap in metrics measured for `font_size`. Cached bounds are dropped.
    pub fn install_metrics(&mut self, metrics: Arc<dyn FontMetrics>, font_size: f32) {
        self.metrics = metrics;
        self.measured_font_size = Some(font_size);
        for text in self.store.texts_mut() {
            text.invalidate_bounds();
        }
    }

    /// Replace settings. A font size change falls back to estimated metrics
    /// until the new size is measured.
    pub fn apply_settings(&mut self, settings: CanvasSettings) {
        if settings.font_size != self.settings.font_size {
            self.metrics = Arc::new(MonospaceMetrics::for_font_size(settings.font_size));
            for text in self.store.texts_mut() {
                text.invalidate_bounds();
            }
        }
        self.settings = settings;
    }

    fn split(&mut self) -> (&mut SelectionController, Workspace<'_>) {
        let ws = Workspace {
            store: &mut self.store,
            surface: self.surface,
            brush: self.settings.brush,
            policy: self.settings.policy,
            metrics: self.metrics.as_ref(),
        };
        (&mut self.controller, ws)
    }

    // Pointer and keyboard input

    pub fn pointer_down(&mut self, event: PointerEvent) {
        if !self.display.annotations_visible {
            return;
        }
        let (controller, mut ws) = self.split();
        controller.on_pointer_down(event, &mut ws);
    }

    pub fn pointer_move(&mut self, point: Point) {
        if !self.display.annotations_visible {
            return;
        }
        let (controller, mut ws) = self.split();
        controller.on_pointer_move(point, &mut ws);
    }

    pub fn pointer_up(&mut self, event: PointerEvent) -> PointerUp {
        let outcome = if self.display.annotations_visible {
            let (controller, mut ws) = self.split();
            controller.on_pointer_up(event, &mut ws)
        } else if event.clicks >= 2 {
            PointerUp::DoubleClick
        } else {
            PointerUp::Handled
        };

        if outcome == PointerUp::DoubleClick {
            match self.settings.double_click {
                DoubleClickAction::Flip => self.toggle_flip(),
                DoubleClickAction::ToggleAnnotations => self.toggle_annotations(),
            }
        }
        outcome
    }

    pub fn key(&mut self, key: EditKey) {
        if !self.display.annotations_visible {
            return;
        }
        let (controller, mut ws) = self.split();
        controller.on_key(key, &mut ws);
    }

    // Commands

    /// Forget the current image and every annotation ahead of a new decode.
    pub fn begin_image_load(&mut self) {
        self.controller.reset();
        self.store.clear();
        self.surface = Surface::default();
    }

    /// Adopt the decoded image's size, or the default surface when absent.
    pub fn set_image(&mut self, size: Option<(u32, u32)>) {
        self.surface = match size {
            Some((width, height)) => Surface::for_image(width, height),
            None => Surface::default(),
        };
    }

    pub fn clear_all(&mut self) {
        self.controller.reset();
        self.store.clear();
        self.surface = Surface::default();
        self.display = DisplayState::default();
        info!("Cleared image and annotations");
    }

    /// Remove the selected object, or the annotation being edited.
    pub fn delete_selected(&mut self) -> bool {
        let target = self
            .controller
            .editing()
            .map(ObjectRef::Text)
            .or_else(|| self.controller.selected());
        let Some(target) = target else {
            return false;
        };

        let removed = self.store.remove(target);
        self.controller.forget(target);
        if removed {
            info!("Deleted {:?}", target);
        }
        removed
    }

    pub fn toggle_flip(&mut self) {
        self.display.side = self.display.side.flipped();
        info!("Showing {} side", self.display.side.label());
    }

    pub fn toggle_annotations(&mut self) {
        self.display.annotations_visible = !self.display.annotations_visible;
        info!(
            "Annotations {}",
            if self.display.annotations_visible {
                "shown"
            } else {
                "hidden"
            }
        );
    }

    /// Set the brush color and recolor the edited or selected object.
    pub fn set_color(&mut self, color: Rgb) {
        self.settings.brush.stroke_color = color;
        self.settings.brush.text_color = color;

        let target = self
            .controller
            .editing()
            .map(ObjectRef::Text)
            .or_else(|| self.controller.selected());
        if let Some(target) = target {
            self.store.recolor(target, color);
        }
    }

    pub fn set_stroke_width(&mut self, width: f32) {
        self.settings.brush.stroke_width = width.max(0.5);
    }

    /// Lay out text exactly as the renderer and hit tester do.
    pub fn layout_for(&self, text: &str, position: Point, max_width: i32) -> LayoutResult {
        layout(text, position, max_width, self.metrics.as_ref())
    }

    /// Snapshot for drawing.
    ///
    /// Each text is laid out once against the current surface; the resulting
    /// bounds are stored back into the annotation so later hit tests at the same
    /// width reuse exactly what was drawn.
    pub fn renderables(&mut self) -> Renderables {
        let metrics = self.metrics.clone();
        let surface = self.surface;
        let editing = self.controller.editing();
        let selected = self.controller.selected();
        let visible = self.display.annotations_visible;

        let mut texts = Vec::new();
        let mut selection = None;

        if visible {
            for text in self.store.texts_mut() {
                let max_width = surface.max_width_for(text.position());
                if max_width <= 0 {
                    continue;
                }
                let result = layout(text.text(), text.position(), max_width, metrics.as_ref());
                let bounds = layout_bounds(text.position(), &result, metrics.as_ref());
                text.record_bounds(bounds, max_width);

                let is_editing = editing == Some(text.id());
                let color = if is_editing {
                    Rgb::GRAY
                } else if text.is_committed() {
                    text.color
                } else {
                    Rgb::LIGHT_GRAY
                };
                if selected == Some(ObjectRef::Text(text.id())) {
                    selection = Some(bounds);
                }

                texts.push(TextRenderable {
                    id: text.id(),
                    caret: is_editing.then(|| result.caret()),
                    layout: result,
                    bounds,
                    color,
                });
            }

            if let Some(ObjectRef::Stroke(id)) = selected {
                selection = self.store.stroke(id).and_then(Stroke::bounding_rect);
            }
        }

        Renderables {
            surface,
            display: self.display,
            strokes: if visible {
                self.store.strokes().to_vec()
            } else {
                Vec::new()
            },
            pending_stroke: self
                .controller
                .pending_stroke()
                .filter(|_| visible)
                .cloned(),
            texts,
            selection,
            font_size: self.settings.font_size,
            ascent: metrics.ascent(),
            descent: metrics.descent(),
        }
    }
}

/// Apply queued [`CanvasCommand`]s. Brush changes are remembered in the config.
pub fn handle_canvas_commands(
    mut commands: MessageReader<CanvasCommand>,
    mut canvas: ResMut<Canvas>,
    mut config: ResMut<AppConfig>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) {
    for command in commands.read() {
        match *command {
            CanvasCommand::ClearAll => canvas.clear_all(),
            CanvasCommand::DeleteSelected => {
                canvas.delete_selected();
            }
            CanvasCommand::ToggleFlip => canvas.toggle_flip(),
            CanvasCommand::ToggleAnnotations => canvas.toggle_annotations(),
            CanvasCommand::SetColor(color) => {
                canvas.set_color(color);
                config.data.stroke_color = color;
                config.data.text_color = color;
                config.dirty = true;
                save_events.write(SaveConfigRequest);
            }
            CanvasCommand::SetStrokeWidth(width) => {
                canvas.set_stroke_width(width);
                config.data.stroke_width = canvas.settings().brush.stroke_width;
                config.dirty = true;
                save_events.write(SaveConfigRequest);
            }
        }
    }
}

/// Push the loaded config into the canvas.
pub fn apply_config_to_canvas(config: Res<AppConfig>, mut canvas: ResMut<Canvas>) {
    canvas.apply_settings(config.data.canvas_settings());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::text::MonospaceMetrics;

    fn canvas() -> Canvas {
        Canvas::with_metrics(
            CanvasSettings::default(),
            Arc::new(MonospaceMetrics::new(10.0, 12, 3, 0)),
        )
    }

    fn click(canvas: &mut Canvas, x: i32, y: i32) {
        let event = PointerEvent::primary(Point::new(x, y));
        canvas.pointer_down(event);
        canvas.pointer_up(event);
    }

    fn type_text(canvas: &mut Canvas, text: &str) {
        for ch in text.chars() {
            canvas.key(EditKey::Character(ch));
        }
    }

    fn stroke(canvas: &mut Canvas, from: (i32, i32), to: (i32, i32)) {
        canvas.pointer_down(PointerEvent::primary(Point::new(from.0, from.1)));
        canvas.pointer_move(Point::new(to.0, to.1));
        canvas.pointer_up(PointerEvent::primary(Point::new(to.0, to.1)));
    }

    #[test]
    fn test_renderables_match_hit_test_bounds() {
        let mut canvas = canvas();
        click(&mut canvas, 10, 20);
        type_text(&mut canvas, "The quick brown fox");
        canvas.key(EditKey::Enter);
        canvas.set_image(Some((80, 200)));

        let frame = canvas.renderables();
        let text = &frame.texts[0];
        assert_eq!(text.layout.lines.len(), 4);
        assert_eq!(text.bounds, Rect::new(10, 8, 50, 60));

        // The cache now holds what was drawn, for the width it was drawn at.
        let cached = canvas.store().texts()[0].cached_bounds();
        assert_eq!(cached.map(|c| (c.rect, c.max_width)), Some((text.bounds, 60)));
    }

    #[test]
    fn test_layout_for_matches_drawn_layout() {
        let mut canvas = canvas();
        click(&mut canvas, 10, 20);
        type_text(&mut canvas, "The quick brown fox");
        canvas.key(EditKey::Enter);

        let frame = canvas.renderables();
        let max_width = canvas.surface().max_width_for(Point::new(10, 20));
        let layout = canvas.layout_for("The quick brown fox", Point::new(10, 20), max_width);
        assert_eq!(layout, frame.texts[0].layout);
    }

    #[test]
    fn test_measured_metrics_replace_estimate() {
        let mut canvas = Canvas::new(CanvasSettings::default());
        assert_eq!(canvas.font_to_measure(), Some(DEFAULT_FONT_SIZE));
        click(&mut canvas, 10, 20);
        type_text(&mut canvas, "hello");
        canvas.key(EditKey::Enter);
        canvas.renderables();
        assert!(canvas.store().texts()[0].cached_bounds().is_some());

        let measured = MonospaceMetrics::new(10.0, 12, 3, 0);
        canvas.install_metrics(Arc::new(measured), DEFAULT_FONT_SIZE);
        assert_eq!(canvas.font_to_measure(), None);
        // Bounds from the estimate must not survive the swap
        assert!(canvas.store().texts()[0].cached_bounds().is_none());
        assert_eq!(canvas.renderables().texts[0].bounds, Rect::new(10, 8, 50, 15));

        let mut settings = canvas.settings();
        settings.font_size = 20.0;
        canvas.apply_settings(settings);
        assert_eq!(canvas.font_to_measure(), Some(20.0));
    }

    #[test]
    fn test_surface_change_does_not_reuse_stale_bounds() {
        let mut canvas = canvas();
        click(&mut canvas, 10, 20);
        type_text(&mut canvas, "The quick brown fox");
        canvas.key(EditKey::Enter);

        let wide = canvas.renderables().texts[0].bounds;
        assert_eq!(wide.height, 15);

        canvas.set_image(Some((80, 200)));
        // The fourth wrapped line only exists at the narrow width.
        canvas.pointer_down(PointerEvent::primary(Point::new(15, 62)));
        assert!(canvas.controller().selected().is_some());
    }

    #[test]
    fn test_text_colors_by_state() {
        let mut canvas = canvas();
        canvas.set_color(Rgb::RED);
        click(&mut canvas, 10, 20);
        type_text(&mut canvas, "editing");

        let frame = canvas.renderables();
        assert_eq!(frame.texts[0].color, Rgb::GRAY);
        assert!(frame.texts[0].caret.is_some());

        canvas.key(EditKey::Enter);
        assert_eq!(canvas.renderables().texts[0].color, Rgb::RED);

        click(&mut canvas, 10, 100);
        type_text(&mut canvas, "draft");
        click(&mut canvas, 10, 200);
        let frame = canvas.renderables();
        let draft = frame
            .texts
            .iter()
            .find(|t| t.layout.lines.first().map(|l| l.text.as_str()) == Some("draft"))
            .expect("draft kept");
        assert_eq!(draft.color, Rgb::LIGHT_GRAY);
        assert_eq!(draft.caret, None);
    }

    #[test]
    fn test_empty_edit_renders_caret_at_insertion_point() {
        let mut canvas = canvas();
        click(&mut canvas, 30, 40);
        let frame = canvas.renderables();
        assert_eq!(frame.texts[0].caret, Some(Point::new(30, 40)));
        assert_eq!(frame.texts[0].bounds, Rect::new(30, 28, 0, 15));
    }

    #[test]
    fn test_text_without_room_is_not_drawn() {
        let mut canvas = canvas();
        click(&mut canvas, 395, 40);
        type_text(&mut canvas, "edge");
        assert!(canvas.renderables().texts.is_empty());
    }

    #[test]
    fn test_clear_all_resets_everything() {
        let mut canvas = canvas();
        canvas.set_image(Some((640, 480)));
        stroke(&mut canvas, (10, 10), (20, 20));
        click(&mut canvas, 50, 50);
        type_text(&mut canvas, "x");
        canvas.toggle_flip();
        canvas.toggle_annotations();

        canvas.clear_all();

        assert!(canvas.store().is_empty());
        assert_eq!(canvas.store().editing(), None);
        assert_eq!(canvas.controller().editing(), None);
        assert_eq!(canvas.surface(), Surface::default());
        assert_eq!(canvas.display(), DisplayState::default());
    }

    #[test]
    fn test_image_load_abandons_transient_state() {
        let mut canvas = canvas();
        stroke(&mut canvas, (10, 10), (20, 20));
        canvas.pointer_down(PointerEvent::primary(Point::new(30, 30)));
        canvas.pointer_move(Point::new(40, 40));

        canvas.begin_image_load();

        assert!(canvas.store().is_empty());
        assert!(canvas.controller().pending_stroke().is_none());
        canvas.pointer_up(PointerEvent::primary(Point::new(40, 40)));
        assert!(canvas.store().is_empty());
    }

    #[test]
    fn test_delete_selected_and_editing() {
        let mut canvas = canvas();
        click(&mut canvas, 10, 20);
        type_text(&mut canvas, "gone");
        assert!(canvas.delete_selected());
        assert!(canvas.store().texts().is_empty());
        assert_eq!(canvas.controller().editing(), None);

        click(&mut canvas, 10, 20);
        type_text(&mut canvas, "keep");
        canvas.key(EditKey::Enter);
        click(&mut canvas, 15, 15);
        assert!(canvas.controller().selected().is_some());
        assert!(canvas.delete_selected());
        assert!(canvas.store().texts().is_empty());
        assert!(!canvas.delete_selected());
    }

    #[test]
    fn test_set_color_recolors_selection() {
        let mut canvas = canvas();
        click(&mut canvas, 10, 20);
        type_text(&mut canvas, "note");
        canvas.key(EditKey::Enter);
        click(&mut canvas, 15, 15);

        canvas.set_color(Rgb::BLUE);

        assert_eq!(canvas.store().texts()[0].color, Rgb::BLUE);
        assert_eq!(canvas.settings().brush.stroke_color, Rgb::BLUE);
    }

    #[test]
    fn test_double_click_flips_or_toggles_visibility() {
        let mut canvas = canvas();
        let event = PointerEvent::primary(Point::new(10, 10)).with_clicks(2);
        canvas.pointer_down(event);
        assert_eq!(canvas.pointer_up(event), PointerUp::DoubleClick);
        assert_eq!(canvas.display().side, PhotoSide::Back);

        canvas.apply_settings(CanvasSettings {
            double_click: DoubleClickAction::ToggleAnnotations,
            ..canvas.settings()
        });
        canvas.pointer_down(event);
        canvas.pointer_up(event);
        assert!(!canvas.display().annotations_visible);

        // Hidden annotations still let a double-click bring them back.
        canvas.pointer_down(event);
        canvas.pointer_up(event);
        assert!(canvas.display().annotations_visible);
    }

    #[test]
    fn test_hidden_annotations_ignore_input_and_render_nothing() {
        let mut canvas = canvas();
        stroke(&mut canvas, (10, 10), (20, 20));
        canvas.toggle_annotations();

        click(&mut canvas, 50, 50);
        stroke(&mut canvas, (30, 30), (40, 40));

        assert_eq!(canvas.store().strokes().len(), 1);
        assert!(canvas.store().texts().is_empty());
        let frame = canvas.renderables();
        assert!(frame.strokes.is_empty());
        assert!(frame.texts.is_empty());
    }
}
