//! Multi-layer editing session.
//!
//! A [`MultiShapeSession`] holds an ordered stack of layers, each with its
//! own builder, opacity and fill color. Exactly one layer is active and
//! receives pointer and key input. A single [`ResizeController`] is shared:
//! in shape editing it targets the active layer's shape, in image resize
//! mode it targets the background image rectangle.
//!
//! Per frame the host calls [`MultiShapeSession::frame`], which applies the
//! pointer update before drawing.

use crate::builder::{BezierShapeBuilder, BuildMode, BuilderConfig};
use crate::input::InputEvent;
use crate::resize::{ResizeController, ResizeTarget};
use crate::shortcuts::{ShortcutAction, ShortcutMap};
use bez_core::{Color, ImageRecord, LayerId, LayerRecord, SessionRecord, Surface, Vertex, Xywh};
use serde::{Deserialize, Serialize};

// ─── Configuration ───────────────────────────────────────────────────────

/// What the session draws besides the shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayFlags {
    /// Draw only the active layer.
    pub active_only: bool,
    /// Pointer crosshair spanning the canvas.
    pub show_cross: bool,
    /// Lines joining consecutive vertices of the active layer.
    pub show_guides: bool,
}

impl Default for DisplayFlags {
    fn default() -> Self {
        Self {
            active_only: false,
            show_cross: true,
            show_guides: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Settings for every layer's builder; `build_mode` is the session mode.
    pub builder: BuilderConfig,
    pub handle_radius: f64,
    pub image_rect: Xywh,
    /// Canvas `(width, height)`; `None` until the host reports it.
    pub canvas: Option<(f64, f64)>,
    pub display: DisplayFlags,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            builder: BuilderConfig::default(),
            handle_radius: 5.0,
            image_rect: Xywh::new(100.0, 100.0, 400.0, 400.0),
            canvas: None,
            display: DisplayFlags::default(),
        }
    }
}

// ─── Layers ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Layer {
    pub id: LayerId,
    pub builder: BezierShapeBuilder,
    pub opacity: u8,
    pub color: Color,
}

impl Layer {
    pub fn new(config: BuilderConfig) -> Self {
        Self {
            id: LayerId::generate(),
            builder: BezierShapeBuilder::with_config(config),
            opacity: 255,
            color: Color::WHITE,
        }
    }

    /// Fill used for the layer's shape.
    pub fn fill(&self) -> Color {
        self.color.with_alpha(self.opacity)
    }

    fn to_record(&self) -> LayerRecord {
        LayerRecord {
            id: self.id,
            vertices: self.builder.shape().vertices().to_vec(),
            opacity: self.opacity,
            color: self.color,
        }
    }

    fn from_record(record: &LayerRecord, config: BuilderConfig) -> Self {
        let mut builder = BezierShapeBuilder::with_config(config);
        builder.set_vertices(record.vertices.clone());
        Self {
            id: record.id,
            builder,
            opacity: record.opacity,
            color: record.color,
        }
    }
}

/// Background image placement. Decoding and painting the image belong to
/// the host; the session only tracks where it goes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageOverlay {
    pub rect: Xywh,
    pub visible: bool,
    pub loaded: bool,
}

/// Which object the resize controller works on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditMode {
    /// The active layer's shape.
    #[default]
    Shape,
    /// The background image; `saved` is restored on exit.
    ImageResize { saved: BuildMode },
}

/// Channels to change in [`MultiShapeSession::set_active_color`]; `None`
/// keeps the current value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColorUpdate {
    pub r: Option<u8>,
    pub g: Option<u8>,
    pub b: Option<u8>,
}

// ─── Session ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct MultiShapeSession {
    layers: Vec<Layer>,
    active: usize,
    builder_config: BuilderConfig,
    edit_mode: EditMode,
    display: DisplayFlags,
    resizer: ResizeController,
    image: ImageOverlay,
    canvas: Option<(f64, f64)>,
    pointer: Vertex,
}

impl Default for MultiShapeSession {
    fn default() -> Self {
        Self::new()
    }
}

impl MultiShapeSession {
    pub fn new() -> Self {
        Self::with_config(SessionConfig::default())
    }

    pub fn with_config(config: SessionConfig) -> Self {
        let mut resizer = ResizeController::new();
        resizer.set_handle_radius(config.handle_radius);
        resizer.toggle(Some(config.builder.build_mode == BuildMode::None));
        Self {
            layers: vec![Layer::new(config.builder)],
            active: 0,
            builder_config: config.builder,
            edit_mode: EditMode::Shape,
            display: config.display,
            resizer,
            image: ImageOverlay {
                rect: config.image_rect,
                visible: true,
                loaded: false,
            },
            canvas: config.canvas,
            pointer: Vertex::default(),
        }
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_layer(&self) -> &Layer {
        &self.layers[self.active]
    }

    pub fn active_builder(&self) -> &BezierShapeBuilder {
        &self.active_layer().builder
    }

    pub fn active_builder_mut(&mut self) -> &mut BezierShapeBuilder {
        &mut self.layers[self.active].builder
    }

    pub fn mode(&self) -> BuildMode {
        self.builder_config.build_mode
    }

    pub fn edit_mode(&self) -> EditMode {
        self.edit_mode
    }

    pub fn display(&self) -> DisplayFlags {
        self.display
    }

    pub fn show_vertices(&self) -> bool {
        self.builder_config.show_vertices
    }

    pub fn resizer(&self) -> &ResizeController {
        &self.resizer
    }

    pub fn image(&self) -> ImageOverlay {
        self.image
    }

    /// Where the host should paint the background image, if anywhere.
    pub fn image_to_paint(&self) -> Option<Xywh> {
        (self.image.visible && self.image.loaded).then_some(self.image.rect)
    }

    pub fn set_image_loaded(&mut self, loaded: bool) {
        self.image.loaded = loaded;
    }

    pub fn set_show_image(&mut self, visible: bool) {
        self.image.visible = visible;
    }

    pub fn is_resizing_image(&self) -> bool {
        matches!(self.edit_mode, EditMode::ImageResize { .. })
    }

    // ─── Layer stack ─────────────────────────────────────────────────────

    /// Append an empty layer in the current mode and make it active.
    pub fn add_shape(&mut self) {
        let layer = Layer::new(self.builder_config);
        log::debug!("add layer {}", layer.id);
        self.end_drags();
        self.layers.push(layer);
        self.active = self.layers.len() - 1;
    }

    /// Remove the active layer. A session never runs out of layers: deleting
    /// the last one leaves a fresh empty layer. The first layer becomes
    /// active.
    pub fn delete_active_shape(&mut self) {
        self.end_drags();
        let removed = self.layers.remove(self.active);
        log::debug!("delete layer {}", removed.id);
        if self.layers.is_empty() {
            self.layers.push(Layer::new(self.builder_config));
        }
        self.active = 0;
    }

    /// Move the active layer one step up the draw order.
    pub fn promote_layer(&mut self) {
        if self.active + 1 >= self.layers.len() {
            return;
        }
        self.layers.swap(self.active, self.active + 1);
        self.active += 1;
        log::debug!("promote layer to {}", self.active);
    }

    /// Move the active layer one step down the draw order.
    pub fn demote_layer(&mut self) {
        if self.active == 0 {
            return;
        }
        self.layers.swap(self.active, self.active - 1);
        self.active -= 1;
        log::debug!("demote layer to {}", self.active);
    }

    pub fn left(&mut self) {
        self.end_drags();
        self.active = self.active.checked_sub(1).unwrap_or(self.layers.len() - 1);
    }

    pub fn right(&mut self) {
        self.end_drags();
        self.active = (self.active + 1) % self.layers.len();
    }

    pub fn undo(&mut self) -> bool {
        self.active_builder_mut().undo()
    }

    // ─── Settings ────────────────────────────────────────────────────────

    /// Set the build mode of every layer. The resize controller is live only
    /// in `BuildMode::None`. Any resize drag in progress is dropped.
    pub fn set_mode(&mut self, mode: BuildMode) {
        log::debug!("session mode {mode:?}");
        self.builder_config.build_mode = mode;
        self.resizer.cancel();
        self.resizer.toggle(Some(mode == BuildMode::None));
        for layer in &mut self.layers {
            layer.builder.set_mode(mode);
        }
    }

    pub fn set_show_vertices(&mut self, show: bool) {
        self.builder_config.show_vertices = show;
        for layer in &mut self.layers {
            layer.builder.set_show_vertices(show);
        }
    }

    pub fn set_active_only(&mut self, only: bool) {
        self.display.active_only = only;
    }

    pub fn set_show_cross(&mut self, show: bool) {
        self.display.show_cross = show;
    }

    pub fn set_show_guides(&mut self, show: bool) {
        self.display.show_guides = show;
    }

    pub fn active_opacity(&self) -> u8 {
        self.active_layer().opacity
    }

    pub fn set_active_opacity(&mut self, opacity: u8) {
        self.layers[self.active].opacity = opacity;
    }

    pub fn active_color(&self) -> Color {
        self.active_layer().color
    }

    pub fn set_active_color(&mut self, update: ColorUpdate) {
        let layer = &mut self.layers[self.active];
        let c = layer.color;
        layer.color = Color {
            r: update.r.unwrap_or(c.r),
            g: update.g.unwrap_or(c.g),
            b: update.b.unwrap_or(c.b),
            a: c.a,
        };
    }

    /// Enter or leave image resize mode (`None` flips it). Entering saves
    /// the current build mode and switches to `BuildMode::None`; leaving
    /// restores it. Returns whether image resize mode is now on.
    pub fn toggle_resize_image_mode(&mut self, status: Option<bool>) -> bool {
        let on = status.unwrap_or(!self.is_resizing_image());
        match (self.edit_mode, on) {
            (EditMode::Shape, true) => {
                self.end_drags();
                self.edit_mode = EditMode::ImageResize {
                    saved: self.mode(),
                };
                self.set_mode(BuildMode::None);
            }
            (EditMode::ImageResize { saved }, false) => {
                self.end_drags();
                self.edit_mode = EditMode::Shape;
                self.set_mode(saved);
            }
            _ => {}
        }
        on
    }

    pub fn set_size(&mut self, w: f64, h: f64) {
        self.canvas = Some((w, h));
    }

    pub fn canvas_size(&self) -> Option<(f64, f64)> {
        self.canvas
    }

    /// Strictly inside the canvas. Always `false` before the size is known.
    pub fn pointer_is_over_canvas(&self, x: f64, y: f64) -> bool {
        self.canvas
            .is_some_and(|(w, h)| x > 0.0 && x < w && y > 0.0 && y < h)
    }

    // ─── Events ──────────────────────────────────────────────────────────

    /// Keys go through the shortcut map first; unbound keys and all pointer
    /// events go to the active builder. Presses and releases also reach the
    /// resize controller.
    pub fn handle_event(&mut self, event: &InputEvent) {
        if let InputEvent::Key { key, modifiers } = event
            && let Some(action) = ShortcutMap::resolve(*key, *modifiers)
        {
            self.apply_shortcut(action);
            return;
        }
        if let Some((x, y)) = event.position() {
            self.pointer = Vertex::new(x, y);
        }
        self.active_builder_mut().handle_event(event);
        if matches!(event, InputEvent::PointerDown { .. } | InputEvent::PointerUp { .. }) {
            self.with_resize_target(|resizer, target| resizer.handle_event(target, event));
        }
    }

    fn apply_shortcut(&mut self, action: ShortcutAction) {
        log::debug!("shortcut {action:?}");
        match action {
            ShortcutAction::Undo => {
                self.undo();
            }
            ShortcutAction::SetMode(mode) => {
                if self.is_resizing_image() {
                    self.toggle_resize_image_mode(Some(false));
                }
                self.set_mode(mode);
            }
            ShortcutAction::PreviousLayer => self.left(),
            ShortcutAction::NextLayer => self.right(),
            ShortcutAction::DemoteLayer => self.demote_layer(),
            ShortcutAction::PromoteLayer => self.promote_layer(),
            ShortcutAction::DeleteLayer => self.delete_active_shape(),
            ShortcutAction::ToggleImageResize => {
                self.toggle_resize_image_mode(None);
            }
        }
    }

    /// Drop the drags of the current resize target and active builder
    /// before either changes.
    fn end_drags(&mut self) {
        self.resizer.cancel();
        self.active_builder_mut().cancel_drag();
    }

    fn resizer_engaged(&self) -> bool {
        self.mode() == BuildMode::None || self.is_resizing_image()
    }

    fn with_resize_target<R>(&mut self, f: impl FnOnce(&mut ResizeController, &mut dyn ResizeTarget) -> R) -> R {
        match self.edit_mode {
            EditMode::ImageResize { .. } => f(&mut self.resizer, &mut self.image.rect),
            EditMode::Shape => f(&mut self.resizer, self.layers[self.active].builder.shape_mut()),
        }
    }

    fn resize_target(&self) -> &dyn ResizeTarget {
        match self.edit_mode {
            EditMode::ImageResize { .. } => &self.image.rect,
            EditMode::Shape => self.active_builder().shape(),
        }
    }

    // ─── Frame ───────────────────────────────────────────────────────────

    /// Per-frame pointer update for the active builder and, when engaged,
    /// the resize controller.
    pub fn update(&mut self, x: f64, y: f64) {
        self.pointer = Vertex::new(x, y);
        self.active_builder_mut().update(x, y);
        if self.resizer_engaged() {
            self.with_resize_target(|resizer, target| resizer.update(target, x, y));
        }
    }

    /// Paint layers bottom to top, then resize handles, then the crosshair.
    /// Inactive layers draw only their curve; the active layer also draws
    /// its vertices and, if enabled, its guide lines.
    pub fn draw(&self, surface: &mut dyn Surface) {
        log::trace!("draw {} layers", self.layers.len());
        if self.display.active_only {
            let layer = self.active_layer();
            surface.set_fill(Some(layer.fill()));
            surface.set_stroke(Some(Color::BLACK));
            layer.builder.draw(surface);
        } else {
            for (i, layer) in self.layers.iter().enumerate() {
                surface.set_fill(Some(layer.fill()));
                surface.set_stroke(Some(Color::BLACK));
                if i == self.active {
                    if self.display.show_guides {
                        layer.builder.draw_vertex_guide(surface);
                    }
                    layer.builder.draw(surface);
                } else {
                    layer.builder.draw_bezier(surface);
                }
            }
        }

        if self.resizer_engaged() {
            self.resizer.draw(self.resize_target(), surface);
        }
        if self.display.show_cross {
            self.draw_cross(surface);
        }
    }

    fn draw_cross(&self, surface: &mut dyn Surface) {
        let Some((w, h)) = self.canvas else { return };
        let Vertex { x, y } = self.pointer;
        surface.set_stroke(Some(Color::gray(150)));
        surface.line(0.0, y, w, y);
        surface.line(x, 0.0, x, h);
    }

    /// Update with the pointer, then draw.
    pub fn frame(&mut self, x: f64, y: f64, surface: &mut dyn Surface) {
        self.update(x, y);
        self.draw(surface);
    }

    // ─── Persistence ─────────────────────────────────────────────────────

    pub fn to_record(&self) -> SessionRecord {
        SessionRecord {
            layers: self.layers.iter().map(Layer::to_record).collect(),
            active: self.active,
            image: ImageRecord {
                rect: self.image.rect,
                visible: self.image.visible,
            },
        }
    }

    /// Rebuild a session from a record. Undo history starts empty; an
    /// out-of-range active index falls back to the last layer.
    pub fn from_record(record: &SessionRecord, config: SessionConfig) -> Self {
        let mut session = Self::with_config(config);
        let layers: Vec<Layer> = record
            .layers
            .iter()
            .map(|l| Layer::from_record(l, config.builder))
            .collect();
        if !layers.is_empty() {
            session.active = record.active.min(layers.len() - 1);
            session.layers = layers;
        }
        session.image.rect = record.image.rect;
        session.image.visible = record.image.visible;
        session
    }
}
