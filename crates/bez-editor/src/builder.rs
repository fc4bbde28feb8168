//! Interactive shape builder.
//!
//! A [`BezierShapeBuilder`] owns one [`BezierShape`] and turns pointer and
//! key events into vertex edits according to its [`BuildMode`]:
//!
//! | Mode        | Click            | Press on vertex | Drag            | Backspace on vertex |
//! |-------------|------------------|-----------------|-----------------|---------------------|
//! | `AddPoint`  | append vertex    | none            | none            | delete vertex       |
//! | `EditPoint` | none             | grab vertex     | vertex follows  | delete vertex       |
//! | `Move`      | none             | start move      | shape follows   | delete vertex       |
//! | `None`      | none             | none            | none            | delete vertex       |
//!
//! Per frame the host calls [`BezierShapeBuilder::update`] with the pointer
//! position before drawing.

use crate::commands::{EditBatch, UndoStack};
use crate::input::{InputEvent, Key};
use bez_core::{BezierShape, Boundary, Color, Surface, Vertex, Vertices};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BuildMode {
    /// Events are ignored; the session uses this mode for box resizing.
    None,
    #[default]
    AddPoint,
    EditPoint,
    Move,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionState {
    #[default]
    Neutral,
    /// Reserved; hover is tracked separately through `hovered()`.
    Hover,
    Drag,
}

/// Builder defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// Diameter of drawn vertices, also the hover radius.
    pub vertex_size: f64,
    pub build_mode: BuildMode,
    pub show_vertices: bool,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            vertex_size: 5.0,
            build_mode: BuildMode::AddPoint,
            show_vertices: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BezierShapeBuilder {
    shape: BezierShape,
    config: BuilderConfig,
    state: InteractionState,
    /// Vertex being dragged. Only set while `Drag` in `EditPoint`.
    interacting: Option<usize>,
    hovered: Option<usize>,
    pointer: Vertex,
    last_pointer: Vertex,
    undo: UndoStack,
}

impl Default for BezierShapeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BezierShapeBuilder {
    pub fn new() -> Self {
        Self::with_config(BuilderConfig::default())
    }

    pub fn with_config(config: BuilderConfig) -> Self {
        Self {
            shape: BezierShape::new(),
            config,
            state: InteractionState::Neutral,
            interacting: None,
            hovered: None,
            pointer: Vertex::default(),
            last_pointer: Vertex::default(),
            undo: UndoStack::new(),
        }
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    pub fn shape(&self) -> &BezierShape {
        &self.shape
    }

    /// Direct access for transforms that bypass the undo stack (resizing).
    pub fn shape_mut(&mut self) -> &mut BezierShape {
        &mut self.shape
    }

    pub fn boundary(&self) -> Option<Boundary> {
        self.shape.boundary()
    }

    pub fn dim(&self) -> Option<(f64, f64)> {
        self.shape.dim()
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    pub fn mode(&self) -> BuildMode {
        self.config.build_mode
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn interacting(&self) -> Option<usize> {
        self.interacting
    }

    /// Vertex under the pointer as of the last press, click or key press.
    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn pointer(&self) -> Vertex {
        self.pointer
    }

    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    // ─── Setters ─────────────────────────────────────────────────────────

    /// Switching to a different mode abandons any drag in progress.
    pub fn set_mode(&mut self, mode: BuildMode) {
        if self.config.build_mode != mode {
            log::debug!("build mode {:?} → {mode:?}", self.config.build_mode);
            self.cancel_drag();
        }
        self.config.build_mode = mode;
    }

    /// Drop the current drag without applying it.
    pub fn cancel_drag(&mut self) {
        if self.state == InteractionState::Drag {
            log::debug!("drag cancelled");
        }
        self.interacting = None;
        self.state = InteractionState::Neutral;
    }

    pub fn set_show_vertices(&mut self, show: bool) {
        self.config.show_vertices = show;
    }

    pub fn set_vertex_size(&mut self, size: f64) {
        self.config.vertex_size = size;
    }

    /// Replace the shape's vertices. Undo history is kept.
    pub fn set_vertices(&mut self, vertices: Vertices) {
        self.shape.set_vertices(vertices);
    }

    pub fn clear_vertices(&mut self) {
        self.shape.set_vertices(Vertices::new());
    }

    pub fn scale(&mut self, factor: f64) {
        self.shape.scale(factor);
    }

    pub fn shift(&mut self, dx: f64, dy: f64) {
        self.shape.shift(dx, dy);
    }

    // ─── Events ──────────────────────────────────────────────────────────

    /// Single entry point for host events. Pointer events move the current
    /// pointer to their position before acting.
    pub fn handle_event(&mut self, event: &InputEvent) {
        if let Some((x, y)) = event.position() {
            self.pointer = Vertex::new(x, y);
        }
        match event {
            InputEvent::PointerDown { .. } => self.press(),
            InputEvent::PointerUp { .. } => self.release(),
            InputEvent::Click { .. } => self.click(),
            InputEvent::Key { key, .. } => self.key_press(*key),
        }
    }

    pub fn click(&mut self) {
        if self.config.build_mode != BuildMode::AddPoint {
            return;
        }
        self.shape.push(self.pointer.x, self.pointer.y);
        self.state = InteractionState::Neutral;
        self.hovered = self.hover_index();
        self.undo.push(EditBatch::Added);
        log::debug!("added vertex {} at ({}, {})", self.shape.n_vertices() - 1, self.pointer.x, self.pointer.y);
    }

    pub fn press(&mut self) {
        self.hovered = self.hover_index();
        match (self.config.build_mode, self.hovered) {
            (BuildMode::EditPoint, Some(i)) => {
                self.state = InteractionState::Drag;
                self.interacting = Some(i);
                log::debug!("dragging vertex {i}");
            }
            (BuildMode::Move, _) => {
                self.state = InteractionState::Drag;
                log::debug!("moving shape");
            }
            _ => {}
        }
    }

    pub fn release(&mut self) {
        match (self.config.build_mode, self.state) {
            (BuildMode::EditPoint, InteractionState::Drag) => {
                if let Some(i) = self.interacting {
                    self.shape.set_vertex(i, self.pointer.x, self.pointer.y);
                }
            }
            (BuildMode::Move, InteractionState::Drag) => {
                self.shift(self.pointer.x - self.last_pointer.x, self.pointer.y - self.last_pointer.y);
            }
            _ => {}
        }
        self.interacting = None;
        self.state = InteractionState::Neutral;
    }

    /// Backspace over a vertex deletes it. Ignored mid-drag so the dragged
    /// index stays valid.
    pub fn key_press(&mut self, key: Key) {
        self.hovered = self.hover_index();
        if self.state == InteractionState::Drag {
            return;
        }
        let (Key::Backspace, Some(i)) = (key, self.hovered) else {
            return;
        };
        let removed = self.shape.splice(i, Some(1), []);
        if removed.is_empty() {
            return;
        }
        log::debug!("deleted vertex {i}");
        self.hovered = None;
        self.undo.push(EditBatch::Removed(removed));
    }

    /// Revert the most recent add or delete. Returns `false` when there was
    /// nothing to undo.
    pub fn undo(&mut self) -> bool {
        self.undo.undo(&mut self.shape).is_some()
    }

    /// Per-frame update: take the new pointer, apply any drag, then remember
    /// the pointer for the next frame's delta.
    pub fn update(&mut self, x: f64, y: f64) {
        self.pointer = Vertex::new(x, y);
        self.update_dragged_point();
        self.update_dragged_curve();
        self.last_pointer = self.pointer;
    }

    fn update_dragged_point(&mut self) {
        if self.config.build_mode != BuildMode::EditPoint || self.state != InteractionState::Drag {
            return;
        }
        if let Some(i) = self.interacting {
            self.shape.set_vertex(i, self.pointer.x, self.pointer.y);
        }
    }

    fn update_dragged_curve(&mut self) {
        if self.config.build_mode == BuildMode::Move && self.state == InteractionState::Drag {
            let (dx, dy) = (self.pointer.x - self.last_pointer.x, self.pointer.y - self.last_pointer.y);
            log::trace!("move by ({dx}, {dy})");
            self.shift(dx, dy);
        }
    }

    /// First vertex strictly within `vertex_size` of the pointer.
    pub fn hover_index(&self) -> Option<usize> {
        bez_render::vertex_at(self.shape.vertices(), self.pointer.x, self.pointer.y, self.config.vertex_size)
    }

    // ─── Drawing ─────────────────────────────────────────────────────────

    /// Only the curve, with whatever fill and stroke the caller set.
    pub fn draw_bezier(&self, surface: &mut dyn Surface) {
        self.shape.draw(surface);
    }

    /// Anchors white, control points red, both outlined in black.
    pub fn draw_vertices(&self, surface: &mut dyn Surface) {
        if !self.config.show_vertices {
            return;
        }
        let size = self.config.vertex_size;
        surface.set_stroke(Some(Color::BLACK));
        for (i, v) in self.shape.vertices().iter().enumerate() {
            let fill = if i % 3 == 0 { Color::WHITE } else { Color::RED };
            surface.set_fill(Some(fill));
            surface.ellipse(v.x, v.y, size, size);
        }
    }

    /// Polyline through consecutive vertices.
    pub fn draw_vertex_guide(&self, surface: &mut dyn Surface) {
        for pair in self.shape.vertices().windows(2) {
            surface.line(pair[0].x, pair[0].y, pair[1].x, pair[1].y);
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        self.draw_bezier(surface);
        self.draw_vertices(surface);
    }
}
