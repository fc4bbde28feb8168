//! Corner-handle box resizing.
//!
//! A [`ResizeController`] draws four square handles on the bounds of a
//! [`ResizeTarget`] and converts handle drags into `resize` calls. The
//! controller keeps no reference to its target: the owner passes the target
//! into every call, so switching targets is just passing a different one.

use crate::input::InputEvent;
use bez_core::{BezierShape, Color, Corner, Origin, Surface, Vertex, Xywh};
use bez_render::{box_contains, corner_at};

/// Something with a box that corner drags can resize.
pub trait ResizeTarget {
    /// Current box, top-left origin. `None` when there is nothing to resize.
    fn bounds(&self) -> Option<Xywh>;

    /// Apply the drag from `start` to `end` on `corner`. The edges opposite
    /// the dragged corner stay fixed.
    fn resize(&mut self, start: Vertex, end: Vertex, corner: Corner);
}

impl ResizeTarget for Xywh {
    fn bounds(&self) -> Option<Xywh> {
        Some(*self)
    }

    fn resize(&mut self, start: Vertex, end: Vertex, corner: Corner) {
        let (dx, dy) = (end.x - start.x, end.y - start.y);
        if corner.is_right() {
            self.w += dx;
        } else {
            self.w -= dx;
            self.x += dx;
        }
        if corner.is_top() {
            self.y += dy;
            self.h -= dy;
        } else {
            self.h += dy;
        }
    }
}

impl ResizeTarget for BezierShape {
    fn bounds(&self) -> Option<Xywh> {
        self.boundary().map(|r| r.to_xywh())
    }

    /// Width then height, each through `set_dim` (which keeps the
    /// bottom-left corner) plus a compensating shift. A step that would
    /// leave a non-positive dimension is skipped.
    fn resize(&mut self, start: Vertex, end: Vertex, corner: Corner) {
        let Some((w, h)) = self.dim() else { return };
        let (dx, dy) = (end.x - start.x, end.y - start.y);

        let new_w = if corner.is_right() { w + dx } else { w - dx };
        let w = if new_w > 0.0 && try_set_dim(self, new_w, h) {
            if !corner.is_right() {
                self.shift(dx, 0.0);
            }
            new_w
        } else {
            w
        };

        let new_h = if corner.is_top() { h - dy } else { h + dy };
        if new_h > 0.0 && try_set_dim(self, w, new_h) && !corner.is_top() {
            self.shift(0.0, dy);
        }
    }
}

fn try_set_dim(shape: &mut BezierShape, w: f64, h: f64) -> bool {
    match shape.set_dim(w, Some(h)) {
        Ok(()) => true,
        Err(e) => {
            log::warn!("resize step skipped: {e}");
            false
        }
    }
}

// ─── Controller ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizeState {
    #[default]
    None,
    Drag,
}

#[derive(Debug, Clone)]
pub struct ResizeController {
    on: bool,
    origin: Origin,
    handle_radius: f64,
    state: ResizeState,
    active: Option<Corner>,
    drag_origin: Option<Vertex>,
}

impl Default for ResizeController {
    fn default() -> Self {
        Self::new()
    }
}

impl ResizeController {
    pub fn new() -> Self {
        Self {
            on: true,
            origin: Origin::TopLeft,
            handle_radius: 5.0,
            state: ResizeState::None,
            active: None,
            drag_origin: None,
        }
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    /// Set the on flag, or flip it with `None`. Switching off abandons any
    /// drag in progress. Returns the new flag.
    pub fn toggle(&mut self, status: Option<bool>) -> bool {
        self.on = status.unwrap_or(!self.on);
        if !self.on {
            self.cancel();
        }
        self.on
    }

    /// Abandon any drag in progress. Owners call this before handing the
    /// controller a different target.
    pub fn cancel(&mut self) {
        if self.state == ResizeState::Drag {
            log::debug!("resize cancelled");
        }
        self.reset();
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    /// How the target box's `(x, y)` is read by [`Self::pointer_over_body`].
    pub fn set_origin(&mut self, origin: Origin) {
        self.origin = origin;
    }

    pub fn handle_radius(&self) -> f64 {
        self.handle_radius
    }

    pub fn set_handle_radius(&mut self, radius: f64) {
        self.handle_radius = radius;
    }

    pub fn state(&self) -> ResizeState {
        self.state
    }

    pub fn active(&self) -> Option<Corner> {
        self.active
    }

    /// Corner points of the target in `tl, tr, br, bl` order.
    pub fn corners(&self, target: &dyn ResizeTarget) -> Option<[(Corner, Vertex); 4]> {
        target.bounds().map(|r| r.corners())
    }

    pub fn pointer_over_handle(&self, target: &dyn ResizeTarget, x: f64, y: f64) -> Option<Corner> {
        corner_at(target.bounds()?, x, y, self.handle_radius)
    }

    pub fn pointer_over_body(&self, target: &dyn ResizeTarget, x: f64, y: f64) -> bool {
        target
            .bounds()
            .is_some_and(|r| box_contains(x, y, r.x, r.y, r.w, r.h, self.origin))
    }

    pub fn handle_event(&mut self, target: &mut dyn ResizeTarget, event: &InputEvent) {
        match *event {
            InputEvent::PointerDown { x, y, .. } => self.press(target, x, y),
            InputEvent::PointerUp { x, y, .. } => self.release(target, x, y),
            InputEvent::Click { .. } | InputEvent::Key { .. } => {}
        }
    }

    pub fn press(&mut self, target: &dyn ResizeTarget, x: f64, y: f64) {
        if !self.on {
            return;
        }
        if let Some(corner) = self.pointer_over_handle(target, x, y) {
            log::debug!("resize start on {corner} at ({x}, {y})");
            self.state = ResizeState::Drag;
            self.active = Some(corner);
            self.drag_origin = Some(Vertex::new(x, y));
        }
    }

    pub fn release(&mut self, target: &mut dyn ResizeTarget, x: f64, y: f64) {
        if !self.on {
            return;
        }
        if let (ResizeState::Drag, Some(corner), Some(start)) = (self.state, self.active, self.drag_origin) {
            target.resize(start, Vertex::new(x, y), corner);
            log::debug!("resize finished on {corner}: {:?}", target.bounds());
        }
        self.reset();
    }

    /// Per-frame: resize by the pointer movement since the previous frame.
    pub fn update(&mut self, target: &mut dyn ResizeTarget, x: f64, y: f64) {
        if let (ResizeState::Drag, Some(corner), Some(start)) = (self.state, self.active, self.drag_origin) {
            let end = Vertex::new(x, y);
            log::trace!("resize {corner} by ({}, {})", end.x - start.x, end.y - start.y);
            target.resize(start, end, corner);
            self.drag_origin = Some(end);
        }
    }

    /// Outline plus a filled square of side `handle_radius` on each corner.
    pub fn draw(&self, target: &dyn ResizeTarget, surface: &mut dyn Surface) {
        let Some(rect) = target.bounds() else { return };
        surface.set_stroke(Some(Color::BLACK));
        surface.set_fill(None);
        surface.rect(rect.x, rect.y, rect.w, rect.h);

        let r = self.handle_radius;
        surface.set_fill(Some(Color::BLACK));
        for (_, c) in rect.corners() {
            surface.rect(c.x - r / 2.0, c.y - r / 2.0, r, r);
        }
    }

    fn reset(&mut self) {
        self.state = ResizeState::None;
        self.active = None;
        self.drag_origin = None;
    }
}
