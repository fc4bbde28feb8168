//! Piecewise cubic Bézier shape with an exact cached boundary.
//!
//! The boundary is recomputed from scratch after every change to the vertex
//! sequence. Pure translations patch it arithmetically instead, since moving
//! a curve does not change its shape.

use crate::curve::{self, Component};
use crate::model::{Boundary, Vertex, Vertices};
use crate::surface::Surface;
use std::fmt;

/// Failure modes of shape transforms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeError {
    /// The current boundary has zero extent on an axis that must be scaled.
    Degenerate { width: f64, height: f64 },
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeError::Degenerate { width, height } => {
                write!(f, "cannot rescale a {width}x{height} shape")
            }
        }
    }
}

impl std::error::Error for ShapeError {}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BezierShape {
    vertices: Vertices,
    rect: Option<Boundary>,
}

impl BezierShape {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_vertices(vertices: Vertices) -> Self {
        let mut shape = Self {
            vertices,
            rect: None,
        };
        shape.rect = shape.compute_rectangle();
        shape
    }

    // ─── Queries ─────────────────────────────────────────────────────────

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn vertex(&self, i: usize) -> Option<Vertex> {
        self.vertices.get(i).copied()
    }

    /// Cached boundary, `None` while there is no complete segment.
    pub fn boundary(&self) -> Option<Boundary> {
        self.rect
    }

    /// `(width, height)` of the boundary.
    pub fn dim(&self) -> Option<(f64, f64)> {
        self.rect.map(|r| (r.width(), r.height()))
    }

    /// Number of complete segments; a trailing partial group is not counted.
    pub fn n_curves(&self) -> usize {
        self.vertices.len().saturating_sub(1) / 3
    }

    pub fn n_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Vertices `[3i, 3i + 4)`. Short or empty when `i` is out of range.
    pub fn bezier(&self, i: usize) -> &[Vertex] {
        let start = i.saturating_mul(3);
        let end = start.saturating_add(4).min(self.vertices.len());
        self.vertices.get(start..end).unwrap_or(&[])
    }

    /// `(start, end)` anchors of segment `i`.
    pub fn anchors(&self, i: usize) -> Option<(Vertex, Vertex)> {
        match self.bezier(i) {
            [a, _, _, b] => Some((*a, *b)),
            _ => None,
        }
    }

    /// `(control1, control2)` of segment `i`.
    pub fn controls(&self, i: usize) -> Option<(Vertex, Vertex)> {
        match self.bezier(i) {
            [_, c1, c2, _] => Some((*c1, *c2)),
            _ => None,
        }
    }

    /// Compute the tight boundary of all complete segments.
    ///
    /// For each segment the x and y components are searched independently:
    /// candidates are the two anchors plus the curve evaluated at every
    /// derivative root in `[0, 1]`.
    pub fn compute_rectangle(&self) -> Option<Boundary> {
        let n = self.n_curves();
        if n == 0 {
            return None;
        }
        let mut rect = Boundary::new(f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY, f64::INFINITY);
        for i in 0..n {
            let seg = self.bezier(i);
            let xs: Component = [seg[0].x, seg[1].x, seg[2].x, seg[3].x];
            let ys: Component = [seg[0].y, seg[1].y, seg[2].y, seg[3].y];
            let (min_x, max_x) = curve::component_bounds(&xs);
            let (min_y, max_y) = curve::component_bounds(&ys);
            rect.left = rect.left.min(min_x);
            rect.right = rect.right.max(max_x);
            rect.top = rect.top.min(min_y);
            rect.bottom = rect.bottom.max(max_y);
        }
        Some(rect)
    }

    // ─── Sequence mutators ───────────────────────────────────────────────

    /// Replace every vertex.
    pub fn set_vertices(&mut self, vertices: Vertices) {
        self.vertices = vertices;
        self.recompute();
    }

    /// Update vertex `i`; returns `false` when `i` is out of range.
    pub fn set_vertex(&mut self, i: usize, x: f64, y: f64) -> bool {
        let Some(v) = self.vertices.get_mut(i) else {
            return false;
        };
        *v = Vertex::new(x, y);
        self.recompute();
        true
    }

    pub fn push(&mut self, x: f64, y: f64) {
        self.vertices.push(Vertex::new(x, y));
        self.recompute();
    }

    pub fn pop(&mut self) -> Option<Vertex> {
        let v = self.vertices.pop();
        self.recompute();
        v
    }

    /// Append `vertices` at the end.
    pub fn concat(&mut self, vertices: impl IntoIterator<Item = Vertex>) {
        self.vertices.extend(vertices);
        self.recompute();
    }

    /// Remove `delete_count` vertices at `start` (everything from `start`
    /// when `None`), insert `replace` in their place and return the removed
    /// vertices.
    pub fn splice(
        &mut self,
        start: usize,
        delete_count: Option<usize>,
        replace: impl IntoIterator<Item = Vertex>,
    ) -> Vertices {
        debug_assert!(
            start <= self.vertices.len(),
            "splice start {start} past {} vertices",
            self.vertices.len()
        );
        let start = start.min(self.vertices.len());
        let end = match delete_count {
            Some(n) => start.saturating_add(n).min(self.vertices.len()),
            None => self.vertices.len(),
        };
        let removed = self.vertices.splice(start..end, replace).collect();
        self.recompute();
        removed
    }

    /// Insert `vertices` before index `start`.
    pub fn insert(&mut self, start: usize, vertices: impl IntoIterator<Item = Vertex>) {
        self.splice(start, Some(0), vertices);
    }

    /// Apply `f` to every vertex. The boundary is left to the caller.
    pub fn apply_to_vertices(&mut self, f: impl Fn(Vertex) -> Vertex) {
        for v in &mut self.vertices {
            *v = f(*v);
        }
    }

    // ─── Transforms ──────────────────────────────────────────────────────

    /// Translate by `(dx, dy)`. No-op without a boundary.
    pub fn shift(&mut self, dx: f64, dy: f64) {
        let Some(rect) = self.rect else { return };
        self.apply_to_vertices(|v| Vertex::new(v.x + dx, v.y + dy));
        self.rect = Some(rect.translated(dx, dy));
    }

    /// Move the bottom-left corner of the boundary to `(x, y)`.
    pub fn set_position(&mut self, x: f64, y: f64) {
        let Some(rect) = self.rect else { return };
        self.shift(x - rect.left, y - rect.bottom);
    }

    /// Uniform scale about the boundary center.
    pub fn scale(&mut self, factor: f64) {
        let Some(rect) = self.rect else { return };
        let cx = rect.left + rect.width() / 2.0;
        let cy = rect.top + rect.height() / 2.0;
        self.apply_to_vertices(|v| {
            Vertex::new(factor * (v.x - cx) + cx, factor * (v.y - cy) + cy)
        });
        self.recompute();
    }

    /// Resize the boundary to `w × h` (`h` defaults to `w`), keeping the
    /// bottom-left corner in place.
    pub fn set_dim(&mut self, w: f64, h: Option<f64>) -> Result<(), ShapeError> {
        let Some(rect) = self.rect else {
            return Ok(());
        };
        let h = h.unwrap_or(w);
        let (width, height) = (rect.width(), rect.height());
        let scale_w = w / width;
        let scale_h = h / height;
        if !scale_w.is_finite() || !scale_h.is_finite() {
            log::debug!("set_dim({w}, {h}) on a {width}x{height} shape has no finite scale");
            return Err(ShapeError::Degenerate { width, height });
        }

        let cx = rect.left + width / 2.0;
        let cy = rect.top + height / 2.0;
        self.apply_to_vertices(|v| {
            Vertex::new(scale_w * (v.x - cx) + cx, scale_h * (v.y - cy) + cy)
        });
        self.recompute();
        self.set_position(rect.left, rect.bottom);
        Ok(())
    }

    // ─── Drawing ─────────────────────────────────────────────────────────

    /// Emit the shape as one path. Draws nothing when empty.
    pub fn draw(&self, surface: &mut dyn Surface) {
        let Some(first) = self.vertices.first() else {
            return;
        };
        surface.begin_path();
        surface.move_to(first.x, first.y);
        for i in 0..self.n_curves() {
            if let [_, c1, c2, end] = self.bezier(i) {
                surface.cubic_to(c1.x, c1.y, c2.x, c2.y, end.x, end.y);
            }
        }
        surface.end_path();
    }

    fn recompute(&mut self) {
        self.rect = self.compute_rectangle();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCmd, RecordingSurface};
    use pretty_assertions::assert_eq;

    fn verts(points: &[(f64, f64)]) -> Vertices {
        points.iter().map(|&p| Vertex::from(p)).collect()
    }

    fn s_curve() -> BezierShape {
        BezierShape::from_vertices(verts(&[(0.0, 0.0), (10.0, 0.0), (20.0, 10.0), (30.0, 10.0)]))
    }

    fn two_segments() -> BezierShape {
        BezierShape::from_vertices(verts(&[
            (0.0, 0.0),
            (10.0, -20.0),
            (30.0, 40.0),
            (40.0, 10.0),
            (50.0, -5.0),
            (70.0, 30.0),
            (80.0, 0.0),
        ]))
    }

    #[test]
    fn s_curve_is_bounded_by_its_anchors() {
        let shape = s_curve();
        assert_eq!(shape.n_curves(), 1);
        assert_eq!(shape.boundary(), Some(Boundary::new(0.0, 30.0, 10.0, 0.0)));
    }

    #[test]
    fn curve_count_ignores_partial_groups() {
        let mut shape = BezierShape::new();
        let counts: Vec<usize> = (0..8)
            .map(|i| {
                shape.push(i as f64, 0.0);
                shape.n_curves()
            })
            .collect();
        assert_eq!(counts, vec![0, 0, 0, 1, 1, 1, 2, 2]);
    }

    #[test]
    fn boundary_includes_interior_extrema() {
        let shape = BezierShape::from_vertices(verts(&[(0.0, 0.0), (0.0, 40.0), (30.0, 40.0), (30.0, 0.0)]));
        let rect = shape.boundary().unwrap();
        assert_eq!(rect.top, 0.0);
        assert!((rect.bottom - 30.0).abs() < 1e-9, "arch peak is 3/4 of the control height");
        assert_eq!((rect.left, rect.right), (0.0, 30.0));
    }

    #[test]
    fn empty_shape_is_inert() {
        let mut shape = BezierShape::new();
        assert_eq!(shape.boundary(), None);
        assert_eq!(shape.dim(), None);
        shape.shift(5.0, 5.0);
        shape.scale(2.0);
        shape.set_position(1.0, 1.0);
        assert_eq!(shape.set_dim(10.0, None), Ok(()));
        assert!(shape.vertices().is_empty());

        let mut surface = RecordingSurface::new();
        shape.draw(&mut surface);
        assert!(surface.is_empty());
    }

    #[test]
    fn partial_shape_draws_only_its_start() {
        let shape = BezierShape::from_vertices(verts(&[(1.0, 2.0), (3.0, 4.0)]));
        let mut surface = RecordingSurface::new();
        shape.draw(&mut surface);
        assert_eq!(
            surface.commands,
            vec![DrawCmd::BeginPath, DrawCmd::MoveTo(1.0, 2.0), DrawCmd::EndPath]
        );
    }

    #[test]
    fn draw_emits_one_cubic_per_segment() {
        let shape = two_segments();
        let mut surface = RecordingSurface::new();
        shape.draw(&mut surface);
        assert_eq!(surface.commands[1], DrawCmd::MoveTo(0.0, 0.0));
        assert_eq!(surface.commands[3], DrawCmd::CubicTo(50.0, -5.0, 70.0, 30.0, 80.0, 0.0));
        assert_eq!(surface.count(|c| matches!(c, DrawCmd::CubicTo(..))), 2);
    }

    #[test]
    fn segment_accessors_share_anchors() {
        let shape = two_segments();
        let (_, end0) = shape.anchors(0).unwrap();
        let (start1, _) = shape.anchors(1).unwrap();
        assert_eq!(end0, start1);
        assert_eq!(shape.controls(1), Some((Vertex::new(50.0, -5.0), Vertex::new(70.0, 30.0))));
        assert_eq!(shape.anchors(2), None);
        assert!(shape.bezier(7).is_empty());
        assert_eq!(shape.bezier(2).len(), 1);
    }

    #[test]
    fn push_then_pop_restores_state() {
        let mut shape = two_segments();
        let before = shape.clone();
        shape.push(-100.0, 250.0);
        assert_eq!(shape.n_curves(), 2);
        assert_eq!(shape.pop(), Some(Vertex::new(-100.0, 250.0)));
        assert_eq!(shape, before);
    }

    #[test]
    fn shift_is_invertible() {
        let mut shape = two_segments();
        let before = shape.clone();
        shape.shift(12.5, -3.25);
        assert_eq!(shape.vertex(0), Some(Vertex::new(12.5, -3.25)));
        shape.shift(-12.5, 3.25);
        assert_eq!(shape, before);
    }

    #[test]
    fn shift_keeps_boundary_consistent() {
        let mut shape = two_segments();
        shape.shift(7.0, 9.0);
        let patched = shape.boundary().unwrap();
        let fresh = shape.compute_rectangle().unwrap();
        assert!((patched.top - fresh.top).abs() < 1e-9);
        assert!((patched.right - fresh.right).abs() < 1e-9);
        assert!((patched.bottom - fresh.bottom).abs() < 1e-9);
        assert!((patched.left - fresh.left).abs() < 1e-9);
    }

    #[test]
    fn set_position_moves_bottom_left() {
        let mut shape = s_curve();
        shape.set_position(100.0, 200.0);
        let rect = shape.boundary().unwrap();
        assert_eq!((rect.left, rect.bottom), (100.0, 200.0));
        assert_eq!(shape.dim(), Some((30.0, 10.0)));
    }

    #[test]
    fn set_dim_hits_target_and_keeps_anchor() {
        let mut shape = two_segments();
        let before = shape.boundary().unwrap();
        shape.set_dim(200.0, Some(50.0)).unwrap();
        let (w, h) = shape.dim().unwrap();
        assert!((w - 200.0).abs() < 1e-9);
        assert!((h - 50.0).abs() < 1e-9);
        let after = shape.boundary().unwrap();
        assert!((after.left - before.left).abs() < 1e-9);
        assert!((after.bottom - before.bottom).abs() < 1e-9);
    }

    #[test]
    fn set_dim_height_defaults_to_width() {
        let mut shape = s_curve();
        shape.set_dim(40.0, None).unwrap();
        let (w, h) = shape.dim().unwrap();
        assert!((w - 40.0).abs() < 1e-9);
        assert!((h - 40.0).abs() < 1e-9);
    }

    #[test]
    fn set_dim_rejects_flat_shapes() {
        let mut shape = BezierShape::from_vertices(verts(&[(0.0, 5.0), (1.0, 5.0), (2.0, 5.0), (3.0, 5.0)]));
        let before = shape.clone();
        let err = shape.set_dim(10.0, Some(10.0)).unwrap_err();
        assert_eq!(err, ShapeError::Degenerate { width: 3.0, height: 0.0 });
        assert_eq!(shape, before);
    }

    #[test]
    fn scale_about_center() {
        let mut shape = s_curve();
        shape.scale(2.0);
        assert_eq!(shape.boundary(), Some(Boundary::new(-5.0, 45.0, 15.0, -15.0)));
    }

    #[test]
    fn splice_returns_removed_vertices() {
        let mut shape = two_segments();
        let removed = shape.splice(1, Some(2), [Vertex::new(9.0, 9.0)]);
        assert_eq!(removed, verts(&[(10.0, -20.0), (30.0, 40.0)]));
        assert_eq!(shape.n_vertices(), 6);
        assert_eq!(shape.vertex(1), Some(Vertex::new(9.0, 9.0)));

        let tail = shape.splice(4, None, []);
        assert_eq!(tail.len(), 2);
        assert_eq!(shape.n_curves(), 1);
    }

    #[test]
    fn insert_and_concat_recompute_boundary() {
        let mut shape = BezierShape::from_vertices(verts(&[(0.0, 0.0), (30.0, 10.0)]));
        assert_eq!(shape.boundary(), None);
        shape.insert(1, verts(&[(10.0, 0.0), (20.0, 10.0)]));
        assert_eq!(shape, s_curve());
        shape.concat(verts(&[(40.0, 10.0), (50.0, 0.0), (60.0, -10.0)]));
        assert_eq!(shape.n_curves(), 2);
        assert_eq!(shape.boundary().unwrap().right, 60.0);
        assert_eq!(shape.boundary().unwrap().top, -10.0);
    }

    #[test]
    fn set_vertex_out_of_range_is_rejected() {
        let mut shape = s_curve();
        assert!(!shape.set_vertex(4, 1.0, 1.0));
        assert!(shape.set_vertex(3, 30.0, 50.0));
        assert_eq!(shape.boundary().unwrap().bottom, 50.0);
    }
}
