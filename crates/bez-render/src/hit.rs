//! Hit testing: pointer position → vertex, resize handle, or box body.

use bez_core::{Corner, Origin, Vertex, Xywh};

/// Index of the first vertex whose center is strictly closer than `radius`
/// to `(px, py)`. Lowest index wins, not the nearest vertex.
pub fn vertex_at(vertices: &[Vertex], px: f64, py: f64, radius: f64) -> Option<usize> {
    vertices.iter().position(|v| v.distance_to(px, py) < radius)
}

/// Whether `(px, py)` lies strictly inside the `w × h` box whose `(x, y)`
/// is interpreted according to `origin`.
pub fn box_contains(px: f64, py: f64, x: f64, y: f64, w: f64, h: f64, origin: Origin) -> bool {
    match origin {
        Origin::Center => {
            let (w2, h2) = (w / 2.0, h / 2.0);
            px > x - w2 && px < x + w2 && py > y - h2 && py < y + h2
        }
        Origin::TopLeft => px > x && px < x + w && py > y && py < y + h,
        Origin::BottomLeft => px > x && px < x + w && py > y - h && py < y,
    }
}

/// The corner handle under `(px, py)`. Each handle is a square of side
/// `2 × handle_radius` centered on its corner; corners are tested in
/// `tl, tr, br, bl` order.
pub fn corner_at(rect: Xywh, px: f64, py: f64, handle_radius: f64) -> Option<Corner> {
    let side = handle_radius * 2.0;
    rect.corners()
        .into_iter()
        .find(|(_, c)| box_contains(px, py, c.x, c.y, side, side, Origin::Center))
        .map(|(corner, _)| corner)
}
