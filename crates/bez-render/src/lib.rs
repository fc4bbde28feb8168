pub mod hit;
pub mod paint;

pub use hit::{box_contains, corner_at, vertex_at};
pub use paint::{PaintItem, PaintShape, SceneSurface};
