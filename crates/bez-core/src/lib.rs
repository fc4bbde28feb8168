pub mod curve;
pub mod document;
pub mod id;
pub mod model;
pub mod path_data;
pub mod shape;
pub mod surface;

pub use document::{ImageRecord, LayerRecord, SessionRecord};
pub use id::LayerId;
pub use model::*;
pub use path_data::{emit_path_data, parse_path_data};
pub use shape::{BezierShape, ShapeError};
pub use surface::{DrawCmd, RecordingSurface, Surface};
