pub mod builder;
pub mod commands;
pub mod input;
pub mod resize;
pub mod session;
pub mod shortcuts;

pub use builder::{BezierShapeBuilder, BuildMode, BuilderConfig, InteractionState};
pub use commands::{EditBatch, UndoStack};
pub use input::{InputEvent, Key, Modifiers};
pub use resize::{ResizeController, ResizeState, ResizeTarget};
pub use session::{
    ColorUpdate, DisplayFlags, EditMode, ImageOverlay, Layer, MultiShapeSession, SessionConfig,
};
pub use shortcuts::{ShortcutAction, ShortcutMap};
