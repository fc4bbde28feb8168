//! Keyboard shortcut mapping.
//!
//! Maps key + modifier combos to session-level [`ShortcutAction`]s. Keys
//! with no binding fall through to the active builder, which is how a plain
//! Backspace reaches vertex deletion.
//!
//! | Keys                 | Action                     |
//! |----------------------|----------------------------|
//! | ⌘Z / Ctrl+Z          | undo on the active layer   |
//! | `a` `e` `m` `n`      | add / edit / move / none   |
//! | ← →                  | previous / next layer      |
//! | `[` `]`              | demote / promote layer     |
//! | ⌘⌫ / Ctrl+Backspace  | delete the active layer    |
//! | `i`                  | toggle image resize mode   |

use crate::builder::BuildMode;
use crate::input::{Key, Modifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    Undo,
    SetMode(BuildMode),
    PreviousLayer,
    NextLayer,
    DemoteLayer,
    PromoteLayer,
    DeleteLayer,
    ToggleImageResize,
}

pub struct ShortcutMap;

impl ShortcutMap {
    /// Resolve a key event to an action, or `None` when unbound.
    pub fn resolve(key: Key, modifiers: Modifiers) -> Option<ShortcutAction> {
        if modifiers.command() {
            return match key {
                Key::Char('z') if !modifiers.shift => Some(ShortcutAction::Undo),
                Key::Backspace | Key::Delete => Some(ShortcutAction::DeleteLayer),
                _ => None,
            };
        }
        if modifiers.alt {
            return None;
        }

        match key {
            Key::Char('a') => Some(ShortcutAction::SetMode(BuildMode::AddPoint)),
            Key::Char('e') => Some(ShortcutAction::SetMode(BuildMode::EditPoint)),
            Key::Char('m') => Some(ShortcutAction::SetMode(BuildMode::Move)),
            Key::Char('n') => Some(ShortcutAction::SetMode(BuildMode::None)),
            Key::ArrowLeft => Some(ShortcutAction::PreviousLayer),
            Key::ArrowRight => Some(ShortcutAction::NextLayer),
            Key::Char('[') => Some(ShortcutAction::DemoteLayer),
            Key::Char(']') => Some(ShortcutAction::PromoteLayer),
            Key::Char('i') => Some(ShortcutAction::ToggleImageResize),
            _ => None,
        }
    }
}
