//! Input abstraction layer.
//!
//! The host translates its native pointer and keyboard events into
//! [`InputEvent`] values in canvas space. Deciding whether an event
//! originated on the canvas is the host's job; every event that reaches the
//! editor is acted on.

/// Modifier key state carried by every event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const CTRL: Self = Self {
        ctrl: true,
        ..Self::NONE
    };

    /// Ctrl on Linux/Windows, ⌘ on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::NONE
    }
}

/// Keys the editor distinguishes. Everything else is kept as its raw code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Backspace,
    Delete,
    Escape,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    /// A printable key, lowercased.
    Char(char),
    Other(u32),
}

impl Key {
    /// From a DOM `KeyboardEvent.keyCode`.
    pub fn from_key_code(code: u32) -> Self {
        match code {
            8 => Key::Backspace,
            27 => Key::Escape,
            37 => Key::ArrowLeft,
            38 => Key::ArrowUp,
            39 => Key::ArrowRight,
            40 => Key::ArrowDown,
            46 => Key::Delete,
            48..=57 => Key::Char(char::from(b'0' + (code - 48) as u8)),
            65..=90 => Key::Char(char::from(b'a' + (code - 65) as u8)),
            219 => Key::Char('['),
            221 => Key::Char(']'),
            other => Key::Other(other),
        }
    }

    /// From a DOM `KeyboardEvent.key` value (e.g. `"Backspace"`, `"a"`).
    pub fn from_name(name: &str) -> Self {
        match name {
            "Backspace" => Key::Backspace,
            "Delete" => Key::Delete,
            "Escape" | "Esc" => Key::Escape,
            "ArrowLeft" | "Left" => Key::ArrowLeft,
            "ArrowRight" | "Right" => Key::ArrowRight,
            "ArrowUp" | "Up" => Key::ArrowUp,
            "ArrowDown" | "Down" => Key::ArrowDown,
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c.to_ascii_lowercase()),
                    _ => Key::Other(0),
                }
            }
        }
    }
}

/// A normalized event from the host.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Pointer pressed at `(x, y)`.
    PointerDown { x: f64, y: f64, modifiers: Modifiers },
    /// Pointer released. Hosts must also send this when the pointer leaves
    /// the canvas mid-drag.
    PointerUp { x: f64, y: f64, modifiers: Modifiers },
    /// Press and release at the same spot.
    Click { x: f64, y: f64, modifiers: Modifiers },
    Key { key: Key, modifiers: Modifiers },
}

impl InputEvent {
    pub fn pointer_down(x: f64, y: f64) -> Self {
        Self::PointerDown {
            x,
            y,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn pointer_up(x: f64, y: f64) -> Self {
        Self::PointerUp {
            x,
            y,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn click(x: f64, y: f64) -> Self {
        Self::Click {
            x,
            y,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn key(key: Key) -> Self {
        Self::Key {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    /// Extract position if this is a pointer event.
    pub fn position(&self) -> Option<(f64, f64)> {
        match self {
            Self::PointerDown { x, y, .. } | Self::PointerUp { x, y, .. } | Self::Click { x, y, .. } => {
                Some((*x, *y))
            }
            Self::Key { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_codes() {
        assert_eq!(Key::from_key_code(8), Key::Backspace);
        assert_eq!(Key::from_key_code(65), Key::Char('a'));
        assert_eq!(Key::from_key_code(90), Key::Char('z'));
        assert_eq!(Key::from_key_code(49), Key::Char('1'));
        assert_eq!(Key::from_key_code(221), Key::Char(']'));
        assert_eq!(Key::from_key_code(112), Key::Other(112));
    }

    #[test]
    fn key_names() {
        assert_eq!(Key::from_name("Backspace"), Key::Backspace);
        assert_eq!(Key::from_name("Left"), Key::ArrowLeft);
        assert_eq!(Key::from_name("E"), Key::Char('e'));
        assert_eq!(Key::from_name("["), Key::Char('['));
        assert_eq!(Key::from_name("F1"), Key::Other(0));
    }

    #[test]
    fn positions() {
        assert_eq!(InputEvent::click(1.0, 2.0).position(), Some((1.0, 2.0)));
        assert_eq!(InputEvent::key(Key::Escape).position(), None);
        assert!(Modifiers::CTRL.command());
        assert!(Modifiers::NONE.is_empty());
    }
}
