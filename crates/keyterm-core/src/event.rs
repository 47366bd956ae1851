//! Raw key events as delivered by the host input system.
//!
//! A [`KeyEvent`] carries only what the host reported: the action, the key
//! code, the host's own modifier flags, the repeat count and where the event
//! came from.  Characters are not stored on the event; they are resolved on
//! demand through a [`crate::keymap::KeyCharacterMap`] so the translator can
//! ask "what would this key produce with SHIFT applied?" without the host
//! having to precompute every combination.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::keymap::KeyCode;

/// What happened to the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    Down,
    Up,
    /// A batch commit of several characters at once (see [`KeyEvent::text`]).
    Multiple,
}

/// Where the event originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceOrigin {
    /// A physical key on an attached or built-in keyboard.
    #[default]
    Physical,
    /// A soft control drawn on screen (e.g. the navigation-bar back button).
    OnScreen,
}

bitflags! {
    /// Modifier state as tracked by the host, independent of the translator's
    /// own press/lock cycle.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct HostModifiers: u8 {
        const SHIFT = 1 << 0;
        const ALT = 1 << 1;
        const CTRL = 1 << 2;
        /// Legacy CTRL bit reported by older soft keyboards.
        const HW_CTRL = 1 << 3;
    }
}

impl HostModifiers {
    /// Returns `true` if either CTRL bit is present.
    pub fn ctrl(self) -> bool {
        self.intersects(Self::CTRL | Self::HW_CTRL)
    }

    /// Returns `true` if ALT is present.
    pub fn alt(self) -> bool {
        self.contains(Self::ALT)
    }

    /// Returns `true` if SHIFT is present.
    pub fn shift(self) -> bool {
        self.contains(Self::SHIFT)
    }
}

/// One key event from the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub action: KeyAction,
    pub code: KeyCode,
    pub modifiers: HostModifiers,
    /// Number of auto-repeats; 0 for the initial press.
    pub repeat_count: u32,
    pub origin: DeviceOrigin,
    /// Committed text for [`KeyAction::Multiple`] events.
    pub text: Option<String>,
}

impl KeyEvent {
    /// Creates a key-down event with no modifiers.
    pub fn down(code: KeyCode) -> Self {
        Self::new(KeyAction::Down, code)
    }

    /// Creates a key-up event with no modifiers.
    pub fn up(code: KeyCode) -> Self {
        Self::new(KeyAction::Up, code)
    }

    /// Creates a multi-character commit carrying `text`.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::new(KeyAction::Multiple, KeyCode::Unknown)
        }
    }

    fn new(action: KeyAction, code: KeyCode) -> Self {
        Self {
            action,
            code,
            modifiers: HostModifiers::empty(),
            repeat_count: 0,
            origin: DeviceOrigin::Physical,
            text: None,
        }
    }

    pub fn with_modifiers(mut self, modifiers: HostModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_repeat(mut self, repeat_count: u32) -> Self {
        self.repeat_count = repeat_count;
        self
    }

    pub fn with_origin(mut self, origin: DeviceOrigin) -> Self {
        self.origin = origin;
        self
    }

    /// Returns the committed text if this is a batch commit of an unknown key.
    pub fn batch_text(&self) -> Option<&str> {
        if self.action == KeyAction::Multiple && self.code == KeyCode::Unknown {
            self.text.as_deref()
        } else {
            None
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_down_event_defaults() {
        let ev = KeyEvent::down(KeyCode::KeyA);
        assert_eq!(ev.action, KeyAction::Down);
        assert_eq!(ev.modifiers, HostModifiers::empty());
        assert_eq!(ev.repeat_count, 0);
        assert_eq!(ev.origin, DeviceOrigin::Physical);
        assert!(ev.text.is_none());
    }

    #[test]
    fn test_batch_text_only_for_multiple_unknown() {
        assert_eq!(KeyEvent::text("ls -l").batch_text(), Some("ls -l"));

        let mut ev = KeyEvent::text("x");
        ev.code = KeyCode::KeyX;
        assert_eq!(ev.batch_text(), None);

        assert_eq!(KeyEvent::down(KeyCode::Unknown).batch_text(), None);
    }

    #[test]
    fn test_ctrl_accepts_either_ctrl_bit() {
        assert!(HostModifiers::CTRL.ctrl());
        assert!(HostModifiers::HW_CTRL.ctrl());
        assert!(!HostModifiers::ALT.ctrl());
    }

    #[test]
    fn test_builder_methods_set_fields() {
        let ev = KeyEvent::down(KeyCode::Back)
            .with_modifiers(HostModifiers::SHIFT | HostModifiers::ALT)
            .with_repeat(3)
            .with_origin(DeviceOrigin::OnScreen);
        assert!(ev.modifiers.shift());
        assert!(ev.modifiers.alt());
        assert_eq!(ev.repeat_count, 3);
        assert_eq!(ev.origin, DeviceOrigin::OnScreen);
    }
}
