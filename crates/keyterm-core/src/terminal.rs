//! Terminal-control events delivered to the terminal buffer.
//!
//! Some keys are not sent to the remote side as literal bytes by the
//! translator; instead the terminal buffer is told "the user pressed Up" and
//! renders the escape sequence appropriate for its current mode (cursor-key
//! application mode, keypad mode, ...).  A [`ControlEvent`] is that message.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Modifier summary attached to a control event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct KeyFlags: u8 {
        const CONTROL = 1 << 0;
        const SHIFT = 1 << 1;
        const ALT = 1 << 2;
    }
}

/// A key the terminal buffer knows how to encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminalKey {
    Escape,
    Enter,
    Backspace,
    Delete,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
}

impl TerminalKey {
    /// Returns the function key F`n` for `n` in 1..=10.
    pub fn function(n: u8) -> Option<TerminalKey> {
        let key = match n {
            1 => TerminalKey::F1,
            2 => TerminalKey::F2,
            3 => TerminalKey::F3,
            4 => TerminalKey::F4,
            5 => TerminalKey::F5,
            6 => TerminalKey::F6,
            7 => TerminalKey::F7,
            8 => TerminalKey::F8,
            9 => TerminalKey::F9,
            10 => TerminalKey::F10,
            _ => return None,
        };
        Some(key)
    }
}

/// A key plus the modifier summary active when it was emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ControlEvent {
    pub key: TerminalKey,
    pub flags: KeyFlags,
}

impl ControlEvent {
    pub fn new(key: TerminalKey, flags: KeyFlags) -> Self {
        Self { key, flags }
    }

    /// A control event with an empty modifier summary.
    pub fn plain(key: TerminalKey) -> Self {
        Self::new(key, KeyFlags::empty())
    }
}
