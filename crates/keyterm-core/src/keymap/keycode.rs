//! Key identifiers delivered by the host input system.
//!
//! The numeric value of each variant matches the key code the host input
//! system reports for that key, so a raw host code can be converted with
//! [`KeyCode::from_raw`] at the boundary and the rest of the crate can match
//! on named variants.
//!
//! # Physical vs. virtual keys
//!
//! Some of these codes never come from a full-size keyboard: `Camera`,
//! `VolumeUp`, `VolumeDown` and the `Dpad*` family are auxiliary buttons on
//! handheld devices.  The key translator gives them terminal meanings (font
//! resizing, selection movement, shortcut sequences), so they are first-class
//! members of this enum rather than being lumped into [`KeyCode::Unknown`].

use serde::{Deserialize, Serialize};

/// Host key code.
///
/// [`KeyCode::Unknown`] (value 0) is used for any key with no named variant
/// and for multi-character text commits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u16)]
pub enum KeyCode {
    Unknown = 0,
    Back = 4,

    // Digits
    Digit0 = 7,
    Digit1 = 8,
    Digit2 = 9,
    Digit3 = 10,
    Digit4 = 11,
    Digit5 = 12,
    Digit6 = 13,
    Digit7 = 14,
    Digit8 = 15,
    Digit9 = 16,

    // Directional pad
    DpadUp = 19,
    DpadDown = 20,
    DpadLeft = 21,
    DpadRight = 22,
    DpadCenter = 23,

    // Auxiliary buttons
    VolumeUp = 24,
    VolumeDown = 25,
    Camera = 27,

    // Letters
    KeyA = 29,
    KeyB = 30,
    KeyC = 31,
    KeyD = 32,
    KeyE = 33,
    KeyF = 34,
    KeyG = 35,
    KeyH = 36,
    KeyI = 37,
    KeyJ = 38,
    KeyK = 39,
    KeyL = 40,
    KeyM = 41,
    KeyN = 42,
    KeyO = 43,
    KeyP = 44,
    KeyQ = 45,
    KeyR = 46,
    KeyS = 47,
    KeyT = 48,
    KeyU = 49,
    KeyV = 50,
    KeyW = 51,
    KeyX = 52,
    KeyY = 53,
    KeyZ = 54,

    // Punctuation and modifiers
    Comma = 55,
    Period = 56,
    AltLeft = 57,
    AltRight = 58,
    ShiftLeft = 59,
    ShiftRight = 60,
    Tab = 61,
    Space = 62,
    Enter = 66,
    Del = 67,
    Grave = 68,
    Minus = 69,
    Equals = 70,
    LeftBracket = 71,
    RightBracket = 72,
    Backslash = 73,
    Semicolon = 74,
    Apostrophe = 75,
    Slash = 76,

    // Navigation cluster
    PageUp = 92,
    PageDown = 93,
    Escape = 111,
    ForwardDel = 112,
    CtrlLeft = 113,
    CtrlRight = 114,
    MoveHome = 122,
    MoveEnd = 123,
}

/// Every named variant, in ascending code order.
const ALL: &[KeyCode] = &[
    KeyCode::Unknown,
    KeyCode::Back,
    KeyCode::Digit0,
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
    KeyCode::Digit5,
    KeyCode::Digit6,
    KeyCode::Digit7,
    KeyCode::Digit8,
    KeyCode::Digit9,
    KeyCode::DpadUp,
    KeyCode::DpadDown,
    KeyCode::DpadLeft,
    KeyCode::DpadRight,
    KeyCode::DpadCenter,
    KeyCode::VolumeUp,
    KeyCode::VolumeDown,
    KeyCode::Camera,
    KeyCode::KeyA,
    KeyCode::KeyB,
    KeyCode::KeyC,
    KeyCode::KeyD,
    KeyCode::KeyE,
    KeyCode::KeyF,
    KeyCode::KeyG,
    KeyCode::KeyH,
    KeyCode::KeyI,
    KeyCode::KeyJ,
    KeyCode::KeyK,
    KeyCode::KeyL,
    KeyCode::KeyM,
    KeyCode::KeyN,
    KeyCode::KeyO,
    KeyCode::KeyP,
    KeyCode::KeyQ,
    KeyCode::KeyR,
    KeyCode::KeyS,
    KeyCode::KeyT,
    KeyCode::KeyU,
    KeyCode::KeyV,
    KeyCode::KeyW,
    KeyCode::KeyX,
    KeyCode::KeyY,
    KeyCode::KeyZ,
    KeyCode::Comma,
    KeyCode::Period,
    KeyCode::AltLeft,
    KeyCode::AltRight,
    KeyCode::ShiftLeft,
    KeyCode::ShiftRight,
    KeyCode::Tab,
    KeyCode::Space,
    KeyCode::Enter,
    KeyCode::Del,
    KeyCode::Grave,
    KeyCode::Minus,
    KeyCode::Equals,
    KeyCode::LeftBracket,
    KeyCode::RightBracket,
    KeyCode::Backslash,
    KeyCode::Semicolon,
    KeyCode::Apostrophe,
    KeyCode::Slash,
    KeyCode::PageUp,
    KeyCode::PageDown,
    KeyCode::Escape,
    KeyCode::ForwardDel,
    KeyCode::CtrlLeft,
    KeyCode::CtrlRight,
    KeyCode::MoveHome,
    KeyCode::MoveEnd,
];

impl KeyCode {
    /// Converts a raw host key code, returning [`KeyCode::Unknown`] for codes
    /// without a named variant.
    pub fn from_raw(raw: u16) -> KeyCode {
        ALL.iter()
            .copied()
            .find(|code| *code as u16 == raw)
            .unwrap_or(KeyCode::Unknown)
    }

    /// Returns the raw host key code.
    pub fn raw(self) -> u16 {
        self as u16
    }

    /// Returns `true` for the six CTRL/ALT/SHIFT key codes.
    pub fn is_modifier(self) -> bool {
        matches!(
            self,
            KeyCode::AltLeft
                | KeyCode::AltRight
                | KeyCode::ShiftLeft
                | KeyCode::ShiftRight
                | KeyCode::CtrlLeft
                | KeyCode::CtrlRight
        )
    }

    /// Returns the function-key number (1–10) this digit key stands for in
    /// the CTRL+digit shortcut: `1`..`9` map to F1..F9 and `0` maps to F10.
    pub fn function_key_number(self) -> Option<u8> {
        match self {
            KeyCode::Digit1 => Some(1),
            KeyCode::Digit2 => Some(2),
            KeyCode::Digit3 => Some(3),
            KeyCode::Digit4 => Some(4),
            KeyCode::Digit5 => Some(5),
            KeyCode::Digit6 => Some(6),
            KeyCode::Digit7 => Some(7),
            KeyCode::Digit8 => Some(8),
            KeyCode::Digit9 => Some(9),
            KeyCode::Digit0 => Some(10),
            _ => None,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
