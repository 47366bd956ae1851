//! Character resolution for key codes.
//!
//! The host knows which character a key produces under a given modifier
//! combination; the translator only asks.  [`KeyCharacterMap`] is that seam.
//! [`QwertyCharacterMap`] is a built-in US QWERTY implementation used by the
//! replay tool and by tests.

use crate::event::HostModifiers;
use crate::keymap::dead_keys::{
    ACCENT_ACUTE, ACCENT_CIRCUMFLEX, ACCENT_DIAERESIS, ACCENT_GRAVE, ACCENT_TILDE,
    COMBINING_ACCENT,
};
use crate::keymap::KeyCode;

/// Resolves the character a key produces under an explicit modifier set.
///
/// Returns the Unicode code point, 0 when the combination produces no
/// character, or an accent code point with
/// [`COMBINING_ACCENT`](crate::keymap::dead_keys::COMBINING_ACCENT) set for a
/// dead key.
pub trait KeyCharacterMap: Send + Sync {
    fn get(&self, code: KeyCode, modifiers: HostModifiers) -> u32;
}

/// US QWERTY character map.
///
/// - CTRL (either bit) yields no character.
/// - ALT yields the dead keys `` ` `` (grave), `e` (acute), `i` (circumflex),
///   `n` (tilde) and `u` (diaeresis); other ALT combinations yield nothing.
/// - ENTER, TAB and DEL yield nothing; the translator handles them by code.
#[derive(Debug, Default, Clone, Copy)]
pub struct QwertyCharacterMap;

impl QwertyCharacterMap {
    pub fn new() -> Self {
        Self
    }
}

impl KeyCharacterMap for QwertyCharacterMap {
    fn get(&self, code: KeyCode, modifiers: HostModifiers) -> u32 {
        if modifiers.ctrl() {
            return 0;
        }
        if modifiers.alt() {
            return alt_char(code);
        }
        let resolved = if modifiers.shift() {
            shifted_char(code)
        } else {
            base_char(code)
        };
        resolved.map_or(0, |c| c as u32)
    }
}

fn alt_char(code: KeyCode) -> u32 {
    let accent = match code {
        KeyCode::Grave => ACCENT_GRAVE,
        KeyCode::KeyE => ACCENT_ACUTE,
        KeyCode::KeyI => ACCENT_CIRCUMFLEX,
        KeyCode::KeyN => ACCENT_TILDE,
        KeyCode::KeyU => ACCENT_DIAERESIS,
        _ => return 0,
    };
    accent | COMBINING_ACCENT
}

fn letter(code: KeyCode) -> Option<char> {
    let offset = code.raw().checked_sub(KeyCode::KeyA.raw())?;
    if code.raw() > KeyCode::KeyZ.raw() {
        return None;
    }
    char::from_u32('a' as u32 + offset as u32)
}

fn digit(code: KeyCode) -> Option<char> {
    let offset = code.raw().checked_sub(KeyCode::Digit0.raw())?;
    if code.raw() > KeyCode::Digit9.raw() {
        return None;
    }
    char::from_digit(offset as u32, 10)
}

fn base_char(code: KeyCode) -> Option<char> {
    if let Some(c) = letter(code).or_else(|| digit(code)) {
        return Some(c);
    }
    let c = match code {
        KeyCode::Space => ' ',
        KeyCode::Comma => ',',
        KeyCode::Period => '.',
        KeyCode::Grave => '`',
        KeyCode::Minus => '-',
        KeyCode::Equals => '=',
        KeyCode::LeftBracket => '[',
        KeyCode::RightBracket => ']',
        KeyCode::Backslash => '\\',
        KeyCode::Semicolon => ';',
        KeyCode::Apostrophe => '\'',
        KeyCode::Slash => '/',
        _ => return None,
    };
    Some(c)
}

fn shifted_char(code: KeyCode) -> Option<char> {
    if let Some(c) = letter(code) {
        return Some(c.to_ascii_uppercase());
    }
    let c = match code {
        KeyCode::Digit1 => '!',
        KeyCode::Digit2 => '@',
        KeyCode::Digit3 => '#',
        KeyCode::Digit4 => '$',
        KeyCode::Digit5 => '%',
        KeyCode::Digit6 => '^',
        KeyCode::Digit7 => '&',
        KeyCode::Digit8 => '*',
        KeyCode::Digit9 => '(',
        KeyCode::Digit0 => ')',
        KeyCode::Space => ' ',
        KeyCode::Comma => '<',
        KeyCode::Period => '>',
        KeyCode::Grave => '~',
        KeyCode::Minus => '_',
        KeyCode::Equals => '+',
        KeyCode::LeftBracket => '{',
        KeyCode::RightBracket => '}',
        KeyCode::Backslash => '|',
        KeyCode::Semicolon => ':',
        KeyCode::Apostrophe => '"',
        KeyCode::Slash => '?',
        _ => return None,
    };
    Some(c)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::dead_keys::{accent_of, is_combining};

    fn get(code: KeyCode, modifiers: HostModifiers) -> u32 {
        QwertyCharacterMap.get(code, modifiers)
    }

    #[test]
    fn test_letters_resolve_lowercase_without_modifiers() {
        assert_eq!(get(KeyCode::KeyA, HostModifiers::empty()), 'a' as u32);
        assert_eq!(get(KeyCode::KeyZ, HostModifiers::empty()), 'z' as u32);
    }

    #[test]
    fn test_shift_uppercases_letters_and_shifts_digits() {
        assert_eq!(get(KeyCode::KeyQ, HostModifiers::SHIFT), 'Q' as u32);
        assert_eq!(get(KeyCode::Digit2, HostModifiers::SHIFT), '@' as u32);
        assert_eq!(get(KeyCode::Slash, HostModifiers::SHIFT), '?' as u32);
    }

    #[test]
    fn test_digits_resolve_to_ascii_digits() {
        assert_eq!(get(KeyCode::Digit0, HostModifiers::empty()), '0' as u32);
        assert_eq!(get(KeyCode::Digit7, HostModifiers::empty()), '7' as u32);
    }

    #[test]
    fn test_ctrl_yields_no_character() {
        assert_eq!(get(KeyCode::KeyC, HostModifiers::CTRL), 0);
        assert_eq!(get(KeyCode::KeyC, HostModifiers::HW_CTRL), 0);
    }

    #[test]
    fn test_alt_dead_keys_carry_combining_marker() {
        let key = get(KeyCode::KeyE, HostModifiers::ALT);
        assert!(is_combining(key));
        assert_eq!(accent_of(key), ACCENT_ACUTE);
        assert_eq!(get(KeyCode::KeyK, HostModifiers::ALT), 0);
    }

    #[test]
    fn test_enter_tab_and_del_are_not_printing() {
        for code in [KeyCode::Enter, KeyCode::Tab, KeyCode::Del, KeyCode::DpadUp] {
            assert_eq!(get(code, HostModifiers::empty()), 0, "{code:?}");
        }
    }

    #[test]
    fn test_modifier_and_navigation_codes_outside_letter_range() {
        assert_eq!(get(KeyCode::AltLeft, HostModifiers::empty()), 0);
        assert_eq!(get(KeyCode::Back, HostModifiers::empty()), 0);
    }
}
