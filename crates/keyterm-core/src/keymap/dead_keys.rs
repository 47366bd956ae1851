//! Dead-key (combining accent) composition.
//!
//! A character map reports a dead key by returning the combining accent code
//! point with [`COMBINING_ACCENT`] set.  The translator stores the accent
//! (with the marker stripped) and, on the next key, asks [`compose`] for the
//! precomposed character.

/// Marker bit set on a character-map result that is a combining accent.
pub const COMBINING_ACCENT: u32 = 0x8000_0000;

/// Mask that strips [`COMBINING_ACCENT`] from a character-map result.
pub const COMBINING_ACCENT_MASK: u32 = 0x7FFF_FFFF;

pub const ACCENT_GRAVE: u32 = 0x0300;
pub const ACCENT_ACUTE: u32 = 0x0301;
pub const ACCENT_CIRCUMFLEX: u32 = 0x0302;
pub const ACCENT_TILDE: u32 = 0x0303;
pub const ACCENT_DIAERESIS: u32 = 0x0308;

/// Returns `true` if a character-map result is a dead key.
pub fn is_combining(key: u32) -> bool {
    key & COMBINING_ACCENT != 0
}

/// Strips the marker bit, leaving the combining accent code point.
pub fn accent_of(key: u32) -> u32 {
    key & COMBINING_ACCENT_MASK
}

/// Composes `accent` with `base`, returning the precomposed code point or 0
/// when the pair has no composition.
///
/// Accent followed by space yields the spacing form of the accent.
pub fn compose(accent: u32, base: u32) -> u32 {
    let Some(base) = char::from_u32(base) else {
        return 0;
    };
    let composed = match (accent, base) {
        (ACCENT_GRAVE, ' ') => '`',
        (ACCENT_GRAVE, 'a') => 'à',
        (ACCENT_GRAVE, 'e') => 'è',
        (ACCENT_GRAVE, 'i') => 'ì',
        (ACCENT_GRAVE, 'o') => 'ò',
        (ACCENT_GRAVE, 'u') => 'ù',
        (ACCENT_GRAVE, 'A') => 'À',
        (ACCENT_GRAVE, 'E') => 'È',
        (ACCENT_GRAVE, 'I') => 'Ì',
        (ACCENT_GRAVE, 'O') => 'Ò',
        (ACCENT_GRAVE, 'U') => 'Ù',

        (ACCENT_ACUTE, ' ') => '´',
        (ACCENT_ACUTE, 'a') => 'á',
        (ACCENT_ACUTE, 'e') => 'é',
        (ACCENT_ACUTE, 'i') => 'í',
        (ACCENT_ACUTE, 'o') => 'ó',
        (ACCENT_ACUTE, 'u') => 'ú',
        (ACCENT_ACUTE, 'y') => 'ý',
        (ACCENT_ACUTE, 'c') => 'ć',
        (ACCENT_ACUTE, 'n') => 'ń',
        (ACCENT_ACUTE, 'A') => 'Á',
        (ACCENT_ACUTE, 'E') => 'É',
        (ACCENT_ACUTE, 'I') => 'Í',
        (ACCENT_ACUTE, 'O') => 'Ó',
        (ACCENT_ACUTE, 'U') => 'Ú',
        (ACCENT_ACUTE, 'Y') => 'Ý',
        (ACCENT_ACUTE, 'C') => 'Ć',
        (ACCENT_ACUTE, 'N') => 'Ń',

        (ACCENT_CIRCUMFLEX, ' ') => '^',
        (ACCENT_CIRCUMFLEX, 'a') => 'â',
        (ACCENT_CIRCUMFLEX, 'e') => 'ê',
        (ACCENT_CIRCUMFLEX, 'i') => 'î',
        (ACCENT_CIRCUMFLEX, 'o') => 'ô',
        (ACCENT_CIRCUMFLEX, 'u') => 'û',
        (ACCENT_CIRCUMFLEX, 'A') => 'Â',
        (ACCENT_CIRCUMFLEX, 'E') => 'Ê',
        (ACCENT_CIRCUMFLEX, 'I') => 'Î',
        (ACCENT_CIRCUMFLEX, 'O') => 'Ô',
        (ACCENT_CIRCUMFLEX, 'U') => 'Û',

        (ACCENT_TILDE, ' ') => '~',
        (ACCENT_TILDE, 'a') => 'ã',
        (ACCENT_TILDE, 'n') => 'ñ',
        (ACCENT_TILDE, 'o') => 'õ',
        (ACCENT_TILDE, 'A') => 'Ã',
        (ACCENT_TILDE, 'N') => 'Ñ',
        (ACCENT_TILDE, 'O') => 'Õ',

        (ACCENT_DIAERESIS, ' ') => '¨',
        (ACCENT_DIAERESIS, 'a') => 'ä',
        (ACCENT_DIAERESIS, 'e') => 'ë',
        (ACCENT_DIAERESIS, 'i') => 'ï',
        (ACCENT_DIAERESIS, 'o') => 'ö',
        (ACCENT_DIAERESIS, 'u') => 'ü',
        (ACCENT_DIAERESIS, 'y') => 'ÿ',
        (ACCENT_DIAERESIS, 'A') => 'Ä',
        (ACCENT_DIAERESIS, 'E') => 'Ë',
        (ACCENT_DIAERESIS, 'I') => 'Ï',
        (ACCENT_DIAERESIS, 'O') => 'Ö',
        (ACCENT_DIAERESIS, 'U') => 'Ü',
        (ACCENT_DIAERESIS, 'Y') => 'Ÿ',

        _ => return 0,
    };
    composed as u32
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_round_trip() {
        let key = ACCENT_ACUTE | COMBINING_ACCENT;
        assert!(is_combining(key));
        assert_eq!(accent_of(key), ACCENT_ACUTE);
        assert!(!is_combining('e' as u32));
    }

    #[test]
    fn test_compose_acute_e() {
        assert_eq!(compose(ACCENT_ACUTE, 'e' as u32), 'é' as u32);
    }

    #[test]
    fn test_compose_preserves_case() {
        assert_eq!(compose(ACCENT_DIAERESIS, 'U' as u32), 'Ü' as u32);
        assert_eq!(compose(ACCENT_DIAERESIS, 'u' as u32), 'ü' as u32);
    }

    #[test]
    fn test_accent_with_space_yields_spacing_accent() {
        assert_eq!(compose(ACCENT_GRAVE, ' ' as u32), '`' as u32);
        assert_eq!(compose(ACCENT_TILDE, ' ' as u32), '~' as u32);
        assert_eq!(compose(ACCENT_CIRCUMFLEX, ' ' as u32), '^' as u32);
    }

    #[test]
    fn test_unknown_pair_yields_zero() {
        assert_eq!(compose(ACCENT_TILDE, 'x' as u32), 0);
        assert_eq!(compose(0x0327, 'c' as u32), 0);
        assert_eq!(compose(ACCENT_ACUTE, 0), 0);
    }

    #[test]
    fn test_invalid_base_code_point_yields_zero() {
        assert_eq!(compose(ACCENT_ACUTE, 0xD800), 0);
    }
}
