//! CTRL+character to control-byte mapping.

/// Maps a character to the byte a terminal reads as CTRL+that character.
///
/// | Input            | Output          |
/// |------------------|-----------------|
/// | `a`..=`z`        | 0x01..=0x1A     |
/// | `A`..=`_` (0x41–0x5F) | 0x01..=0x1F |
/// | space            | 0x00 (NUL)      |
/// | `?`              | 0x7F (DEL)      |
/// | anything else    | unchanged       |
pub fn as_control(key: u32) -> u32 {
    match key {
        0x61..=0x7A => key - 0x60,
        0x41..=0x5F => key - 0x40,
        0x20 => 0x00,
        0x3F => 0x7F,
        _ => key,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase_letters() {
        assert_eq!(as_control('a' as u32), 0x01);
        assert_eq!(as_control('c' as u32), 0x03);
        assert_eq!(as_control('z' as u32), 0x1A);
    }

    #[test]
    fn test_uppercase_range_through_underscore() {
        assert_eq!(as_control('A' as u32), 0x01);
        assert_eq!(as_control('[' as u32), 0x1B);
        assert_eq!(as_control('_' as u32), 0x1F);
    }

    #[test]
    fn test_space_is_nul_and_question_mark_is_del() {
        assert_eq!(as_control(' ' as u32), 0x00);
        assert_eq!(as_control('?' as u32), 0x7F);
    }

    #[test]
    fn test_other_characters_pass_through() {
        assert_eq!(as_control('5' as u32), '5' as u32);
        assert_eq!(as_control('`' as u32), '`' as u32);
        assert_eq!(as_control('é' as u32), 'é' as u32);
    }
}
