//! Character-set encoding for bytes sent to the remote session.
//!
//! The session's character set is configured by name.  Names are validated
//! once at load time into a [`Charset`]; unknown names are rejected with
//! [`CharsetError::Unsupported`].  Characters the charset cannot represent are
//! written as `?`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Byte written for a character the charset cannot represent.
pub const REPLACEMENT: u8 = b'?';

/// Error type for charset lookup.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CharsetError {
    #[error("unsupported character set: {0}")]
    Unsupported(String),
}

/// A supported character set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Charset {
    #[default]
    Utf8,
    /// ISO-8859-1 (Latin-1): code points up to U+00FF map to one byte.
    Latin1,
    /// 7-bit US-ASCII.
    Ascii,
}

impl Charset {
    /// Canonical name.
    pub fn name(self) -> &'static str {
        match self {
            Charset::Utf8 => "UTF-8",
            Charset::Latin1 => "ISO-8859-1",
            Charset::Ascii => "US-ASCII",
        }
    }

    /// Encodes a single code point.
    pub fn encode_char(self, code_point: u32) -> Vec<u8> {
        let mut out = Vec::with_capacity(4);
        self.encode_into(code_point, &mut out);
        out
    }

    /// Encodes a string.
    pub fn encode_str(self, text: &str) -> Vec<u8> {
        if self == Charset::Utf8 {
            return text.as_bytes().to_vec();
        }
        let mut out = Vec::with_capacity(text.len());
        for c in text.chars() {
            self.encode_into(c as u32, &mut out);
        }
        out
    }

    fn encode_into(self, code_point: u32, out: &mut Vec<u8>) {
        let Some(c) = char::from_u32(code_point) else {
            out.push(REPLACEMENT);
            return;
        };
        match self {
            Charset::Utf8 => {
                let mut buf = [0u8; 4];
                out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
            }
            Charset::Latin1 => out.push(u8::try_from(code_point).unwrap_or(REPLACEMENT)),
            Charset::Ascii => out.push(if c.is_ascii() { c as u8 } else { REPLACEMENT }),
        }
    }
}

impl FromStr for Charset {
    type Err = CharsetError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "utf-8" | "utf8" => Ok(Charset::Utf8),
            "iso-8859-1" | "iso8859-1" | "latin1" | "latin-1" => Ok(Charset::Latin1),
            "us-ascii" | "ascii" => Ok(Charset::Ascii),
            _ => Err(CharsetError::Unsupported(name.to_string())),
        }
    }
}

impl TryFrom<String> for Charset {
    type Error = CharsetError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Charset> for String {
    fn from(charset: Charset) -> Self {
        charset.name().to_string()
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
