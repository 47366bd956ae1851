//! Key identifiers and character resolution.
//!
//! Host key codes are converted to [`KeyCode`] at the boundary.  The
//! character a key produces is looked up through [`KeyCharacterMap`], and
//! combining accents are composed by [`dead_keys::compose`].

pub mod charmap;
pub mod dead_keys;
pub mod keycode;

pub use charmap::{KeyCharacterMap, QwertyCharacterMap};
pub use keycode::KeyCode;
