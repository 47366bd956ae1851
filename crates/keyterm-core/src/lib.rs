//! # keyterm-core
//!
//! Domain types for translating key presses into the byte stream and
//! terminal-control events of a remote terminal session.
//!
//! This crate has no I/O and no knowledge of the transport, the terminal
//! buffer or the host windowing system.  It defines:
//!
//! - **`keymap`** – host key codes, the [`KeyCharacterMap`] seam used to
//!   resolve characters under a modifier set, and dead-key composition.
//! - **`event`** – the raw [`KeyEvent`] value and host modifier flags.
//! - **`meta`** – the translator's own sticky modifier state
//!   ([`ModifierState`]) with its none → ON → LOCK → none press cycle.
//! - **`control`** – CTRL+character to control-byte mapping.
//! - **`charset`** – encoding of non-ASCII characters for the transport.
//! - **`terminal`** – control events handed to the terminal buffer.
//! - **`selection`** – the rectangular copy selection.

pub mod charset;
pub mod control;
pub mod event;
pub mod keymap;
pub mod meta;
pub mod selection;
pub mod terminal;

pub use charset::{Charset, CharsetError};
pub use control::as_control;
pub use event::{DeviceOrigin, HostModifiers, KeyAction, KeyEvent};
pub use keymap::{KeyCharacterMap, KeyCode, QwertyCharacterMap};
pub use meta::{MetaState, Modifier, ModifierState};
pub use selection::SelectionArea;
pub use terminal::{ControlEvent, KeyFlags, TerminalKey};
