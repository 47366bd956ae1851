//! Keyboard strategies.
//!
//! A strategy turns one [`KeyEvent`] into an [`Outcome`], reading and
//! mutating the shared [`TranslationContext`].  The set of strategies is
//! closed; [`Keyboard::for_layout`] is the only place a layout name becomes
//! a strategy.

pub mod alternate;
pub mod standard;

use keyterm_core::KeyEvent;

use crate::application::context::{Effect, KeyboardLayout, Outcome, TranslationContext};

pub use alternate::AlternateKeyboard;
pub use standard::StandardKeyboard;

#[derive(Debug)]
pub enum Keyboard {
    Standard(StandardKeyboard),
    Alternate(AlternateKeyboard),
}

impl Keyboard {
    /// Builds a fresh strategy, with fresh strategy-local state.
    pub fn for_layout(layout: KeyboardLayout) -> Self {
        match layout {
            KeyboardLayout::Standard => Keyboard::Standard(StandardKeyboard::new()),
            KeyboardLayout::Alternate => Keyboard::Alternate(AlternateKeyboard::new()),
        }
    }

    pub fn layout(&self) -> KeyboardLayout {
        match self {
            Keyboard::Standard(_) => KeyboardLayout::Standard,
            Keyboard::Alternate(_) => KeyboardLayout::Alternate,
        }
    }

    /// Session-independent font-size request for `event`, if the strategy
    /// binds one.
    pub fn font_resize(&self, event: &KeyEvent) -> Option<Effect> {
        match self {
            Keyboard::Standard(_) => StandardKeyboard::font_resize(event),
            Keyboard::Alternate(_) => None,
        }
    }

    pub fn on_key(&mut self, event: &KeyEvent, ctx: &mut TranslationContext) -> Outcome {
        match self {
            Keyboard::Standard(keyboard) => keyboard.on_key(event, ctx),
            Keyboard::Alternate(keyboard) => keyboard.on_key(event, ctx),
        }
    }
}
