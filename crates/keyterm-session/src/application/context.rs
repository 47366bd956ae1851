//! Shared translation state and the values keyboard strategies produce.
//!
//! A keyboard strategy never touches the transport or the terminal buffer.
//! It reads and mutates the [`TranslationContext`] (modifier bits, dead key,
//! selection) and returns an [`Outcome`] describing what should be sent.
//! Side effects that are not key output (redraws, haptics, notifications,
//! clipboard copies) are queued on the context as [`Effect`]s.  The
//! [`KeyTranslator`](crate::application::translate_key::KeyTranslator) then
//! applies both to the real collaborators.

use std::sync::Arc;

use keyterm_core::{
    as_control, Charset, ControlEvent, HostModifiers, KeyCharacterMap, KeyCode, Modifier,
    ModifierState, SelectionArea, TerminalKey,
};
use serde::{Deserialize, Serialize};

// ── Preferences ───────────────────────────────────────────────────────────────

/// Which keyboard strategy handles events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyboardLayout {
    /// Sticky-modifier keyboard with two-stroke chords.
    #[default]
    Standard,
    /// Compact keyboard with dedicated, held modifier keys.
    Alternate,
}

/// Which physical side's ALT/SHIFT keys form the `/` and TAB chords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Keymode {
    /// Right ALT/SHIFT arm chords; left ALT/SHIFT are sticky modifiers.
    #[default]
    Right,
    /// Left ALT/SHIFT arm chords; right ALT/SHIFT are sticky modifiers.
    Left,
    /// No chords; both sides are sticky modifiers.
    #[serde(rename = "none")]
    Off,
}

/// Sequence sent by the camera button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraShortcut {
    /// CTRL+A then space (screen's "next window").
    #[default]
    CtrlASpace,
    CtrlA,
    Esc,
    /// ESC then `a`.
    EscA,
}

/// Preferences read on every dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyboardPreferences {
    pub layout: KeyboardLayout,
    pub keymode: Keymode,
    pub camera: CameraShortcut,
    pub charset: Charset,
}

// ── Strategy output ───────────────────────────────────────────────────────────

/// One unit of key output, delivered in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    /// Raw bytes for the transport.
    Bytes(Vec<u8>),
    /// A control event for the terminal buffer.
    Control(ControlEvent),
}

/// Result of translating one key event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Handled; the outputs are delivered in order.
    Emit(Vec<Output>),
    /// Handled; only translator state changed.
    StateOnly,
    /// Handled; the copy selection changed.
    SelectionMutated,
    /// Not handled; the host should apply its default behaviour.
    Declined,
}

impl Outcome {
    pub fn bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Outcome::Emit(vec![Output::Bytes(bytes.into())])
    }

    pub fn control(event: ControlEvent) -> Self {
        Outcome::Emit(vec![Output::Control(event)])
    }

    pub fn is_handled(&self) -> bool {
        !matches!(self, Outcome::Declined)
    }
}

/// Non-output side effects requested during translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Redraw,
    Vibrate,
    Notify(String),
    IncreaseFontSize,
    DecreaseFontSize,
    ResetScroll,
    /// Copy the text under this selection to the clipboard.
    CopySelection(SelectionArea),
    /// Close the session view.
    Finish,
}

// ── Context ───────────────────────────────────────────────────────────────────

/// State shared by all strategies, exclusively owned by one translator.
pub struct TranslationContext {
    meta: ModifierState,
    prefs: KeyboardPreferences,
    charmap: Arc<dyn KeyCharacterMap>,
    hard_keyboard: bool,
    hard_keyboard_hidden: bool,
    connected: bool,
    clipboard_available: bool,
    selecting_for_copy: bool,
    selection: SelectionArea,
    effects: Vec<Effect>,
}

impl TranslationContext {
    pub fn new(prefs: KeyboardPreferences, charmap: Arc<dyn KeyCharacterMap>) -> Self {
        Self {
            meta: ModifierState::new(),
            prefs,
            charmap,
            hard_keyboard: false,
            hard_keyboard_hidden: false,
            connected: true,
            clipboard_available: false,
            selecting_for_copy: false,
            selection: SelectionArea::new(),
            effects: Vec::new(),
        }
    }

    pub fn meta(&self) -> &ModifierState {
        &self.meta
    }

    pub fn meta_mut(&mut self) -> &mut ModifierState {
        &mut self.meta
    }

    /// Runs the press cycle for `modifier` and requests a redraw so the
    /// modifier indicator updates.
    pub fn meta_press(&mut self, modifier: Modifier) {
        self.meta.press_cycle(modifier);
        self.request(Effect::Redraw);
    }

    pub fn preferences(&self) -> &KeyboardPreferences {
        &self.prefs
    }

    pub fn set_preferences(&mut self, prefs: KeyboardPreferences) {
        self.prefs = prefs;
    }

    pub fn keymode(&self) -> Keymode {
        self.prefs.keymode
    }

    pub fn camera(&self) -> CameraShortcut {
        self.prefs.camera
    }

    pub fn charset(&self) -> Charset {
        self.prefs.charset
    }

    pub fn set_hard_keyboard(&mut self, present: bool) {
        self.hard_keyboard = present;
    }

    pub fn set_hard_keyboard_hidden(&mut self, hidden: bool) {
        self.hard_keyboard_hidden = hidden;
    }

    /// `true` when a physical keyboard is present and not slid away.
    pub fn physical_keyboard_visible(&self) -> bool {
        self.hard_keyboard && !self.hard_keyboard_hidden
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub(crate) fn set_connected(&mut self, connected: bool) {
        self.connected = connected;
    }

    pub fn clipboard_available(&self) -> bool {
        self.clipboard_available
    }

    pub(crate) fn set_clipboard_available(&mut self, available: bool) {
        self.clipboard_available = available;
    }

    pub fn is_selecting_for_copy(&self) -> bool {
        self.selecting_for_copy
    }

    /// Enters or leaves selection mode; leaving resets the selection.
    pub fn set_selecting_for_copy(&mut self, selecting: bool) {
        self.selecting_for_copy = selecting;
        if !selecting {
            self.selection.reset();
        }
    }

    pub fn selection(&self) -> &SelectionArea {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut SelectionArea {
        &mut self.selection
    }

    /// Resolves the character `code` produces under `modifiers`.
    pub fn unicode_char(&self, code: KeyCode, modifiers: HostModifiers) -> u32 {
        self.charmap.get(code, modifiers)
    }

    pub fn as_control(&self, key: u32) -> u32 {
        as_control(key)
    }

    /// Bytes for one code point: a single byte below 0x80, otherwise the
    /// configured charset's encoding.
    pub fn encode(&self, key: u32) -> Vec<u8> {
        match u8::try_from(key) {
            Ok(byte) if byte < 0x80 => vec![byte],
            _ => self.prefs.charset.encode_char(key),
        }
    }

    /// ESCAPE, with an empty modifier summary.
    pub fn escape(&self) -> Output {
        Output::Control(ControlEvent::plain(TerminalKey::Escape))
    }

    /// F1..F10 for digit keys 1..9, 0.
    pub fn function_key(&self, code: KeyCode) -> Option<Output> {
        let key = code.function_key_number().and_then(TerminalKey::function)?;
        Some(Output::Control(ControlEvent::plain(key)))
    }

    /// `key` carrying the modifier summary as of this call.
    pub fn control(&self, key: TerminalKey) -> Output {
        Output::Control(ControlEvent::new(key, self.meta.key_flags()))
    }

    pub fn request(&mut self, effect: Effect) {
        self.effects.push(effect);
    }

    pub(crate) fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
