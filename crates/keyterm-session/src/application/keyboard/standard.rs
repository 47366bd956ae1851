//! Standard keyboard: sticky modifiers, chords and soft-keyboard shortcuts.
//!
//! This is the strategy for phone-class devices where the user often cannot
//! hold two keys at once.  Modifiers are tapped rather than held: each tap
//! runs the press cycle on the shared [`ModifierState`](keyterm_core::ModifierState).
//! On a physical keyboard the "chord side" ALT and SHIFT keys (picked by the
//! [`Keymode`]) arm a pending chord instead, which is resolved on release into
//! `/` or TAB.
//!
//! # Key-down order
//!
//! 1. Volume keys resize the font, connected or not.
//! 2. Disconnected sessions decline everything else.
//! 3. Batch text commits are encoded and written verbatim.
//! 4. The character is resolved with sticky SHIFT/ALT folded in.
//! 5. A combining accent is stored as the pending dead key.
//! 6. A pending dead key is composed with the character.
//! 7. A printable character is emitted (CTRL applied, modifiers consumed).
//! 8. Without a visible physical keyboard, host CTRL/ALT shortcuts apply.
//! 9. On a visible physical keyboard, modifier keys arm chords or cycle.
//! 10. Everything else is dispatched on the raw key code.

use keyterm_core::keymap::dead_keys;
use keyterm_core::{
    ControlEvent, HostModifiers, KeyAction, KeyCode, KeyEvent, MetaState, Modifier, TerminalKey,
};
use tracing::debug;

use crate::application::context::{
    CameraShortcut, Effect, Keymode, Outcome, Output, TranslationContext,
};

/// The standard keyboard strategy.  It keeps no state of its own.
#[derive(Debug, Default)]
pub struct StandardKeyboard;

impl StandardKeyboard {
    pub fn new() -> Self {
        Self
    }

    pub fn on_key(&mut self, event: &KeyEvent, ctx: &mut TranslationContext) -> Outcome {
        match event.action {
            KeyAction::Up => self.on_key_up(event, ctx),
            KeyAction::Down | KeyAction::Multiple => self.on_key_down(event, ctx),
        }
    }

    /// Releases only matter for resolving chords, plus swallowing the
    /// release of the font-size keys.
    fn on_key_up(&self, event: &KeyEvent, ctx: &mut TranslationContext) -> Outcome {
        if matches!(event.code, KeyCode::VolumeUp | KeyCode::VolumeDown) {
            return Outcome::StateOnly;
        }
        if !ctx.physical_keyboard_visible() || !ctx.is_connected() {
            return Outcome::Declined;
        }

        let (chord_alt, chord_shift) = match ctx.keymode() {
            Keymode::Right => (KeyCode::AltRight, KeyCode::ShiftRight),
            Keymode::Left => (KeyCode::AltLeft, KeyCode::ShiftLeft),
            Keymode::Off => return Outcome::Declined,
        };

        if event.code == chord_alt && ctx.meta().pending_slash() {
            ctx.meta_mut().remove(MetaState::CHORDS | MetaState::TRANSIENT);
            return Outcome::bytes(vec![b'/']);
        }
        if event.code == chord_shift && ctx.meta().pending_tab() {
            ctx.meta_mut().remove(MetaState::CHORDS | MetaState::TRANSIENT);
            return Outcome::bytes(vec![0x09]);
        }
        Outcome::Declined
    }

    /// Font-size request bound to the volume keys.  It needs no session, so
    /// the translator honours it before one is attached.
    pub fn font_resize(event: &KeyEvent) -> Option<Effect> {
        if event.action == KeyAction::Up {
            return None;
        }
        match event.code {
            KeyCode::VolumeUp => Some(Effect::IncreaseFontSize),
            KeyCode::VolumeDown => Some(Effect::DecreaseFontSize),
            _ => None,
        }
    }

    fn on_key_down(&self, event: &KeyEvent, ctx: &mut TranslationContext) -> Outcome {
        if let Some(effect) = Self::font_resize(event) {
            ctx.request(effect);
            return Outcome::StateOnly;
        }

        if !ctx.is_connected() {
            return Outcome::Declined;
        }

        ctx.request(Effect::ResetScroll);

        if let Some(text) = event.batch_text() {
            return Outcome::bytes(ctx.charset().encode_str(text));
        }

        let host = event.modifiers;
        let mut effective = host;
        if ctx.meta().is_active(Modifier::Shift) {
            effective |= HostModifiers::SHIFT;
        }
        if ctx.meta().is_active(Modifier::Alt) {
            effective |= HostModifiers::ALT;
        }

        let mut key = ctx.unicode_char(event.code, effective);
        // Soft keyboards send ALT+letter for shortcuts, not for characters.
        if host.alt() && !ctx.physical_keyboard_visible() {
            key = 0;
        }

        if dead_keys::is_combining(key) {
            ctx.meta_mut().set_dead_key(dead_keys::accent_of(key));
            return Outcome::StateOnly;
        }

        if let Some(accent) = ctx.meta_mut().take_dead_key() {
            key = dead_keys::compose(accent, key);
        }

        if key != 0 {
            return self.emit_printing(event.code, key, ctx);
        }

        if !ctx.physical_keyboard_visible() {
            if let Some(outcome) = self.soft_keyboard_shortcut(event, ctx) {
                return outcome;
            }
        } else if event.repeat_count == 0 {
            if let Some(outcome) = self.keymode_shortcut(event.code, ctx) {
                return outcome;
            }
        }

        self.special_key(event, ctx)
    }

    fn emit_printing(&self, code: KeyCode, mut key: u32, ctx: &mut TranslationContext) -> Outcome {
        ctx.meta_mut().clear_chords();

        let before = ctx.meta().meta();
        ctx.meta_mut().remove(MetaState::SHIFT_ON | MetaState::ALT_ON);
        if ctx.meta().meta() != before {
            ctx.request(Effect::Redraw);
        }

        if ctx.meta().is_active(Modifier::Ctrl) {
            ctx.meta_mut().clear_on(Modifier::Ctrl);
            ctx.request(Effect::Redraw);

            // CTRL+1..0 stand in for F1..F10 when there are no function keys.
            if !ctx.physical_keyboard_visible() {
                if let Some(function_key) = ctx.function_key(code) {
                    return Outcome::Emit(vec![function_key]);
                }
            }

            key = ctx.as_control(key);
        }

        Outcome::bytes(ctx.encode(key))
    }

    /// Host-reported CTRL/ALT from a soft keyboard, applied to the
    /// unmodified character.
    fn soft_keyboard_shortcut(&self, event: &KeyEvent, ctx: &TranslationContext) -> Option<Outcome> {
        let base = ctx.unicode_char(event.code, HostModifiers::empty());
        if base == 0 {
            return None;
        }

        if event.modifiers.ctrl() {
            let mapped = ctx.as_control(base);
            if mapped != base {
                return Some(Outcome::bytes(ctx.encode(mapped)));
            }
            return ctx
                .function_key(event.code)
                .map(|function_key| Outcome::Emit(vec![function_key]));
        }

        if event.modifiers.alt() {
            return Some(Outcome::Emit(vec![
                ctx.escape(),
                Output::Bytes(ctx.encode(base)),
            ]));
        }

        None
    }

    fn keymode_shortcut(&self, code: KeyCode, ctx: &mut TranslationContext) -> Option<Outcome> {
        let (chord_alt, chord_shift, home_alt, home_shift) = match ctx.keymode() {
            Keymode::Right => (
                Some(KeyCode::AltRight),
                Some(KeyCode::ShiftRight),
                vec![KeyCode::AltLeft],
                vec![KeyCode::ShiftLeft],
            ),
            Keymode::Left => (
                Some(KeyCode::AltLeft),
                Some(KeyCode::ShiftLeft),
                vec![KeyCode::AltRight],
                vec![KeyCode::ShiftRight],
            ),
            Keymode::Off => (
                None,
                None,
                vec![KeyCode::AltLeft, KeyCode::AltRight],
                vec![KeyCode::ShiftLeft, KeyCode::ShiftRight],
            ),
        };

        if Some(code) == chord_alt {
            ctx.meta_mut().insert(MetaState::SLASH);
        } else if Some(code) == chord_shift {
            ctx.meta_mut().insert(MetaState::TAB);
        } else if home_alt.contains(&code) {
            ctx.meta_press(Modifier::Alt);
        } else if home_shift.contains(&code) {
            ctx.meta_press(Modifier::Shift);
        } else {
            return None;
        }
        Some(Outcome::StateOnly)
    }

    fn special_key(&self, event: &KeyEvent, ctx: &mut TranslationContext) -> Outcome {
        match event.code {
            KeyCode::CtrlLeft | KeyCode::CtrlRight => {
                ctx.meta_press(Modifier::Ctrl);
                Outcome::StateOnly
            }
            KeyCode::Escape => Outcome::Emit(vec![ctx.escape()]),
            KeyCode::Tab => Outcome::bytes(vec![0x09]),
            KeyCode::Camera => self.camera_shortcut(ctx),
            KeyCode::Del => {
                let backspace = ctx.control(TerminalKey::Backspace);
                ctx.meta_mut().clear_transient();
                Outcome::Emit(vec![backspace])
            }
            KeyCode::Enter => {
                ctx.meta_mut().clear_transient();
                Outcome::control(ControlEvent::plain(TerminalKey::Enter))
            }
            KeyCode::DpadLeft => self.directional(TerminalKey::Left, ctx),
            KeyCode::DpadUp => self.directional(TerminalKey::Up, ctx),
            KeyCode::DpadDown => self.directional(TerminalKey::Down, ctx),
            KeyCode::DpadRight => self.directional(TerminalKey::Right, ctx),
            KeyCode::DpadCenter => self.center(ctx),
            code => {
                debug!(?code, "standard keyboard: key not handled");
                Outcome::Declined
            }
        }
    }

    fn camera_shortcut(&self, ctx: &TranslationContext) -> Outcome {
        match ctx.camera() {
            CameraShortcut::CtrlASpace => Outcome::bytes(vec![0x01, b' ']),
            CameraShortcut::CtrlA => Outcome::bytes(vec![0x01]),
            CameraShortcut::Esc => Outcome::Emit(vec![ctx.escape()]),
            CameraShortcut::EscA => {
                Outcome::Emit(vec![ctx.escape(), Output::Bytes(vec![b'a'])])
            }
        }
    }

    /// Arrow keys move the selection in selection mode and the cursor
    /// otherwise.
    fn directional(&self, key: TerminalKey, ctx: &mut TranslationContext) -> Outcome {
        if ctx.is_selecting_for_copy() {
            let selection = ctx.selection_mut();
            match key {
                TerminalKey::Left => selection.decrement_column(),
                TerminalKey::Right => selection.increment_column(),
                TerminalKey::Up => selection.decrement_row(),
                TerminalKey::Down => selection.increment_row(),
                _ => {}
            }
            ctx.request(Effect::Redraw);
            return Outcome::SelectionMutated;
        }

        let output = ctx.control(key);
        ctx.meta_mut().clear_transient();
        ctx.request(Effect::Vibrate);
        Outcome::Emit(vec![output])
    }

    /// DPAD center: anchors or copies the selection in selection mode;
    /// otherwise taps CTRL, or sends ESC when CTRL was already tapped.
    fn center(&self, ctx: &mut TranslationContext) -> Outcome {
        let outcome = if ctx.is_selecting_for_copy() {
            if ctx.selection().is_selecting_origin() {
                ctx.selection_mut().finish_selecting_origin();
            } else if ctx.clipboard_available() {
                let area = *ctx.selection();
                ctx.request(Effect::CopySelection(area));
                ctx.set_selecting_for_copy(false);
            }
            Outcome::SelectionMutated
        } else if ctx.meta().is_on(Modifier::Ctrl) {
            ctx.meta_mut().clear_on(Modifier::Ctrl);
            Outcome::Emit(vec![ctx.escape()])
        } else {
            ctx.meta_press(Modifier::Ctrl);
            Outcome::StateOnly
        };

        ctx.request(Effect::Redraw);
        outcome
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
