//! Alternate keyboard: dedicated, held modifier keys.
//!
//! Meant for tablet docks and other full keyboards where CTRL, ALT and SHIFT
//! are physical keys the user holds down.  Modifier bits are taken from the
//! host-reported state on key-down and cleared on the matching key-up; there
//! is no press cycle and no chord.
//!
//! The momentary bits are kept in a private snapshot rather than in the
//! shared [`ModifierState`](keyterm_core::ModifierState), so the modifier
//! indicator never shows them.  Each call restores the shared bits from the
//! snapshot, translates, stores the result back and then strips the ON bits
//! from the shared copy.

use keyterm_core::keymap::dead_keys;
use keyterm_core::{
    ControlEvent, DeviceOrigin, HostModifiers, KeyAction, KeyCode, KeyEvent, MetaState, Modifier,
    TerminalKey,
};
use tracing::debug;

use crate::application::context::{Effect, Outcome, TranslationContext};

pub const NOTIFY_VOLUME_DELETE: &str = "Volume up is now the delete key.";
pub const NOTIFY_SHIFT_DELETE: &str = "Shift-Backspace is now the delete key.";

#[derive(Debug, Default)]
pub struct AlternateKeyboard {
    /// When set, VOLUME UP sends DELETE and SHIFT+DEL sends BACKSPACE.
    delete_with_volume_up: bool,
    saved: MetaState,
}

impl AlternateKeyboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delete_with_volume_up(&self) -> bool {
        self.delete_with_volume_up
    }

    pub fn on_key(&mut self, event: &KeyEvent, ctx: &mut TranslationContext) -> Outcome {
        ctx.meta_mut().set_meta(self.saved);
        let outcome = self.translate(event, ctx);
        self.saved = ctx.meta().meta();
        ctx.meta_mut().clear_transient();
        outcome
    }

    fn translate(&mut self, event: &KeyEvent, ctx: &mut TranslationContext) -> Outcome {
        if event.action == KeyAction::Up {
            let modifier = match event.code {
                KeyCode::ShiftLeft | KeyCode::ShiftRight => Some(Modifier::Shift),
                KeyCode::AltLeft | KeyCode::AltRight => Some(Modifier::Alt),
                KeyCode::CtrlLeft | KeyCode::CtrlRight => Some(Modifier::Ctrl),
                _ => None,
            };
            if let Some(modifier) = modifier {
                ctx.meta_mut().clear_on(modifier);
            }
            return Outcome::StateOnly;
        }

        let host = event.modifiers;
        if host.ctrl() {
            ctx.meta_mut().set_on(Modifier::Ctrl);
        }
        if host.alt() {
            ctx.meta_mut().set_on(Modifier::Alt);
        }
        if host.shift() {
            ctx.meta_mut().set_on(Modifier::Shift);
        }

        let ctrl = ctx.meta().is_on(Modifier::Ctrl);

        // Held CTRL hides the character, so resolve the bare key instead.
        let mut key = if ctrl {
            ctx.unicode_char(event.code, HostModifiers::empty())
        } else {
            ctx.unicode_char(event.code, host)
        };
        if dead_keys::is_combining(key) {
            key = 0;
        }

        if key != 0 && event.code != KeyCode::Enter {
            if ctrl {
                key = ctx.as_control(key);
            }
            return Outcome::bytes(ctx.encode(key));
        }

        self.special_key(event, ctx)
    }

    fn special_key(&mut self, event: &KeyEvent, ctx: &mut TranslationContext) -> Outcome {
        let key = match event.code {
            KeyCode::Back => {
                if event.origin == DeviceOrigin::OnScreen {
                    ctx.request(Effect::Finish);
                    return Outcome::StateOnly;
                }
                return Outcome::Emit(vec![ctx.escape()]);
            }
            KeyCode::Tab => return Outcome::bytes(vec![0x09]),
            KeyCode::VolumeUp => {
                if !self.delete_with_volume_up {
                    // Leave it to the host so the volume still changes.
                    return Outcome::Declined;
                }
                TerminalKey::Delete
            }
            KeyCode::Del => return self.delete(ctx),
            KeyCode::Enter => TerminalKey::Enter,
            KeyCode::DpadLeft => TerminalKey::Left,
            KeyCode::DpadUp => TerminalKey::Up,
            KeyCode::DpadDown => TerminalKey::Down,
            KeyCode::DpadRight => TerminalKey::Right,
            KeyCode::MoveHome => TerminalKey::Home,
            KeyCode::MoveEnd => TerminalKey::End,
            KeyCode::PageUp => TerminalKey::PageUp,
            KeyCode::PageDown => TerminalKey::PageDown,
            code if code.is_modifier() => return Outcome::StateOnly,
            code => {
                debug!(?code, "alternate keyboard: key not handled");
                return Outcome::Declined;
            }
        };
        Outcome::Emit(vec![ctx.control(key)])
    }

    fn delete(&mut self, ctx: &mut TranslationContext) -> Outcome {
        if ctx.meta().is_on(Modifier::Ctrl) {
            self.delete_with_volume_up = !self.delete_with_volume_up;
            let message = if self.delete_with_volume_up {
                NOTIFY_VOLUME_DELETE
            } else {
                NOTIFY_SHIFT_DELETE
            };
            ctx.request(Effect::Notify(message.to_string()));
            return Outcome::StateOnly;
        }

        if ctx.meta().is_on(Modifier::Shift) {
            if self.delete_with_volume_up {
                // No flags, or the buffer would turn it into DELETE.
                return Outcome::control(ControlEvent::plain(TerminalKey::Backspace));
            }
            return Outcome::Emit(vec![ctx.control(TerminalKey::Delete)]);
        }

        Outcome::Emit(vec![ctx.control(TerminalKey::Backspace)])
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
