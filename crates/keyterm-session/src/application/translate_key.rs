//! KeyTranslator: the per-session entry point for key events.
//!
//! The translator owns the [`TranslationContext`] and the active
//! [`Keyboard`] strategy.  For every event it:
//!
//! 1. Re-reads the configured layout and swaps the strategy if it changed.
//! 2. Swallows the event if no session is attached yet, honouring only
//!    font-size requests, which need no session.
//! 3. Runs the strategy, which returns an [`Outcome`] and queues [`Effect`]s.
//! 4. Applies the effects to the [`TerminalHost`] (and [`Clipboard`]).
//! 5. Delivers the outputs in order: bytes to the [`Transport`], control
//!    events to the [`TerminalBuffer`].
//!
//! # Write failures
//!
//! A failed [`Transport::write`] is followed by a [`Transport::flush`].  If
//! the flush fails as well the transport is considered closed and
//! [`TerminalHost::dispatch_disconnect`] is called.  Either way the event is
//! reported as not handled and the remaining outputs are dropped.

use std::sync::Arc;

use keyterm_core::{ControlEvent, KeyCharacterMap, KeyEvent, ModifierState, SelectionArea};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::application::context::{
    Effect, KeyboardLayout, KeyboardPreferences, Outcome, Output, TranslationContext,
};
use crate::application::keyboard::Keyboard;

/// Error type for transport operations.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("write failed: {0}")]
    Write(String),
    #[error("flush failed: {0}")]
    Flush(String),
    #[error("transport closed")]
    Closed,
}

/// Byte sink towards the remote session.
#[cfg_attr(test, mockall::automock)]
pub trait Transport: Send + Sync {
    fn write(&self, bytes: &[u8]) -> Result<(), TransportError>;
    fn flush(&self) -> Result<(), TransportError>;
}

/// The local terminal emulator buffer.
pub trait TerminalBuffer: Send + Sync {
    /// Feeds a control event (arrow, function key, ...) to the emulator.
    fn send_key(&self, event: ControlEvent);

    /// Text currently under `area`.
    fn selected_text(&self, area: &SelectionArea) -> String;
}

/// The view and session that host the translator.
pub trait TerminalHost: Send + Sync {
    fn is_disconnected(&self) -> bool;
    fn redraw(&self);
    fn try_vibrate(&self);
    fn notify_user(&self, message: &str);
    fn increase_font_size(&self);
    fn decrease_font_size(&self);
    fn reset_scroll_position(&self);
    /// Closes the session view.
    fn finish(&self);
    /// Reports that the transport is gone.
    fn dispatch_disconnect(&self);
}

pub trait Clipboard: Send + Sync {
    fn set_text(&self, text: &str);
}

struct Session {
    transport: Arc<dyn Transport>,
    buffer: Arc<dyn TerminalBuffer>,
}

/// Translates key events for one terminal session.
pub struct KeyTranslator {
    keyboard: Keyboard,
    ctx: TranslationContext,
    host: Arc<dyn TerminalHost>,
    session: Option<Session>,
    clipboard: Option<Arc<dyn Clipboard>>,
}

impl KeyTranslator {
    pub fn new(
        prefs: KeyboardPreferences,
        charmap: Arc<dyn KeyCharacterMap>,
        host: Arc<dyn TerminalHost>,
    ) -> Self {
        Self {
            keyboard: Keyboard::for_layout(prefs.layout),
            ctx: TranslationContext::new(prefs, charmap),
            host,
            session: None,
            clipboard: None,
        }
    }

    /// Connects the translator to an established session.
    pub fn attach(&mut self, transport: Arc<dyn Transport>, buffer: Arc<dyn TerminalBuffer>) {
        self.session = Some(Session { transport, buffer });
    }

    pub fn detach(&mut self) {
        self.session = None;
    }

    pub fn is_attached(&self) -> bool {
        self.session.is_some()
    }

    pub fn set_clipboard(&mut self, clipboard: Option<Arc<dyn Clipboard>>) {
        self.ctx.set_clipboard_available(clipboard.is_some());
        self.clipboard = clipboard;
    }

    /// Replaces the preferences.  A layout change takes effect on the next
    /// event.
    pub fn set_preferences(&mut self, prefs: KeyboardPreferences) {
        self.ctx.set_preferences(prefs);
    }

    pub fn preferences(&self) -> &KeyboardPreferences {
        self.ctx.preferences()
    }

    pub fn set_hard_keyboard(&mut self, present: bool) {
        self.ctx.set_hard_keyboard(present);
    }

    pub fn set_hard_keyboard_hidden(&mut self, hidden: bool) {
        self.ctx.set_hard_keyboard_hidden(hidden);
    }

    pub fn is_selecting_for_copy(&self) -> bool {
        self.ctx.is_selecting_for_copy()
    }

    pub fn set_selecting_for_copy(&mut self, selecting: bool) {
        self.ctx.set_selecting_for_copy(selecting);
    }

    pub fn selection(&self) -> &SelectionArea {
        self.ctx.selection()
    }

    pub fn selection_mut(&mut self) -> &mut SelectionArea {
        self.ctx.selection_mut()
    }

    pub fn modifier_state(&self) -> &ModifierState {
        self.ctx.meta()
    }

    /// Layout of the strategy that handled the last event.
    pub fn layout(&self) -> KeyboardLayout {
        self.keyboard.layout()
    }

    /// Handles one key event.  Returns `true` when the event was consumed
    /// and the host should not apply its default behaviour.
    pub fn on_key(&mut self, event: &KeyEvent) -> bool {
        let wanted = self.ctx.preferences().layout;
        if wanted != self.keyboard.layout() {
            info!(from = ?self.keyboard.layout(), to = ?wanted, "switching keyboard layout");
            self.keyboard = Keyboard::for_layout(wanted);
        }

        let Some(session) = self.session.as_ref() else {
            match self.keyboard.font_resize(event) {
                Some(effect) => self.apply_effects(vec![effect], None),
                None => debug!(code = ?event.code, "input before connection established ignored"),
            }
            return true;
        };
        let transport = Arc::clone(&session.transport);
        let buffer = Arc::clone(&session.buffer);

        self.ctx.set_connected(!self.host.is_disconnected());

        let outcome = self.keyboard.on_key(event, &mut self.ctx);
        let effects = self.ctx.take_effects();
        self.apply_effects(effects, Some(buffer.as_ref()));

        let handled = outcome.is_handled();
        let Outcome::Emit(outputs) = outcome else {
            return handled;
        };

        for output in outputs {
            match output {
                Output::Control(control) => buffer.send_key(control),
                Output::Bytes(bytes) => {
                    if let Err(e) = transport.write(&bytes) {
                        self.on_write_failure(transport.as_ref(), e);
                        return false;
                    }
                }
            }
        }
        true
    }

    fn apply_effects(&self, effects: Vec<Effect>, buffer: Option<&dyn TerminalBuffer>) {
        for effect in effects {
            match effect {
                Effect::Redraw => self.host.redraw(),
                Effect::Vibrate => self.host.try_vibrate(),
                Effect::Notify(message) => self.host.notify_user(&message),
                Effect::IncreaseFontSize => self.host.increase_font_size(),
                Effect::DecreaseFontSize => self.host.decrease_font_size(),
                Effect::ResetScroll => self.host.reset_scroll_position(),
                Effect::Finish => self.host.finish(),
                Effect::CopySelection(area) => match (&self.clipboard, buffer) {
                    (Some(clipboard), Some(buffer)) => {
                        clipboard.set_text(&buffer.selected_text(&area))
                    }
                    _ => debug!("copy requested without a clipboard or buffer"),
                },
            }
        }
    }

    fn on_write_failure(&self, transport: &dyn Transport, cause: TransportError) {
        error!(error = %cause, "problem while trying to handle a key event");
        if let Err(e) = transport.flush() {
            warn!(error = %e, "transport closed, dispatching disconnect");
            self.host.dispatch_disconnect();
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
