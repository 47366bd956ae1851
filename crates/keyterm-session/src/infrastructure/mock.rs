//! Recording collaborators for tests.
//!
//! # Why recording mocks?
//!
//! The real transport, terminal buffer and host view live outside this
//! crate.  These stand-ins replace them with in-memory recording: every call
//! is pushed into a `Mutex<Vec<...>>` so assertions can inspect exactly what
//! the translator produced and in what order.
//!
//! # Usage in tests
//!
//! ```ignore
//! let transport = Arc::new(RecordingTransport::new());
//! translator.attach(Arc::clone(&transport), Arc::clone(&buffer));
//!
//! translator.on_key(&KeyEvent::down(KeyCode::KeyA));
//!
//! assert_eq!(transport.written(), b"a".to_vec());
//! ```
//!
//! # `should_fail` flag
//!
//! [`RecordingTransport::failing`] makes both `write` and `flush` fail, which
//! drives the translator down its disconnect path.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use keyterm_core::{ControlEvent, SelectionArea};

use crate::application::translate_key::{
    Clipboard, TerminalBuffer, TerminalHost, Transport, TransportError,
};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// ── Transport ─────────────────────────────────────────────────────────────────

/// A transport that records every write.
#[derive(Default)]
pub struct RecordingTransport {
    /// Each `write` call's bytes, in order.
    pub writes: Mutex<Vec<Vec<u8>>>,
    flushes: AtomicUsize,
    /// When `true`, `write` and `flush` return errors.
    pub should_fail: bool,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    /// All written bytes, concatenated.
    pub fn written(&self) -> Vec<u8> {
        lock(&self.writes).concat()
    }

    pub fn flush_count(&self) -> usize {
        self.flushes.load(Ordering::SeqCst)
    }
}

impl Transport for RecordingTransport {
    fn write(&self, bytes: &[u8]) -> Result<(), TransportError> {
        if self.should_fail {
            return Err(TransportError::Write("mock failure".into()));
        }
        lock(&self.writes).push(bytes.to_vec());
        Ok(())
    }

    fn flush(&self) -> Result<(), TransportError> {
        self.flushes.fetch_add(1, Ordering::SeqCst);
        if self.should_fail {
            return Err(TransportError::Flush("mock failure".into()));
        }
        Ok(())
    }
}

// ── Terminal buffer ───────────────────────────────────────────────────────────

/// A terminal buffer that records control events and returns a fixed
/// selection text.
#[derive(Default)]
pub struct RecordingBuffer {
    pub events: Mutex<Vec<ControlEvent>>,
    /// Areas passed to `selected_text`.
    pub selections: Mutex<Vec<SelectionArea>>,
    selected_text: Mutex<String>,
}

impl RecordingBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keys(&self) -> Vec<ControlEvent> {
        lock(&self.events).clone()
    }

    /// Sets the text returned for any selection.
    pub fn set_selected_text(&self, text: &str) {
        *lock(&self.selected_text) = text.to_string();
    }
}

impl TerminalBuffer for RecordingBuffer {
    fn send_key(&self, event: ControlEvent) {
        lock(&self.events).push(event);
    }

    fn selected_text(&self, area: &SelectionArea) -> String {
        lock(&self.selections).push(*area);
        lock(&self.selected_text).clone()
    }
}

// ── Host ──────────────────────────────────────────────────────────────────────

/// One recorded [`TerminalHost`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    Redraw,
    Vibrate,
    Notify(String),
    IncreaseFontSize,
    DecreaseFontSize,
    ResetScroll,
    Finish,
    Disconnect,
}

#[derive(Default)]
pub struct RecordingHost {
    pub calls: Mutex<Vec<HostCall>>,
    disconnected: AtomicBool,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<HostCall> {
        lock(&self.calls).clone()
    }

    pub fn set_disconnected(&self, disconnected: bool) {
        self.disconnected.store(disconnected, Ordering::SeqCst);
    }

    pub fn disconnect_count(&self) -> usize {
        lock(&self.calls)
            .iter()
            .filter(|call| **call == HostCall::Disconnect)
            .count()
    }

    /// Notification messages, in order.
    pub fn notifications(&self) -> Vec<String> {
        lock(&self.calls)
            .iter()
            .filter_map(|call| match call {
                HostCall::Notify(message) => Some(message.clone()),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: HostCall) {
        lock(&self.calls).push(call);
    }
}

impl TerminalHost for RecordingHost {
    fn is_disconnected(&self) -> bool {
        self.disconnected.load(Ordering::SeqCst)
    }

    fn redraw(&self) {
        self.record(HostCall::Redraw);
    }

    fn try_vibrate(&self) {
        self.record(HostCall::Vibrate);
    }

    fn notify_user(&self, message: &str) {
        self.record(HostCall::Notify(message.to_string()));
    }

    fn increase_font_size(&self) {
        self.record(HostCall::IncreaseFontSize);
    }

    fn decrease_font_size(&self) {
        self.record(HostCall::DecreaseFontSize);
    }

    fn reset_scroll_position(&self) {
        self.record(HostCall::ResetScroll);
    }

    fn finish(&self) {
        self.record(HostCall::Finish);
    }

    fn dispatch_disconnect(&self) {
        self.disconnected.store(true, Ordering::SeqCst);
        self.record(HostCall::Disconnect);
    }
}

// ── Clipboard ─────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingClipboard {
    pub texts: Mutex<Vec<String>>,
}

impl RecordingClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn texts(&self) -> Vec<String> {
        lock(&self.texts).clone()
    }
}

impl Clipboard for RecordingClipboard {
    fn set_text(&self, text: &str) {
        lock(&self.texts).push(text.to_string());
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
