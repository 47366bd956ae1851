//! Console collaborators for the `keyterm` replay tool.
//!
//! Instead of a network session and a terminal emulator, every byte written
//! and every control event produced is printed as one line, either as
//! readable text or as JSON.  Host effects (redraw, vibrate, font size, ...)
//! are logged through `tracing`; user notifications are printed too.

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use keyterm_core::{ControlEvent, SelectionArea};
use serde::Serialize;
use tracing::{debug, info};

use crate::application::translate_key::{
    Clipboard, TerminalBuffer, TerminalHost, Transport, TransportError,
};

/// How records are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// One printed line.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Record<'a> {
    Bytes { hex: String, bytes: &'a [u8] },
    Control { event: ControlEvent },
    Notify { message: &'a str },
    Copy { text: &'a str },
}

impl Record<'_> {
    fn to_text(&self) -> String {
        match self {
            Record::Bytes { hex, .. } => format!("bytes    {hex}"),
            Record::Control { event } if event.flags.is_empty() => {
                format!("control  {:?}", event.key)
            }
            Record::Control { event } => format!("control  {:?} {:?}", event.key, event.flags),
            Record::Notify { message } => format!("notify   {message}"),
            Record::Copy { text } => format!("copy     {text:?}"),
        }
    }
}

fn hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Shared line writer used by all console collaborators.
pub struct ConsoleSink {
    out: Mutex<Box<dyn Write + Send>>,
    format: OutputFormat,
}

impl ConsoleSink {
    pub fn new(out: Box<dyn Write + Send>, format: OutputFormat) -> Self {
        Self {
            out: Mutex::new(out),
            format,
        }
    }

    pub fn stdout(format: OutputFormat) -> Self {
        Self::new(Box::new(std::io::stdout()), format)
    }

    fn emit(&self, record: &Record<'_>) -> std::io::Result<()> {
        let line = match self.format {
            OutputFormat::Text => record.to_text(),
            OutputFormat::Json => serde_json::to_string(record).map_err(std::io::Error::other)?,
        };
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        writeln!(out, "{line}")
    }

    fn flush(&self) -> std::io::Result<()> {
        self.out
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .flush()
    }
}

// ── Transport ─────────────────────────────────────────────────────────────────

pub struct ConsoleTransport {
    sink: Arc<ConsoleSink>,
}

impl ConsoleTransport {
    pub fn new(sink: Arc<ConsoleSink>) -> Self {
        Self { sink }
    }
}

impl Transport for ConsoleTransport {
    fn write(&self, bytes: &[u8]) -> Result<(), TransportError> {
        let record = Record::Bytes {
            hex: hex(bytes),
            bytes,
        };
        self.sink
            .emit(&record)
            .map_err(|e| TransportError::Write(e.to_string()))
    }

    fn flush(&self) -> Result<(), TransportError> {
        self.sink
            .flush()
            .map_err(|e| TransportError::Flush(e.to_string()))
    }
}

// ── Terminal buffer ───────────────────────────────────────────────────────────

/// Prints control events.  There is no screen, so selections are empty.
pub struct ConsoleBuffer {
    sink: Arc<ConsoleSink>,
}

impl ConsoleBuffer {
    pub fn new(sink: Arc<ConsoleSink>) -> Self {
        Self { sink }
    }
}

impl TerminalBuffer for ConsoleBuffer {
    fn send_key(&self, event: ControlEvent) {
        if let Err(e) = self.sink.emit(&Record::Control { event }) {
            debug!(error = %e, "failed to print control event");
        }
    }

    fn selected_text(&self, area: &SelectionArea) -> String {
        debug!(
            top = area.top(),
            bottom = area.bottom(),
            left = area.left(),
            right = area.right(),
            "selection requested from console buffer"
        );
        String::new()
    }
}

// ── Host ──────────────────────────────────────────────────────────────────────

pub struct ConsoleHost {
    sink: Arc<ConsoleSink>,
    disconnected: AtomicBool,
}

impl ConsoleHost {
    pub fn new(sink: Arc<ConsoleSink>) -> Self {
        Self {
            sink,
            disconnected: AtomicBool::new(false),
        }
    }
}

impl TerminalHost for ConsoleHost {
    fn is_disconnected(&self) -> bool {
        self.disconnected.load(Ordering::SeqCst)
    }

    fn redraw(&self) {
        debug!("redraw");
    }

    fn try_vibrate(&self) {
        debug!("vibrate");
    }

    fn notify_user(&self, message: &str) {
        info!(message, "user notification");
        if let Err(e) = self.sink.emit(&Record::Notify { message }) {
            debug!(error = %e, "failed to print notification");
        }
    }

    fn increase_font_size(&self) {
        info!("font size increased");
    }

    fn decrease_font_size(&self) {
        info!("font size decreased");
    }

    fn reset_scroll_position(&self) {
        debug!("scroll position reset");
    }

    fn finish(&self) {
        info!("session view finished");
    }

    fn dispatch_disconnect(&self) {
        info!("session disconnected");
        self.disconnected.store(true, Ordering::SeqCst);
    }
}

// ── Clipboard ─────────────────────────────────────────────────────────────────

pub struct ConsoleClipboard {
    sink: Arc<ConsoleSink>,
}

impl ConsoleClipboard {
    pub fn new(sink: Arc<ConsoleSink>) -> Self {
        Self { sink }
    }
}

impl Clipboard for ConsoleClipboard {
    fn set_text(&self, text: &str) {
        if let Err(e) = self.sink.emit(&Record::Copy { text }) {
            debug!(error = %e, "failed to print clipboard text");
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
