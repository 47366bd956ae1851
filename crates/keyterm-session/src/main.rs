//! `keyterm`: replays a key script through the key translator.
//!
//! ```text
//! keyterm --script session.toml [--config config.toml] [--layout alternate] [--json]
//! ```
//!
//! Bytes written to the transport and control events sent to the terminal
//! buffer are printed to stdout, one per line.  Logs go to stderr; the level
//! comes from `RUST_LOG`, falling back to `logging.log_level` in the config.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use keyterm_core::QwertyCharacterMap;
use keyterm_session::application::context::{KeyboardLayout, KeyboardPreferences};
use keyterm_session::application::translate_key::{
    Clipboard, KeyTranslator, TerminalBuffer, TerminalHost, Transport,
};
use keyterm_session::infrastructure::console::{
    ConsoleBuffer, ConsoleClipboard, ConsoleHost, ConsoleSink, ConsoleTransport, OutputFormat,
};
use keyterm_session::infrastructure::script::load_script;
use keyterm_session::infrastructure::storage::config::{load_config, load_config_from};

// ── CLI argument definitions ──────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LayoutArg {
    Standard,
    Alternate,
}

impl From<LayoutArg> for KeyboardLayout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Standard => KeyboardLayout::Standard,
            LayoutArg::Alternate => KeyboardLayout::Alternate,
        }
    }
}

/// Replays a TOML key script and prints what a terminal session would
/// receive.
#[derive(Debug, Parser)]
#[command(name = "keyterm", version)]
struct Cli {
    /// Key script to replay.
    #[arg(long, env = "KEYTERM_SCRIPT")]
    script: PathBuf,

    /// Config file.  Defaults to the platform config path.
    #[arg(long, env = "KEYTERM_CONFIG")]
    config: Option<PathBuf>,

    /// Overrides the configured keyboard layout.
    #[arg(long, value_enum)]
    layout: Option<LayoutArg>,

    /// Print one JSON object per line instead of text.
    #[arg(long)]
    json: bool,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config_from(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => load_config().context("failed to load config")?,
    };

    // `RUST_LOG` wins over the configured level.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.log_level)),
        )
        .init();

    let script = load_script(&cli.script)
        .with_context(|| format!("failed to load script from {}", cli.script.display()))?;

    let mut prefs = KeyboardPreferences::from(&config.keyboard);
    if let Some(layout) = cli.layout {
        prefs.layout = layout.into();
    }

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };
    let sink = Arc::new(ConsoleSink::stdout(format));

    let host: Arc<dyn TerminalHost> = Arc::new(ConsoleHost::new(Arc::clone(&sink)));
    let transport: Arc<dyn Transport> = Arc::new(ConsoleTransport::new(Arc::clone(&sink)));
    let buffer: Arc<dyn TerminalBuffer> = Arc::new(ConsoleBuffer::new(Arc::clone(&sink)));
    let clipboard: Arc<dyn Clipboard> = Arc::new(ConsoleClipboard::new(Arc::clone(&sink)));

    let mut translator = KeyTranslator::new(prefs, Arc::new(QwertyCharacterMap), host);
    translator.set_hard_keyboard(script.hard_keyboard.unwrap_or(config.keyboard.hard_keyboard));
    translator.set_hard_keyboard_hidden(script.hard_keyboard_hidden.unwrap_or(false));
    translator.set_clipboard(Some(clipboard));
    translator.attach(transport, buffer);

    info!(
        layout = ?prefs.layout,
        keymode = ?prefs.keymode,
        charset = %prefs.charset,
        events = script.events.len(),
        "replaying key script"
    );

    let mut declined = 0usize;
    for event in &script.events {
        let handled = translator.on_key(event);
        debug!(action = ?event.action, code = ?event.code, handled, "key event");
        if !handled {
            declined += 1;
        }
    }

    info!(declined, "replay finished");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_requires_only_script() {
        let cli = Cli::parse_from(["keyterm", "--script", "keys.toml"]);
        assert_eq!(cli.script, PathBuf::from("keys.toml"));
        assert!(cli.config.is_none());
        assert!(cli.layout.is_none());
        assert!(!cli.json);
    }

    #[test]
    fn test_cli_layout_override_maps_to_layout() {
        let cli = Cli::parse_from([
            "keyterm",
            "--script",
            "keys.toml",
            "--layout",
            "alternate",
            "--json",
        ]);
        assert_eq!(cli.layout.map(KeyboardLayout::from), Some(KeyboardLayout::Alternate));
        assert!(cli.json);
    }
}
