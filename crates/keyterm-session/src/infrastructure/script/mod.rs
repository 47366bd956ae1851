//! Key scripts: recorded key sequences in TOML.
//!
//! A script is a list of `[[events]]` tables replayed in order by the
//! `keyterm` binary and by the integration tests.
//!
//! ```toml
//! hard_keyboard = true
//!
//! [[events]]
//! action = "press"          # "down", "up", "press" (down then up) or "text"
//! key = "ctrl_left"
//!
//! [[events]]
//! action = "down"
//! key = "key_c"
//! modifiers = ["ctrl"]      # "shift", "alt", "ctrl", "hw_ctrl"
//!
//! [[events]]
//! action = "text"
//! text = "ls -l"
//! ```
//!
//! Key names are the snake_case [`KeyCode`] names.

use std::path::{Path, PathBuf};

use keyterm_core::{DeviceOrigin, HostModifiers, KeyCode, KeyEvent};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("I/O error reading script at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse script TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// An event table is well-formed TOML but not a valid event.
    #[error("event {index}: {reason}")]
    Invalid { index: usize, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
enum ScriptAction {
    Down,
    Up,
    #[default]
    Press,
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
enum ScriptModifier {
    Shift,
    Alt,
    Ctrl,
    HwCtrl,
}

impl From<ScriptModifier> for HostModifiers {
    fn from(modifier: ScriptModifier) -> Self {
        match modifier {
            ScriptModifier::Shift => HostModifiers::SHIFT,
            ScriptModifier::Alt => HostModifiers::ALT,
            ScriptModifier::Ctrl => HostModifiers::CTRL,
            ScriptModifier::HwCtrl => HostModifiers::HW_CTRL,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawEvent {
    #[serde(default)]
    action: ScriptAction,
    key: Option<KeyCode>,
    #[serde(default)]
    modifiers: Vec<ScriptModifier>,
    #[serde(default)]
    repeat: u32,
    #[serde(default)]
    origin: DeviceOrigin,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawScript {
    hard_keyboard: Option<bool>,
    hard_keyboard_hidden: Option<bool>,
    #[serde(default)]
    events: Vec<RawEvent>,
}

/// A parsed script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyScript {
    /// Overrides the configured physical-keyboard presence.
    pub hard_keyboard: Option<bool>,
    pub hard_keyboard_hidden: Option<bool>,
    /// Events in replay order; `press` entries are already expanded.
    pub events: Vec<KeyEvent>,
}

/// Reads and parses the script at `path`.
///
/// # Errors
///
/// Returns [`ScriptError::Io`] if the file cannot be read, otherwise see
/// [`parse_script`].
pub fn load_script(path: &Path) -> Result<KeyScript, ScriptError> {
    let content = std::fs::read_to_string(path).map_err(|source| ScriptError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_script(&content)
}

/// Parses script text.
///
/// # Errors
///
/// Returns [`ScriptError::Parse`] for malformed TOML or unknown names, and
/// [`ScriptError::Invalid`] for a key event without a key or a text event
/// without text.
pub fn parse_script(content: &str) -> Result<KeyScript, ScriptError> {
    let raw: RawScript = toml::from_str(content)?;

    let mut events = Vec::with_capacity(raw.events.len());
    for (index, entry) in raw.events.into_iter().enumerate() {
        let modifiers = entry
            .modifiers
            .iter()
            .fold(HostModifiers::empty(), |acc, m| acc | HostModifiers::from(*m));

        if entry.action == ScriptAction::Text {
            let text = entry.text.ok_or_else(|| ScriptError::Invalid {
                index,
                reason: "text event without `text`".to_string(),
            })?;
            events.push(KeyEvent::text(text));
            continue;
        }

        let code = entry.key.ok_or_else(|| ScriptError::Invalid {
            index,
            reason: "key event without `key`".to_string(),
        })?;
        let down = KeyEvent::down(code)
            .with_modifiers(modifiers)
            .with_repeat(entry.repeat)
            .with_origin(entry.origin);
        let up = KeyEvent::up(code)
            .with_modifiers(modifiers)
            .with_origin(entry.origin);

        match entry.action {
            ScriptAction::Down => events.push(down),
            ScriptAction::Up => events.push(up),
            ScriptAction::Press => {
                events.push(down);
                events.push(up);
            }
            ScriptAction::Text => {}
        }
    }

    Ok(KeyScript {
        hard_keyboard: raw.hard_keyboard,
        hard_keyboard_hidden: raw.hard_keyboard_hidden,
        events,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use keyterm_core::KeyAction;

    #[test]
    fn test_press_expands_to_down_and_up() {
        // Arrange
        let script = r#"
[[events]]
key = "key_a"
"#;

        // Act
        let parsed = parse_script(script).expect("parse");

        // Assert
        assert_eq!(
            parsed.events,
            vec![KeyEvent::down(KeyCode::KeyA), KeyEvent::up(KeyCode::KeyA)]
        );
        assert_eq!(parsed.hard_keyboard, None);
    }

    #[test]
    fn test_modifiers_repeat_and_origin_are_carried() {
        let script = r#"
hard_keyboard = true

[[events]]
action = "down"
key = "back"
modifiers = ["ctrl", "shift"]
repeat = 2
origin = "on_screen"
"#;

        let parsed = parse_script(script).expect("parse");

        assert_eq!(parsed.hard_keyboard, Some(true));
        let event = &parsed.events[0];
        assert_eq!(event.action, KeyAction::Down);
        assert_eq!(event.code, KeyCode::Back);
        assert_eq!(event.modifiers, HostModifiers::CTRL | HostModifiers::SHIFT);
        assert_eq!(event.repeat_count, 2);
        assert_eq!(event.origin, DeviceOrigin::OnScreen);
    }

    #[test]
    fn test_text_event() {
        let script = "[[events]]\naction = \"text\"\ntext = \"ls\"\n";
        let parsed = parse_script(script).expect("parse");
        assert_eq!(parsed.events, vec![KeyEvent::text("ls")]);
    }

    #[test]
    fn test_text_event_without_text_is_invalid() {
        let script = "[[events]]\naction = \"text\"\n";
        let result = parse_script(script);
        assert!(matches!(result, Err(ScriptError::Invalid { index: 0, .. })));
    }

    #[test]
    fn test_key_event_without_key_is_invalid() {
        let script = "[[events]]\nkey = \"key_a\"\n\n[[events]]\naction = \"up\"\n";
        let result = parse_script(script);
        assert!(matches!(result, Err(ScriptError::Invalid { index: 1, .. })));
    }

    #[test]
    fn test_unknown_key_name_is_parse_error() {
        let result = parse_script("[[events]]\nkey = \"hyper\"\n");
        assert!(matches!(result, Err(ScriptError::Parse(_))));
    }

    #[test]
    fn test_empty_script_has_no_events() {
        assert!(parse_script("").expect("parse").events.is_empty());
    }

    #[test]
    fn test_load_script_missing_file_is_io_error() {
        let result = load_script(Path::new("/nonexistent/keyterm/script.toml"));
        assert!(matches!(result, Err(ScriptError::Io { .. })));
    }
}
