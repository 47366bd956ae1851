//! Integration tests for the key translation pipeline.
//!
//! These tests drive `KeyTranslator` through its public API with the
//! recording collaborators from `infrastructure::mock`, the same way a
//! terminal session would: the host delivers key events one at a time and
//! inspects the bytes written, the control events sent to the buffer and the
//! host calls made.

use std::sync::Arc;

use keyterm_core::{
    ControlEvent, HostModifiers, KeyCode, KeyEvent, KeyFlags, Modifier, QwertyCharacterMap,
    TerminalKey,
};
use keyterm_session::application::context::{KeyboardLayout, KeyboardPreferences, Keymode};
use keyterm_session::application::translate_key::{
    Clipboard, KeyTranslator, TerminalBuffer, TerminalHost, Transport,
};
use keyterm_session::infrastructure::mock::{
    HostCall, RecordingBuffer, RecordingClipboard, RecordingHost, RecordingTransport,
};
use keyterm_session::infrastructure::script::parse_script;

struct Session {
    translator: KeyTranslator,
    transport: Arc<RecordingTransport>,
    buffer: Arc<RecordingBuffer>,
    host: Arc<RecordingHost>,
}

fn session(layout: KeyboardLayout, hard_keyboard: bool) -> Session {
    let host = Arc::new(RecordingHost::new());
    let transport = Arc::new(RecordingTransport::new());
    let buffer = Arc::new(RecordingBuffer::new());
    let prefs = KeyboardPreferences {
        layout,
        keymode: Keymode::Right,
        ..KeyboardPreferences::default()
    };
    let mut translator = KeyTranslator::new(
        prefs,
        Arc::new(QwertyCharacterMap),
        Arc::clone(&host) as Arc<dyn TerminalHost>,
    );
    translator.set_hard_keyboard(hard_keyboard);
    translator.attach(
        Arc::clone(&transport) as Arc<dyn Transport>,
        Arc::clone(&buffer) as Arc<dyn TerminalBuffer>,
    );
    Session {
        translator,
        transport,
        buffer,
        host,
    }
}

fn replay(session: &mut Session, script: &str) -> Vec<bool> {
    let script = parse_script(script).expect("valid script");
    script
        .events
        .iter()
        .map(|event| session.translator.on_key(event))
        .collect()
}

// ── Standard keyboard ─────────────────────────────────────────────────────────

/// ALT-RIGHT down arms the `/` chord without output; a SHIFT-RIGHT release
/// with no TAB chord pending changes nothing; the ALT-RIGHT release emits `/`.
#[test]
fn test_standard_slash_chord() {
    // Arrange
    let mut s = session(KeyboardLayout::Standard, true);

    // Act
    s.translator.on_key(&KeyEvent::down(KeyCode::AltRight));
    let after_down = s.transport.written();
    let armed = s.translator.modifier_state().pending_slash();
    s.translator.on_key(&KeyEvent::up(KeyCode::ShiftRight));
    let after_shift_up = s.transport.written();
    s.translator.on_key(&KeyEvent::up(KeyCode::AltRight));

    // Assert
    assert!(after_down.is_empty());
    assert!(armed);
    assert!(after_shift_up.is_empty());
    assert_eq!(s.transport.written(), b"/".to_vec());
    assert!(!s.translator.modifier_state().pending_slash());
}

/// CTRL-LEFT taps CTRL on; `a` then sends 0x01 and consumes it.  A locked
/// CTRL survives the emission.
#[test]
fn test_standard_ctrl_tap_and_lock() {
    // Arrange
    let mut s = session(KeyboardLayout::Standard, true);

    // Act: tap once, type
    s.translator.on_key(&KeyEvent::down(KeyCode::CtrlLeft));
    let ctrl_on = s.translator.modifier_state().is_on(Modifier::Ctrl);
    s.translator.on_key(&KeyEvent::down(KeyCode::KeyA));
    let consumed = !s.translator.modifier_state().is_active(Modifier::Ctrl);

    // Act: tap twice (lock), type twice
    s.translator.on_key(&KeyEvent::down(KeyCode::CtrlLeft));
    s.translator.on_key(&KeyEvent::down(KeyCode::CtrlLeft));
    s.translator.on_key(&KeyEvent::down(KeyCode::KeyA));
    s.translator.on_key(&KeyEvent::down(KeyCode::KeyB));

    // Assert
    assert!(ctrl_on);
    assert!(consumed);
    assert_eq!(s.transport.written(), vec![0x01, 0x01, 0x02]);
    assert!(s.translator.modifier_state().is_locked(Modifier::Ctrl));
}

/// The flag summary on a control event is the one active when it is
/// emitted, not the one at key-up.
#[test]
fn test_control_event_flags_are_captured_at_emission() {
    // Arrange
    let mut s = session(KeyboardLayout::Standard, true);
    s.translator.on_key(&KeyEvent::down(KeyCode::ShiftLeft));

    // Act
    s.translator.on_key(&KeyEvent::down(KeyCode::DpadRight));
    s.translator.on_key(&KeyEvent::up(KeyCode::DpadRight));
    s.translator.on_key(&KeyEvent::down(KeyCode::DpadRight));

    // Assert
    assert_eq!(
        s.buffer.keys(),
        vec![
            ControlEvent::new(TerminalKey::Right, KeyFlags::SHIFT),
            ControlEvent::plain(TerminalKey::Right),
        ]
    );
}

/// A dead key composes with exactly one following character.
#[test]
fn test_dead_key_is_consumed_once() {
    let mut s = session(KeyboardLayout::Standard, true);

    replay(
        &mut s,
        r#"
[[events]]
key = "key_u"
modifiers = ["alt"]

[[events]]
key = "key_o"

[[events]]
key = "key_o"
"#,
    );

    assert_eq!(s.transport.written(), "öo".as_bytes().to_vec());
    assert_eq!(s.translator.modifier_state().dead_key(), 0);
}

/// In selection mode the arrows move the selection and redraw, never write.
#[test]
fn test_selection_mode_never_writes_bytes() {
    // Arrange
    let mut s = session(KeyboardLayout::Standard, true);
    let clipboard = Arc::new(RecordingClipboard::new());
    s.translator
        .set_clipboard(Some(Arc::clone(&clipboard) as Arc<dyn Clipboard>));
    s.buffer.set_selected_text("total 0");
    s.translator.selection_mut().set_bounds(80, 24);
    s.translator.set_selecting_for_copy(true);

    // Act
    let handled = replay(
        &mut s,
        r#"
[[events]]
action = "down"
key = "dpad_down"

[[events]]
action = "down"
key = "dpad_center"

[[events]]
action = "down"
key = "dpad_right"

[[events]]
action = "down"
key = "dpad_right"

[[events]]
action = "down"
key = "dpad_center"
"#,
    );

    // Assert
    assert!(handled.iter().all(|h| *h));
    assert!(s.transport.written().is_empty());
    assert!(s.buffer.keys().is_empty());
    assert_eq!(clipboard.texts(), vec!["total 0".to_string()]);
    let copied = s.buffer.selections.lock().unwrap()[0];
    assert_eq!((copied.top(), copied.bottom()), (1, 1));
    assert_eq!((copied.left(), copied.right()), (0, 2));
    assert!(s.host.calls().contains(&HostCall::Redraw));
    assert!(!s.host.calls().contains(&HostCall::Vibrate));
    assert!(!s.translator.is_selecting_for_copy());
}

/// Without a physical keyboard, CTRL+digit becomes a function key.
#[test]
fn test_soft_keyboard_function_keys() {
    let mut s = session(KeyboardLayout::Standard, false);

    s.translator
        .on_key(&KeyEvent::down(KeyCode::Digit5).with_modifiers(HostModifiers::CTRL));
    s.translator.on_key(&KeyEvent::down(KeyCode::DpadCenter));
    s.translator.on_key(&KeyEvent::down(KeyCode::Digit0));

    assert_eq!(
        s.buffer.keys(),
        vec![
            ControlEvent::plain(TerminalKey::F5),
            ControlEvent::plain(TerminalKey::F10),
        ]
    );
    assert!(s.transport.written().is_empty());
}

// ── Alternate keyboard ────────────────────────────────────────────────────────

/// Two CTRL+DEL presses toggle the volume-delete mode there and back, each
/// with its own message.
#[test]
fn test_alternate_ctrl_del_toggles_twice() {
    let mut s = session(KeyboardLayout::Alternate, true);

    replay(
        &mut s,
        r#"
[[events]]
action = "down"
key = "del"
modifiers = ["ctrl"]

[[events]]
action = "down"
key = "del"
modifiers = ["ctrl"]
"#,
    );

    let notifications = s.host.notifications();
    assert_eq!(notifications.len(), 2);
    assert_ne!(notifications[0], notifications[1]);
    assert!(
        !s.translator.on_key(&KeyEvent::down(KeyCode::VolumeUp)),
        "mode is back off after two toggles"
    );
}

/// VOLUME UP is left to the host until the toggle is on, then it is DELETE.
#[test]
fn test_alternate_volume_up() {
    let mut s = session(KeyboardLayout::Alternate, true);

    let before = s.translator.on_key(&KeyEvent::down(KeyCode::VolumeUp));
    s.translator
        .on_key(&KeyEvent::down(KeyCode::Del).with_modifiers(HostModifiers::CTRL));
    s.translator.on_key(&KeyEvent::up(KeyCode::CtrlLeft));
    let after = s.translator.on_key(&KeyEvent::down(KeyCode::VolumeUp));

    assert!(!before);
    assert!(after);
    assert_eq!(s.buffer.keys(), vec![ControlEvent::plain(TerminalKey::Delete)]);
}

/// The on-screen BACK button closes the view; the keyboard one sends ESC.
#[test]
fn test_alternate_back_button() {
    let mut s = session(KeyboardLayout::Alternate, true);

    replay(
        &mut s,
        r#"
[[events]]
action = "down"
key = "back"

[[events]]
action = "down"
key = "back"
origin = "on_screen"
"#,
    );

    assert_eq!(s.buffer.keys(), vec![ControlEvent::plain(TerminalKey::Escape)]);
    assert_eq!(s.host.calls(), vec![HostCall::Finish]);
}

// ── Session lifecycle ─────────────────────────────────────────────────────────

#[test]
fn test_input_before_attach_is_reported_handled() {
    let host = Arc::new(RecordingHost::new());
    let mut translator = KeyTranslator::new(
        KeyboardPreferences::default(),
        Arc::new(QwertyCharacterMap),
        Arc::clone(&host) as Arc<dyn TerminalHost>,
    );

    assert!(translator.on_key(&KeyEvent::down(KeyCode::KeyA)));
    assert!(translator.on_key(&KeyEvent::down(KeyCode::PageUp)));
    assert!(translator.on_key(&KeyEvent::down(KeyCode::VolumeUp)));
    assert_eq!(host.calls(), vec![HostCall::IncreaseFontSize]);
}

#[test]
fn test_write_failure_disconnects_and_later_typing_is_declined() {
    // Arrange
    let mut s = session(KeyboardLayout::Standard, true);
    let failing = Arc::new(RecordingTransport::failing());
    s.translator.attach(
        Arc::clone(&failing) as Arc<dyn Transport>,
        Arc::clone(&s.buffer) as Arc<dyn TerminalBuffer>,
    );

    // Act
    let first = s.translator.on_key(&KeyEvent::down(KeyCode::KeyA));
    let second = s.translator.on_key(&KeyEvent::down(KeyCode::KeyB));

    // Assert
    assert!(!first);
    assert!(!second);
    assert_eq!(s.host.disconnect_count(), 1);
    assert_eq!(failing.flush_count(), 1);
}

#[test]
fn test_detach_returns_to_swallowing_input() {
    let mut s = session(KeyboardLayout::Standard, true);
    s.translator.detach();

    assert!(s.translator.on_key(&KeyEvent::down(KeyCode::KeyA)));
    assert!(s.transport.written().is_empty());
}
