//! Sticky modifier state owned by the key translator.
//!
//! The translator tracks CTRL, ALT and SHIFT itself rather than trusting the
//! host, because small keyboards have no way to hold two keys at once.  Each
//! modifier has two bits:
//!
//! | Bit    | Meaning                                              |
//! |--------|------------------------------------------------------|
//! | `ON`   | applies to the next emitted character only           |
//! | `LOCK` | applies to every emitted character until released    |
//!
//! Tapping a modifier walks none → ON → LOCK → none (see
//! [`ModifierState::press_cycle`]).  After a character is emitted the ON bits
//! are cleared ([`ModifierState::clear_transient`]) while LOCK bits stay.
//!
//! Two more bits, [`MetaState::SLASH`] and [`MetaState::TAB`], record a
//! half-finished two-stroke chord, and a separate slot holds a pending dead
//! key.

use bitflags::bitflags;

use crate::terminal::KeyFlags;

bitflags! {
    /// Raw modifier bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MetaState: u8 {
        const CTRL_ON = 0x01;
        const CTRL_LOCK = 0x02;
        const ALT_ON = 0x04;
        const ALT_LOCK = 0x08;
        const SHIFT_ON = 0x10;
        const SHIFT_LOCK = 0x20;
        /// Chord armed: releasing the chord's ALT key emits `/`.
        const SLASH = 0x40;
        /// Chord armed: releasing the chord's SHIFT key emits TAB.
        const TAB = 0x80;
    }
}

impl MetaState {
    /// The momentary bits consumed by one emitted character.
    pub const TRANSIENT: MetaState = MetaState::CTRL_ON
        .union(MetaState::ALT_ON)
        .union(MetaState::SHIFT_ON);

    /// Both chord bits.
    pub const CHORDS: MetaState = MetaState::SLASH.union(MetaState::TAB);
}

/// One of the three tracked modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    Ctrl,
    Alt,
    Shift,
}

impl Modifier {
    pub const ALL: [Modifier; 3] = [Modifier::Ctrl, Modifier::Alt, Modifier::Shift];

    /// The momentary bit.
    pub fn on(self) -> MetaState {
        match self {
            Modifier::Ctrl => MetaState::CTRL_ON,
            Modifier::Alt => MetaState::ALT_ON,
            Modifier::Shift => MetaState::SHIFT_ON,
        }
    }

    /// The sticky bit.
    pub fn lock(self) -> MetaState {
        match self {
            Modifier::Ctrl => MetaState::CTRL_LOCK,
            Modifier::Alt => MetaState::ALT_LOCK,
            Modifier::Shift => MetaState::SHIFT_LOCK,
        }
    }

    /// ON and LOCK together.
    pub fn mask(self) -> MetaState {
        self.on() | self.lock()
    }
}

/// Modifier bits, chord flags and the pending dead key for one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModifierState {
    meta: MetaState,
    dead_key: u32,
}

impl ModifierState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn meta(&self) -> MetaState {
        self.meta
    }

    /// Replaces all modifier and chord bits; the dead key is untouched.
    pub fn set_meta(&mut self, meta: MetaState) {
        self.meta = meta;
    }

    /// Advances `modifier` one step along none → ON → LOCK → none.
    pub fn press_cycle(&mut self, modifier: Modifier) {
        if self.meta.contains(modifier.lock()) {
            self.meta.remove(modifier.lock());
        } else if self.meta.contains(modifier.on()) {
            self.meta.remove(modifier.on());
            self.meta.insert(modifier.lock());
        } else {
            self.meta.insert(modifier.on());
        }
    }

    pub fn is_on(&self, modifier: Modifier) -> bool {
        self.meta.contains(modifier.on())
    }

    pub fn is_locked(&self, modifier: Modifier) -> bool {
        self.meta.contains(modifier.lock())
    }

    /// ON or LOCK.
    pub fn is_active(&self, modifier: Modifier) -> bool {
        self.meta.intersects(modifier.mask())
    }

    pub fn set_on(&mut self, modifier: Modifier) {
        self.meta.insert(modifier.on());
    }

    pub fn clear_on(&mut self, modifier: Modifier) {
        self.meta.remove(modifier.on());
    }

    pub fn insert(&mut self, bits: MetaState) {
        self.meta.insert(bits);
    }

    pub fn remove(&mut self, bits: MetaState) {
        self.meta.remove(bits);
    }

    /// Clears the ON bits of all three modifiers; LOCK bits persist.
    pub fn clear_transient(&mut self) {
        self.meta.remove(MetaState::TRANSIENT);
    }

    pub fn pending_slash(&self) -> bool {
        self.meta.contains(MetaState::SLASH)
    }

    pub fn pending_tab(&self) -> bool {
        self.meta.contains(MetaState::TAB)
    }

    pub fn clear_chords(&mut self) {
        self.meta.remove(MetaState::CHORDS);
    }

    /// The pending combining accent, or 0 for none.
    pub fn dead_key(&self) -> u32 {
        self.dead_key
    }

    /// Stores `accent` as the pending dead key, replacing any earlier one.
    pub fn set_dead_key(&mut self, accent: u32) {
        self.dead_key = accent;
    }

    /// Takes the pending dead key, leaving none pending.
    pub fn take_dead_key(&mut self) -> Option<u32> {
        match std::mem::take(&mut self.dead_key) {
            0 => None,
            accent => Some(accent),
        }
    }

    /// Modifier summary for control events: a modifier counts if either its
    /// ON or LOCK bit is set.
    pub fn key_flags(&self) -> KeyFlags {
        let mut flags = KeyFlags::empty();
        if self.is_active(Modifier::Ctrl) {
            flags |= KeyFlags::CONTROL;
        }
        if self.is_active(Modifier::Shift) {
            flags |= KeyFlags::SHIFT;
        }
        if self.is_active(Modifier::Alt) {
            flags |= KeyFlags::ALT;
        }
        flags
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_cycle_walks_on_lock_release() {
        for modifier in Modifier::ALL {
            let mut state = ModifierState::new();

            state.press_cycle(modifier);
            assert!(state.is_on(modifier) && !state.is_locked(modifier));

            state.press_cycle(modifier);
            assert!(!state.is_on(modifier) && state.is_locked(modifier));

            state.press_cycle(modifier);
            assert!(!state.is_active(modifier));
        }
    }

    #[test]
    fn test_three_press_cycles_restore_original_bits() {
        // Arrange: unrelated bits set to make sure they are left alone
        let mut state = ModifierState::new();
        state.insert(MetaState::SLASH | MetaState::ALT_LOCK);
        let before = state;

        // Act
        for _ in 0..3 {
            state.press_cycle(Modifier::Ctrl);
        }

        // Assert
        assert_eq!(state, before);
    }

    #[test]
    fn test_clear_transient_keeps_lock_bits() {
        let mut state = ModifierState::new();
        state.press_cycle(Modifier::Ctrl);
        state.press_cycle(Modifier::Ctrl); // CTRL locked
        state.press_cycle(Modifier::Shift); // SHIFT on

        state.clear_transient();

        assert!(state.is_locked(Modifier::Ctrl));
        assert!(!state.is_active(Modifier::Shift));
    }

    #[test]
    fn test_chord_flags_are_independent_of_modifiers() {
        let mut state = ModifierState::new();
        state.insert(MetaState::TAB);
        state.set_on(Modifier::Alt);

        state.clear_chords();

        assert!(!state.pending_tab());
        assert!(state.is_on(Modifier::Alt));
    }

    #[test]
    fn test_dead_key_is_taken_exactly_once() {
        let mut state = ModifierState::new();
        state.set_dead_key(0x0301);

        assert_eq!(state.take_dead_key(), Some(0x0301));
        assert_eq!(state.dead_key(), 0);
        assert_eq!(state.take_dead_key(), None);
    }

    #[test]
    fn test_second_dead_key_overwrites_first() {
        let mut state = ModifierState::new();
        state.set_dead_key(0x0300);
        state.set_dead_key(0x0308);
        assert_eq!(state.take_dead_key(), Some(0x0308));
    }

    #[test]
    fn test_key_flags_reports_on_and_lock() {
        let mut state = ModifierState::new();
        state.set_on(Modifier::Ctrl);
        state.insert(MetaState::ALT_LOCK);

        let flags = state.key_flags();

        assert_eq!(flags, KeyFlags::CONTROL | KeyFlags::ALT);
    }

    #[test]
    fn test_key_flags_ignores_chord_bits() {
        let mut state = ModifierState::new();
        state.insert(MetaState::CHORDS);
        assert!(state.key_flags().is_empty());
    }
}
