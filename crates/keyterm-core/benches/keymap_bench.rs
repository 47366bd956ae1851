//! Criterion benchmarks for the per-keystroke lookups.
//!
//! Every printable key goes through a character-map lookup, possibly a
//! dead-key composition and possibly a control mapping, so these sit on the
//! hot path of every keystroke.
//!
//! Run with:
//! ```bash
//! cargo bench --package keyterm-core --bench keymap_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use keyterm_core::keymap::dead_keys::{compose, ACCENT_ACUTE};
use keyterm_core::{as_control, Charset, HostModifiers, KeyCharacterMap, KeyCode, QwertyCharacterMap};

const BENCH_CODES: &[KeyCode] = &[
    KeyCode::KeyA,
    KeyCode::KeyZ,
    KeyCode::Digit1,
    KeyCode::Digit0,
    KeyCode::Space,
    KeyCode::Slash,
    KeyCode::Enter,
    KeyCode::DpadUp,
];

fn bench_charmap(c: &mut Criterion) {
    let map = QwertyCharacterMap::new();
    c.bench_function("qwerty_get_all_modifiers", |b| {
        b.iter(|| {
            for &code in BENCH_CODES {
                for mods in [
                    HostModifiers::empty(),
                    HostModifiers::SHIFT,
                    HostModifiers::ALT,
                    HostModifiers::CTRL,
                ] {
                    black_box(map.get(black_box(code), mods));
                }
            }
        })
    });
}

fn bench_as_control(c: &mut Criterion) {
    c.bench_function("as_control_ascii_range", |b| {
        b.iter(|| {
            for key in 0x20u32..0x80 {
                black_box(as_control(black_box(key)));
            }
        })
    });
}

fn bench_compose(c: &mut Criterion) {
    c.bench_function("compose_acute_vowels", |b| {
        b.iter(|| {
            for base in ['a', 'e', 'i', 'o', 'u', 'x'] {
                black_box(compose(ACCENT_ACUTE, black_box(base as u32)));
            }
        })
    });
}

fn bench_charset(c: &mut Criterion) {
    c.bench_function("encode_char_utf8_vs_latin1", |b| {
        b.iter(|| {
            black_box(Charset::Utf8.encode_char(black_box('é' as u32)));
            black_box(Charset::Latin1.encode_char(black_box('é' as u32)));
        })
    });
}

criterion_group!(benches, bench_charmap, bench_as_control, bench_compose, bench_charset);
criterion_main!(benches);
