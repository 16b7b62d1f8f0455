//! Reveal benchmark: measure tokenization and pacing classification.
//!
//! Tokenization runs synchronously inside the reveal loop, so its cost
//! bounds how quickly a session can start emitting.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use unfurl::units;

fn tokenize_markup(c: &mut Criterion) {
    let text = "<b>Hello World</b>, this is a reveal: one unit at a time!<br />".repeat(32);

    c.bench_function("tokenize_markup", |b| {
        b.iter(|| units(black_box(&text)).count())
    });
}

fn tokenize_plain(c: &mut Criterion) {
    let text = "no tags here at all, just characters marching on. ".repeat(32);

    c.bench_function("tokenize_plain", |b| {
        b.iter(|| units(black_box(&text)).count())
    });
}

fn classify_delays(c: &mut Criterion) {
    let text = "<b>Ready?</b> Set, go: one. two! three?<br />done".repeat(32);

    c.bench_function("classify_delays", |b| {
        b.iter(|| {
            units(black_box(&text))
                .map(|unit| u64::from(unit.delay_weight()))
                .sum::<u64>()
        })
    });
}

criterion_group!(benches, tokenize_markup, tokenize_plain, classify_delays);
criterion_main!(benches);
