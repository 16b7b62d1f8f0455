//! Format benchmark: measure the full pipeline over a realistic response.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use unfurl::FormatPipeline;

fn format_realistic_response(c: &mut Criterion) {
    let pipeline: FormatPipeline = FormatPipeline::default();
    let raw = "### Your Results:\nWe unscrambled **new york** for you &amp; found more.\nBest match: &quot;newyork&quot; &#8212; enjoy!\n"
        .repeat(8);

    c.bench_function("format_realistic", |b| {
        b.iter(|| pipeline.format(black_box(Some(raw.as_str())), black_box(Some("new york"))))
    });
}

fn format_plain_text(c: &mut Criterion) {
    let pipeline: FormatPipeline = FormatPipeline::default();
    let raw = "just plain prose with nothing to transform at all ".repeat(32);

    c.bench_function("format_plain", |b| {
        b.iter(|| pipeline.format(black_box(Some(raw.as_str())), black_box(Some(""))))
    });
}

fn format_entity_heavy(c: &mut Criterion) {
    let pipeline: FormatPipeline = FormatPipeline::default();
    let raw = "&lt;tag&gt; &amp; &quot;quoted&quot; &#65;&#x42; ".repeat(64);

    c.bench_function("format_entity_heavy", |b| {
        b.iter(|| pipeline.format(black_box(Some(raw.as_str())), black_box(Some(""))))
    });
}

criterion_group!(
    benches,
    format_realistic_response,
    format_plain_text,
    format_entity_heavy,
);
criterion_main!(benches);
