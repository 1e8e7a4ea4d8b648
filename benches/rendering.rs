//! Benchmarks for rendering document trees.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use lazyview::document::{DocumentNode, ParseOptions, parse};
use lazyview::render::{flatten, render};

fn fixture() -> DocumentNode {
    let options = ParseOptions {
        allow_trailing_commas: true,
        ..ParseOptions::default()
    };
    parse(include_str!("../tests/fixtures/service.ljson"), &options).unwrap()
}

fn wide_document() -> DocumentNode {
    let items: Vec<String> = (0..10_000)
        .map(|n| format!(r#"{{"id": {n}, "label": "item {n}"}}"#))
        .collect();
    parse(&format!("[{}]", items.join(",")), &ParseOptions::default()).unwrap()
}

fn bench_render_fixture(c: &mut Criterion) {
    let node = fixture();
    c.bench_function("render_fixture", |b| b.iter(|| render(black_box(&node))));
}

fn bench_render_wide(c: &mut Criterion) {
    let node = wide_document();
    c.bench_function("render_wide", |b| b.iter(|| render(black_box(&node))));
}

fn bench_flatten_wide(c: &mut Criterion) {
    let element = render(&wide_document());
    c.bench_function("flatten_wide", |b| {
        b.iter(|| flatten([black_box(&element)]))
    });
}

criterion_group!(
    benches,
    bench_render_fixture,
    bench_render_wide,
    bench_flatten_wide
);
criterion_main!(benches);
