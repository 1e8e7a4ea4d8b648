//! Benchmarks for lazy-JSON parsing.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use lazyview::document::{ParseOptions, parse, tagged};

fn trailing_commas() -> ParseOptions {
    ParseOptions {
        allow_trailing_commas: true,
        ..ParseOptions::default()
    }
}

fn bench_parse_simple(c: &mut Criterion) {
    let source = r#"{"name": "Bob", "tags": [1, 2, 3]}"#;
    c.bench_function("parse_simple", |b| {
        b.iter(|| parse(black_box(source), &ParseOptions::default()).unwrap())
    });
}

fn bench_parse_fixture(c: &mut Criterion) {
    let source = include_str!("../tests/fixtures/service.ljson");
    let options = trailing_commas();
    c.bench_function("parse_fixture", |b| {
        b.iter(|| parse(black_box(source), &options).unwrap())
    });
}

fn bench_parse_large_array(c: &mut Criterion) {
    let items: Vec<String> = (0..10_000)
        .map(|n| format!(r#"{{"id": {n}, "label": "item {n}", "ok": true}}"#))
        .collect();
    let source = format!("[{}]", items.join(",\n"));
    c.bench_function("parse_large_array", |b| {
        b.iter(|| parse(black_box(&source), &ParseOptions::default()).unwrap())
    });
}

fn bench_decode_tagged(c: &mut Criterion) {
    let items: Vec<String> = (0..1_000)
        .map(|n| format!(r#"{{"typ": "Number", "val": {n}}}"#))
        .collect();
    let source = format!(r#"{{"typ": "Array", "entries": [{}]}}"#, items.join(","));
    c.bench_function("decode_tagged", |b| {
        b.iter(|| tagged::decode(black_box(&source)).unwrap())
    });
}

criterion_group!(
    benches,
    bench_parse_simple,
    bench_parse_fixture,
    bench_parse_large_array,
    bench_decode_tagged
);
criterion_main!(benches);
