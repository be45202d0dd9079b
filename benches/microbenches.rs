//! Criterion microbenches for roishapes decoding and conversion.
//!
//! Run with: `cargo bench`
//!
//! These benchmarks measure the performance of:
//! - Record set JSON parsing (from_records_json_str)
//! - Batch conversion of mixed ROI kinds (convert_batch)

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use std::hint::black_box;

use roishapes::convert::convert_batch;
use roishapes::record::io_json::from_records_json_str;
use roishapes::record::{RecordSet, RoiRecord};
use serde_json::json;

// Small inline record set covering every builder
const RECORDS_FIXTURE: &str = r#"{
    "spots": {"type": "point", "name": "spots", "x": [1, 2, 3, 4], "y": [5, 6, 7, 8],
              "position": {"channel": 1, "slice": 2, "frame": 3}},
    "box": {"type": "rectangle", "name": "box", "left": 10, "top": 20, "width": 30, "height": 40,
            "position": 0},
    "cell": {"type": "oval", "name": "cell", "left": 0, "top": 0, "width": 10, "height": 20},
    "edge": {"type": "line", "name": "edge", "x1": 0, "y1": 0, "x2": 5.5, "y2": 7.25},
    "outline": {"type": "freehand", "name": "outline", "x": [0, 4, 4, 0], "y": [0, 0, 3, 3]},
    "path": {"type": "angle", "name": "path", "x": [0, 5, 10], "y": [10, 0, 10]},
    "caption": {"type": "text", "name": "caption"}
}"#;

/// A large traced outline, the most expensive record ImageJ commonly emits.
fn traced_records(vertices: usize) -> RecordSet {
    let xs: Vec<f64> = (0..vertices).map(|i| (i as f64 * 0.37).sin() * 500.0).collect();
    let ys: Vec<f64> = (0..vertices).map(|i| (i as f64 * 0.37).cos() * 500.0).collect();
    let mut records = RecordSet::new();
    records.insert(
        "traced",
        RoiRecord::new()
            .with("type", "traced")
            .with("name", "traced")
            .with("x", xs)
            .with("y", ys)
            .with("position", json!({"channel": 1, "slice": 1, "frame": 1})),
    );
    records
}

/// Benchmark record set JSON parsing.
fn bench_records_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("records_parse");
    group.throughput(Throughput::Bytes(RECORDS_FIXTURE.len() as u64));

    group.bench_function("from_records_json_str", |b| {
        b.iter(|| {
            let records = from_records_json_str(black_box(RECORDS_FIXTURE)).unwrap();
            black_box(records)
        })
    });

    group.finish();
}

/// Benchmark batch conversion of the mixed fixture.
fn bench_convert_mixed(c: &mut Criterion) {
    let records = from_records_json_str(RECORDS_FIXTURE).expect("Failed to parse fixture");

    let mut group = c.benchmark_group("convert_batch");
    group.throughput(Throughput::Elements(records.len() as u64));

    group.bench_function("mixed_kinds", |b| {
        b.iter(|| {
            let shapes = convert_batch(black_box(&records)).unwrap();
            black_box(shapes)
        })
    });

    group.finish();
}

/// Benchmark points-string construction for a large outline.
fn bench_convert_traced(c: &mut Criterion) {
    let records = traced_records(10_000);

    let mut group = c.benchmark_group("convert_batch");
    group.throughput(Throughput::Elements(10_000));

    group.bench_function("traced_10k_vertices", |b| {
        b.iter(|| {
            let shapes = convert_batch(black_box(&records)).unwrap();
            black_box(shapes)
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_records_parse,
    bench_convert_mixed,
    bench_convert_traced,
);
criterion_main!(benches);
