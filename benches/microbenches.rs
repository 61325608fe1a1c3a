//! Criterion microbenches for ecgstage table handling.
//!
//! Run with: `cargo bench`
//!
//! These benchmarks measure the performance of:
//! - CSV table parsing (from_csv_str) on an ECG-shaped table
//! - Validation of a parsed table (validate_table)
//! - Preview rendering (Table::preview)

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use std::hint::black_box;

use ecgstage::table::from_csv_str;
use ecgstage::validation::{validate_table, ValidateOptions};

/// 140 signal columns plus a label, like the staged ECG file.
fn ecg_fixture(rows: usize) -> String {
    let mut header: Vec<String> = (1..=140).map(|i| format!("heartbeat_signal_{i}")).collect();
    header.push("target".to_string());

    let mut out = header.join(",");
    out.push('\n');
    for row in 0..rows {
        let values: Vec<String> = (0..140)
            .map(|col| format!("{:.6}", ((row * 31 + col * 17) % 1000) as f64 / 500.0 - 1.0))
            .collect();
        out.push_str(&values.join(","));
        out.push_str(&format!(",{}\n", row % 2));
    }
    out
}

/// Benchmark CSV table parsing from string.
fn bench_table_parse(c: &mut Criterion) {
    let fixture = ecg_fixture(500);
    let mut group = c.benchmark_group("table_parse");
    group.throughput(Throughput::Bytes(fixture.len() as u64));

    group.bench_function("from_csv_str", |b| {
        b.iter(|| {
            let table = from_csv_str(black_box(&fixture)).unwrap();
            black_box(table)
        })
    });

    group.finish();
}

/// Benchmark validation of an already parsed table.
fn bench_validate(c: &mut Criterion) {
    let table = from_csv_str(&ecg_fixture(500)).expect("Failed to parse ECG fixture");
    let opts = ValidateOptions::default();

    let mut group = c.benchmark_group("validate");
    group.throughput(Throughput::Elements(table.row_count() as u64));

    group.bench_function("validate_table", |b| {
        b.iter(|| {
            let report = validate_table(black_box(&table), "ecg.csv", &opts);
            black_box(report)
        })
    });

    group.finish();
}

/// Benchmark rendering the five-row preview.
fn bench_preview(c: &mut Criterion) {
    let table = from_csv_str(&ecg_fixture(50)).expect("Failed to parse ECG fixture");

    let mut group = c.benchmark_group("preview");
    group.bench_function("preview_5", |b| {
        b.iter(|| {
            let rendered = black_box(&table).preview(5).to_string();
            black_box(rendered)
        })
    });

    group.finish();
}

criterion_group!(benches, bench_table_parse, bench_validate, bench_preview);
criterion_main!(benches);
