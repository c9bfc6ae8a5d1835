// Comparison pipeline benchmarks.
//
// Run with: cargo bench
//
// Performance Targets:
// | Operation            | Target   | Description                            |
// |----------------------|----------|----------------------------------------|
// | Reduce (100)         | < 1ms    | 100 benchmark pairs, 50 runs each      |
// | Reduce (1k)          | < 10ms   | 1000 benchmark pairs, 50 runs each     |
// | Render plain (1k)    | < 10ms   | Assemble and render a 1000-row report  |
// | Parse run-set (1k)   | < 50ms   | Deserialize a 1000-benchmark document  |

use bench_compare::compare::{CompareSettings, StudentTTest, compare};
use bench_compare::format::{Report, render_plain};
use bench_compare::load::parse_run_set;
use bench_compare::model::{BenchmarkMode, BenchmarkRecord, RunResult, RunSet, RunSummary};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use serde_json::json;
use std::collections::BTreeMap;
use std::hint::black_box;
use std::path::Path;
use std::sync::Once;
use std::time::Instant;
use tracing::info;

const RUNS_PER_BENCHMARK: usize = 50;

/// Build a synthetic run-set; `scale` stretches every duration.
fn synthetic_run_set(benchmarks: usize, scale: f64) -> RunSet {
    let mut context = BTreeMap::new();
    context.insert(
        "benchmark_mode".to_string(),
        json!(BenchmarkMode::Ordered.as_str()),
    );
    context.insert("threads".to_string(), json!(8));

    let benchmarks = (0..benchmarks)
        .map(|i| {
            let base = 2e9 + (i % 17) as f64 * 1e8;
            let runs: Vec<RunResult> = (0..RUNS_PER_BENCHMARK)
                .map(|r| RunResult::new((base + (r % 7) as f64 * 1e6) * scale))
                .collect();
            BenchmarkRecord {
                name: format!("query-{i:04}"),
                duration: Some(runs.iter().map(|run| run.duration).sum()),
                items_per_second: Some(1e9 / (base * scale)),
                successful_runs: runs,
                unsuccessful_runs: if i % 10 == 0 {
                    vec![RunResult::new(base * scale)]
                } else {
                    Vec::new()
                },
            }
        })
        .collect();

    RunSet {
        context,
        benchmarks,
        summary: RunSummary {
            total_duration: Some(3.6e12 * scale),
        },
    }
}

fn init_bench_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        // Info level so the start/end markers show; RUST_LOG still overrides.
        let _ = bench_compare::logging::init_logging(1, false, None);
    });
}

fn log_bench_start(name: &str) -> Instant {
    info!("benchmark_start: {name}");
    Instant::now()
}

fn log_bench_end(name: &str, started_at: Instant) {
    info!("benchmark_end: {name} duration={:?}", started_at.elapsed());
}

/// Benchmark the full comparison (compatibility, context, rows, aggregate).
fn bench_compare(c: &mut Criterion) {
    init_bench_logging();
    let settings = CompareSettings::default();
    let mut group = c.benchmark_group("compare/reduce");

    for size in [100, 1000] {
        let old = synthetic_run_set(size, 1.0);
        let new = synthetic_run_set(size, 0.97);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(size),
            &(old, new),
            |b, (old, new)| {
                let bench_name = format!("compare/reduce/size={size}");
                let bench_start = log_bench_start(&bench_name);
                b.iter(|| {
                    compare(black_box(old), black_box(new), &settings, &StudentTTest)
                        .expect("compatible run-sets")
                });
                log_bench_end(&bench_name, bench_start);
            },
        );
    }

    group.finish();
}

/// Benchmark report assembly and plain rendering.
fn bench_render_plain(c: &mut Criterion) {
    init_bench_logging();
    let settings = CompareSettings::default();
    let old = synthetic_run_set(1000, 1.0);
    let new = synthetic_run_set(1000, 1.05);
    let comparison = compare(&old, &new, &settings, &StudentTTest).expect("compatible run-sets");

    let mut group = c.benchmark_group("format/plain");
    group.bench_function("1000", |b| {
        b.iter(|| {
            let report = Report::assemble(black_box(&comparison), "old.json", "new.json");
            render_plain(&report)
        });
    });
    group.finish();
}

/// Benchmark run-set deserialization.
fn bench_parse(c: &mut Criterion) {
    init_bench_logging();
    let document =
        serde_json::to_string(&synthetic_run_set(1000, 1.0)).expect("serialize run-set");

    let mut group = c.benchmark_group("load/parse");
    group.throughput(Throughput::Bytes(document.len() as u64));
    group.bench_function("1000", |b| {
        b.iter(|| parse_run_set(black_box(&document), Path::new("bench.json")).expect("parse"));
    });
    group.finish();
}

criterion_group!(benches, bench_compare, bench_render_plain, bench_parse);
criterion_main!(benches);
