//! Performance benchmarks for the word count pipeline
//! Measures dictionary substitution, in-memory counting and full local jobs

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use std::fs;
use std::hint::black_box;
use tempfile::TempDir;
use tokio::runtime::Runtime;
use wordcount_replace::{
    count_lines, transform_and_emit, JobConfig, JobSettings, LocalJobRunner, ReplacementRule,
    ReplacementTable,
};

/// Synthetic corpus with a small, repeating vocabulary
fn create_lines(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            format!(
                "the quick brown fox{} jumps over the lazy dog{} again and again",
                i % 17,
                i % 5
            )
        })
        .collect()
}

fn create_table(rules: usize) -> ReplacementTable {
    ReplacementTable::from_rules(
        (0..rules).map(|i| ReplacementRule::new(format!("fox{}", i), format!("cat{}", i))),
    )
}

fn bench_transform(c: &mut Criterion) {
    let mut group = c.benchmark_group("transform_and_emit");
    let line = create_lines(1).remove(0);

    for rules in [0, 10, 100] {
        let table = create_table(rules);
        group.bench_with_input(BenchmarkId::from_parameter(rules), &table, |b, table| {
            b.iter(|| black_box(transform_and_emit(black_box(&line), table)))
        });
    }
    group.finish();
}

fn bench_count_lines(c: &mut Criterion) {
    let mut group = c.benchmark_group("count_lines");
    let table = create_table(10);

    for size in [100, 1_000, 10_000] {
        let lines = create_lines(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &lines, |b, lines| {
            b.iter(|| black_box(count_lines(lines, &table)))
        });
    }
    group.finish();
}

fn bench_local_job(c: &mut Criterion) {
    let runtime = Runtime::new().unwrap();
    let mut group = c.benchmark_group("local_job");
    group.sample_size(20);

    for workers in [1, 4] {
        group.bench_function(BenchmarkId::new("workers", workers), |b| {
            b.iter_batched(
                || {
                    let temp = TempDir::new().unwrap();
                    let input = temp.path().join("input.txt");
                    fs::write(&input, create_lines(5_000).join("\n")).unwrap();
                    let dictionary = temp.path().join("dict.txt");
                    fs::write(&dictionary, "fox1 cat1\ndog2 wolf2\n").unwrap();
                    let config = JobConfig::new(&input, temp.path().join("out"))
                        .with_replacement_file(&dictionary)
                        .with_settings(JobSettings {
                            num_workers: workers,
                            num_reducers: 2,
                            lines_per_split: Some(500),
                            ..JobSettings::default()
                        });
                    (temp, config)
                },
                |(temp, config)| {
                    let summary = runtime
                        .block_on(LocalJobRunner::new(config).run())
                        .unwrap();
                    black_box(summary);
                    drop(temp);
                },
                BatchSize::PerIteration,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_transform, bench_count_lines, bench_local_job);
criterion_main!(benches);
