/*!
 * Signal Lookup Benchmarks
 * Number and name resolution on the delivery hot path
 */

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use posix_signals::Signal;

fn bench_from_value(c: &mut Criterion) {
    let mut group = c.benchmark_group("from_value");

    for n in [2, 31, 34, 64, 33] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| black_box(Signal::from_value(black_box(n))));
        });
    }

    group.finish();
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for name in ["SIGINT", "term", "SIGRTMAX-1", "15"] {
        group.bench_with_input(BenchmarkId::from_parameter(name), name, |b, name| {
            b.iter(|| black_box(black_box(name).parse::<Signal>()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_from_value, bench_parse);
criterion_main!(benches);
