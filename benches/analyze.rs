use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use deadstore::analyze;

fn analyze_short(c: &mut Criterion) {
    let input = "a = 1 b = a + 2 * ( c - 3 ) a = b if a < b c = - 4 end";

    let mut group = c.benchmark_group("analyze");
    group.throughput(Throughput::Bytes(input.len() as u64));
    group.bench_function("short", |b| {
        b.iter(|| {
            let report = analyze(black_box(input)).unwrap();
            assert!(!report.is_empty());
        })
    });
    group.finish();
}

fn analyze_long(c: &mut Criterion) {
    let input = "i = 0 while i < 10 j = i while j > 0 k = j * 2 j = j - 1 end i = i + 1 end "
        .repeat(100);

    let mut group = c.benchmark_group("analyze");
    group.throughput(Throughput::Bytes(input.len() as u64));
    group.bench_function("nested_loops", |b| {
        b.iter(|| {
            let report = analyze(black_box(&input)).unwrap();
            assert!(!report.is_empty());
        })
    });
    group.finish();
}

criterion_group!(benches, analyze_short, analyze_long);
criterion_main!(benches);
