use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use vouch_benches::available_corpora;
use vouch_core::format::{format, FormatConfig, Value};
use vouch_core::query::Engine;

fn bench_query(c: &mut Criterion) {
    let engine = Engine::new();
    let mut resolve = c.benchmark_group("resolve");
    for corpus in available_corpora() {
        let dataset = corpus.load();
        let (exact, _) = dataset.paths(&engine);
        resolve.bench_with_input(BenchmarkId::from_parameter(corpus.name()), &dataset, |b, dataset| {
            b.iter(|| {
                let value = engine.resolve(&dataset.actual, &exact).expect("path resolves");
                black_box(value);
            });
        });
    }
    resolve.finish();

    let mut search = c.benchmark_group("search");
    for corpus in available_corpora() {
        let dataset = corpus.load();
        let (_, recursive) = dataset.paths(&engine);
        search.throughput(Throughput::Elements(corpus.size() as u64));
        search.bench_with_input(BenchmarkId::from_parameter(corpus.name()), &dataset, |b, dataset| {
            b.iter(|| {
                let found = engine.search(&dataset.actual, &dataset.search_expected, &recursive);
                black_box(found.is_ok());
            });
        });
    }
    search.finish();
}

fn bench_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("compare");
    for corpus in available_corpora() {
        let dataset = corpus.load();
        group.throughput(Throughput::Elements(corpus.size() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(corpus.name()), &dataset, |b, dataset| {
            b.iter(|| black_box(dataset.compare()));
        });
    }
    group.finish();
}

fn bench_format(c: &mut Criterion) {
    let mut group = c.benchmark_group("format");
    for corpus in available_corpora() {
        let dataset = corpus.load();
        let value = Value::from(&dataset.actual);
        for (label, config) in [("json", FormatConfig::json()), ("verbose", FormatConfig::verbose())] {
            group.bench_with_input(BenchmarkId::new(label, corpus.name()), &value, |b, value| {
                b.iter(|| black_box(format(value, &config)));
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_query, bench_compare, bench_format);
criterion_main!(benches);
