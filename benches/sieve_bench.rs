use criterion::{black_box, criterion_group, criterion_main, Criterion};
use nthprime::{full, FullSieve, NthPrime, SegmentedSieve, SievePolicy, WheelSieve};

fn bench_sieve_to_1m(c: &mut Criterion) {
    let policy = SievePolicy::default();
    c.bench_function("full::sieve_to(1_000_000)", |b| {
        b.iter(|| full::sieve_to(black_box(1_000_000), &policy));
    });
}

fn bench_full_nth_100k(c: &mut Criterion) {
    let sieve = FullSieve::default();
    c.bench_function("full nth_prime(100_000)", |b| {
        b.iter(|| sieve.nth_prime(black_box(100_000)));
    });
}

fn bench_segmented_nth_100k(c: &mut Criterion) {
    let sieve = SegmentedSieve::default();
    c.bench_function("segmented nth_prime(100_000)", |b| {
        b.iter(|| sieve.nth_prime(black_box(100_000)));
    });
}

fn bench_wheel_nth_100k(c: &mut Criterion) {
    let sieve = WheelSieve::default();
    c.bench_function("wheel nth_prime(100_000)", |b| {
        b.iter(|| sieve.nth_prime(black_box(100_000)));
    });
}

fn bench_wheel_nth_10m(c: &mut Criterion) {
    let sieve = WheelSieve::default();
    let mut group = c.benchmark_group("wheel_large");
    group.sample_size(10);
    group.bench_function("wheel nth_prime(10_000_000)", |b| {
        b.iter(|| sieve.nth_prime(black_box(10_000_000)));
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_sieve_to_1m,
    bench_full_nth_100k,
    bench_segmented_nth_100k,
    bench_wheel_nth_100k,
    bench_wheel_nth_10m,
);
criterion_main!(benches);
