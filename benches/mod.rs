use criterion::{criterion_group, criterion_main, Criterion};


fn benches(c: &mut Criterion) {
    policy_bench::register_benchmarks(c);
    replay_bench::register_benchmarks(c);
}

criterion_group!(all, benches);
criterion_main!(all);
