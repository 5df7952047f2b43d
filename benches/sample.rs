use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use mcstat_rs::{
    estimate, estimate_many, BetaProposal, MultiRunSettings, RejectionSampler, Triangular,
    UniformProposal,
};
use rand::{rngs::SmallRng, SeedableRng};
use rand_distr::StandardNormal;

fn criterion_benchmark(c: &mut Criterion) {
    let uniform = RejectionSampler::new(
        Triangular::standard(),
        UniformProposal::new(0., 1.).unwrap(),
        2.,
    )
    .unwrap();
    let beta = RejectionSampler::new(
        Triangular::standard(),
        BetaProposal::new(2., 2.).unwrap(),
        4. / 3.,
    )
    .unwrap();

    c.bench_function("rejection uniform proposal 10000", |b| {
        b.iter_batched(
            || SmallRng::seed_from_u64(42),
            |mut rng| uniform.sample(&mut rng, black_box(10_000)),
            BatchSize::SmallInput,
        )
    });

    c.bench_function("rejection beta proposal 10000", |b| {
        b.iter_batched(
            || SmallRng::seed_from_u64(42),
            |mut rng| beta.sample(&mut rng, black_box(10_000)),
            BatchSize::SmallInput,
        )
    });

    c.bench_function("running estimate 10000", |b| {
        b.iter_batched(
            || SmallRng::seed_from_u64(42),
            |mut rng| estimate(&mut rng, &StandardNormal, |x: f64| x * x, black_box(10_000)),
            BatchSize::SmallInput,
        )
    });

    let settings = MultiRunSettings {
        num_runs: 100,
        num_draws: 1000,
        ..Default::default()
    };
    c.bench_function("multi run 100 x 1000", |b| {
        b.iter(|| estimate_many(black_box(&settings), &StandardNormal, |x: f64| x * x).unwrap())
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
