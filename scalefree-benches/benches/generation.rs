//! Full Barabási–Albert generation benchmarks.
//!
//! Compares the reference scan sampler against the indexed sampler across
//! graph sizes, and measures the overhead of an instrumented validation run.
#![expect(
    missing_docs,
    reason = "Criterion macros generate items without doc comments"
)]
#![expect(
    clippy::shadow_reuse,
    reason = "Criterion bench_with_input closures rebind parameter names"
)]
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use scalefree_benches::{
    error::BenchSetupError,
    params::{GenerationBenchParams, bench_rng},
};
use scalefree_core::SamplingStrategy;

/// Seed used for every run in this benchmark.
const SEED: u64 = 42;

/// Edges attached by every new node.
const EDGES_PER_NODE: usize = 3;

/// Graph sizes to benchmark.
const NODE_COUNTS: &[usize] = &[500, 2_000, 8_000];

fn generate_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("generate");
    group.sample_size(20);

    for &node_count in NODE_COUNTS {
        for sampling in [SamplingStrategy::Scan, SamplingStrategy::Indexed] {
            let params = GenerationBenchParams {
                node_count,
                edges_per_node: EDGES_PER_NODE,
                sampling,
            };
            let generator = params.generator(SEED)?;
            // Surface parameter or sampling failures before timing.
            generator.generate()?;

            group.bench_with_input(
                BenchmarkId::from_parameter(&params),
                &generator,
                |b, generator| {
                    b.iter(|| generator.generate_with_rng(&mut bench_rng(SEED)));
                },
            );
        }
    }

    group.finish();
    Ok(())
}

fn validate_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("validate");
    group.sample_size(10);

    for &node_count in NODE_COUNTS {
        let params = GenerationBenchParams {
            node_count,
            edges_per_node: EDGES_PER_NODE,
            sampling: SamplingStrategy::Indexed,
        };
        let generator = params.generator(SEED)?;
        generator.validate()?;

        group.bench_with_input(
            BenchmarkId::from_parameter(&params),
            &generator,
            |b, generator| {
                b.iter(|| generator.validate_with_rng(&mut bench_rng(SEED)));
            },
        );
    }

    group.finish();
    Ok(())
}

fn generate(c: &mut Criterion) {
    if let Err(err) = generate_impl(c) {
        panic!("generate benchmark setup failed: {err}");
    }
}

fn validate(c: &mut Criterion) {
    if let Err(err) = validate_impl(c) {
        panic!("validate benchmark setup failed: {err}");
    }
}

criterion_group!(benches, generate, validate);
criterion_main!(benches);
