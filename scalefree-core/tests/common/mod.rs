//! Shared helpers for scalefree-core integration tests.

use rand::{SeedableRng, rngs::SmallRng};
use scalefree_core::{Generator, GeneratorBuilder, SamplingStrategy};

/// Deterministic random source for a test case.
pub fn rng(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}

/// Builds a seeded generator, panicking on invalid parameters.
#[expect(clippy::expect_used, reason = "tests require contextual panics")]
pub fn seeded_generator(m: usize, n: usize, sampling: SamplingStrategy, seed: u64) -> Generator {
    GeneratorBuilder::new()
        .with_edges_per_node(m)
        .with_node_count(n)
        .with_sampling(sampling)
        .with_rng_seed(seed)
        .build()
        .expect("parameters must be valid")
}
