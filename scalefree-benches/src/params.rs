//! Benchmark parameter types.

use std::fmt;

use rand::{SeedableRng, rngs::SmallRng};
use scalefree_core::{Generator, GeneratorBuilder, SamplingStrategy};

use crate::error::BenchSetupError;

/// Parameters for a generation benchmark run.
#[derive(Clone, Copy, Debug)]
pub struct GenerationBenchParams {
    /// Final number of nodes (`N`).
    pub node_count: usize,
    /// Edges per new node (`m`).
    pub edges_per_node: usize,
    /// Sampling strategy under test.
    pub sampling: SamplingStrategy,
}

impl GenerationBenchParams {
    /// Builds a generator seeded with `seed` for these parameters.
    ///
    /// # Errors
    /// Returns [`BenchSetupError::Generation`] when the parameters are
    /// rejected.
    pub fn generator(&self, seed: u64) -> Result<Generator, BenchSetupError> {
        Ok(GeneratorBuilder::new()
            .with_edges_per_node(self.edges_per_node)
            .with_node_count(self.node_count)
            .with_sampling(self.sampling)
            .with_rng_seed(seed)
            .build()?)
    }
}

impl fmt::Display for GenerationBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "n={},m={},{:?}",
            self.node_count, self.edges_per_node, self.sampling
        )
    }
}

/// Deterministic random source for benchmark inputs.
#[must_use]
pub fn bench_rng(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}
