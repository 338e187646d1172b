//! Barabási–Albert graph generation.
//!
//! Provides the [`Generator`] entry point configured by
//! [`crate::GeneratorBuilder`], plus free functions for one-off runs with a
//! caller-supplied random source.

use rand::{Rng, SeedableRng, rngs::SmallRng};
use tracing::{debug, instrument};

use crate::{
    AdjacencyGraph, DegreeHistogram, DegreeReservoir, ModelParams, MutableGraph, Result,
    SamplingStrategy, graph::populate_seed, step::attach,
};

/// Configured Barabási–Albert generator.
///
/// Each run starts from the complete graph on `m + 1` nodes and performs
/// `N - m - 1` attachment steps in order, each adding one node and `m`
/// edges. Runs own their graph and reservoir exclusively; a generator can be
/// reused for any number of independent runs.
///
/// # Examples
/// ```
/// use scalefree_core::{GeneratorBuilder, MutableGraph};
///
/// let generator = GeneratorBuilder::new()
///     .with_edges_per_node(2)
///     .with_node_count(5)
///     .with_rng_seed(7)
///     .build()?;
/// let graph = generator.generate()?;
/// assert_eq!(graph.node_count(), 5);
/// assert_eq!(graph.edge_count(), 7);
/// # Ok::<(), scalefree_core::GenerationError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Generator {
    params: ModelParams,
    sampling: SamplingStrategy,
    rng_seed: Option<u64>,
}

impl Generator {
    pub(crate) fn new(
        params: ModelParams,
        sampling: SamplingStrategy,
        rng_seed: Option<u64>,
    ) -> Self {
        Self {
            params,
            sampling,
            rng_seed,
        }
    }

    /// Returns the validated model parameters.
    #[must_use]
    pub fn params(&self) -> ModelParams {
        self.params
    }

    /// Returns the sampling strategy used for attachment.
    #[must_use]
    pub fn sampling(&self) -> SamplingStrategy {
        self.sampling
    }

    /// Returns the configured seed, if any.
    #[must_use]
    pub fn rng_seed(&self) -> Option<u64> {
        self.rng_seed
    }

    /// Creates the random source used by the seedless entry points: a
    /// [`SmallRng`] seeded with the configured seed, or from OS entropy when
    /// none was configured.
    #[must_use]
    pub fn rng(&self) -> SmallRng {
        self.rng_seed
            .map_or_else(SmallRng::from_entropy, SmallRng::seed_from_u64)
    }

    /// Generates a graph using the generator's own random source.
    ///
    /// # Errors
    /// Returns [`crate::GenerationError::InsufficientPool`] if an attachment
    /// step cannot find `m` distinct targets.
    pub fn generate(&self) -> Result<AdjacencyGraph> {
        self.generate_with_rng(&mut self.rng())
    }

    /// Generates a graph drawing from `rng`.
    ///
    /// # Errors
    /// Returns [`crate::GenerationError::InsufficientPool`] if an attachment
    /// step cannot find `m` distinct targets.
    pub fn generate_with_rng<R>(&self, rng: &mut R) -> Result<AdjacencyGraph>
    where
        R: Rng + ?Sized,
    {
        self.generate_graph(rng)
    }

    /// Generates a graph and the final degree of every node, using the
    /// generator's own random source.
    ///
    /// # Errors
    /// Returns [`crate::GenerationError::InsufficientPool`] if an attachment
    /// step cannot find `m` distinct targets.
    pub fn generate_with_distribution(&self) -> Result<(AdjacencyGraph, DegreeHistogram)> {
        self.generate_graph_with_distribution(&mut self.rng())
    }

    /// Generates into any [`MutableGraph`] implementation drawing from `rng`.
    ///
    /// # Errors
    /// Returns [`crate::GenerationError::InsufficientPool`] if an attachment
    /// step cannot find `m` distinct targets.
    pub fn generate_graph<G, R>(&self, rng: &mut R) -> Result<G>
    where
        G: MutableGraph + Default,
        R: Rng + ?Sized,
    {
        self.run(rng).map(|(graph, _)| graph)
    }

    /// Generates into any [`MutableGraph`] implementation and returns the
    /// final degree of every node alongside it. The degrees are counted from
    /// the reservoir, so entry `v` is the number of reservoir slots holding
    /// `v`.
    ///
    /// # Errors
    /// Returns [`crate::GenerationError::InsufficientPool`] if an attachment
    /// step cannot find `m` distinct targets.
    pub fn generate_graph_with_distribution<G, R>(
        &self,
        rng: &mut R,
    ) -> Result<(G, DegreeHistogram)>
    where
        G: MutableGraph + Default,
        R: Rng + ?Sized,
    {
        self.run(rng)
            .map(|(graph, reservoir)| (graph, reservoir.degrees()))
    }

    #[instrument(
        name = "generator.generate",
        err,
        skip(self, rng),
        fields(
            edges_per_node = self.params.edges_per_node(),
            node_count = self.params.node_count(),
            strategy = ?self.sampling
        ),
    )]
    fn run<G, R>(&self, rng: &mut R) -> Result<(G, DegreeReservoir)>
    where
        G: MutableGraph + Default,
        R: Rng + ?Sized,
    {
        let mut graph = G::default();
        populate_seed(&mut graph, self.params.edges_per_node());
        let mut reservoir = DegreeReservoir::for_params(self.params, self.sampling);

        for step in 0..self.params.steps() {
            attach(&mut graph, &mut reservoir, step, rng)?;
        }

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "generation completed"
        );
        Ok((graph, reservoir))
    }
}

/// Generates a Barabási–Albert graph with `node_count` nodes, each new node
/// attaching with `edges_per_node` edges, using scan sampling and `rng`.
///
/// # Errors
/// Returns [`crate::GenerationError::InvalidParameter`] before any work is
/// done when `edges_per_node == 0` or `node_count <= edges_per_node + 1`.
///
/// # Examples
/// ```
/// use rand::{SeedableRng, rngs::SmallRng};
/// use scalefree_core::{MutableGraph, barabasi_albert};
///
/// let graph = barabasi_albert(2, 5, &mut SmallRng::seed_from_u64(1))?;
/// assert_eq!(graph.node_count(), 5);
/// assert_eq!(graph.edge_count(), 7);
/// assert!(graph.degrees().iter().all(|&degree| degree >= 2));
/// # Ok::<(), scalefree_core::GenerationError>(())
/// ```
pub fn barabasi_albert<R>(
    edges_per_node: usize,
    node_count: usize,
    rng: &mut R,
) -> Result<AdjacencyGraph>
where
    R: Rng + ?Sized,
{
    let params = ModelParams::new(edges_per_node, node_count)?;
    Generator::new(params, SamplingStrategy::Scan, None).generate_with_rng(rng)
}

/// Like [`barabasi_albert`], additionally returning the final degree of every
/// node.
///
/// # Errors
/// Returns [`crate::GenerationError::InvalidParameter`] before any work is
/// done when `edges_per_node == 0` or `node_count <= edges_per_node + 1`.
///
/// # Examples
/// ```
/// use rand::{SeedableRng, rngs::SmallRng};
/// use scalefree_core::{MutableGraph, barabasi_albert_with_distribution};
///
/// let (graph, degrees) =
///     barabasi_albert_with_distribution(3, 30, &mut SmallRng::seed_from_u64(4))?;
/// assert_eq!(degrees.len(), graph.node_count());
/// assert_eq!(degrees.sum(), 2 * graph.edge_count());
/// # Ok::<(), scalefree_core::GenerationError>(())
/// ```
pub fn barabasi_albert_with_distribution<R>(
    edges_per_node: usize,
    node_count: usize,
    rng: &mut R,
) -> Result<(AdjacencyGraph, DegreeHistogram)>
where
    R: Rng + ?Sized,
{
    let params = ModelParams::new(edges_per_node, node_count)?;
    Generator::new(params, SamplingStrategy::Scan, None).generate_graph_with_distribution(rng)
}
