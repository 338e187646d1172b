//! Builder utilities for configuring Barabási–Albert generation.
//!
//! Exposes the configuration surface and the validation performed before a
//! [`Generator`] is constructed.

use crate::{Result, generator::Generator, params::ModelParams, reservoir::SamplingStrategy};

/// Configures and constructs [`Generator`] instances.
///
/// # Examples
/// ```
/// use scalefree_core::{GeneratorBuilder, SamplingStrategy};
///
/// let generator = GeneratorBuilder::new()
///     .with_edges_per_node(3)
///     .with_node_count(50)
///     .with_sampling(SamplingStrategy::Indexed)
///     .with_rng_seed(42)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(generator.params().edges_per_node(), 3);
/// assert_eq!(generator.sampling(), SamplingStrategy::Indexed);
/// assert_eq!(generator.rng_seed(), Some(42));
/// ```
#[derive(Debug, Clone)]
pub struct GeneratorBuilder {
    edges_per_node: usize,
    node_count: usize,
    sampling: SamplingStrategy,
    rng_seed: Option<u64>,
}

impl Default for GeneratorBuilder {
    fn default() -> Self {
        Self {
            edges_per_node: 2,
            node_count: 100,
            sampling: SamplingStrategy::Scan,
            rng_seed: None,
        }
    }
}

impl GeneratorBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use scalefree_core::{GeneratorBuilder, SamplingStrategy};
    ///
    /// let builder = GeneratorBuilder::new();
    /// assert_eq!(builder.edges_per_node(), 2);
    /// assert_eq!(builder.node_count(), 100);
    /// assert_eq!(builder.sampling(), SamplingStrategy::Scan);
    /// assert_eq!(builder.rng_seed(), None);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the number of edges each new node attaches with (`m`).
    #[must_use]
    pub fn with_edges_per_node(mut self, edges_per_node: usize) -> Self {
        self.edges_per_node = edges_per_node;
        self
    }

    /// Returns the configured `m`.
    #[must_use]
    pub fn edges_per_node(&self) -> usize {
        self.edges_per_node
    }

    /// Overrides the final node count (`N`).
    #[must_use]
    pub fn with_node_count(mut self, node_count: usize) -> Self {
        self.node_count = node_count;
        self
    }

    /// Returns the configured `N`.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Selects how attachment targets are sampled.
    #[must_use]
    pub fn with_sampling(mut self, sampling: SamplingStrategy) -> Self {
        self.sampling = sampling;
        self
    }

    /// Returns the configured sampling strategy.
    #[must_use]
    pub fn sampling(&self) -> SamplingStrategy {
        self.sampling
    }

    /// Fixes the seed used by [`Generator::generate`] and friends so runs
    /// are reproducible.
    #[must_use]
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    /// Returns the configured seed, if any.
    #[must_use]
    pub fn rng_seed(&self) -> Option<u64> {
        self.rng_seed
    }

    /// Validates the configuration and constructs a [`Generator`].
    ///
    /// # Errors
    /// Returns [`crate::GenerationError::InvalidParameter`] when
    /// `edges_per_node == 0` or `node_count <= edges_per_node + 1`.
    ///
    /// # Examples
    /// ```
    /// use scalefree_core::GeneratorBuilder;
    ///
    /// let err = GeneratorBuilder::new().with_edges_per_node(0).build().unwrap_err();
    /// assert!(err.is_configuration_error());
    /// ```
    pub fn build(self) -> Result<Generator> {
        let params = ModelParams::new(self.edges_per_node, self.node_count)?;
        Ok(Generator::new(params, self.sampling, self.rng_seed))
    }
}
