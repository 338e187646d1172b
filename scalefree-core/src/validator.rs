//! Instrumented generation run for checking that attachment samples in
//! proportion to degree.
//!
//! The validator drives the same [`attach`] step as [`crate::Generator`] and,
//! before each step, snapshots the degree histogram of the reservoir prefix.
//! From that snapshot it records the self-consistency ratio
//! `sum(k) / 2E` (always 1), the degree a preferentially sampled node is
//! expected to have, `sum(k^2) / 2E`, and the mean pre-step degree of the
//! nodes the step actually drew.
//!
//! The predicted degree is exact for draws with replacement. Steps draw
//! without replacement, so for `m` comparable to the number of nodes the
//! measured series sits slightly below the prediction.

use rand::Rng;
use tracing::{debug, instrument};

use crate::{
    AdjacencyGraph, DegreeReservoir, Generator, ModelParams, MutableGraph, Result,
    SamplingStrategy, graph::populate_seed, step::attach,
};

/// Node and edge totals of the graph at one point in a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GraphCounts {
    /// Number of nodes.
    pub nodes: usize,
    /// Number of edges.
    pub edges: usize,
}

impl GraphCounts {
    fn of<G: MutableGraph + ?Sized>(graph: &G) -> Self {
        Self {
            nodes: graph.node_count(),
            edges: graph.edge_count(),
        }
    }
}

/// Diagnostics captured around one attachment step.
#[derive(Clone, Debug, PartialEq)]
pub struct StepRecord {
    /// Step counter `t`.
    pub step: usize,
    /// Graph size before the step.
    pub before: GraphCounts,
    /// Graph size after the step.
    pub after: GraphCounts,
    /// `sum(degrees) / (2 * edges)` over the pre-step prefix.
    pub normalisation: f64,
    /// `sum(degrees^2) / (2 * edges)`: expected degree of a node sampled in
    /// proportion to its degree.
    pub predicted_degree: f64,
    /// Mean pre-step degree of the targets the step drew.
    pub measured_degree: f64,
    /// Mean pre-step degree over the identifiers present in the prefix.
    pub mean_degree: f64,
    /// Targets drawn by the step, in draw order.
    pub targets: Vec<usize>,
}

/// Per-step diagnostics of a validation run.
///
/// # Examples
/// ```
/// use rand::{SeedableRng, rngs::SmallRng};
/// use scalefree_core::validate;
///
/// let report = validate(2, 50, &mut SmallRng::seed_from_u64(5))?;
/// assert_eq!(report.steps().len(), 47);
/// assert_eq!(report.nodes().len(), 48);
/// assert!(report.max_normalisation_error() < 1e-12);
/// # Ok::<(), scalefree_core::GenerationError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ValidationReport {
    params: ModelParams,
    initial: GraphCounts,
    steps: Vec<StepRecord>,
}

impl ValidationReport {
    /// Returns the parameters of the validated run.
    #[must_use]
    #[rustfmt::skip]
    pub fn params(&self) -> ModelParams { self.params }

    /// Returns the graph size after seeding, before the first step.
    #[must_use]
    #[rustfmt::skip]
    pub fn initial(&self) -> GraphCounts { self.initial }

    /// Returns one record per attachment step, in order.
    #[must_use]
    #[rustfmt::skip]
    pub fn steps(&self) -> &[StepRecord] { &self.steps }

    /// Node count after seeding followed by the count after every step.
    #[must_use]
    pub fn nodes(&self) -> Vec<usize> {
        std::iter::once(self.initial.nodes)
            .chain(self.steps.iter().map(|record| record.after.nodes))
            .collect()
    }

    /// Edge count after seeding followed by the count after every step.
    #[must_use]
    pub fn edges(&self) -> Vec<usize> {
        std::iter::once(self.initial.edges)
            .chain(self.steps.iter().map(|record| record.after.edges))
            .collect()
    }

    /// Normalisation ratio per step.
    #[must_use]
    pub fn normalisation(&self) -> Vec<f64> {
        self.steps.iter().map(|record| record.normalisation).collect()
    }

    /// Predicted sampled-node degree per step.
    #[must_use]
    pub fn predicted_degree(&self) -> Vec<f64> {
        self.steps
            .iter()
            .map(|record| record.predicted_degree)
            .collect()
    }

    /// Measured sampled-node degree per step.
    #[must_use]
    pub fn measured_degree(&self) -> Vec<f64> {
        self.steps
            .iter()
            .map(|record| record.measured_degree)
            .collect()
    }

    /// Mean degree per step.
    #[must_use]
    pub fn mean_degree(&self) -> Vec<f64> {
        self.steps.iter().map(|record| record.mean_degree).collect()
    }

    /// Largest `|normalisation - 1|` across all steps.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "distance of a ratio from one"
    )]
    pub fn max_normalisation_error(&self) -> f64 {
        self.steps
            .iter()
            .map(|record| (record.normalisation - 1.0).abs())
            .fold(0.0, f64::max)
    }
}

impl Generator {
    /// Runs the instrumented loop with this generator's parameters, sampling
    /// strategy and random source.
    ///
    /// # Errors
    /// Returns [`crate::GenerationError::InsufficientPool`] if an attachment
    /// step cannot find `m` distinct targets.
    pub fn validate(&self) -> Result<ValidationReport> {
        run_validation(self.params(), self.sampling(), &mut self.rng())
    }

    /// Runs the instrumented loop drawing from `rng`.
    ///
    /// # Errors
    /// Returns [`crate::GenerationError::InsufficientPool`] if an attachment
    /// step cannot find `m` distinct targets.
    pub fn validate_with_rng<R>(&self, rng: &mut R) -> Result<ValidationReport>
    where
        R: Rng + ?Sized,
    {
        run_validation(self.params(), self.sampling(), rng)
    }
}

/// Runs an instrumented Barabási–Albert construction with scan sampling.
///
/// # Errors
/// Returns [`crate::GenerationError::InvalidParameter`] when
/// `edges_per_node == 0` or `node_count <= edges_per_node + 1`.
pub fn validate<R>(edges_per_node: usize, node_count: usize, rng: &mut R) -> Result<ValidationReport>
where
    R: Rng + ?Sized,
{
    let params = ModelParams::new(edges_per_node, node_count)?;
    run_validation(params, SamplingStrategy::Scan, rng)
}

#[instrument(
    name = "validator.run",
    err,
    skip(rng),
    fields(
        edges_per_node = params.edges_per_node(),
        node_count = params.node_count(),
        strategy = ?sampling
    ),
)]
fn run_validation<R>(
    params: ModelParams,
    sampling: SamplingStrategy,
    rng: &mut R,
) -> Result<ValidationReport>
where
    R: Rng + ?Sized,
{
    let mut graph = AdjacencyGraph::with_capacity(params.node_count());
    populate_seed(&mut graph, params.edges_per_node());
    let mut reservoir = DegreeReservoir::for_params(params, sampling);
    let initial = GraphCounts::of(&graph);
    let mut steps = Vec::with_capacity(params.steps());

    for step in 0..params.steps() {
        let before = GraphCounts::of(&graph);
        let histogram = reservoir.histogram(params.used_before_step(step))?;
        let doubled_edges = 2 * before.edges;
        let mean_degree = histogram.mean().unwrap_or_default();

        let targets = attach(&mut graph, &mut reservoir, step, rng)?;
        let target_degrees: usize = targets.iter().map(|&node| histogram.count(node)).sum();

        steps.push(StepRecord {
            step,
            before,
            after: GraphCounts::of(&graph),
            normalisation: ratio(histogram.sum(), doubled_edges),
            predicted_degree: ratio(histogram.sum_of_squares(), doubled_edges),
            measured_degree: ratio(target_degrees, targets.len()),
            mean_degree,
            targets,
        });
    }

    debug!(steps = steps.len(), "validation completed");
    Ok(ValidationReport {
        params,
        initial,
        steps,
    })
}

#[expect(
    clippy::cast_precision_loss,
    clippy::float_arithmetic,
    reason = "diagnostic ratios of counts that stay far below 2^52"
)]
fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        return f64::NAN;
    }
    numerator as f64 / denominator as f64
}
