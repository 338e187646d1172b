//! Validated Barabási–Albert model parameters and the slot arithmetic derived
//! from them.

use std::num::NonZeroUsize;

use tracing::warn;

use crate::{GenerationError, Result};

/// A validated `(m, N)` pair.
///
/// `m` is the number of edges each new node attaches with and `N` the final
/// node count. Construction guarantees `m >= 1`, `N > m + 1` (so at least
/// one attachment step runs) and that the reservoir capacity fits in `usize`,
/// which bounds every other derived count.
///
/// # Examples
/// ```
/// use scalefree_core::ModelParams;
///
/// let params = ModelParams::new(2, 5)?;
/// assert_eq!(params.steps(), 2);
/// assert_eq!(params.reservoir_capacity(), 14);
/// assert_eq!(params.expected_edge_count(), 7);
/// # Ok::<(), scalefree_core::GenerationError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ModelParams {
    edges_per_node: NonZeroUsize,
    node_count: usize,
}

impl ModelParams {
    /// Validates `edges_per_node` (`m`) and `node_count` (`N`).
    ///
    /// # Errors
    /// Returns [`GenerationError::InvalidParameter`] when `m == 0`,
    /// `N <= m + 1`, or the reservoir capacity overflows `usize`.
    pub fn new(edges_per_node: usize, node_count: usize) -> Result<Self> {
        let invalid = GenerationError::InvalidParameter {
            edges_per_node,
            node_count,
        };
        let Some(m) = NonZeroUsize::new(edges_per_node) else {
            warn!(edges_per_node, node_count, "edges_per_node must be positive");
            return Err(invalid);
        };
        if node_count <= edges_per_node.saturating_add(1) {
            warn!(
                edges_per_node,
                node_count, "node_count must exceed the seed graph size"
            );
            return Err(invalid);
        }
        if checked_capacity(edges_per_node, node_count).is_none() {
            warn!(
                edges_per_node,
                node_count, "reservoir capacity overflows usize"
            );
            return Err(invalid);
        }
        Ok(Self {
            edges_per_node: m,
            node_count,
        })
    }

    /// Returns `m`.
    #[must_use]
    #[rustfmt::skip]
    pub const fn edges_per_node(&self) -> usize { self.edges_per_node.get() }

    /// Returns `N`.
    #[must_use]
    #[rustfmt::skip]
    pub const fn node_count(&self) -> usize { self.node_count }

    /// Number of nodes in the seed clique (`m + 1`).
    #[must_use]
    pub const fn seed_node_count(&self) -> usize {
        self.edges_per_node() + 1
    }

    /// Number of attachment steps (`N - m - 1`).
    #[must_use]
    pub const fn steps(&self) -> usize {
        self.node_count - self.seed_node_count()
    }

    /// Number of reservoir slots occupied by the seed clique (`m * (m + 1)`).
    #[must_use]
    pub const fn seed_slots(&self) -> usize {
        self.edges_per_node() * self.seed_node_count()
    }

    /// Exact reservoir capacity: `m * (m + 1) + 2 * m * (N - m - 1)`.
    #[must_use]
    pub const fn reservoir_capacity(&self) -> usize {
        self.seed_slots() + 2 * self.edges_per_node() * self.steps()
    }

    /// Used-prefix length before step `t` runs: `m * (m + 1) + 2 * m * t`.
    /// Saturates for steps far beyond [`Self::steps`].
    #[must_use]
    pub const fn used_before_step(&self, step: usize) -> usize {
        self.seed_slots()
            .saturating_add((2 * self.edges_per_node()).saturating_mul(step))
    }

    /// Identifier of the node introduced by step `t` (`m + t + 1`).
    /// Saturates for steps far beyond [`Self::steps`].
    #[must_use]
    pub const fn node_for_step(&self, step: usize) -> usize {
        self.seed_node_count().saturating_add(step)
    }

    /// Edge count of the finished graph: `m * (m + 1) / 2 + m * (N - m - 1)`.
    #[must_use]
    pub const fn expected_edge_count(&self) -> usize {
        self.seed_slots() / 2 + self.edges_per_node() * self.steps()
    }
}

fn checked_capacity(edges_per_node: usize, node_count: usize) -> Option<usize> {
    let seed_nodes = edges_per_node.checked_add(1)?;
    let seed_slots = edges_per_node.checked_mul(seed_nodes)?;
    let steps = node_count.checked_sub(seed_nodes)?;
    let growth = edges_per_node.checked_mul(2)?.checked_mul(steps)?;
    seed_slots.checked_add(growth)
}
