//! A single preferential-attachment step.

use rand::Rng;
use tracing::trace;

use crate::{DegreeReservoir, GenerationError, MutableGraph, Result};

/// Adds node `m + step + 1` to `graph` and attaches it to `m` distinct
/// existing nodes drawn in proportion to their degree, recording the new
/// edge endpoints in `reservoir`.
///
/// The reservoir must hold exactly the `m * (m + 1) + 2 * m * step` slots
/// written by the seed and the previous steps. On success it holds `2 * m`
/// more: first the targets in draw order, then `m` copies of the new node.
/// Returns the targets in draw order.
///
/// # Errors
/// Returns [`GenerationError::PrefixOutOfRange`] when `step` is ahead of the
/// reservoir, [`GenerationError::NonSequentialAppend`] when it has already
/// run and [`GenerationError::ReservoirOverflow`] when every step has run;
/// the graph is untouched in those cases. Propagates
/// [`GenerationError::InsufficientPool`] from sampling, by which point the
/// graph has gained the new node and must be discarded.
///
/// # Examples
/// ```
/// use rand::{SeedableRng, rngs::SmallRng};
/// use scalefree_core::{AdjacencyGraph, DegreeReservoir, MutableGraph, attach, seed_graph};
///
/// let mut graph: AdjacencyGraph = seed_graph(2);
/// let mut reservoir = DegreeReservoir::allocate(5, 2)?;
/// let mut rng = SmallRng::seed_from_u64(3);
///
/// let targets = attach(&mut graph, &mut reservoir, 0, &mut rng)?;
/// assert_eq!(targets.len(), 2);
/// assert_eq!(graph.node_count(), 4);
/// assert_eq!(graph.edge_count(), 5);
/// assert_eq!(reservoir.len(), 10);
/// # Ok::<(), scalefree_core::GenerationError>(())
/// ```
pub fn attach<G, R>(
    graph: &mut G,
    reservoir: &mut DegreeReservoir,
    step: usize,
    rng: &mut R,
) -> Result<Vec<usize>>
where
    G: MutableGraph + ?Sized,
    R: Rng + ?Sized,
{
    let params = reservoir.params();
    let m = params.edges_per_node();
    let new_node = params.node_for_step(step);
    let used = params.used_before_step(step);
    let written = reservoir.len();

    if used > written {
        return Err(GenerationError::PrefixOutOfRange {
            prefix_len: used,
            len: written,
        });
    }
    if used < written {
        return Err(GenerationError::NonSequentialAppend {
            offset: used,
            expected: written,
        });
    }
    if reservoir.is_full() {
        return Err(GenerationError::ReservoirOverflow {
            offset: used,
            capacity: reservoir.capacity(),
        });
    }

    graph.add_node(new_node);
    let targets = reservoir.sample_written(m, rng)?;

    for (offset, &target) in (used..).zip(&targets) {
        graph.add_edge(new_node, target);
        reservoir.append(offset, target)?;
    }
    for offset in (used + m)..(used + 2 * m) {
        reservoir.append(offset, new_node)?;
    }

    trace!(step, new_node, targets = ?targets, "attached node");
    Ok(targets)
}
