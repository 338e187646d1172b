//! Fenwick-tree index over node degrees.
//!
//! Mirrors the multiset held by a [`crate::DegreeReservoir`] as one weight
//! per node identifier, so a degree-proportional draw costs `O(log N)`
//! instead of a scan over the reservoir prefix.

use rand::Rng;

use crate::{GenerationError, Result};

/// Per-node weights with cumulative sums kept in a binary indexed tree.
///
/// # Examples
/// ```
/// use rand::{SeedableRng, rngs::SmallRng};
/// use scalefree_core::DegreeIndex;
///
/// let mut index = DegreeIndex::with_nodes(4);
/// for node in [0, 0, 1, 3] {
///     index.increment(node);
/// }
/// assert_eq!(index.total(), 4);
/// assert_eq!(index.weight(0), 2);
///
/// let mut rng = SmallRng::seed_from_u64(7);
/// let targets = index.sample_without_replacement(3, &mut rng)?;
/// assert_eq!(targets.len(), 3);
/// assert_eq!(index.total(), 4);
/// # Ok::<(), scalefree_core::GenerationError>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DegreeIndex {
    weights: Vec<usize>,
    tree: Vec<usize>,
    total: usize,
}

impl DegreeIndex {
    /// Creates an index for identifiers `0..nodes`, all with zero weight.
    #[must_use]
    pub fn with_nodes(nodes: usize) -> Self {
        Self {
            weights: vec![0; nodes],
            tree: vec![0; nodes + 1],
            total: 0,
        }
    }

    /// Number of identifiers the index covers.
    #[must_use]
    #[rustfmt::skip]
    pub fn len(&self) -> usize { self.weights.len() }

    /// Returns `true` when the index covers no identifiers.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_empty(&self) -> bool { self.weights.is_empty() }

    /// Sum of all weights.
    #[must_use]
    #[rustfmt::skip]
    pub fn total(&self) -> usize { self.total }

    /// Current weight of `node`, zero when out of range.
    #[must_use]
    pub fn weight(&self, node: usize) -> usize {
        self.weights.get(node).copied().unwrap_or(0)
    }

    /// Adds one to the weight of `node`, growing the index when `node` lies
    /// beyond its current range.
    pub fn increment(&mut self, node: usize) {
        if node >= self.weights.len() {
            self.grow(node + 1);
        }
        self.add(node, 1);
    }

    /// Draws `count` distinct identifiers, each with probability proportional
    /// to its remaining weight. A drawn identifier loses its whole weight for
    /// the remaining draws of the call; weights are restored before
    /// returning.
    ///
    /// # Errors
    /// Returns [`GenerationError::InsufficientPool`] when fewer than `count`
    /// identifiers carry non-zero weight.
    pub fn sample_without_replacement<R>(&mut self, count: usize, rng: &mut R) -> Result<Vec<usize>>
    where
        R: Rng + ?Sized,
    {
        let mut drawn: Vec<(usize, usize)> = Vec::with_capacity(count);
        while drawn.len() < count {
            if self.total == 0 {
                break;
            }
            let target = rng.gen_range(0..self.total);
            let node = self.locate(target);
            let weight = self.weight(node);
            self.subtract(node, weight);
            drawn.push((node, weight));
        }
        for &(node, weight) in &drawn {
            self.add(node, weight);
        }
        if drawn.len() < count {
            return Err(GenerationError::InsufficientPool {
                requested: count,
                available: drawn.len(),
            });
        }
        Ok(drawn.into_iter().map(|(node, _)| node).collect())
    }

    fn add(&mut self, node: usize, delta: usize) {
        if let Some(weight) = self.weights.get_mut(node) {
            *weight += delta;
        }
        self.total += delta;
        let mut position = node + 1;
        while let Some(cell) = self.tree.get_mut(position) {
            *cell += delta;
            position += lowest_bit(position);
        }
    }

    fn subtract(&mut self, node: usize, delta: usize) {
        if let Some(weight) = self.weights.get_mut(node) {
            *weight -= delta;
        }
        self.total -= delta;
        let mut position = node + 1;
        while let Some(cell) = self.tree.get_mut(position) {
            *cell -= delta;
            position += lowest_bit(position);
        }
    }

    /// Finds the smallest identifier whose inclusive prefix sum exceeds
    /// `target`. Requires `target < total`.
    fn locate(&self, target: usize) -> usize {
        let mut position = 0;
        let mut remaining = target;
        let mut step = highest_power_of_two_at_most(self.weights.len());
        while step > 0 {
            let next = position + step;
            if let Some(&cell) = self.tree.get(next) {
                if cell <= remaining {
                    position = next;
                    remaining -= cell;
                }
            }
            step >>= 1;
        }
        position
    }

    fn grow(&mut self, nodes: usize) {
        let weights = std::mem::take(&mut self.weights);
        *self = Self::with_nodes(nodes);
        for (node, weight) in weights.into_iter().enumerate() {
            if weight > 0 {
                self.add(node, weight);
            }
        }
    }
}

const fn lowest_bit(position: usize) -> usize {
    position & position.wrapping_neg()
}

const fn highest_power_of_two_at_most(value: usize) -> usize {
    if value == 0 {
        0
    } else {
        1 << (usize::BITS - 1 - value.leading_zeros())
    }
}
