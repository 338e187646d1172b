//! Per-identifier occurrence counts.
//!
//! Counting the identifiers held in a degree reservoir yields each node's
//! degree, so the same histogram serves the generator's distribution output
//! and the validator's per-step diagnostics.

use std::collections::BTreeMap;

/// Occurrence count per node identifier, indexed densely from zero.
///
/// Identifiers below the largest observed one that never occur count as
/// zero, so `len()` is `max_id + 1`.
///
/// # Examples
/// ```
/// use scalefree_core::DegreeHistogram;
///
/// let histogram = DegreeHistogram::from_ids([0, 0, 1, 2, 2, 2]);
/// assert_eq!(histogram.count(2), 3);
/// assert_eq!(histogram.sum(), 6);
/// assert_eq!(histogram.sum_of_squares(), 14);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DegreeHistogram {
    counts: Vec<usize>,
}

impl DegreeHistogram {
    /// Counts every identifier yielded by `ids`.
    #[must_use]
    pub fn from_ids<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        let mut counts = Vec::new();
        for id in ids {
            if id >= counts.len() {
                counts.resize(id + 1, 0);
            }
            if let Some(slot) = counts.get_mut(id) {
                *slot += 1;
            }
        }
        Self { counts }
    }

    /// Wraps precomputed counts indexed by identifier.
    #[must_use]
    pub fn from_counts(counts: Vec<usize>) -> Self {
        Self { counts }
    }

    /// Returns the count recorded for `id`, zero when it never occurred.
    #[must_use]
    pub fn count(&self, id: usize) -> usize {
        self.counts.get(id).copied().unwrap_or(0)
    }

    /// Returns the counts indexed by identifier.
    #[must_use]
    #[rustfmt::skip]
    pub fn counts(&self) -> &[usize] { &self.counts }

    /// Number of identifier slots (`max_id + 1`, or zero when empty).
    #[must_use]
    #[rustfmt::skip]
    pub fn len(&self) -> usize { self.counts.len() }

    /// Returns `true` when nothing was counted.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_empty(&self) -> bool { self.counts.is_empty() }

    /// Total number of occurrences.
    #[must_use]
    pub fn sum(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Sum of squared counts.
    #[must_use]
    pub fn sum_of_squares(&self) -> usize {
        self.counts.iter().map(|&count| count * count).sum()
    }

    /// Largest count, zero when empty.
    #[must_use]
    pub fn max_degree(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// Mean count over the identifier slots, `None` when empty.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        clippy::float_arithmetic,
        reason = "diagnostic statistic; counts stay far below 2^52"
    )]
    pub fn mean(&self) -> Option<f64> {
        if self.counts.is_empty() {
            return None;
        }
        Some(self.sum() as f64 / self.counts.len() as f64)
    }

    /// Number of identifiers per count value (`k -> n_k`), skipping zero
    /// counts. This is the degree distribution whose tail the
    /// Barabási–Albert model predicts to follow a power law.
    ///
    /// # Examples
    /// ```
    /// use scalefree_core::DegreeHistogram;
    ///
    /// let histogram = DegreeHistogram::from_counts(vec![2, 3, 2, 0]);
    /// let distribution = histogram.degree_distribution();
    /// assert_eq!(distribution.get(&2), Some(&2));
    /// assert_eq!(distribution.get(&3), Some(&1));
    /// assert_eq!(distribution.get(&0), None);
    /// ```
    #[must_use]
    pub fn degree_distribution(&self) -> BTreeMap<usize, usize> {
        let mut distribution = BTreeMap::new();
        for &count in self.counts.iter().filter(|&&count| count > 0) {
            *distribution.entry(count).or_insert(0) += 1;
        }
        distribution
    }

    /// Iterates `(id, count)` pairs in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.counts.iter().copied().enumerate()
    }
}

impl FromIterator<usize> for DegreeHistogram {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self::from_ids(iter)
    }
}
