//! The degree reservoir: an append-only multiset of node identifiers in
//! which a node's multiplicity equals its current degree.
//!
//! Every edge `{u, v}` contributes one slot holding `u` and one holding `v`,
//! so drawing a slot uniformly at random picks a node with probability
//! proportional to its degree. The reservoir is allocated once with the exact
//! number of slots a run will write and then filled strictly in order.

use rand::Rng;
use tracing::warn;

use crate::{DegreeHistogram, DegreeIndex, GenerationError, ModelParams, Result};

/// How [`DegreeReservoir::sample_without_replacement`] draws targets.
///
/// Both strategies draw each target with probability proportional to its
/// remaining multiplicity and drop a drawn node entirely for the rest of the
/// call. They consume the random source differently, so a seed reproduces a
/// run only under the same strategy.
///
/// # Examples
/// ```
/// use scalefree_core::SamplingStrategy;
///
/// assert_eq!(SamplingStrategy::default(), SamplingStrategy::Scan);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SamplingStrategy {
    /// Copy the prefix, draw a slot uniformly, then filter out every copy of
    /// the drawn node. `O(prefix_len)` per draw.
    #[default]
    Scan,
    /// Maintain a [`DegreeIndex`] alongside the slots and draw through it.
    /// `O(log N)` per draw when sampling the full written prefix.
    Indexed,
}

/// Fixed-capacity, length-tracked reservoir of node identifiers.
///
/// # Examples
/// ```
/// use rand::{SeedableRng, rngs::SmallRng};
/// use scalefree_core::DegreeReservoir;
///
/// let reservoir = DegreeReservoir::allocate(5, 2)?;
/// assert_eq!(reservoir.capacity(), 14);
/// assert_eq!(reservoir.as_slice(), &[0, 0, 1, 1, 2, 2]);
///
/// let mut rng = SmallRng::seed_from_u64(1);
/// let targets = reservoir.sample_without_replacement(reservoir.len(), 2, &mut rng)?;
/// assert_eq!(targets.len(), 2);
/// assert_ne!(targets[0], targets[1]);
/// # Ok::<(), scalefree_core::GenerationError>(())
/// ```
#[derive(Clone, Debug)]
pub struct DegreeReservoir {
    params: ModelParams,
    slots: Vec<usize>,
    capacity: usize,
    index: Option<DegreeIndex>,
}

impl DegreeReservoir {
    /// Allocates a scan-sampled reservoir for a run ending with `node_count`
    /// nodes and seeds it with the clique on `edges_per_node + 1` nodes.
    ///
    /// # Errors
    /// Returns [`GenerationError::InvalidParameter`] when
    /// `edges_per_node == 0` or `node_count <= edges_per_node + 1`.
    pub fn allocate(node_count: usize, edges_per_node: usize) -> Result<Self> {
        let params = ModelParams::new(edges_per_node, node_count)?;
        Ok(Self::for_params(params, SamplingStrategy::Scan))
    }

    /// Allocates and seeds a reservoir for validated `params`, using
    /// `strategy` for subsequent sampling.
    #[must_use]
    pub fn for_params(params: ModelParams, strategy: SamplingStrategy) -> Self {
        let capacity = params.reservoir_capacity();
        let m = params.edges_per_node();
        let mut slots = Vec::with_capacity(capacity);
        for node in 0..params.seed_node_count() {
            slots.extend(std::iter::repeat_n(node, m));
        }
        let index = match strategy {
            SamplingStrategy::Scan => None,
            SamplingStrategy::Indexed => {
                let mut index = DegreeIndex::with_nodes(params.node_count());
                for &node in &slots {
                    index.increment(node);
                }
                Some(index)
            }
        };
        Self {
            params,
            slots,
            capacity,
            index,
        }
    }

    /// Returns the parameters this reservoir was sized for.
    #[must_use]
    #[rustfmt::skip]
    pub fn params(&self) -> ModelParams { self.params }

    /// Returns the sampling strategy chosen at allocation.
    #[must_use]
    pub fn strategy(&self) -> SamplingStrategy {
        if self.index.is_some() {
            SamplingStrategy::Indexed
        } else {
            SamplingStrategy::Scan
        }
    }

    /// Number of written slots (the used prefix).
    #[must_use]
    #[rustfmt::skip]
    pub fn len(&self) -> usize { self.slots.len() }

    /// Returns `true` when no slot has been written.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_empty(&self) -> bool { self.slots.is_empty() }

    /// Fixed capacity computed at allocation.
    #[must_use]
    #[rustfmt::skip]
    pub fn capacity(&self) -> usize { self.capacity }

    /// Returns `true` once every slot has been written.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.slots.len() == self.capacity
    }

    /// Returns the written slots. Unwritten capacity is never exposed.
    #[must_use]
    #[rustfmt::skip]
    pub fn as_slice(&self) -> &[usize] { &self.slots }

    /// Writes `value` at slot `offset`.
    ///
    /// # Errors
    /// Returns [`GenerationError::ReservoirOverflow`] when `offset` is not
    /// below the capacity and [`GenerationError::NonSequentialAppend`] when
    /// `offset` is not the next free slot.
    pub fn append(&mut self, offset: usize, value: usize) -> Result<()> {
        if offset >= self.capacity {
            return Err(GenerationError::ReservoirOverflow {
                offset,
                capacity: self.capacity,
            });
        }
        let expected = self.slots.len();
        if offset != expected {
            return Err(GenerationError::NonSequentialAppend { offset, expected });
        }
        self.slots.push(value);
        if let Some(index) = self.index.as_mut() {
            index.increment(value);
        }
        Ok(())
    }

    /// Draws `count` distinct node identifiers from the first `prefix_len`
    /// slots, in draw order.
    ///
    /// Each draw is uniform over the slots still in play; once a node is
    /// drawn every slot holding it leaves play. An indexed reservoir answers
    /// full-prefix requests from its [`DegreeIndex`] and falls back to the
    /// scan for shorter prefixes, which the index does not track.
    ///
    /// # Errors
    /// Returns [`GenerationError::PrefixOutOfRange`] when `prefix_len`
    /// exceeds the written slots and [`GenerationError::InsufficientPool`]
    /// when the prefix holds fewer than `count` distinct identifiers.
    pub fn sample_without_replacement<R>(
        &self,
        prefix_len: usize,
        count: usize,
        rng: &mut R,
    ) -> Result<Vec<usize>>
    where
        R: Rng + ?Sized,
    {
        let prefix = self.prefix(prefix_len)?;
        let result = match self.index.as_ref() {
            Some(index) if prefix_len == self.slots.len() => {
                index.clone().sample_without_replacement(count, rng)
            }
            _ => scan_sample(prefix, count, rng),
        };
        if let Err(GenerationError::InsufficientPool {
            requested,
            available,
        }) = &result
        {
            warn!(
                requested,
                available, prefix_len, "sampling pool too small for requested targets"
            );
        }
        result
    }

    /// Like [`Self::sample_without_replacement`] over the full written prefix,
    /// borrowing the index mutably instead of cloning it.
    ///
    /// # Errors
    /// Returns [`GenerationError::InsufficientPool`] when the written slots
    /// hold fewer than `count` distinct identifiers.
    pub(crate) fn sample_written<R>(&mut self, count: usize, rng: &mut R) -> Result<Vec<usize>>
    where
        R: Rng + ?Sized,
    {
        let result = match self.index.as_mut() {
            Some(index) => index.sample_without_replacement(count, rng),
            None => scan_sample(&self.slots, count, rng),
        };
        if let Err(GenerationError::InsufficientPool {
            requested,
            available,
        }) = &result
        {
            warn!(
                requested,
                available,
                prefix_len = self.slots.len(),
                "sampling pool too small for requested targets"
            );
        }
        result
    }

    /// Counts the identifiers in the first `prefix_len` slots; entry `v` is
    /// the degree of node `v` at the moment the prefix was complete.
    ///
    /// # Errors
    /// Returns [`GenerationError::PrefixOutOfRange`] when `prefix_len`
    /// exceeds the written slots.
    pub fn histogram(&self, prefix_len: usize) -> Result<DegreeHistogram> {
        Ok(DegreeHistogram::from_ids(
            self.prefix(prefix_len)?.iter().copied(),
        ))
    }

    /// Counts every written slot: the current degree of each node.
    #[must_use]
    pub fn degrees(&self) -> DegreeHistogram {
        DegreeHistogram::from_ids(self.slots.iter().copied())
    }

    fn prefix(&self, prefix_len: usize) -> Result<&[usize]> {
        self.slots
            .get(..prefix_len)
            .ok_or(GenerationError::PrefixOutOfRange {
                prefix_len,
                len: self.slots.len(),
            })
    }
}

fn scan_sample<R>(prefix: &[usize], count: usize, rng: &mut R) -> Result<Vec<usize>>
where
    R: Rng + ?Sized,
{
    let mut pool = prefix.to_vec();
    let mut drawn = Vec::with_capacity(count);
    while drawn.len() < count {
        if pool.is_empty() {
            return Err(GenerationError::InsufficientPool {
                requested: count,
                available: drawn.len(),
            });
        }
        let position = rng.gen_range(0..pool.len());
        let Some(&node) = pool.get(position) else {
            return Err(GenerationError::InsufficientPool {
                requested: count,
                available: drawn.len(),
            });
        };
        pool.retain(|&value| value != node);
        drawn.push(node);
    }
    Ok(drawn)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashSet;

    use proptest::prelude::*;
    use rand::{SeedableRng, rngs::SmallRng};
    use rstest::rstest;

    use crate::test_utils::suite_proptest_config;

    #[rstest]
    #[case(1, 3, vec![0, 1])]
    #[case(2, 5, vec![0, 0, 1, 1, 2, 2])]
    #[case(3, 6, vec![0, 0, 0, 1, 1, 1, 2, 2, 2, 3, 3, 3])]
    fn allocate_lays_out_seed_clique(
        #[case] m: usize,
        #[case] n: usize,
        #[case] expected: Vec<usize>,
    ) {
        let reservoir = DegreeReservoir::allocate(n, m).expect("parameters must be valid");
        assert_eq!(reservoir.as_slice(), expected.as_slice());
        assert_eq!(
            reservoir.capacity(),
            m * (m + 1) + 2 * m * (n - m - 1)
        );
        assert!(!reservoir.is_full());
    }

    #[rstest]
    #[case(3, 0)]
    #[case(3, 2)]
    #[case(2, 3)]
    fn allocate_rejects_invalid_parameters(#[case] n: usize, #[case] m: usize) {
        let err = DegreeReservoir::allocate(n, m).expect_err("allocation must fail");
        assert!(err.is_configuration_error());
    }

    #[test]
    fn append_is_sequential_and_capacity_checked() {
        let mut reservoir = DegreeReservoir::allocate(3, 1).expect("parameters must be valid");
        assert_eq!(reservoir.capacity(), 4);
        let err = reservoir.append(3, 2).expect_err("slot 2 is still free");
        assert_eq!(
            err,
            GenerationError::NonSequentialAppend {
                offset: 3,
                expected: 2,
            }
        );
        reservoir.append(2, 0).expect("next slot accepts writes");
        reservoir.append(3, 2).expect("last slot accepts writes");
        assert!(reservoir.is_full());
        let err = reservoir.append(4, 2).expect_err("reservoir is full");
        assert_eq!(
            err,
            GenerationError::ReservoirOverflow {
                offset: 4,
                capacity: 4,
            }
        );
        assert_eq!(reservoir.as_slice(), &[0, 1, 0, 2]);
    }

    #[test]
    fn sampling_rejects_prefix_beyond_written_slots() {
        let reservoir = DegreeReservoir::allocate(5, 2).expect("parameters must be valid");
        let mut rng = SmallRng::seed_from_u64(0);
        let err = reservoir
            .sample_without_replacement(7, 1, &mut rng)
            .expect_err("only six slots are written");
        assert_eq!(
            err,
            GenerationError::PrefixOutOfRange {
                prefix_len: 7,
                len: 6,
            }
        );
    }

    #[rstest]
    #[case::scan(SamplingStrategy::Scan)]
    #[case::indexed(SamplingStrategy::Indexed)]
    fn sampling_reports_insufficient_pool(#[case] strategy: SamplingStrategy) {
        let params = ModelParams::new(2, 6).expect("parameters must be valid");
        let reservoir = DegreeReservoir::for_params(params, strategy);
        let mut rng = SmallRng::seed_from_u64(11);
        let err = reservoir
            .sample_without_replacement(reservoir.len(), 4, &mut rng)
            .expect_err("the seed clique has three nodes");
        assert_eq!(
            err,
            GenerationError::InsufficientPool {
                requested: 4,
                available: 3,
            }
        );
    }

    #[test]
    fn short_prefix_only_offers_its_own_nodes() {
        let params = ModelParams::new(2, 6).expect("parameters must be valid");
        let reservoir = DegreeReservoir::for_params(params, SamplingStrategy::Indexed);
        let mut rng = SmallRng::seed_from_u64(5);
        for _ in 0..32 {
            let targets = reservoir
                .sample_without_replacement(4, 2, &mut rng)
                .expect("prefix holds nodes 0 and 1");
            let mut sorted = targets.clone();
            sorted.sort_unstable();
            assert_eq!(sorted, vec![0, 1]);
        }
    }

    #[test]
    fn scan_draws_proportionally_to_multiplicity() {
        // Node 0 holds 8 of 10 slots, so a single draw picks it ~80% of the time.
        let prefix = [0, 0, 0, 0, 0, 0, 0, 0, 1, 2];
        let mut rng = SmallRng::seed_from_u64(99);
        let trials = 10_000;
        let hits = (0..trials)
            .filter(|_| {
                scan_sample(&prefix, 1, &mut rng).expect("pool is non-empty") == vec![0]
            })
            .count();
        assert!((7_600..=8_400).contains(&hits), "hits = {hits}");
    }

    #[test]
    fn second_draw_excludes_all_copies_of_first() {
        // After drawing 0 the pool is {1, 2} with equal weight.
        let prefix = [0, 0, 0, 0, 0, 0, 0, 0, 1, 2];
        let mut rng = SmallRng::seed_from_u64(123);
        let mut second_is_one = 0;
        let mut first_is_zero = 0;
        for _ in 0..10_000 {
            let drawn = scan_sample(&prefix, 2, &mut rng).expect("pool holds three nodes");
            if drawn.first() == Some(&0) {
                first_is_zero += 1;
                if drawn.get(1) == Some(&1) {
                    second_is_one += 1;
                }
            }
        }
        let lower = first_is_zero * 45 / 100;
        let upper = first_is_zero * 55 / 100;
        assert!(
            (lower..=upper).contains(&second_is_one),
            "second_is_one = {second_is_one} of {first_is_zero}"
        );
    }

    #[rstest]
    #[case(&[4, 4, 4], 2, 1)]
    #[case(&[], 1, 0)]
    #[case(&[0, 1, 1, 2], 4, 3)]
    fn scan_never_returns_short_target_lists(
        #[case] prefix: &[usize],
        #[case] count: usize,
        #[case] available: usize,
    ) {
        let mut rng = SmallRng::seed_from_u64(6);
        assert_eq!(
            scan_sample(prefix, count, &mut rng),
            Err(GenerationError::InsufficientPool {
                requested: count,
                available,
            })
        );
    }

    fn prefix_strategy() -> impl Strategy<Value = (Vec<usize>, usize, u64)> {
        (prop::collection::vec(0usize..12, 1..64), 1usize..6, any::<u64>())
    }

    proptest! {
        #![proptest_config(suite_proptest_config(128))]

        #[test]
        fn sampled_targets_are_distinct_members_of_prefix(
            (ids, count, seed) in prefix_strategy()
        ) {
            let distinct: HashSet<usize> = ids.iter().copied().collect();
            let mut rng = SmallRng::seed_from_u64(seed);
            let scanned = scan_sample(&ids, count, &mut rng);

            let mut index = DegreeIndex::default();
            for &id in &ids {
                index.increment(id);
            }
            let indexed = index.sample_without_replacement(count, &mut rng);

            for result in [scanned, indexed] {
                if distinct.len() < count {
                    prop_assert_eq!(
                        result,
                        Err(GenerationError::InsufficientPool {
                            requested: count,
                            available: distinct.len(),
                        })
                    );
                } else {
                    let targets = result.expect("enough distinct identifiers");
                    let unique: HashSet<usize> = targets.iter().copied().collect();
                    prop_assert_eq!(targets.len(), count);
                    prop_assert_eq!(unique.len(), count);
                    prop_assert!(unique.is_subset(&distinct));
                }
            }
        }
    }
}
