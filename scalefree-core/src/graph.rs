//! Graph abstractions consumed by the generator.
//!
//! The generator only needs to add nodes, add edges and query sizes, so it is
//! written against [`MutableGraph`]. [`AdjacencyGraph`] is the default
//! implementation; enabling the `petgraph` feature adds one for
//! `petgraph::graph::UnGraph<(), ()>`.

use std::collections::BTreeSet;

/// Mutable simple undirected graph with dense `usize` node identifiers.
///
/// # Examples
/// ```
/// use scalefree_core::{AdjacencyGraph, MutableGraph};
///
/// let mut graph = AdjacencyGraph::default();
/// graph.add_node(0);
/// graph.add_node(1);
/// assert!(graph.add_edge(0, 1));
/// assert_eq!(graph.node_count(), 2);
/// assert_eq!(graph.edge_count(), 1);
/// ```
pub trait MutableGraph {
    /// Inserts `node`. Identifiers are dense from zero, so any missing
    /// identifiers below `node` are created as well. Re-adding an existing
    /// node is a no-op.
    fn add_node(&mut self, node: usize);

    /// Inserts the undirected edge `{left, right}`, creating missing
    /// endpoints.
    ///
    /// Returns `false` when the edge was already present or would be a
    /// self-loop; the graph is left unchanged in that case.
    fn add_edge(&mut self, left: usize, right: usize) -> bool;

    /// Returns the number of nodes.
    fn node_count(&self) -> usize;

    /// Returns the number of undirected edges.
    fn edge_count(&self) -> usize;
}

/// Adjacency-set graph backing the default generation path.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AdjacencyGraph {
    adjacency: Vec<BTreeSet<usize>>,
    edge_count: usize,
}

impl AdjacencyGraph {
    /// Creates an empty graph with room for `nodes` adjacency sets.
    #[must_use]
    pub fn with_capacity(nodes: usize) -> Self {
        Self {
            adjacency: Vec::with_capacity(nodes),
            edge_count: 0,
        }
    }

    /// Returns the degree of `node`, or `None` when it does not exist.
    #[must_use]
    pub fn degree(&self, node: usize) -> Option<usize> {
        self.adjacency.get(node).map(BTreeSet::len)
    }

    /// Returns the degree of every node, indexed by identifier.
    #[must_use]
    pub fn degrees(&self) -> Vec<usize> {
        self.adjacency.iter().map(BTreeSet::len).collect()
    }

    /// Iterates the neighbours of `node` in ascending order.
    pub fn neighbours(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        self.adjacency
            .get(node)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    /// Returns whether `{left, right}` is an edge.
    #[must_use]
    pub fn contains_edge(&self, left: usize, right: usize) -> bool {
        self.adjacency
            .get(left)
            .is_some_and(|set| set.contains(&right))
    }

    /// Iterates every edge once as `(smaller, larger)` in ascending order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.adjacency.iter().enumerate().flat_map(|(node, set)| {
            set.range(node.saturating_add(1)..)
                .map(move |&other| (node, other))
        })
    }

    fn ensure_node(&mut self, node: usize) {
        if node >= self.adjacency.len() {
            self.adjacency.resize_with(node + 1, BTreeSet::new);
        }
    }
}

impl MutableGraph for AdjacencyGraph {
    fn add_node(&mut self, node: usize) {
        self.ensure_node(node);
    }

    fn add_edge(&mut self, left: usize, right: usize) -> bool {
        if left == right {
            return false;
        }
        self.ensure_node(left.max(right));
        let Some(left_set) = self.adjacency.get_mut(left) else {
            return false;
        };
        if !left_set.insert(right) {
            return false;
        }
        if let Some(right_set) = self.adjacency.get_mut(right) {
            right_set.insert(left);
        }
        self.edge_count += 1;
        true
    }

    fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    fn edge_count(&self) -> usize {
        self.edge_count
    }
}

#[cfg(feature = "petgraph")]
#[cfg_attr(docsrs, doc(cfg(feature = "petgraph")))]
impl MutableGraph for petgraph::graph::UnGraph<(), ()> {
    fn add_node(&mut self, node: usize) {
        while Self::node_count(self) <= node {
            Self::add_node(self, ());
        }
    }

    fn add_edge(&mut self, left: usize, right: usize) -> bool {
        use petgraph::graph::NodeIndex;

        if left == right {
            return false;
        }
        <Self as MutableGraph>::add_node(self, left.max(right));
        let (a, b) = (NodeIndex::new(left), NodeIndex::new(right));
        if self.find_edge(a, b).is_some() {
            return false;
        }
        Self::add_edge(self, a, b, ());
        true
    }

    fn node_count(&self) -> usize {
        Self::node_count(self)
    }

    fn edge_count(&self) -> usize {
        Self::edge_count(self)
    }
}

/// Builds the complete graph on `edges_per_node + 1` nodes used to seed a
/// run, inserting nodes `0..=m` and then every pair in ascending order.
///
/// # Examples
/// ```
/// use scalefree_core::{AdjacencyGraph, MutableGraph, seed_graph};
///
/// let seed: AdjacencyGraph = seed_graph(2);
/// assert_eq!(seed.node_count(), 3);
/// assert_eq!(seed.edge_count(), 3);
/// ```
#[must_use]
pub fn seed_graph<G: MutableGraph + Default>(edges_per_node: usize) -> G {
    let mut graph = G::default();
    populate_seed(&mut graph, edges_per_node);
    graph
}

pub(crate) fn populate_seed<G: MutableGraph + ?Sized>(graph: &mut G, edges_per_node: usize) {
    for node in 0..=edges_per_node {
        graph.add_node(node);
    }
    for left in 0..=edges_per_node {
        for right in (left + 1)..=edges_per_node {
            graph.add_edge(left, right);
        }
    }
}
