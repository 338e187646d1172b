#![expect(clippy::expect_used, reason = "tests require contextual panics")]
//! End-to-end generation scenarios through the public API.

mod common;

use common::{rng, seeded_generator};
use rstest::rstest;
use scalefree_core::{
    AdjacencyGraph, DegreeReservoir, GenerationError, GeneratorBuilder, MutableGraph,
    SamplingStrategy, attach, barabasi_albert, barabasi_albert_with_distribution, seed_graph,
};

#[rstest]
fn builder_defaults() {
    let builder = GeneratorBuilder::new();
    assert_eq!(builder.edges_per_node(), 2);
    assert_eq!(builder.node_count(), 100);
    assert_eq!(builder.sampling(), SamplingStrategy::Scan);
    assert_eq!(builder.rng_seed(), None);

    let generator = builder.build().expect("defaults valid");
    assert_eq!(generator.params().steps(), 97);
    let graph = generator.generate().expect("run must succeed");
    assert_eq!(graph.node_count(), 100);
}

#[rstest]
fn small_run_has_five_nodes_and_seven_edges() {
    let graph = barabasi_albert(2, 5, &mut rng(11)).expect("run must succeed");
    assert_eq!(graph.node_count(), 5);
    assert_eq!(graph.edge_count(), 7);
    // Seed triangle survives untouched.
    assert!(graph.contains_edge(0, 1));
    assert!(graph.contains_edge(0, 2));
    assert!(graph.contains_edge(1, 2));
    assert_eq!(graph.degree(3).map(|d| d >= 2), Some(true));
    assert_eq!(graph.degree(4), Some(2));
}

#[rstest]
#[case::zero_edges(0, 10)]
#[case::too_few_nodes(2, 3)]
#[case::no_growth(5, 6)]
fn invalid_parameters_are_rejected(#[case] m: usize, #[case] n: usize) {
    let err = GeneratorBuilder::new()
        .with_edges_per_node(m)
        .with_node_count(n)
        .build()
        .expect_err("builder must reject parameters");
    assert_eq!(
        err,
        GenerationError::InvalidParameter {
            edges_per_node: m,
            node_count: n,
        }
    );
    assert!(matches!(
        barabasi_albert(m, n, &mut rng(0)),
        Err(GenerationError::InvalidParameter { .. })
    ));
}

#[rstest]
#[case::scan(SamplingStrategy::Scan)]
#[case::indexed(SamplingStrategy::Indexed)]
fn same_seed_gives_same_graph(#[case] sampling: SamplingStrategy) {
    let first = seeded_generator(4, 300, sampling, 99)
        .generate()
        .expect("run must succeed");
    let second = seeded_generator(4, 300, sampling, 99)
        .generate()
        .expect("run must succeed");
    assert_eq!(first, second);
}

#[rstest]
#[case::scan(SamplingStrategy::Scan)]
#[case::indexed(SamplingStrategy::Indexed)]
fn every_node_has_at_least_m_edges(#[case] sampling: SamplingStrategy) {
    let m = 3;
    let graph = seeded_generator(m, 250, sampling, 5)
        .generate()
        .expect("run must succeed");
    assert!(graph.degrees().iter().all(|&degree| degree >= m));
    assert!(graph.edges().all(|(left, right)| left != right));
}

#[rstest]
fn hubs_emerge_in_large_graphs() {
    let (_, degrees) =
        barabasi_albert_with_distribution(2, 5_000, &mut rng(2024)).expect("run must succeed");
    // Preferential attachment produces degrees far beyond the uniform mean.
    assert!(degrees.max_degree() > 40, "max degree {}", degrees.max_degree());
    let distribution = degrees.degree_distribution();
    let at_minimum = distribution.get(&2).copied().unwrap_or_default();
    assert!(at_minimum > 1_500, "{at_minimum} nodes at degree 2");
}

#[rstest]
fn manual_steps_match_generator_shape() {
    let mut graph: AdjacencyGraph = seed_graph(2);
    let mut reservoir = DegreeReservoir::allocate(8, 2).expect("parameters must be valid");
    let mut source = rng(3);
    for step in 0..reservoir.params().steps() {
        let targets = attach(&mut graph, &mut reservoir, step, &mut source)
            .expect("step must succeed");
        assert_eq!(targets.len(), 2);
    }
    assert!(reservoir.is_full());
    assert_eq!(graph.node_count(), 8);
    assert_eq!(graph.edge_count(), 3 + 2 * 5);
    assert_eq!(reservoir.degrees().counts(), graph.degrees().as_slice());
}

#[cfg(feature = "petgraph")]
#[rstest]
fn generates_into_petgraph() {
    use petgraph::graph::UnGraph;

    let generator = seeded_generator(2, 40, SamplingStrategy::Indexed, 8);
    let graph: UnGraph<(), ()> = generator
        .generate_graph(&mut rng(8))
        .expect("run must succeed");
    assert_eq!(graph.node_count(), 40);
    assert_eq!(graph.edge_count(), 3 + 2 * 37);
}
