//! Barabási–Albert preferential-attachment graph generation.
//!
//! A run seeds the complete graph on `m + 1` nodes and then adds one node at
//! a time, connecting each to `m` distinct existing nodes chosen with
//! probability proportional to their degree. Degrees are tracked in a
//! [`DegreeReservoir`], a multiset in which each node appears once per
//! incident edge endpoint, so a uniform draw from it is a degree-weighted
//! draw over nodes.
//!
//! The [`validate`] entry point repeats the construction while recording the
//! statistics needed to confirm that sampling really is degree-proportional.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod error;
mod generator;
mod graph;
mod histogram;
mod index;
mod params;
mod reservoir;
mod step;
#[cfg(test)]
mod test_utils;
mod validator;

pub use crate::{
    builder::GeneratorBuilder,
    error::{GenerationError, GenerationErrorCode, Result},
    generator::{Generator, barabasi_albert, barabasi_albert_with_distribution},
    graph::{AdjacencyGraph, MutableGraph, seed_graph},
    histogram::DegreeHistogram,
    index::DegreeIndex,
    params::ModelParams,
    reservoir::{DegreeReservoir, SamplingStrategy},
    step::attach,
    validator::{GraphCounts, StepRecord, ValidationReport, validate},
};
