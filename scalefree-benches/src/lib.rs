//! Benchmark support crate for scalefree.
//!
//! Provides the parameter and error types shared by the Criterion
//! benchmarks for full generation runs and single sampling calls.

pub mod error;
pub mod params;
