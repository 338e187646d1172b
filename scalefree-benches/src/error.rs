//! Benchmark setup error type.
//!
//! Lets setup code propagate failures with `?` instead of `.expect()`.

use scalefree_core::GenerationError;

/// Errors that may occur while preparing a benchmark.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Parameter validation, reservoir setup or a warm-up run failed.
    #[error("generation failed: {0}")]
    Generation(#[from] GenerationError),
}
