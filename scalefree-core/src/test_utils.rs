//! Shared test utilities for `scalefree-core`.

use proptest::test_runner::Config as ProptestConfig;
use scalefree_test_support::ci::property_test_profile::ProptestRunProfile;

/// Builds a standard proptest configuration from the shared CI profile.
///
/// This keeps property suites aligned on the same `PROGTEST_CASES` and
/// `SCALEFREE_PBT_FORK` interpretation.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// Growth budget for generated graphs, clamped by `SCALEFREE_PBT_MAX_NODES`
/// and never below one step.
#[must_use]
pub(crate) fn suite_node_budget(preferred: usize) -> usize {
    ProptestRunProfile::load(1, false)
        .cap_nodes(preferred)
        .max(1)
}
