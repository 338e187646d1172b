//! Property-test run profile read from the environment.
//!
//! Lets CI scale every property suite through one set of variables instead
//! of editing case counts per suite. Malformed values are reported through
//! `tracing` and replaced by the suite's defaults.

use std::env;

use thiserror::Error;

/// Overrides the number of cases each property runs.
pub const PROGTEST_CASES_ENV_KEY: &str = "PROGTEST_CASES";
/// Runs each case in a forked subprocess when truthy.
pub const SCALEFREE_PBT_FORK_ENV_KEY: &str = "SCALEFREE_PBT_FORK";
/// Caps the node count of graphs generated by property suites.
pub const SCALEFREE_PBT_MAX_NODES_ENV_KEY: &str = "SCALEFREE_PBT_MAX_NODES";

/// Reasons an override was ignored.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileOverrideError {
    /// The value is not an unsigned integer.
    #[error("`{raw}` is not an unsigned integer")]
    NotAnInteger {
        /// Trimmed raw value.
        raw: String,
    },
    /// The value parsed but must be positive.
    #[error("value must be greater than zero")]
    Zero,
    /// The value is not a recognised boolean spelling.
    #[error("`{raw}` is not one of true/false/1/0/yes/no/on/off")]
    NotABoolean {
        /// Trimmed raw value.
        raw: String,
    },
}

/// Case count, forking and graph-size settings for one property suite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProptestRunProfile {
    cases: u32,
    fork: bool,
    max_nodes: Option<usize>,
}

impl ProptestRunProfile {
    /// Reads the profile, falling back to `default_cases` and `default_fork`
    /// for unset or malformed variables. `max_nodes` is unset unless
    /// `SCALEFREE_PBT_MAX_NODES` holds a positive integer.
    ///
    /// # Examples
    ///
    /// ```
    /// use scalefree_test_support::ci::property_test_profile::ProptestRunProfile;
    ///
    /// let profile = ProptestRunProfile::load(64, false);
    /// assert!(profile.cases() > 0);
    /// assert_eq!(profile.cap_nodes(10), profile.max_nodes().map_or(10, |cap| cap.min(10)));
    /// ```
    #[must_use]
    pub fn load(default_cases: u32, default_fork: bool) -> Self {
        Self {
            cases: read_override(PROGTEST_CASES_ENV_KEY, parse_positive::<u32>)
                .unwrap_or(default_cases),
            fork: read_override(SCALEFREE_PBT_FORK_ENV_KEY, parse_bool).unwrap_or(default_fork),
            max_nodes: read_override(SCALEFREE_PBT_MAX_NODES_ENV_KEY, parse_positive::<usize>),
        }
    }

    /// Number of cases to run per property.
    #[must_use]
    pub fn cases(&self) -> u32 {
        self.cases
    }

    /// Whether to run cases in forked subprocesses.
    #[must_use]
    pub fn fork(&self) -> bool {
        self.fork
    }

    /// Node-count ceiling requested by the environment, if any.
    #[must_use]
    pub fn max_nodes(&self) -> Option<usize> {
        self.max_nodes
    }

    /// Clamps a suite's preferred node count to the configured ceiling.
    #[must_use]
    pub fn cap_nodes(&self, preferred: usize) -> usize {
        self.max_nodes.map_or(preferred, |cap| cap.min(preferred))
    }
}

fn read_override<T>(
    key: &'static str,
    parse: impl Fn(&str) -> Result<T, ProfileOverrideError>,
) -> Option<T> {
    let raw = env::var(key).ok()?;
    parse(&raw)
        .inspect_err(|error| {
            tracing::warn!(
                env = key,
                raw = %raw,
                reason = %error,
                "ignoring property-test profile override",
            );
        })
        .ok()
}

fn parse_positive<T>(raw: &str) -> Result<T, ProfileOverrideError>
where
    T: std::str::FromStr + Default + PartialEq,
{
    let trimmed = raw.trim();
    let value = trimmed
        .parse::<T>()
        .map_err(|_| ProfileOverrideError::NotAnInteger {
            raw: trimmed.to_owned(),
        })?;
    if value == T::default() {
        return Err(ProfileOverrideError::Zero);
    }
    Ok(value)
}

fn parse_bool(raw: &str) -> Result<bool, ProfileOverrideError> {
    let trimmed = raw.trim();
    match trimmed.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ProfileOverrideError::NotABoolean {
            raw: trimmed.to_owned(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1", 1)]
    #[case(" 250 ", 250)]
    #[case("25000", 25_000)]
    fn positive_integers_parse(#[case] raw: &str, #[case] expected: u32) {
        assert_eq!(parse_positive::<u32>(raw), Ok(expected));
    }

    #[rstest]
    #[case("0", ProfileOverrideError::Zero)]
    #[case("-1", ProfileOverrideError::NotAnInteger { raw: "-1".to_owned() })]
    #[case(" abc", ProfileOverrideError::NotAnInteger { raw: "abc".to_owned() })]
    fn invalid_integers_are_rejected(#[case] raw: &str, #[case] expected: ProfileOverrideError) {
        assert_eq!(parse_positive::<usize>(raw), Err(expected));
    }

    #[rstest]
    #[case("true", true)]
    #[case("TRUE", true)]
    #[case("1", true)]
    #[case("yes", true)]
    #[case("on", true)]
    #[case("false", false)]
    #[case("0", false)]
    #[case("No", false)]
    #[case("off", false)]
    fn booleans_parse(#[case] raw: &str, #[case] expected: bool) {
        assert_eq!(parse_bool(raw), Ok(expected));
    }

    #[rstest]
    #[case("")]
    #[case("maybe")]
    #[case("2")]
    fn invalid_booleans_are_rejected(#[case] raw: &str) {
        assert!(matches!(
            parse_bool(raw),
            Err(ProfileOverrideError::NotABoolean { .. })
        ));
    }

    #[rstest]
    #[case(None, 500, 500)]
    #[case(Some(64), 500, 64)]
    #[case(Some(1_000), 500, 500)]
    fn cap_nodes_respects_ceiling(
        #[case] max_nodes: Option<usize>,
        #[case] preferred: usize,
        #[case] expected: usize,
    ) {
        let profile = ProptestRunProfile {
            cases: 1,
            fork: false,
            max_nodes,
        };
        assert_eq!(profile.cap_nodes(preferred), expected);
    }
}
