//! Error types for the scalefree core library.
//!
//! Defines the error enum exposed by the public API, its stable error codes,
//! and a convenient result alias.

use std::fmt;

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Error produced while allocating a reservoir, sampling attachment targets,
/// or driving a generation run.
///
/// A run that fails part-way leaves its graph partially built; callers must
/// discard it.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum GenerationError {
    /// The `(edges_per_node, node_count)` combination cannot describe a
    /// Barabási–Albert run: `edges_per_node` must be at least 1 and
    /// `node_count` must exceed `edges_per_node + 1`.
    #[error(
        "invalid parameters: edges_per_node={edges_per_node}, node_count={node_count} \
         (require edges_per_node >= 1 and node_count > edges_per_node + 1)"
    )]
    InvalidParameter {
        /// Number of edges each new node attaches with (`m`).
        edges_per_node: usize,
        /// Final number of nodes requested (`N`).
        node_count: usize,
    },
    /// Fewer distinct node identifiers were available than attachment targets
    /// were requested.
    #[error("sampling pool holds {available} distinct nodes but {requested} were requested")]
    InsufficientPool {
        /// Number of distinct targets the caller asked for.
        requested: usize,
        /// Number of distinct identifiers present in the pool.
        available: usize,
    },
    /// An append would write past the reservoir's fixed capacity.
    #[error("reservoir slot {offset} exceeds capacity {capacity}")]
    ReservoirOverflow {
        /// Slot the caller attempted to write.
        offset: usize,
        /// Fixed capacity computed at allocation time.
        capacity: usize,
    },
    /// An append targeted a slot other than the next free one.
    #[error("reservoir append at slot {offset} but the next free slot is {expected}")]
    NonSequentialAppend {
        /// Slot the caller attempted to write.
        offset: usize,
        /// Next free slot in the reservoir.
        expected: usize,
    },
    /// Sampling was requested over more slots than have been written.
    #[error("sampling prefix of {prefix_len} slots exceeds the {len} written slots")]
    PrefixOutOfRange {
        /// Requested prefix length.
        prefix_len: usize,
        /// Number of slots written so far.
        len: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`GenerationError`] variants.
    enum GenerationErrorCode for GenerationError {
        /// The `(edges_per_node, node_count)` combination is invalid.
        InvalidParameter => InvalidParameter { .. } => "SCALEFREE_INVALID_PARAMETER",
        /// Too few distinct identifiers to draw the requested targets.
        InsufficientPool => InsufficientPool { .. } => "SCALEFREE_INSUFFICIENT_POOL",
        /// An append would exceed the reservoir capacity.
        ReservoirOverflow => ReservoirOverflow { .. } => "SCALEFREE_RESERVOIR_OVERFLOW",
        /// An append skipped or rewrote a slot.
        NonSequentialAppend => NonSequentialAppend { .. } => "SCALEFREE_NON_SEQUENTIAL_APPEND",
        /// Sampling prefix extends past the written slots.
        PrefixOutOfRange => PrefixOutOfRange { .. } => "SCALEFREE_PREFIX_OUT_OF_RANGE",
    }
}

impl GenerationError {
    /// Returns `true` when the error was raised before any mutation took
    /// place, so no partially built graph exists.
    ///
    /// # Examples
    /// ```
    /// use scalefree_core::GenerationError;
    ///
    /// let err = GenerationError::InvalidParameter { edges_per_node: 0, node_count: 4 };
    /// assert!(err.is_configuration_error());
    /// ```
    #[must_use]
    pub const fn is_configuration_error(&self) -> bool {
        matches!(self, Self::InvalidParameter { .. })
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, GenerationError>;
