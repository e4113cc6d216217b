//! Typed search errors.
//!
//! `SearchError` covers pre-flight failures (invalid policy, trivial or
//! unknown target) and the caller-visible "no derivation exists" outcome.
//! Failed branches inside a search never surface here: they simply report
//! exhaustion to their caller. [`SearchError::StepLimitExceeded`] is never
//! returned as `Err`; it is attached to a partial result via
//! [`crate::frontier::ReverseSearchResult::warning`].

use alchemist_kernel::graph::GraphError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// The target is already a base element; there is nothing to derive.
    #[error("`{name}` is a base element, nothing to derive")]
    TrivialTarget { name: String },

    /// The target is excluded, or every recipe chain dead-ends.
    #[error("`{name}` cannot be derived from the base elements")]
    UnresolvableTarget { name: String },

    /// The reverse search hit its iteration cap and returned a partial result.
    #[error("iteration cap reached ({iterations} iterations, cap {cap}); result is partial")]
    StepLimitExceeded { cap: u64, iterations: u64 },

    /// The target name is not in the graph.
    #[error("element `{name}` not found")]
    NotFound { name: String },

    /// A path count of zero was requested.
    #[error("requested path count must be at least 1")]
    InvalidCount,

    /// The policy failed validation.
    #[error("invalid search policy: {detail}")]
    InvalidPolicy { detail: String },

    /// Any other graph failure.
    #[error(transparent)]
    Graph(GraphError),

    /// The reverse search worker pool could not be started.
    #[error("could not start worker pool: {detail}")]
    WorkerPool { detail: String },
}

impl From<GraphError> for SearchError {
    fn from(err: GraphError) -> Self {
        match err {
            GraphError::UnknownElement { name } => Self::NotFound { name },
            GraphError::UnknownId { id } => Self::NotFound {
                name: format!("#{id}"),
            },
            other => Self::Graph(other),
        }
    }
}
