//! Alchemist Search: derivation search over an immutable recipe graph.
//!
//! This crate depends only on `alchemist_kernel`. It never performs I/O; it
//! consumes a finished [`RecipeGraph`] and returns result values.
//!
//! # Crate dependency graph
//!
//! ```text
//! alchemist_kernel  ←  alchemist_search  ←  alchemist_harness
//! (graph, hashing)     (engine)             (queries, snapshots, CLI)
//! ```
//!
//! # Search modes
//!
//! - [`reverse_search`]: level-synchronous backward BFS on a worker pool,
//!   producing a [`CompactDagV1`] of every accepted recipe.
//! - [`expand_paths`]: memoized combinator turning a compact DAG into up to
//!   `max` materialized trees.
//! - [`find_paths`]: one tree by greedy DFS (`count == 1`) or up to `count`
//!   distinct trees from cooperating per-node search tasks.
//!
//! [`RecipeGraph`]: alchemist_kernel::graph::RecipeGraph

#![forbid(unsafe_code)]

pub mod ancestry;
pub mod cooperative;
pub mod dag;
pub mod error;
pub mod expand;
pub mod frontier;
pub mod greedy;
pub mod ledger;
pub mod policy;
pub mod search;
pub mod tree;

#[cfg(test)]
pub(crate) mod testkit;

pub use dag::{CompactDagV1, CraftingStep, DagNode};
pub use error::SearchError;
pub use expand::{expand_paths, ExpandedPath};
pub use frontier::{reverse_search, ReverseSearchResult, TerminationReasonV1};
pub use ledger::DedupLedger;
pub use policy::SearchPolicyV1;
pub use search::{find_paths, FoundPaths};
pub use tree::{PathEntry, PathResultV1};
