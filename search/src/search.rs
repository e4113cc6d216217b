//! `find_paths`: concrete derivation trees straight from the graph.

use alchemist_kernel::graph::{ElementNode, RecipeGraph};

use crate::cooperative::cooperative_paths;
use crate::error::SearchError;
use crate::greedy::greedy_path;
use crate::policy::SearchPolicyV1;
use crate::tree::PathResultV1;

/// Outcome of [`find_paths`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundPaths {
    /// Structurally distinct trees, at most the requested count.
    pub paths: Vec<PathResultV1>,
    /// Search calls (greedy) or tasks started (cooperative).
    pub visited: u64,
}

/// Find up to `count` derivation trees for `target`.
///
/// `count == 1` runs the greedy search; larger counts run the cooperative
/// enumerator. The first tree is the same in both modes.
///
/// # Errors
///
/// - [`SearchError::InvalidCount`] if `count` is zero.
/// - [`SearchError::InvalidPolicy`] if the policy fails validation.
/// - [`SearchError::UnresolvableTarget`] if no derivation exists.
pub fn find_paths(
    target: &ElementNode,
    graph: &RecipeGraph,
    count: usize,
    policy: &SearchPolicyV1,
) -> Result<FoundPaths, SearchError> {
    if count == 0 {
        return Err(SearchError::InvalidCount);
    }
    policy.validate()?;

    let (paths, visited) = if count == 1 {
        let mut visited = 0;
        let tree = greedy_path(target, graph, policy, &mut visited);
        let paths = tree.map(|t| t.to_path_result(graph)).into_iter().collect();
        (paths, visited)
    } else {
        cooperative_paths(target, graph, count, policy)
    };

    if paths.is_empty() {
        return Err(SearchError::UnresolvableTarget {
            name: target.name().to_string(),
        });
    }
    Ok(FoundPaths { paths, visited })
}
