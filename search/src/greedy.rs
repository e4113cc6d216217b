//! Greedy single-path search: sequential DFS returning the first complete
//! derivation found.

use alchemist_kernel::graph::{ElementNode, RecipeGraph};

use crate::policy::SearchPolicyV1;
use crate::tree::PartialTree;

/// Depth-first search for one derivation of `node`.
///
/// Recipes are tried in declaration order; the first whose two sides both
/// resolve wins. Every call adds one to `visited`.
pub fn greedy_path(
    node: &ElementNode,
    graph: &RecipeGraph,
    policy: &SearchPolicyV1,
    visited: &mut u64,
) -> Option<PartialTree> {
    *visited += 1;

    if graph.is_base(node.id()) {
        return Some(PartialTree::leaf(node.id()));
    }
    if policy.is_excluded(node.name()) {
        return None;
    }

    for pair in node.recipes() {
        let [left, right] = pair.map(|id| &graph[id]);
        if left.tier() >= node.tier() || right.tier() >= node.tier() {
            continue;
        }
        let Some(left_tree) = greedy_path(left, graph, policy, visited) else {
            continue;
        };
        let Some(right_tree) = greedy_path(right, graph, policy, visited) else {
            continue;
        };
        return Some(PartialTree::combine(node.id(), &left_tree, &right_tree));
    }

    None
}
