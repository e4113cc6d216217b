//! Shared helpers for running searches against the harness worlds.
//!
//! Every helper panics on failure; these are test-only invariants.

use alchemist_harness::worlds::lattice::{lattice_snapshot, LatticeConfig};
use alchemist_harness::worlds::starter::starter_snapshot;
use alchemist_kernel::graph::RecipeGraph;
use alchemist_search::{
    find_paths, reverse_search, CompactDagV1, DedupLedger, FoundPaths, PathResultV1,
    ReverseSearchResult, SearchPolicyV1,
};

/// The starter world's graph.
///
/// # Panics
///
/// Panics if the starter snapshot does not build.
#[must_use]
pub fn starter_graph() -> RecipeGraph {
    starter_snapshot().to_graph().unwrap()
}

/// A small lattice: four tiers of four elements, two recipes each.
pub const SMALL_LATTICE: LatticeConfig = LatticeConfig {
    tiers: 4,
    width: 4,
    recipes: 2,
};

/// # Panics
///
/// Panics if the lattice snapshot does not build.
#[must_use]
pub fn lattice_graph(config: &LatticeConfig) -> RecipeGraph {
    lattice_snapshot(config).to_graph().unwrap()
}

/// Reverse search for `target` with a fresh ledger.
///
/// # Panics
///
/// Panics if `target` is unknown or the search fails.
#[must_use]
pub fn reverse(graph: &RecipeGraph, target: &str, policy: &SearchPolicyV1) -> ReverseSearchResult {
    let ledger = DedupLedger::new();
    reverse_search(graph.lookup(target).unwrap(), graph, &ledger, policy).unwrap()
}

/// `find_paths` for `target`.
///
/// # Panics
///
/// Panics if `target` is unknown or the search fails.
#[must_use]
pub fn paths(graph: &RecipeGraph, target: &str, count: usize) -> FoundPaths {
    find_paths(
        graph.lookup(target).unwrap(),
        graph,
        count,
        &SearchPolicyV1::default(),
    )
    .unwrap()
}

/// `(result, first, second, step)` tuples in DAG order.
#[must_use]
pub fn step_tuples(dag: &CompactDagV1) -> Vec<(&str, &str, &str, u32)> {
    dag.steps
        .iter()
        .map(|s| {
            (
                s.result.as_str(),
                s.ingredients[0].as_str(),
                s.ingredients[1].as_str(),
                s.step,
            )
        })
        .collect()
}

/// Assert that every crafted entry of `path` uses strictly lower-tier
/// ingredients.
///
/// # Panics
///
/// Panics on the first violation.
pub fn assert_path_respects_tiers(graph: &RecipeGraph, path: &PathResultV1) {
    for entry in path.entries.values().filter(|e| !e.recipe.is_empty()) {
        let tier = graph.lookup(&entry.element).unwrap().tier();
        for id in &entry.recipe {
            let ingredient = &path.entries[id].element;
            let ingredient_tier = graph.lookup(ingredient).unwrap().tier();
            assert!(
                ingredient_tier < tier,
                "{} (tier {tier}) uses {ingredient} (tier {ingredient_tier})",
                entry.element
            );
        }
    }
}

/// Assert that the root of `path` is `target` and every base leaf is one of
/// the graph's base elements.
///
/// # Panics
///
/// Panics if the tree is malformed.
pub fn assert_path_is_complete(graph: &RecipeGraph, path: &PathResultV1, target: &str) {
    assert_eq!(path.root().unwrap().element, target);
    for (id, entry) in &path.entries {
        if entry.recipe.is_empty() {
            let node = graph.lookup(&entry.element).unwrap();
            assert!(graph.is_base(node.id()), "leaf {} is not base", entry.element);
        } else {
            assert_eq!(entry.recipe.len(), 2);
            assert!(entry.recipe.iter().all(|child| child < id));
        }
    }
}
