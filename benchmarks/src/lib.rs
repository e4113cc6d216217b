//! Shared helpers for alchemist benchmark suites.

use alchemist_harness::worlds::lattice::{lattice_snapshot, LatticeConfig};
use alchemist_kernel::graph::RecipeGraph;
use alchemist_search::{reverse_search, CompactDagV1, DedupLedger, SearchPolicyV1};

/// Lattice shapes the search benchmarks sweep over, smallest first.
pub const LATTICE_REGIMES: [(&str, LatticeConfig); 3] = [
    (
        "narrow",
        LatticeConfig {
            tiers: 3,
            width: 4,
            recipes: 2,
        },
    ),
    (
        "wide",
        LatticeConfig {
            tiers: 3,
            width: 16,
            recipes: 3,
        },
    ),
    (
        "deep",
        LatticeConfig {
            tiers: 5,
            width: 6,
            recipes: 2,
        },
    ),
];

/// A built lattice world and its top element.
pub struct BenchWorld {
    pub graph: RecipeGraph,
    pub apex: String,
}

/// Build the graph for `config`.
///
/// # Panics
///
/// Panics if the lattice does not build. Benchmark setup failures are fatal.
#[must_use]
pub fn prepare_world(config: &LatticeConfig) -> BenchWorld {
    BenchWorld {
        graph: lattice_snapshot(config).to_graph().unwrap(),
        apex: config.apex(),
    }
}

/// A policy whose iteration cap never truncates the benchmark regimes.
#[must_use]
pub fn uncapped_policy(workers: usize) -> SearchPolicyV1 {
    SearchPolicyV1 {
        workers,
        max_iterations: 1_000_000,
        ..SearchPolicyV1::default()
    }
}

/// Reverse search DAG for the world's apex, used as expansion input.
///
/// # Panics
///
/// Panics if the search fails.
#[must_use]
pub fn apex_dag(world: &BenchWorld) -> CompactDagV1 {
    let ledger = DedupLedger::new();
    reverse_search(
        world.graph.lookup(&world.apex).unwrap(),
        &world.graph,
        &ledger,
        &uncapped_policy(4),
    )
    .unwrap()
    .dag
}

/// Canonical byte size of a DAG, reported alongside timings.
///
/// # Panics
///
/// Panics if canonicalization fails.
#[must_use]
pub fn dag_bytes(dag: &CompactDagV1) -> usize {
    dag.to_canonical_json_bytes().unwrap().len()
}
