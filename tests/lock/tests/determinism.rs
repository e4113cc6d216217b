//! Determinism lock tests: repeated searches produce byte-identical
//! canonical output, whatever the worker count.

use alchemist_search::{expand_paths, SearchPolicyV1};
use lock_tests::search_helpers::{lattice_graph, paths, reverse, starter_graph, SMALL_LATTICE};

// ---------------------------------------------------------------------------
// Reverse search
// ---------------------------------------------------------------------------

#[test]
fn reverse_search_determinism_inproc_n10() {
    let graph = starter_graph();
    let policy = SearchPolicyV1::default();

    let first = reverse(&graph, "House", &policy);
    let first_bytes = first.dag.to_canonical_json_bytes().unwrap();

    for _ in 1..10 {
        let other = reverse(&graph, "House", &policy);
        assert_eq!(
            first_bytes,
            other.dag.to_canonical_json_bytes().unwrap(),
            "CompactDagV1 bytes differ across runs"
        );
        assert_eq!(first.visited, other.visited);
        assert_eq!(first.iterations, other.iterations);
    }
}

#[test]
fn reverse_search_independent_of_worker_count() {
    let graph = lattice_graph(&SMALL_LATTICE);
    let apex = SMALL_LATTICE.apex();

    let baseline = reverse(
        &graph,
        &apex,
        &SearchPolicyV1 {
            workers: 1,
            ..SearchPolicyV1::default()
        },
    );
    for workers in [2, 3, 4, 8, 16] {
        let policy = SearchPolicyV1 {
            workers,
            ..SearchPolicyV1::default()
        };
        let other = reverse(&graph, &apex, &policy);
        assert_eq!(
            baseline.dag.digest().unwrap(),
            other.dag.digest().unwrap(),
            "digest differs with {workers} workers"
        );
        assert_eq!(baseline.visited, other.visited, "visited differs with {workers} workers");
    }
}

#[test]
fn capped_reverse_search_is_deterministic() {
    let graph = lattice_graph(&SMALL_LATTICE);
    let apex = SMALL_LATTICE.apex();
    let policy = SearchPolicyV1 {
        max_iterations: 7,
        ..SearchPolicyV1::default()
    };

    let first = reverse(&graph, &apex, &policy);
    assert!(first.warning().is_some());
    for _ in 0..5 {
        assert_eq!(reverse(&graph, &apex, &policy), first);
    }
}

// ---------------------------------------------------------------------------
// Expansion and path search
// ---------------------------------------------------------------------------

#[test]
fn expansion_is_deterministic() {
    let graph = starter_graph();
    let dag = reverse(&graph, "House", &SearchPolicyV1::default()).dag;
    let first = expand_paths(&dag, "House", 10);
    for _ in 0..5 {
        assert_eq!(expand_paths(&dag, "House", 10), first);
    }
}

#[test]
fn path_search_digests_repeat() {
    let graph = starter_graph();
    let digests = |count| -> Vec<String> {
        paths(&graph, "House", count)
            .paths
            .iter()
            .map(|p| p.digest().unwrap().as_str().to_string())
            .collect()
    };

    let first = digests(4);
    assert_eq!(first.len(), 3);
    for _ in 0..5 {
        assert_eq!(digests(4), first);
    }
}

#[test]
fn path_search_visits_repeat() {
    let graph = lattice_graph(&SMALL_LATTICE);
    let apex = SMALL_LATTICE.apex();
    let first = paths(&graph, &apex, 5);
    for _ in 0..3 {
        assert_eq!(paths(&graph, &apex, 5), first);
    }
}
