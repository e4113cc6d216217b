//! Harness lock tests: every query outcome maps to its status code and error
//! type, for a graph loaded from a snapshot file.

use alchemist_harness::query::{QueryEngine, QueryMode, RecipeQuery};
use alchemist_harness::snapshot::load_graph;
use alchemist_harness::worlds::starter::starter_snapshot;
use alchemist_search::SearchPolicyV1;

fn engine_from_file() -> QueryEngine {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("recipes.json");
    std::fs::write(&path, serde_json::to_vec(&starter_snapshot()).unwrap()).unwrap();
    QueryEngine::new(load_graph(&path).unwrap(), SearchPolicyV1::default())
}

// ---------------------------------------------------------------------------
// Status table
// ---------------------------------------------------------------------------

#[test]
fn status_table() {
    let engine = engine_from_file();
    let cases: &[(QueryMode, RecipeQuery, u16, Option<&str>)] = &[
        (QueryMode::Single, RecipeQuery::default(), 400, Some("missing_parameter")),
        (QueryMode::Multiple, RecipeQuery::new("Mud").with_max("0"), 400, Some("invalid_parameter")),
        (QueryMode::Multiple, RecipeQuery::new("Mud").with_max("x"), 400, Some("invalid_parameter")),
        (QueryMode::Single, RecipeQuery::new("Gold"), 404, Some("element_not_found")),
        (QueryMode::Multiple, RecipeQuery::new("Gold"), 404, Some("element_not_found")),
        (QueryMode::Single, RecipeQuery::new("Mud").with_algo("ids"), 400, Some("invalid_algorithm")),
        (QueryMode::Single, RecipeQuery::new("Water"), 422, Some("trivial_target")),
        (QueryMode::Single, RecipeQuery::new("Egg").with_algo("dfs"), 422, Some("unresolvable_target")),
        (QueryMode::Multiple, RecipeQuery::new("Shadow").with_algo("dfs"), 422, Some("unresolvable_target")),
        (QueryMode::Single, RecipeQuery::new("Mud"), 200, None),
        (QueryMode::Single, RecipeQuery::new("Water").with_algo("dfs"), 200, None),
        (QueryMode::Multiple, RecipeQuery::new("House").with_algo("Dfs"), 200, None),
        (QueryMode::Multiple, RecipeQuery::new("Shadow"), 200, None),
    ];

    for (mode, query, status, kind) in cases {
        let response = engine.handle(*mode, query);
        assert_eq!(response.status, *status, "{mode:?} {query:?}: {}", response.body);
        match kind {
            Some(kind) => {
                assert_eq!(response.body["error"], true);
                assert_eq!(response.body["type"], *kind, "{query:?}");
                assert!(response.body["message"].is_string());
            }
            None => assert_eq!(response.body["error"], false, "{query:?}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Validation order
// ---------------------------------------------------------------------------

#[test]
fn invalid_max_reported_before_unknown_element() {
    let engine = engine_from_file();
    let response = engine.handle(
        QueryMode::Multiple,
        &RecipeQuery::new("Gold").with_max("-1").with_algo("nope"),
    );
    assert_eq!(response.body["type"], "invalid_parameter");
}

#[test]
fn unknown_element_reported_before_bad_algorithm() {
    let engine = engine_from_file();
    let response = engine.handle(QueryMode::Single, &RecipeQuery::new("Gold").with_algo("nope"));
    assert_eq!(response.status, 404);
}

// ---------------------------------------------------------------------------
// Response bodies
// ---------------------------------------------------------------------------

#[test]
fn multiple_bfs_response_shape() {
    let engine = engine_from_file();
    let response = engine.handle(
        QueryMode::Multiple,
        &RecipeQuery::new("Wall").with_max("1"),
    );
    let data = &response.body["data"];
    assert_eq!(data["algo"], "bfs");
    assert_eq!(data["element"], "Wall");
    assert_eq!(data["visitedNodes"], 13);
    let paths = data["paths"].as_array().unwrap();
    assert_eq!(paths.len(), 1);
    assert_eq!(paths[0]["nodes"][0]["name"], "Wall");
    assert_eq!(paths[0]["recipes"].as_array().unwrap().len(), 4);
}

#[test]
fn multiple_dfs_response_shape() {
    let engine = engine_from_file();
    let response = engine.handle(
        QueryMode::Multiple,
        &RecipeQuery::new("Wall").with_algo("dfs").with_max("5"),
    );
    let data = &response.body["data"];
    assert_eq!(data["algo"], "dfs");
    assert_eq!(data["element"], "Wall");
    let paths = data["paths"].as_array().unwrap();
    assert_eq!(paths.len(), 2);
    assert_eq!(paths[0]["8"]["element"], "Wall");
    assert!(data["visitedNodes"].as_u64().unwrap() > 0);
}
