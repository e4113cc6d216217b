//! Snapshot ingestion lock tests: graph construction from persisted recipe
//! data and the snapshot content digest.

use alchemist_harness::snapshot::{load_graph, load_snapshot, LoadError};
use alchemist_harness::worlds::starter::starter_snapshot;
use alchemist_kernel::graph::{GraphError, BASE_ELEMENT_NAMES};
use alchemist_kernel::snapshot::{RecipeSnapshot, SnapshotError};

const BASES: &str = r#""Air": [["", ""]], "Earth": [["", ""]], "Fire": [["", ""]], "Water": [["", ""]]"#;

fn snapshot(extra_elements: &str, extra_recipes: &str, tiering: &str) -> RecipeSnapshot {
    let json = format!(
        r#"{{
            "element": ["Air", "Earth", "Fire", "Water"{extra_elements}],
            "recipe": {{{BASES}{extra_recipes}}},
            "tiering": {{{tiering}}}
        }}"#
    );
    RecipeSnapshot::from_json_slice(json.as_bytes()).unwrap()
}

// ---------------------------------------------------------------------------
// Graph construction
// ---------------------------------------------------------------------------

#[test]
fn unknown_ingredient_recipes_are_skipped() {
    let graph = snapshot(
        r#", "Mud""#,
        r#", "Mud": [["Earth", "Water"], ["Earth", "Unobtainium"]]"#,
        r#""Mud": 1"#,
    )
    .to_graph()
    .unwrap();

    let mud = graph.lookup("Mud").unwrap();
    assert_eq!(mud.recipes().len(), 1);
    assert!(graph.lookup("Unobtainium").is_err());
}

#[test]
fn children_are_recorded_once() {
    let graph = snapshot(
        r#", "Mud""#,
        r#", "Mud": [["Earth", "Water"], ["Water", "Earth"]]"#,
        r#""Mud": 1"#,
    )
    .to_graph()
    .unwrap();

    let mud = graph.lookup("Mud").unwrap().id();
    assert_eq!(graph.lookup("Earth").unwrap().children(), [mud]);
    assert_eq!(graph.lookup("Water").unwrap().children(), [mud]);
}

#[test]
fn missing_tier_defaults_to_zero() {
    let graph = snapshot(r#", "Mystery""#, "", "").to_graph().unwrap();
    assert_eq!(graph.lookup("Mystery").unwrap().tier(), 0);
}

#[test]
fn duplicate_names_fail() {
    let err = snapshot(r#", "Mud", "Mud""#, "", "").to_graph().unwrap_err();
    assert_eq!(err, GraphError::DuplicateElement { name: "Mud".into() });
}

#[test]
fn base_elements_are_required() {
    let json = br#"{"element": ["Air", "Earth", "Fire"], "recipe": {}}"#;
    let err = RecipeSnapshot::from_json_slice(json)
        .unwrap()
        .to_graph()
        .unwrap_err();
    assert_eq!(
        err,
        GraphError::MissingBaseElement {
            name: "Water".into()
        }
    );
}

#[test]
fn base_elements_come_first() {
    let graph = starter_snapshot().to_graph().unwrap();
    let names: Vec<&str> = graph
        .base_elements()
        .iter()
        .map(|&id| graph[id].name())
        .collect();
    assert_eq!(names, BASE_ELEMENT_NAMES);
    assert!(graph.sentinel().is_sentinel());
}

// ---------------------------------------------------------------------------
// Snapshot digest
// ---------------------------------------------------------------------------

#[test]
fn digest_ignores_icons() {
    let a = starter_snapshot();
    let mut b = a.clone();
    b.icon.clear();
    assert_eq!(a.digest().unwrap(), b.digest().unwrap());

    b.tiering.insert("Mud".into(), 2);
    assert_ne!(a.digest().unwrap(), b.digest().unwrap());
}

// ---------------------------------------------------------------------------
// Files
// ---------------------------------------------------------------------------

#[test]
fn file_round_trip_preserves_digest() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("recipes.json");
    let original = starter_snapshot();
    std::fs::write(&path, serde_json::to_vec_pretty(&original).unwrap()).unwrap();

    let loaded = load_snapshot(&path).unwrap();
    assert_eq!(loaded.digest().unwrap(), original.digest().unwrap());
}

#[test]
fn graph_errors_surface_through_the_loader() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("recipes.json");
    std::fs::write(&path, br#"{"element": ["Air", "Air"]}"#).unwrap();

    let err = load_graph(&path).unwrap_err();
    assert!(
        matches!(
            err,
            LoadError::Snapshot(SnapshotError::Graph(GraphError::DuplicateElement { .. }))
        ),
        "{err:?}"
    );
}
