//! Persisted recipe snapshot and its translation into a [`RecipeGraph`].
//!
//! The snapshot is produced by an external ingestion step. Its JSON shape:
//!
//! ```text
//! {
//!   "element": ["Air", "Earth", ...],
//!   "recipe":  {"Mud": [["Earth", "Water"]], "Air": [["", ""]], ...},
//!   "tiering": {"Mud": 1, ...},
//!   "icon":    {"Mud": "icons/Mud.webp", ...}
//! }
//! ```
//!
//! A `["", ""]` pair marks a primordial element. Elements without a tier
//! entry default to tier 0.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::graph::{GraphError, RecipeGraph, RecipeGraphBuilder};
use crate::proof::canon::{canonical_json_bytes, CanonError};
use crate::proof::hash::{canonical_hash, ContentHash, DOMAIN_RECIPE_SNAPSHOT};

/// Deserialized recipe snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeSnapshot {
    /// Element names in declaration order. Ids follow this order.
    pub element: Vec<String>,
    /// Recipes per result element, in declaration order.
    #[serde(default)]
    pub recipe: BTreeMap<String, Vec<[String; 2]>>,
    #[serde(default)]
    pub tiering: BTreeMap<String, u32>,
    /// Icon paths. Not used by the engine.
    #[serde(default)]
    pub icon: BTreeMap<String, String>,
}

/// Failures while decoding a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("snapshot JSON is malformed: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Graph(#[from] GraphError),
}

impl RecipeSnapshot {
    /// Decode a snapshot from JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Json`] if the bytes are not a valid snapshot.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Content digest of the snapshot, for binding results to their input.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if canonicalization fails.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        let value = serde_json::json!({
            "element": self.element,
            "recipe": self.recipe,
            "tiering": self.tiering,
        });
        let bytes = canonical_json_bytes(&value)?;
        Ok(canonical_hash(DOMAIN_RECIPE_SNAPSHOT, &bytes))
    }

    /// Build the immutable graph.
    ///
    /// Recipes naming an element that is not declared are skipped with a
    /// warning, as are recipe lists for undeclared results.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError`] for duplicate names or violated base element
    /// invariants.
    pub fn to_graph(&self) -> Result<RecipeGraph, GraphError> {
        let mut builder = RecipeGraphBuilder::new();
        for name in &self.element {
            let tier = self.tiering.get(name).copied().unwrap_or(0);
            builder.element(name, tier)?;
        }

        for name in &self.element {
            let Some(recipes) = self.recipe.get(name) else {
                continue;
            };
            for [first, second] in recipes {
                if builder.resolve(first).is_none() || builder.resolve(second).is_none() {
                    tracing::warn!(
                        element = %name,
                        first = %first,
                        second = %second,
                        "skipping recipe with unknown ingredient"
                    );
                    continue;
                }
                builder.recipe(name, first, second)?;
            }
        }

        let graph = builder.build()?;
        tracing::debug!(elements = graph.len(), "recipe graph constructed");
        Ok(graph)
    }
}
