//! Compact recipe DAG: the union of every step accepted by the reverse search.
//!
//! Wire shape (field names match the query response):
//!
//! ```text
//! {"nodes": [{"id": 5, "name": "Mud"}, ...],
//!  "recipes": [{"ingredients": ["Earth", "Water"], "result": "Mud", "step": 0}, ...]}
//! ```

use alchemist_kernel::graph::ElementNode;
use alchemist_kernel::proof::canon::{canonical_json_bytes, CanonError};
use alchemist_kernel::proof::hash::{canonical_hash, ContentHash, DOMAIN_COMPACT_DAG};
use serde::{Deserialize, Serialize};

/// An element referenced by a DAG, identified by its graph id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DagNode {
    pub id: u32,
    pub name: String,
}

impl From<&ElementNode> for DagNode {
    fn from(node: &ElementNode) -> Self {
        Self {
            id: node.id().get(),
            name: node.name().to_string(),
        }
    }
}

/// "`result` is produced from `ingredients` at search depth `step`".
///
/// Identity is `(result, unordered ingredients)`; `step` is metadata.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CraftingStep {
    pub ingredients: [String; 2],
    pub result: String,
    pub step: u32,
}

impl CraftingStep {
    /// `(result, smaller ingredient, larger ingredient)` by name.
    #[must_use]
    pub fn identity(&self) -> (&str, &str, &str) {
        let [a, b] = &self.ingredients;
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        (self.result.as_str(), low.as_str(), high.as_str())
    }

    /// Same result from the same unordered ingredients, at any depth.
    #[must_use]
    pub fn same_recipe(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompactDagV1 {
    pub nodes: Vec<DagNode>,
    #[serde(rename = "recipes")]
    pub steps: Vec<CraftingStep>,
}

impl CompactDagV1 {
    #[must_use]
    pub fn node_named(&self, name: &str) -> Option<&DagNode> {
        self.nodes.iter().find(|n| n.name == name)
    }

    /// Steps producing `result`, in discovery order.
    pub fn steps_for<'a>(&'a self, result: &'a str) -> impl Iterator<Item = &'a CraftingStep> {
        self.steps.iter().filter(move |s| s.result == result)
    }

    #[must_use]
    pub fn contains_step(&self, step: &CraftingStep) -> bool {
        self.steps.iter().any(|s| s.same_recipe(step))
    }

    /// Serialize to canonical JSON bytes (sorted keys, compact).
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if canonicalization fails.
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, CanonError> {
        canonical_json_bytes(&self.to_json_value())
    }

    /// Content digest over the canonical JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if canonicalization fails.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        Ok(canonical_hash(
            DOMAIN_COMPACT_DAG,
            &self.to_canonical_json_bytes()?,
        ))
    }

    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "nodes": self.nodes.iter().map(|n| serde_json::json!({"id": n.id, "name": n.name})).collect::<Vec<_>>(),
            "recipes": self.steps.iter().map(step_to_json).collect::<Vec<_>>(),
        })
    }
}

pub(crate) fn step_to_json(s: &CraftingStep) -> serde_json::Value {
    serde_json::json!({
        "ingredients": s.ingredients,
        "result": s.result,
        "step": s.step,
    })
}
