//! Materialized derivation trees.
//!
//! A [`PartialTree`] is the working form owned by a search task: a flat list
//! of steps where every composite step points at the local indices of its two
//! ingredient steps. Children are laid out first and the node's own step
//! last, so the root is always the final entry.
//!
//! [`PathResultV1`] is the frozen, serializable form:
//!
//! ```text
//! {"0": {"element": "Earth", "recipe": []},
//!  "1": {"element": "Water", "recipe": []},
//!  "2": {"element": "Mud",   "recipe": [0, 1]}}
//! ```

use std::collections::BTreeMap;

use alchemist_kernel::graph::{ElementId, RecipeGraph};
use alchemist_kernel::proof::canon::{canonical_json_bytes, CanonError};
use alchemist_kernel::proof::hash::{canonical_hash, ContentHash, DOMAIN_PATH_RESULT};
use serde::{Deserialize, Serialize};

/// How a tree step's element is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Composition {
    /// Base element; no ingredients.
    Leaf,
    /// Crafted from the steps at these local indices.
    Craft([usize; 2]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeStep {
    pub element: ElementId,
    pub composition: Composition,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialTree {
    steps: Vec<TreeStep>,
}

impl PartialTree {
    #[must_use]
    pub fn leaf(element: ElementId) -> Self {
        Self {
            steps: vec![TreeStep {
                element,
                composition: Composition::Leaf,
            }],
        }
    }

    /// `left ++ right ++ [element from (root of left, root of right)]`.
    ///
    /// Both subtrees must be non-empty.
    #[must_use]
    pub fn combine(element: ElementId, left: &Self, right: &Self) -> Self {
        let offset = left.steps.len();
        let mut steps = Vec::with_capacity(offset + right.steps.len() + 1);
        steps.extend_from_slice(&left.steps);
        steps.extend(right.steps.iter().map(|s| TreeStep {
            element: s.element,
            composition: match s.composition {
                Composition::Leaf => Composition::Leaf,
                Composition::Craft([a, b]) => Composition::Craft([a + offset, b + offset]),
            },
        }));
        steps.push(TreeStep {
            element,
            composition: Composition::Craft([offset - 1, steps.len() - 1]),
        });
        Self { steps }
    }

    #[must_use]
    pub fn steps(&self) -> &[TreeStep] {
        &self.steps
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The element at the root (last step), if any.
    #[must_use]
    pub fn root(&self) -> Option<ElementId> {
        self.steps.last().map(|s| s.element)
    }

    /// Sorted multiset of `(element, unordered ingredient elements)`.
    ///
    /// Two trees with equal signatures use the same crafting steps the same
    /// number of times, whatever their layout.
    #[must_use]
    pub fn step_signature(&self) -> Vec<(ElementId, Option<(ElementId, ElementId)>)> {
        let mut signature: Vec<_> = self
            .steps
            .iter()
            .map(|s| {
                let ingredients = match s.composition {
                    Composition::Leaf => None,
                    Composition::Craft([a, b]) => {
                        let (a, b) = (self.steps[a].element, self.steps[b].element);
                        Some(if a <= b { (a, b) } else { (b, a) })
                    }
                };
                (s.element, ingredients)
            })
            .collect();
        signature.sort_unstable();
        signature
    }

    /// Freeze into a [`PathResultV1`], resolving element names in `graph`.
    #[must_use]
    pub fn to_path_result(&self, graph: &RecipeGraph) -> PathResultV1 {
        let entries = self
            .steps
            .iter()
            .enumerate()
            .map(|(i, s)| {
                let recipe = match s.composition {
                    Composition::Leaf => Vec::new(),
                    Composition::Craft(children) => children.to_vec(),
                };
                let entry = PathEntry {
                    element: graph
                        .node(s.element)
                        .map_or_else(String::new, |n| n.name().to_string()),
                    recipe,
                };
                (i, entry)
            })
            .collect();
        PathResultV1 { entries }
    }
}

/// One entry of a materialized tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathEntry {
    pub element: String,
    /// Local ids of the two ingredient entries; empty for base elements.
    pub recipe: Vec<usize>,
}

/// A complete derivation tree, keyed by local id. The root has the largest id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PathResultV1 {
    pub entries: BTreeMap<usize, PathEntry>,
}

impl PathResultV1 {
    #[must_use]
    pub fn root(&self) -> Option<&PathEntry> {
        self.entries.values().next_back()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names of the composite entries, in id order.
    pub fn crafted(&self) -> impl Iterator<Item = &str> {
        self.entries
            .values()
            .filter(|e| !e.recipe.is_empty())
            .map(|e| e.element.as_str())
    }

    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        let map: serde_json::Map<String, serde_json::Value> = self
            .entries
            .iter()
            .map(|(id, e)| {
                (
                    id.to_string(),
                    serde_json::json!({"element": e.element, "recipe": e.recipe}),
                )
            })
            .collect();
        serde_json::Value::Object(map)
    }

    /// # Errors
    ///
    /// Returns [`CanonError`] if canonicalization fails.
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, CanonError> {
        canonical_json_bytes(&self.to_json_value())
    }

    /// # Errors
    ///
    /// Returns [`CanonError`] if canonicalization fails.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        Ok(canonical_hash(
            DOMAIN_PATH_RESULT,
            &self.to_canonical_json_bytes()?,
        ))
    }
}
