//! Immutable element/recipe graph.
//!
//! Nodes live in an arena indexed by [`ElementId`]. Id 0 is the sentinel
//! element (empty name) used to mark primordial recipes: a recipe `[0, 0]`
//! means "obtainable with no ingredients". Real elements start at id 1.
//!
//! The graph is append-only during construction ([`RecipeGraphBuilder`]) and
//! read-only afterwards, so it can be shared by reference across threads
//! without synchronization.

use std::collections::HashMap;
use std::ops::Index;

/// Id of the sentinel element.
pub const SENTINEL_ID: ElementId = ElementId(0);

/// Names of the four designated base elements, in graph order.
pub const BASE_ELEMENT_NAMES: [&str; 4] = ["Air", "Earth", "Fire", "Water"];

/// Dense, stable element identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u32);

impl ElementId {
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Arena index of this id.
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An ordered pair of ingredient ids, as declared by the recipe data.
pub type RecipePair = [ElementId; 2];

/// The primordial recipe marker.
pub const PRIMORDIAL_RECIPE: RecipePair = [SENTINEL_ID, SENTINEL_ID];

/// Unordered identity of a recipe pair: the two ids, smaller first.
#[must_use]
pub fn unordered_pair(pair: RecipePair) -> (ElementId, ElementId) {
    if pair[0] <= pair[1] {
        (pair[0], pair[1])
    } else {
        (pair[1], pair[0])
    }
}

/// A node of the recipe graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementNode {
    id: ElementId,
    name: String,
    tier: u32,
    recipes: Vec<RecipePair>,
    children: Vec<ElementId>,
}

impl ElementNode {
    #[must_use]
    pub fn id(&self) -> ElementId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Tier rank. Base elements are tier 0.
    #[must_use]
    pub fn tier(&self) -> u32 {
        self.tier
    }

    /// Recipes producing this element, in declaration order.
    #[must_use]
    pub fn recipes(&self) -> &[RecipePair] {
        &self.recipes
    }

    /// Elements that list this element as an ingredient.
    #[must_use]
    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    #[must_use]
    pub fn is_sentinel(&self) -> bool {
        self.id == SENTINEL_ID
    }

    /// Whether any recipe is the primordial marker.
    #[must_use]
    pub fn has_primordial_recipe(&self) -> bool {
        self.recipes.contains(&PRIMORDIAL_RECIPE)
    }

    /// No way to craft this element from ingredients: either no recipe at
    /// all, or it is only marked as primordial.
    #[must_use]
    pub fn has_no_recipe(&self) -> bool {
        self.recipes.is_empty() || self.has_primordial_recipe()
    }
}

/// Graph construction and lookup failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("base element `{name}` is missing from the recipe data")]
    MissingBaseElement { name: String },

    #[error("element `{name}` is declared more than once")]
    DuplicateElement { name: String },

    #[error("element `{name}` not found")]
    UnknownElement { name: String },

    #[error("element id {id} not found")]
    UnknownId { id: u32 },

    #[error("base element `{name}` violates the base invariant: {detail}")]
    BaseElementInvariant { name: String, detail: String },
}

/// The set of all elements plus the distinguished base elements.
#[derive(Debug, Clone)]
pub struct RecipeGraph {
    elements: Vec<ElementNode>,
    base_elements: Vec<ElementId>,
    by_name: HashMap<String, ElementId>,
}

impl RecipeGraph {
    /// Number of real elements (the sentinel is not counted).
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len() - 1
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The sentinel element.
    #[must_use]
    pub fn sentinel(&self) -> &ElementNode {
        &self.elements[SENTINEL_ID.index()]
    }

    /// All real elements in id order.
    pub fn elements(&self) -> impl Iterator<Item = &ElementNode> {
        self.elements.iter().skip(1)
    }

    #[must_use]
    pub fn base_elements(&self) -> &[ElementId] {
        &self.base_elements
    }

    #[must_use]
    pub fn is_base(&self, id: ElementId) -> bool {
        self.base_elements.contains(&id)
    }

    #[must_use]
    pub fn node(&self, id: ElementId) -> Option<&ElementNode> {
        self.elements.get(id.index())
    }

    /// Look up an element by id.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownId`] if the id is outside the arena.
    pub fn get(&self, id: ElementId) -> Result<&ElementNode, GraphError> {
        self.node(id).ok_or(GraphError::UnknownId { id: id.get() })
    }

    /// Look up a real element by name. The sentinel's empty name is not
    /// resolvable.
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&ElementNode> {
        if name.is_empty() {
            return None;
        }
        self.by_name.get(name).map(|id| &self.elements[id.index()])
    }

    /// Look up a real element by name.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownElement`] if no element has that name.
    pub fn lookup(&self, name: &str) -> Result<&ElementNode, GraphError> {
        self.by_name(name).ok_or_else(|| GraphError::UnknownElement {
            name: name.to_string(),
        })
    }
}

/// Indexing by id. Ids taken from recipe pairs of the same graph are always
/// valid; foreign ids panic.
impl Index<ElementId> for RecipeGraph {
    type Output = ElementNode;

    fn index(&self, id: ElementId) -> &ElementNode {
        &self.elements[id.index()]
    }
}

/// Incremental graph construction.
///
/// Elements are assigned dense ids in insertion order starting at 1.
/// Recipes reference elements by name; the empty name resolves to the
/// sentinel.
#[derive(Debug)]
pub struct RecipeGraphBuilder {
    elements: Vec<ElementNode>,
    by_name: HashMap<String, ElementId>,
}

impl RecipeGraphBuilder {
    #[must_use]
    pub fn new() -> Self {
        let sentinel = ElementNode {
            id: SENTINEL_ID,
            name: String::new(),
            tier: 0,
            recipes: Vec::new(),
            children: Vec::new(),
        };
        let mut by_name = HashMap::new();
        by_name.insert(String::new(), SENTINEL_ID);
        Self {
            elements: vec![sentinel],
            by_name,
        }
    }

    /// Declare an element.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DuplicateElement`] if the name is already taken
    /// (including the sentinel's empty name).
    pub fn element(&mut self, name: &str, tier: u32) -> Result<ElementId, GraphError> {
        if self.by_name.contains_key(name) {
            return Err(GraphError::DuplicateElement {
                name: name.to_string(),
            });
        }
        #[allow(clippy::cast_possible_truncation)]
        let id = ElementId(self.elements.len() as u32);
        self.elements.push(ElementNode {
            id,
            name: name.to_string(),
            tier,
            recipes: Vec::new(),
            children: Vec::new(),
        });
        self.by_name.insert(name.to_string(), id);
        Ok(id)
    }

    /// Resolve a declared name (the empty name is the sentinel).
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<ElementId> {
        self.by_name.get(name).copied()
    }

    /// Append a recipe `first + second -> result` and register `result` as a
    /// child of both ingredients (once).
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownElement`] naming the first unresolvable
    /// element.
    pub fn recipe(&mut self, result: &str, first: &str, second: &str) -> Result<(), GraphError> {
        let unknown = |name: &str| GraphError::UnknownElement {
            name: name.to_string(),
        };
        let result_id = self.resolve(result).ok_or_else(|| unknown(result))?;
        let first_id = self.resolve(first).ok_or_else(|| unknown(first))?;
        let second_id = self.resolve(second).ok_or_else(|| unknown(second))?;

        self.elements[result_id.index()]
            .recipes
            .push([first_id, second_id]);
        for parent in [first_id, second_id] {
            let children = &mut self.elements[parent.index()].children;
            if !children.contains(&result_id) {
                children.push(result_id);
            }
        }
        Ok(())
    }

    /// Mark an element as primordial (recipe `["", ""]`).
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownElement`] if `name` was never declared.
    pub fn primordial(&mut self, name: &str) -> Result<(), GraphError> {
        let id = self.resolve(name).ok_or_else(|| GraphError::UnknownElement {
            name: name.to_string(),
        })?;
        self.elements[id.index()].recipes.push(PRIMORDIAL_RECIPE);
        Ok(())
    }

    /// Finish construction and check the base element invariants.
    ///
    /// # Errors
    ///
    /// - [`GraphError::MissingBaseElement`] if a name in
    ///   [`BASE_ELEMENT_NAMES`] was never declared.
    /// - [`GraphError::BaseElementInvariant`] if a base element has a
    ///   non-zero tier or an ingredient recipe.
    pub fn build(self) -> Result<RecipeGraph, GraphError> {
        let mut base_elements = Vec::with_capacity(BASE_ELEMENT_NAMES.len());
        for name in BASE_ELEMENT_NAMES {
            let id = self
                .by_name
                .get(name)
                .copied()
                .ok_or_else(|| GraphError::MissingBaseElement {
                    name: name.to_string(),
                })?;
            let node = &self.elements[id.index()];
            if node.tier != 0 {
                return Err(GraphError::BaseElementInvariant {
                    name: name.to_string(),
                    detail: format!("tier is {}, expected 0", node.tier),
                });
            }
            if node.recipes.iter().any(|r| *r != PRIMORDIAL_RECIPE) {
                return Err(GraphError::BaseElementInvariant {
                    name: name.to_string(),
                    detail: "has an ingredient recipe".into(),
                });
            }
            base_elements.push(id);
        }

        Ok(RecipeGraph {
            elements: self.elements,
            base_elements,
            by_name: self.by_name,
        })
    }
}

impl Default for RecipeGraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}
