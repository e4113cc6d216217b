//! Ancestry chains: the path of element names from the search target down to
//! the current node.
//!
//! Chains are immutable and built by prepending, so the children of one
//! expansion share their parent's links through `Arc`.

use std::sync::Arc;

/// Separator between names in an ancestry signature.
const SIGNATURE_SEPARATOR: &str = "<-";

#[derive(Debug, PartialEq, Eq)]
pub struct AncestryChain {
    element: String,
    parent: Option<Arc<AncestryChain>>,
}

impl AncestryChain {
    /// A chain holding only the search target.
    #[must_use]
    pub fn root(element: &str) -> Arc<Self> {
        Arc::new(Self {
            element: element.to_string(),
            parent: None,
        })
    }

    /// Extend the chain by one element below `self`.
    #[must_use]
    pub fn descend(self: &Arc<Self>, element: &str) -> Arc<Self> {
        Arc::new(Self {
            element: element.to_string(),
            parent: Some(Arc::clone(self)),
        })
    }

    /// The element at the head of the chain (the current node).
    #[must_use]
    pub fn element(&self) -> &str {
        &self.element
    }

    #[must_use]
    pub fn parent(&self) -> Option<&Arc<Self>> {
        self.parent.as_ref()
    }

    /// Names from the current node back up to the target.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::successors(Some(self), |link| link.parent.as_deref()).map(|link| link.element())
    }

    /// Distance from the target (the target itself is depth 0).
    #[must_use]
    pub fn depth(&self) -> usize {
        self.names().count() - 1
    }

    /// Scoping key: `current<-parent<-...<-target`.
    #[must_use]
    pub fn signature(&self) -> String {
        self.names().collect::<Vec<_>>().join(SIGNATURE_SEPARATOR)
    }
}
