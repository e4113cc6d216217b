//! Search policy types.

use crate::error::SearchError;

/// Worker pool size, iteration cap and exclusions for one search invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPolicyV1 {
    /// Reverse search worker pool size.
    pub workers: usize,
    /// Reverse search cap on processed frontier items across all rounds.
    pub max_iterations: u64,
    /// Element names that never resolve (reserved/excluded elements).
    pub excluded: Vec<String>,
    /// Multi-path cap on candidate trees examined, including duplicates that
    /// are discarded.
    pub max_candidates: u64,
}

impl SearchPolicyV1 {
    /// Validate that every budget is usable.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] if the worker count or either
    /// cap is zero.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.workers == 0 {
            return Err(SearchError::InvalidPolicy {
                detail: "workers must be at least 1".into(),
            });
        }
        if self.max_iterations == 0 {
            return Err(SearchError::InvalidPolicy {
                detail: "max_iterations must be at least 1".into(),
            });
        }
        if self.max_candidates == 0 {
            return Err(SearchError::InvalidPolicy {
                detail: "max_candidates must be at least 1".into(),
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn is_excluded(&self, name: &str) -> bool {
        self.excluded.iter().any(|e| e == name)
    }
}

impl Default for SearchPolicyV1 {
    fn default() -> Self {
        Self {
            workers: 4,
            max_iterations: 1000,
            excluded: vec!["Time".into()],
            max_candidates: 10_000,
        }
    }
}
