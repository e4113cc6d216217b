//! Path-scoped deduplication ledger for the reverse search.
//!
//! Maps `(result, ancestry signature)` to the unordered ingredient pairs
//! already emitted for that result along that exact ancestry. The same recipe
//! may be re-derived down a different branch, never twice down the same one.
//!
//! The ledger outlives a single call so the caller controls its scope: call
//! [`DedupLedger::reset`] before each independent top-level search, or
//! results from unrelated searches suppress each other.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use alchemist_kernel::graph::{unordered_pair, ElementId, RecipePair};

use crate::ancestry::AncestryChain;

type LedgerKey = (String, String);

#[derive(Debug, Default)]
pub struct DedupLedger {
    used: Mutex<HashMap<LedgerKey, HashSet<(ElementId, ElementId)>>>,
}

impl DedupLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget every recorded triple.
    pub fn reset(&self) {
        self.lock().clear();
    }

    /// Record `(result, ancestry, pair)` unless it is already present.
    ///
    /// Returns `true` if the triple was newly recorded. The signature is
    /// computed before the lock is taken; the critical section is a single
    /// lookup-and-insert.
    pub fn try_record(&self, result: &str, ancestry: &AncestryChain, pair: RecipePair) -> bool {
        let key = (result.to_string(), ancestry.signature());
        let pair = unordered_pair(pair);
        self.lock().entry(key).or_default().insert(pair)
    }

    /// Whether `(result, ancestry, pair)` was recorded.
    #[must_use]
    pub fn contains(&self, result: &str, ancestry: &AncestryChain, pair: RecipePair) -> bool {
        let key = (result.to_string(), ancestry.signature());
        let pair = unordered_pair(pair);
        self.lock()
            .get(&key)
            .is_some_and(|pairs| pairs.contains(&pair))
    }

    /// Total number of recorded triples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().values().map(HashSet::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<LedgerKey, HashSet<(ElementId, ElementId)>>> {
        // A panicking worker cannot leave the map half-updated: every
        // mutation is a single insert or clear.
        self.used.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
