//! Reverse frontier search: level-synchronous backward BFS on a worker pool.
//!
//! Each round feeds the current frontier through a task channel to a fixed
//! set of workers. Workers share nothing mutable except the
//! [`DedupLedger`]; everything they discover goes back through a result
//! channel. The pool scope is the barrier between rounds.
//!
//! Per-item results carry their frontier index and are merged in frontier
//! order, so the output does not depend on worker scheduling.

use std::collections::{HashMap, HashSet};
use std::sync::mpsc;
use std::sync::{Arc, Mutex, PoisonError};

use alchemist_kernel::graph::{ElementId, ElementNode, RecipeGraph};

use crate::ancestry::AncestryChain;
use crate::dag::{CompactDagV1, CraftingStep, DagNode};
use crate::error::SearchError;
use crate::ledger::DedupLedger;
use crate::policy::SearchPolicyV1;

/// Why the reverse search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReasonV1 {
    /// No frontier items remained.
    FrontierExhausted,
    /// `max_iterations` was reached with frontier items left unprocessed.
    StepLimitExceeded { cap: u64 },
}

/// Outcome of [`reverse_search`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReverseSearchResult {
    pub dag: CompactDagV1,
    /// Frontier items processed plus base ingredients reached.
    pub visited: u64,
    /// Frontier items processed.
    pub iterations: u64,
    pub termination: TerminationReasonV1,
}

impl ReverseSearchResult {
    /// The non-fatal condition attached to a partial result, if any.
    #[must_use]
    pub fn warning(&self) -> Option<SearchError> {
        match self.termination {
            TerminationReasonV1::FrontierExhausted => None,
            TerminationReasonV1::StepLimitExceeded { cap } => Some(SearchError::StepLimitExceeded {
                cap,
                iterations: self.iterations,
            }),
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.termination == TerminationReasonV1::FrontierExhausted
    }
}

/// One unit of frontier work.
///
/// `multiplicity` counts identical items (same node, same ancestry) coalesced
/// into this one.
#[derive(Debug, Clone)]
struct FrontierItem {
    node: ElementId,
    ancestry: Arc<AncestryChain>,
    depth: u32,
    multiplicity: u64,
}

/// What one worker produced for one frontier item.
#[derive(Debug, Default)]
struct ItemProgress {
    index: usize,
    steps: Vec<CraftingStep>,
    nodes: Vec<DagNode>,
    next: Vec<FrontierItem>,
    visited: u64,
    iterations: u64,
}

/// Run the reverse search for `target`.
///
/// The ledger is consulted and updated but never reset here; reset it before
/// each independent top-level search.
///
/// # Errors
///
/// - [`SearchError::InvalidPolicy`] if the policy fails validation.
/// - [`SearchError::TrivialTarget`] if `target` is a base element.
/// - [`SearchError::WorkerPool`] if the worker threads cannot be started.
pub fn reverse_search(
    target: &ElementNode,
    graph: &RecipeGraph,
    ledger: &DedupLedger,
    policy: &SearchPolicyV1,
) -> Result<ReverseSearchResult, SearchError> {
    policy.validate()?;
    if graph.is_base(target.id()) {
        return Err(SearchError::TrivialTarget {
            name: target.name().to_string(),
        });
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(policy.workers)
        .thread_name(|i| format!("reverse-search-{i}"))
        .build()
        .map_err(|e| SearchError::WorkerPool {
            detail: e.to_string(),
        })?;

    let mut dag = CompactDagV1::default();
    dag.nodes.push(DagNode::from(target));
    let mut included_nodes: HashSet<u32> = HashSet::from([target.id().get()]);
    let mut added_steps: HashSet<CraftingStep> = HashSet::new();

    let mut frontier = vec![FrontierItem {
        node: target.id(),
        ancestry: AncestryChain::root(target.name()),
        depth: 0,
        multiplicity: 1,
    }];
    let mut visited = 0u64;
    let mut iterations = 0u64;
    let mut round = 0u32;

    while !frontier.is_empty() && iterations < policy.max_iterations {
        let mut next = Vec::new();
        for progress in run_round(&pool, graph, ledger, &frontier, policy.workers) {
            visited += progress.visited;
            iterations += progress.iterations;
            for step in progress.steps {
                if !added_steps.contains(&step) {
                    added_steps.insert(step.clone());
                    dag.steps.push(step);
                }
            }
            for node in progress.nodes {
                if included_nodes.insert(node.id) {
                    dag.nodes.push(node);
                }
            }
            next.extend(progress.next);
        }
        tracing::debug!(
            round,
            items = frontier.len(),
            next = next.len(),
            steps = dag.steps.len(),
            "reverse search round complete"
        );
        frontier = coalesce(next);
        round += 1;
    }

    let termination = if frontier.is_empty() {
        TerminationReasonV1::FrontierExhausted
    } else {
        tracing::warn!(
            target_element = target.name(),
            cap = policy.max_iterations,
            iterations,
            pending = frontier.len(),
            "reverse search reached the iteration cap; returning partial result"
        );
        TerminationReasonV1::StepLimitExceeded {
            cap: policy.max_iterations,
        }
    };

    Ok(ReverseSearchResult {
        dag,
        visited,
        iterations,
        termination,
    })
}

/// Process one frontier round on the pool and return per-item progress in
/// frontier order.
fn run_round(
    pool: &rayon::ThreadPool,
    graph: &RecipeGraph,
    ledger: &DedupLedger,
    frontier: &[FrontierItem],
    workers: usize,
) -> Vec<ItemProgress> {
    let (task_tx, task_rx) = mpsc::channel::<(usize, &FrontierItem)>();
    for task in frontier.iter().enumerate() {
        // The receiver is alive until the end of this function.
        let _ = task_tx.send(task);
    }
    drop(task_tx);
    let task_rx = Mutex::new(task_rx);

    let (result_tx, result_rx) = mpsc::channel::<ItemProgress>();
    pool.scope(|scope| {
        for _ in 0..workers {
            let result_tx = result_tx.clone();
            let task_rx = &task_rx;
            scope.spawn(move |_| loop {
                let task = task_rx
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .recv();
                let Ok((index, item)) = task else {
                    break;
                };
                if result_tx.send(expand_item(graph, ledger, index, item)).is_err() {
                    break;
                }
            });
        }
    });
    drop(result_tx);

    let mut progress: Vec<ItemProgress> = result_rx.into_iter().collect();
    progress.sort_by_key(|p| p.index);
    progress
}

/// Expand one frontier item: accept every valid, not-yet-recorded recipe of
/// its node and enqueue the non-base ingredients.
fn expand_item(
    graph: &RecipeGraph,
    ledger: &DedupLedger,
    index: usize,
    item: &FrontierItem,
) -> ItemProgress {
    let mut progress = ItemProgress {
        index,
        visited: item.multiplicity,
        iterations: item.multiplicity,
        ..ItemProgress::default()
    };

    let node = &graph[item.node];
    if graph.is_base(node.id()) || node.has_no_recipe() {
        return progress;
    }

    for &pair in node.recipes() {
        let ingredients = pair.map(|id| &graph[id]);
        if ingredients.iter().any(|i| is_dead_end(graph, i)) {
            continue;
        }
        if ingredients.iter().any(|i| i.tier() >= node.tier()) {
            continue;
        }
        if !ledger.try_record(node.name(), &item.ancestry, pair) {
            continue;
        }

        progress.steps.push(CraftingStep {
            ingredients: ingredients.map(|i| i.name().to_string()),
            result: node.name().to_string(),
            step: item.depth,
        });

        for ingredient in ingredients {
            progress.nodes.push(DagNode::from(ingredient));
            if graph.is_base(ingredient.id()) {
                progress.visited += 1;
            } else {
                progress.next.push(FrontierItem {
                    node: ingredient.id(),
                    ancestry: item.ancestry.descend(ingredient.name()),
                    depth: item.depth + 1,
                    multiplicity: 1,
                });
            }
        }
    }

    progress
}

/// A non-base element with no ingredient recipe.
fn is_dead_end(graph: &RecipeGraph, node: &ElementNode) -> bool {
    node.has_no_recipe() && !graph.is_base(node.id())
}

/// Merge identical items (same node along the same ancestry), keeping the
/// first occurrence's position.
fn coalesce(items: Vec<FrontierItem>) -> Vec<FrontierItem> {
    let mut merged: Vec<FrontierItem> = Vec::with_capacity(items.len());
    let mut positions: HashMap<(ElementId, String), usize> = HashMap::new();
    for item in items {
        let key = (item.node, item.ancestry.signature());
        if let Some(&at) = positions.get(&key) {
            merged[at].multiplicity += item.multiplicity;
        } else {
            positions.insert(key, merged.len());
            merged.push(item);
        }
    }
    merged
}
