//! Path expansion: materialize individual derivation trees from a compact DAG.

use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::dag::{step_to_json, CompactDagV1, CraftingStep, DagNode};

/// One tree drawn from a compact DAG.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpandedPath {
    /// The target first, then every element named by `steps` in first
    /// appearance order.
    pub nodes: Vec<DagNode>,
    /// Steps in dependency order: ingredients are crafted before use.
    #[serde(rename = "recipes")]
    pub steps: Vec<CraftingStep>,
}

impl ExpandedPath {
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "nodes": self.nodes.iter().map(|n| serde_json::json!({"id": n.id, "name": n.name})).collect::<Vec<_>>(),
            "recipes": self.steps.iter().map(step_to_json).collect::<Vec<_>>(),
        })
    }
}

type Sequence<'a> = Vec<&'a CraftingStep>;

struct Expander<'a> {
    by_result: HashMap<&'a str, Vec<&'a CraftingStep>>,
    memo: HashMap<&'a str, Rc<Vec<Sequence<'a>>>>,
    in_progress: HashSet<&'a str>,
    max: usize,
}

impl<'a> Expander<'a> {
    fn new(dag: &'a CompactDagV1, max: usize) -> Self {
        let mut by_result: HashMap<&str, Vec<&CraftingStep>> = HashMap::new();
        for step in &dag.steps {
            let alternatives = by_result.entry(step.result.as_str()).or_default();
            if !alternatives.iter().any(|s| s.same_recipe(step)) {
                alternatives.push(step);
            }
        }
        Self {
            by_result,
            memo: HashMap::new(),
            in_progress: HashSet::new(),
            max,
        }
    }

    /// Every way (up to `max`) to derive `name` as a step sequence.
    fn sequences(&mut self, name: &'a str) -> Rc<Vec<Sequence<'a>>> {
        if let Some(done) = self.memo.get(name) {
            return Rc::clone(done);
        }
        if !self.in_progress.insert(name) {
            return Rc::new(Vec::new());
        }

        let alternatives = self.by_result.get(name).cloned().unwrap_or_default();
        let mut out: Vec<Sequence<'a>> = Vec::new();
        if alternatives.is_empty() {
            out.push(Vec::new());
        }

        'steps: for step in alternatives {
            let [left, right] = &step.ingredients;
            let lefts = self.sequences(left);
            let rights = self.sequences(right);
            for l in lefts.iter() {
                for r in rights.iter() {
                    if out.len() >= self.max {
                        break 'steps;
                    }
                    let mut seq = Vec::with_capacity(l.len() + r.len() + 1);
                    seq.extend_from_slice(l);
                    seq.extend_from_slice(r);
                    seq.push(step);
                    out.push(seq);
                }
            }
        }

        self.in_progress.remove(name);
        let out = Rc::new(out);
        self.memo.insert(name, Rc::clone(&out));
        out
    }
}

/// Turn `dag` into up to `max` concrete trees rooted at `target`.
///
/// Alternative steps for the same result are combined as a cross product,
/// left ingredient outermost. A name with no steps in the DAG is a leaf. A
/// name reached again while it is still being expanded contributes nothing.
#[must_use]
pub fn expand_paths(dag: &CompactDagV1, target: &str, max: usize) -> Vec<ExpandedPath> {
    if max == 0 {
        return Vec::new();
    }

    let mut expander = Expander::new(dag, max);
    let sequences = expander.sequences(target);

    let paths: Vec<ExpandedPath> = sequences
        .iter()
        .take(max)
        .map(|seq| build_path(dag, target, seq))
        .collect();
    tracing::debug!(target_element = target, paths = paths.len(), max, "expanded compact dag");
    paths
}

fn build_path(dag: &CompactDagV1, target: &str, seq: &[&CraftingStep]) -> ExpandedPath {
    let mut names: Vec<&str> = vec![target];
    let mut seen: HashSet<&str> = HashSet::from([target]);
    for step in seq {
        for name in step.ingredients.iter().chain(std::iter::once(&step.result)) {
            if seen.insert(name) {
                names.push(name);
            }
        }
    }

    ExpandedPath {
        nodes: names
            .into_iter()
            .filter_map(|n| dag.node_named(n).cloned())
            .collect(),
        steps: seq.iter().map(|s| (*s).clone()).collect(),
    }
}
