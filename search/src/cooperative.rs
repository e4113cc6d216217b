//! Cooperative multi-path search.
//!
//! Every visited node runs as its own scoped task. A task enumerates the
//! derivations of its node one at a time and talks to its parent over two
//! rendezvous channels:
//!
//! ```text
//! parent                       task
//!   |  <-- Report::Found  ---   (candidate is in the shared buffer)
//!   |  --- Resume::Next   -->   (produce the next candidate)
//!   |  --- Resume::Stop   -->   (stop children, then finish)
//!   |  <-- Report::Exhausted -- (final report, always sent)
//! ```
//!
//! A composite task walks its recipes in order. For each recipe it holds a
//! left and a right child and steps through their candidates like an
//! odometer: the right child advances fastest; when it runs out, the left
//! child advances and a fresh right child starts over.
//!
//! A dropped channel reads as `Exhausted` on the parent side and as `Stop`
//! on the task side, so no task waits forever on a peer that has gone.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{sync_channel, Receiver, SyncSender};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, Scope, ScopedJoinHandle};

use alchemist_kernel::graph::{unordered_pair, ElementId, ElementNode, RecipeGraph, RecipePair};

use crate::policy::SearchPolicyV1;
use crate::tree::{PartialTree, PathResultV1};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Report {
    Found,
    Exhausted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Resume {
    Next,
    Stop,
}

/// Whether a composite task should keep enumerating recipes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Stopped,
}

/// State shared by every task of one search.
struct SearchShared<'a> {
    graph: &'a RecipeGraph,
    policy: &'a SearchPolicyV1,
    visited: AtomicU64,
}

type Buffer = Arc<Mutex<PartialTree>>;

fn read_buffer(buffer: &Buffer) -> PartialTree {
    buffer.lock().unwrap_or_else(PoisonError::into_inner).clone()
}

/// The task's end of the protocol.
struct TaskPort {
    buffer: Buffer,
    report: SyncSender<Report>,
    resume: Receiver<Resume>,
}

impl TaskPort {
    fn publish(&self, tree: PartialTree) {
        *self.buffer.lock().unwrap_or_else(PoisonError::into_inner) = tree;
    }

    /// Report the published candidate and wait for the parent's answer.
    fn offer(&self) -> Resume {
        if self.report.send(Report::Found).is_err() {
            return Resume::Stop;
        }
        self.resume.recv().unwrap_or(Resume::Stop)
    }

    /// Final report. Consumes the port.
    fn exhausted(self) {
        let _ = self.report.send(Report::Exhausted);
    }
}

/// The parent's end of the protocol.
struct TaskHandle<'scope> {
    element: ElementId,
    buffer: Buffer,
    report: Receiver<Report>,
    resume: SyncSender<Resume>,
    thread: Option<ScopedJoinHandle<'scope, ()>>,
    /// The task reported `Found` and is waiting for a resume signal.
    awaiting: bool,
}

impl TaskHandle<'_> {
    fn recv(&mut self) -> Report {
        let report = self.report.recv().unwrap_or(Report::Exhausted);
        self.awaiting = report == Report::Found;
        report
    }

    /// Resume with `Next` and read the following report.
    fn next(&mut self) -> Report {
        self.awaiting = false;
        if self.resume.send(Resume::Next).is_err() {
            return Report::Exhausted;
        }
        self.recv()
    }

    fn snapshot(&self) -> PartialTree {
        read_buffer(&self.buffer)
    }

    /// Stop the task (if it is waiting), drain its final report and join.
    fn stop(mut self) {
        if self.awaiting && self.resume.send(Resume::Stop).is_ok() {
            let _ = self.recv();
        }
        self.join();
    }

    /// Join the task. Dropping both channel ends first means a task still
    /// blocked on either one unblocks and finishes.
    fn join(self) {
        let Self {
            element,
            report,
            resume,
            thread,
            ..
        } = self;
        drop(resume);
        drop(report);
        if let Some(thread) = thread {
            if thread.join().is_err() {
                tracing::warn!(element = %element, "search task panicked");
            }
        }
    }
}

fn spawn_task<'scope, 'env>(
    scope: &'scope Scope<'scope, 'env>,
    shared: &'scope SearchShared<'scope>,
    element: ElementId,
) -> TaskHandle<'scope> {
    let buffer: Buffer = Arc::default();
    let (report_tx, report_rx) = sync_channel(0);
    let (resume_tx, resume_rx) = sync_channel(0);
    let port = TaskPort {
        buffer: Arc::clone(&buffer),
        report: report_tx,
        resume: resume_rx,
    };

    let name = shared
        .graph
        .node(element)
        .map_or("?", ElementNode::name);
    let thread = thread::Builder::new()
        .name(format!("craft-{name}"))
        .spawn_scoped(scope, move || run_task(scope, shared, element, port));
    let thread = match thread {
        Ok(handle) => Some(handle),
        Err(e) => {
            // The port was dropped with the closure, so the handle reads
            // `Exhausted` immediately.
            tracing::warn!(element = name, error = %e, "failed to spawn search task");
            None
        }
    };

    TaskHandle {
        element,
        buffer,
        report: report_rx,
        resume: resume_tx,
        thread,
        awaiting: false,
    }
}

fn run_task<'scope, 'env>(
    scope: &'scope Scope<'scope, 'env>,
    shared: &'scope SearchShared<'scope>,
    element: ElementId,
    port: TaskPort,
) {
    shared.visited.fetch_add(1, Ordering::Relaxed);
    let graph = shared.graph;
    let node = &graph[element];
    tracing::trace!(element = node.name(), "search task started");

    if graph.is_base(element) {
        port.publish(PartialTree::leaf(element));
        // Either answer ends a leaf.
        let _ = port.offer();
        port.exhausted();
        return;
    }
    if shared.policy.is_excluded(node.name()) {
        port.exhausted();
        return;
    }

    let mut tried = HashSet::new();
    for &pair in node.recipes() {
        let [left, right] = pair.map(|id| &graph[id]);
        if left.tier() >= node.tier() || right.tier() >= node.tier() {
            continue;
        }
        if !tried.insert(unordered_pair(pair)) {
            continue;
        }
        if enumerate_recipe(scope, shared, element, pair, &port) == Flow::Stopped {
            break;
        }
    }

    tracing::trace!(element = node.name(), "search task exhausted");
    port.exhausted();
}

/// Offer every combination of the left and right children's candidates.
fn enumerate_recipe<'scope, 'env>(
    scope: &'scope Scope<'scope, 'env>,
    shared: &'scope SearchShared<'scope>,
    element: ElementId,
    [left_id, right_id]: RecipePair,
    port: &TaskPort,
) -> Flow {
    let mut left = spawn_task(scope, shared, left_id);
    let mut right = spawn_task(scope, shared, right_id);
    let left_first = left.recv();
    let right_first = right.recv();
    if left_first == Report::Exhausted || right_first == Report::Exhausted {
        left.stop();
        right.stop();
        return Flow::Continue;
    }

    loop {
        port.publish(PartialTree::combine(
            element,
            &left.snapshot(),
            &right.snapshot(),
        ));
        if port.offer() == Resume::Stop {
            left.stop();
            right.stop();
            return Flow::Stopped;
        }

        if right.next() == Report::Found {
            continue;
        }
        right.join();

        if left.next() == Report::Exhausted {
            left.join();
            return Flow::Continue;
        }
        right = spawn_task(scope, shared, right_id);
        if right.recv() == Report::Exhausted {
            right.join();
            left.stop();
            return Flow::Continue;
        }
    }
}

/// Collect up to `count` structurally distinct derivations of `target`.
///
/// Returns the trees in enumeration order and the number of tasks started.
/// Trees using the same multiset of crafting steps count once. At most
/// `policy.max_candidates` candidates are examined.
#[must_use]
pub fn cooperative_paths(
    target: &ElementNode,
    graph: &RecipeGraph,
    count: usize,
    policy: &SearchPolicyV1,
) -> (Vec<PathResultV1>, u64) {
    let shared = SearchShared {
        graph,
        policy,
        visited: AtomicU64::new(0),
    };

    let (paths, examined) = thread::scope(|scope| {
        let mut root = spawn_task(scope, &shared, target.id());
        let mut paths = Vec::new();
        let mut seen = HashSet::new();
        let mut examined = 0u64;

        let mut report = root.recv();
        while report == Report::Found {
            examined += 1;
            let tree = root.snapshot();
            if seen.insert(tree.step_signature()) {
                paths.push(tree.to_path_result(graph));
            }
            if paths.len() >= count || examined >= policy.max_candidates {
                root.stop();
                return (paths, examined);
            }
            report = root.next();
        }
        root.join();
        (paths, examined)
    });

    let visited = shared.visited.into_inner();
    tracing::debug!(
        target_element = target.name(),
        found = paths.len(),
        examined,
        visited,
        "cooperative search finished"
    );
    (paths, visited)
}
