//! Recipe queries: parameter validation, algorithm dispatch and JSON
//! responses with HTTP-style status codes.
//!
//! Two request shapes share one handler:
//!
//! - [`QueryMode::Single`]: one derivation, `max` ignored.
//! - [`QueryMode::Multiple`]: up to `max` derivations (default 5).
//!
//! Success bodies are `{"error": false, "data": {...}}`; failures are
//! `{"error": true, "type": ..., "message": ...}`.

use std::sync::{Mutex, PoisonError};

use alchemist_kernel::graph::RecipeGraph;
use alchemist_search::{
    expand_paths, find_paths, reverse_search, DedupLedger, SearchError, SearchPolicyV1,
};
use serde::{Deserialize, Serialize};

/// `max` used by [`QueryMode::Multiple`] when the parameter is absent.
pub const DEFAULT_MAX: &str = "5";

/// `algo` used when the parameter is absent.
pub const DEFAULT_ALGORITHM: &str = "bfs";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryMode {
    Single,
    Multiple,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    /// Reverse search followed by path expansion.
    Bfs,
    /// Greedy or cooperative derivation search.
    Dfs,
}

impl Algorithm {
    /// Case-insensitive parse of `bfs` / `dfs`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "bfs" => Some(Self::Bfs),
            "dfs" => Some(Self::Dfs),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bfs => "bfs",
            Self::Dfs => "dfs",
        }
    }
}

/// Raw query parameters, as they arrive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeQuery {
    pub element: Option<String>,
    pub algo: Option<String>,
    pub max: Option<String>,
}

impl RecipeQuery {
    #[must_use]
    pub fn new(element: &str) -> Self {
        Self {
            element: Some(element.to_string()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_algo(mut self, algo: &str) -> Self {
        self.algo = Some(algo.to_string());
        self
    }

    #[must_use]
    pub fn with_max(mut self, max: &str) -> Self {
        self.max = Some(max.to_string());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("Element parameter is required")]
    MissingElement,

    #[error("Max parameter must be greater than 0")]
    InvalidMax { raw: String },

    #[error("Element '{name}' not found")]
    ElementNotFound { name: String },

    #[error("Algorithm must be 'bfs' or 'dfs'")]
    InvalidAlgorithm { raw: String },

    #[error(transparent)]
    Search(#[from] SearchError),
}

impl QueryError {
    #[must_use]
    pub fn status(&self) -> u16 {
        match self {
            Self::MissingElement | Self::InvalidMax { .. } | Self::InvalidAlgorithm { .. } => 400,
            Self::ElementNotFound { .. } => 404,
            Self::Search(e) => match e {
                SearchError::InvalidCount => 400,
                SearchError::NotFound { .. } => 404,
                SearchError::TrivialTarget { .. } | SearchError::UnresolvableTarget { .. } => 422,
                SearchError::StepLimitExceeded { .. }
                | SearchError::InvalidPolicy { .. }
                | SearchError::Graph(_)
                | SearchError::WorkerPool { .. } => 500,
            },
        }
    }

    /// Machine-readable error type.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingElement => "missing_parameter",
            Self::InvalidMax { .. } | Self::Search(SearchError::InvalidCount) => {
                "invalid_parameter"
            }
            Self::ElementNotFound { .. } | Self::Search(SearchError::NotFound { .. }) => {
                "element_not_found"
            }
            Self::InvalidAlgorithm { .. } => "invalid_algorithm",
            Self::Search(SearchError::TrivialTarget { .. }) => "trivial_target",
            Self::Search(SearchError::UnresolvableTarget { .. }) => "unresolvable_target",
            Self::Search(_) => "internal_error",
        }
    }

    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "error": true,
            "type": self.kind(),
            "message": self.to_string(),
        })
    }
}

/// Status code and JSON body for one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResponse {
    pub status: u16,
    pub body: serde_json::Value,
}

impl QueryResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

/// A validated query.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Resolved {
    element: String,
    algorithm: Algorithm,
    max: usize,
}

/// Answers recipe queries against one graph.
///
/// The reverse search ledger is reset at the start of every `bfs` query;
/// `bfs` queries run one at a time so a reset never lands in the middle of
/// another query's search.
#[derive(Debug)]
pub struct QueryEngine {
    graph: RecipeGraph,
    policy: SearchPolicyV1,
    ledger: Mutex<DedupLedger>,
}

impl QueryEngine {
    #[must_use]
    pub fn new(graph: RecipeGraph, policy: SearchPolicyV1) -> Self {
        Self {
            graph,
            policy,
            ledger: Mutex::new(DedupLedger::new()),
        }
    }

    #[must_use]
    pub fn graph(&self) -> &RecipeGraph {
        &self.graph
    }

    #[must_use]
    pub fn policy(&self) -> &SearchPolicyV1 {
        &self.policy
    }

    /// Run `query` and render the response. Never fails: errors become
    /// non-200 responses.
    #[must_use]
    pub fn handle(&self, mode: QueryMode, query: &RecipeQuery) -> QueryResponse {
        match self.run(mode, query) {
            Ok(data) => QueryResponse {
                status: 200,
                body: serde_json::json!({"error": false, "data": data}),
            },
            Err(e) => {
                tracing::debug!(status = e.status(), kind = e.kind(), error = %e, "query rejected");
                QueryResponse {
                    status: e.status(),
                    body: e.to_json_value(),
                }
            }
        }
    }

    /// Run `query` and return the `data` object.
    ///
    /// # Errors
    ///
    /// Returns a [`QueryError`] for invalid parameters, unknown elements and
    /// failed searches.
    pub fn run(&self, mode: QueryMode, query: &RecipeQuery) -> Result<serde_json::Value, QueryError> {
        let resolved = self.resolve(mode, query)?;
        match resolved.algorithm {
            Algorithm::Bfs => self.run_bfs(mode, &resolved),
            Algorithm::Dfs => self.run_dfs(mode, &resolved),
        }
    }

    fn resolve(&self, mode: QueryMode, query: &RecipeQuery) -> Result<Resolved, QueryError> {
        let element = query
            .element
            .as_deref()
            .filter(|e| !e.is_empty())
            .ok_or(QueryError::MissingElement)?;

        let max = match mode {
            QueryMode::Single => 1,
            QueryMode::Multiple => parse_max(query.max.as_deref().unwrap_or(DEFAULT_MAX))?,
        };

        if self.graph.by_name(element).is_none() {
            return Err(QueryError::ElementNotFound {
                name: element.to_string(),
            });
        }

        let raw_algo = query.algo.as_deref().unwrap_or(DEFAULT_ALGORITHM);
        let algorithm = Algorithm::parse(raw_algo).ok_or_else(|| QueryError::InvalidAlgorithm {
            raw: raw_algo.to_string(),
        })?;

        Ok(Resolved {
            element: element.to_string(),
            algorithm,
            max,
        })
    }

    fn run_bfs(&self, mode: QueryMode, q: &Resolved) -> Result<serde_json::Value, QueryError> {
        let target = self.graph.lookup(&q.element).map_err(SearchError::from)?;

        let result = {
            let ledger = self.ledger.lock().unwrap_or_else(PoisonError::into_inner);
            ledger.reset();
            reverse_search(target, &self.graph, &ledger, &self.policy)?
        };
        let paths = expand_paths(&result.dag, &q.element, q.max);

        let mut data = serde_json::json!({
            "algo": Algorithm::Bfs.as_str(),
            "element": q.element,
            "paths": paths.iter().map(alchemist_search::ExpandedPath::to_json_value).collect::<Vec<_>>(),
            "visitedNodes": result.visited,
        });
        if let Some(warning) = result.warning() {
            data["warning"] = serde_json::Value::String(warning.to_string());
        }
        tracing::info!(
            element = %q.element,
            ?mode,
            paths = paths.len(),
            visited = result.visited,
            "bfs query answered"
        );
        Ok(data)
    }

    fn run_dfs(&self, mode: QueryMode, q: &Resolved) -> Result<serde_json::Value, QueryError> {
        let target = self.graph.lookup(&q.element).map_err(SearchError::from)?;
        let found = find_paths(target, &self.graph, q.max, &self.policy)?;
        tracing::info!(
            element = %q.element,
            ?mode,
            paths = found.paths.len(),
            visited = found.visited,
            "dfs query answered"
        );

        let data = match mode {
            QueryMode::Single => serde_json::json!({
                "nodes": found.paths.first().map(alchemist_search::PathResultV1::to_json_value),
                "visitedNodes": found.visited,
            }),
            QueryMode::Multiple => serde_json::json!({
                "algo": Algorithm::Dfs.as_str(),
                "element": q.element,
                "paths": found.paths.iter().map(alchemist_search::PathResultV1::to_json_value).collect::<Vec<_>>(),
                "visitedNodes": found.visited,
            }),
        };
        Ok(data)
    }
}

fn parse_max(raw: &str) -> Result<usize, QueryError> {
    raw.trim()
        .parse::<usize>()
        .ok()
        .filter(|&max| max > 0)
        .ok_or_else(|| QueryError::InvalidMax {
            raw: raw.to_string(),
        })
}
