//! `alchemist`: answer one recipe query against a snapshot and print the
//! JSON response.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use alchemist_harness::query::{QueryEngine, QueryMode, RecipeQuery};
use alchemist_harness::snapshot::{load_graph, LoadError};
use alchemist_harness::worlds::starter::starter_snapshot;
use alchemist_kernel::snapshot::SnapshotError;
use alchemist_search::SearchPolicyV1;

#[derive(Parser)]
#[command(name = "alchemist", bin_name = "alchemist")]
#[command(about = "Find how to craft an element from the four base elements")]
struct Cli {
    /// Recipe snapshot JSON (the built-in starter world if omitted)
    #[arg(long, value_name = "FILE")]
    snapshot: Option<PathBuf>,

    /// Element to derive
    #[arg(long, short = 'e')]
    element: Option<String>,

    /// Search algorithm: bfs or dfs
    #[arg(long, short = 'a', default_value = "bfs")]
    algo: String,

    /// Number of derivations to return; one if omitted
    #[arg(long, short = 'm')]
    max: Option<String>,

    /// Reverse search worker threads
    #[arg(long, value_name = "N")]
    workers: Option<usize>,

    /// Reverse search cap on processed frontier items
    #[arg(long, value_name = "N")]
    max_iterations: Option<u64>,

    /// Pretty-print the response
    #[arg(long)]
    pretty: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let graph = match &cli.snapshot {
        Some(path) => load_graph(path),
        None => starter_snapshot()
            .to_graph()
            .map_err(|e| LoadError::Snapshot(SnapshotError::from(e))),
    };
    let graph = match graph {
        Ok(graph) => graph,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut policy = SearchPolicyV1::default();
    if let Some(workers) = cli.workers {
        policy.workers = workers;
    }
    if let Some(max_iterations) = cli.max_iterations {
        policy.max_iterations = max_iterations;
    }

    let mode = if cli.max.is_some() {
        QueryMode::Multiple
    } else {
        QueryMode::Single
    };
    let query = RecipeQuery {
        element: cli.element,
        algo: Some(cli.algo),
        max: cli.max,
    };

    let response = QueryEngine::new(graph, policy).handle(mode, &query);
    let rendered = if cli.pretty {
        serde_json::to_string_pretty(&response.body)
    } else {
        serde_json::to_string(&response.body)
    };
    match rendered {
        Ok(text) => println!("{text}"),
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    }

    if response.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
