//! Cross-process determinism: runs the `search_fixture` binary under several
//! environment variants and asserts that all produce identical output. This
//! shows results do not depend on process-level state (cwd, locale, env
//! vars, hash seeds).

use std::path::Path;
use std::process::Command;

fn workspace_root() -> String {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .and_then(Path::parent)
        .unwrap()
        .to_string_lossy()
        .to_string()
}

/// Run the fixture binary with the given cwd and environment overrides.
/// Returns stdout as a string.
fn run_variant(work_dir: &str, env_overrides: &[(&str, &str)]) -> String {
    let bin = env!("CARGO_BIN_EXE_search_fixture");

    let mut command = Command::new(bin);
    command.current_dir(work_dir);
    command
        .env_remove("LC_ALL")
        .env_remove("LC_COLLATE")
        .env_remove("LANG")
        .env_remove("LANGUAGE")
        .env_remove("RUST_LOG");
    for &(key, val) in env_overrides {
        command.env(key, val);
    }

    let output = command.output().unwrap_or_else(|e| {
        panic!("failed to spawn {bin} (work_dir={work_dir}, overrides={env_overrides:?}): {e}")
    });
    assert!(
        output.status.success(),
        "search_fixture exited with {}: stderr={}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).unwrap()
}

#[test]
fn crossproc_determinism_env_variants() {
    let root = workspace_root();
    let baseline = run_variant(&root, &[]);

    for key in ["snapshot_digest=sha256:", "wall_dag_digest=sha256:", "house_dag_digest=sha256:"] {
        assert!(baseline.contains(key), "baseline output missing {key}");
    }
    assert!(baseline.contains("wall_visited=13\n"));
    assert!(baseline.contains("house_paths=3\n"));

    let alt_cwd = if cfg!(target_os = "windows") { "C:\\" } else { "/tmp" };
    assert_eq!(
        baseline,
        run_variant(alt_cwd, &[]),
        "output differs when cwd changes from {root} to {alt_cwd}"
    );

    assert_eq!(
        baseline,
        run_variant(&root, &[("LC_ALL", "C"), ("LANG", "C")]),
        "output differs when LC_ALL=C LANG=C"
    );

    assert_eq!(
        baseline,
        run_variant(
            &root,
            &[
                ("ALCHEMIST_NOISE", "should_not_matter"),
                ("TZ", "America/New_York"),
                ("RAYON_NUM_THREADS", "1"),
            ],
        ),
        "output differs with spurious env vars"
    );
}

#[test]
fn crossproc_runs_agree_with_each_other() {
    let root = workspace_root();
    let first = run_variant(&root, &[]);
    for _ in 0..3 {
        assert_eq!(first, run_variant(&root, &[]));
    }
}
