//! Runs the `scanset` binary and checks its output streams.

use assert_cmd::Command;
use predicates::prelude::*;
use test_support::{FileTree, host_path};

fn scanset() -> Command {
    Command::cargo_bin("scanset").expect("scanset binary is built")
}

// ============================================================================
// Usage
// ============================================================================

#[test]
fn help_lists_subcommands() {
    scanset()
        .arg("--help")
        .assert()
        .success()
        .stderr(predicate::str::is_empty())
        .stdout(predicate::str::contains("scan"))
        .stdout(predicate::str::contains("stale"))
        .stdout(predicate::str::contains("path"));
}

#[test]
fn version_names_the_program() {
    scanset()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("scanset "));
}

// ============================================================================
// Subcommands
// ============================================================================

#[test]
fn scan_runs_relative_to_the_working_directory() {
    let dir = FileTree::new()
        .file("src/app.rs")
        .file("src/app.rs~")
        .file("README.md")
        .build();

    scanset()
        .current_dir(dir.path())
        .args(["scan", "src"])
        .assert()
        .success()
        .stdout(format!("{}\n", host_path("app.rs")));
}

#[test]
fn stale_prints_sources_with_missing_targets() {
    let dir = FileTree::new()
        .file_at("docs/index.md", 5_000)
        .file_at("docs/guide.md", 5_000)
        .file_at("site/index.html", 6_000)
        .build();

    scanset()
        .current_dir(dir.path())
        .args(["stale", "docs", "site", "--mapper", "glob", "--from", "*.md", "--to", "*.html"])
        .assert()
        .success()
        .stdout("guide.md\n");
}

#[test]
fn path_resolves_entries_against_the_working_directory() {
    let dir = FileTree::new().file("lib/a.jar").build();
    let expected = dir.join(&host_path("lib/a.jar"));

    scanset()
        .current_dir(dir.path())
        .args(["path", "--existing", "lib/a.jar;lib/gone.jar"])
        .assert()
        .success()
        .stdout(format!("{}\n", expected.display()));
}
