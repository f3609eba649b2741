//! Exit status of the `scanset` binary for each failure class.
//!
//! | Code | Meaning                               |
//! |------|---------------------------------------|
//! |  0   | Success                               |
//! |  1   | Usage or configuration error          |
//! |  2   | Filesystem error during resolution    |

use assert_cmd::Command;
use predicates::prelude::*;
use test_support::FileTree;

fn scanset() -> Command {
    Command::cargo_bin("scanset").expect("scanset binary is built")
}

#[test]
fn success_exits_zero() {
    let dir = FileTree::new().file("a.txt").build();
    scanset().current_dir(dir.path()).args(["scan", "."]).assert().code(0);
}

#[test]
fn missing_subcommand_exits_one() {
    scanset().assert().code(1);
}

#[test]
fn unknown_option_exits_one() {
    scanset()
        .args(["scan", ".", "--frobnicate"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--frobnicate"));
}

#[test]
fn unknown_mapper_exits_one() {
    let dir = FileTree::new().file("src/a.c").build();
    scanset()
        .current_dir(dir.path())
        .args(["stale", "src", "out", "--mapper", "nosuch"])
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("scanset error: "));
}

#[test]
fn missing_directory_exits_one() {
    let dir = FileTree::new().build();
    scanset()
        .current_dir(dir.path())
        .args(["scan", "absent"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("does not exist."));
}

#[cfg(unix)]
#[test]
fn unreadable_includes_file_exits_two() {
    let dir = FileTree::new().file("a.txt").dir("patterns.txt").build();
    scanset()
        .current_dir(dir.path())
        .args(["scan", ".", "--includes-file", "patterns.txt"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("pattern file"));
}
