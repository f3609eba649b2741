use super::*;
use std::collections::BTreeSet;
use std::fs;
use std::path::{MAIN_SEPARATOR, Path};

fn sep(name: &str) -> String {
    name.replace('/', &MAIN_SEPARATOR.to_string())
}

fn build_tree(root: &Path, files: &[&str]) {
    for file in files {
        let path = root.join(file);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent");
        }
        fs::write(&path, b"data").expect("write file");
    }
}

fn all_names(scanner: &mut DirectoryScanner) -> Vec<String> {
    let buckets = scanner.complete_buckets().expect("complete scan");
    [
        buckets.files_included(),
        buckets.files_excluded(),
        buckets.files_not_included(),
        buckets.dirs_included(),
        buckets.dirs_excluded(),
        buckets.dirs_not_included(),
    ]
    .concat()
}

#[test]
fn default_excludes_scenario() {
    let temp = tempfile::tempdir().expect("tempdir");
    build_tree(temp.path(), &["a.txt", "sub/b.class", "sub/CVS/Entries"]);

    let mut scanner = DirectoryScanner::new()
        .with_basedir(temp.path())
        .with_includes(["**/*.class", "**/*.txt"])
        .with_excludes(Vec::<String>::new());
    scanner.add_default_excludes();
    scanner.scan().expect("scan");

    let included: BTreeSet<_> = scanner.included_files().iter().cloned().collect();
    assert_eq!(
        included,
        BTreeSet::from(["a.txt".to_owned(), sep("sub/b.class")])
    );
    assert!(
        scanner
            .not_included_files()
            .expect("slow")
            .contains(&sep("sub/CVS/Entries"))
    );
    assert!(scanner.excluded_files().expect("slow").is_empty());
    assert!(
        scanner
            .not_included_directories()
            .expect("slow")
            .contains(&sep("sub/CVS"))
    );
}

#[test]
fn every_name_lands_in_exactly_one_bucket() {
    let temp = tempfile::tempdir().expect("tempdir");
    build_tree(
        temp.path(),
        &[
            "keep/a.rs",
            "keep/b.txt",
            "keep/tmp/c.rs",
            "skip/d.rs",
            "skip/nested/e.rs",
            "top.rs~",
        ],
    );

    let mut scanner = DirectoryScanner::new()
        .with_basedir(temp.path())
        .with_includes(["keep/**", "*.rs~"])
        .with_excludes(["**/tmp/**"]);
    scanner.scan().expect("scan");

    let names = all_names(&mut scanner);
    let unique: BTreeSet<_> = names.iter().cloned().collect();
    assert_eq!(names.len(), unique.len(), "duplicate names: {names:?}");

    let expected: BTreeSet<String> = [
        "",
        "keep",
        "keep/a.rs",
        "keep/b.txt",
        "keep/tmp",
        "keep/tmp/c.rs",
        "skip",
        "skip/d.rs",
        "skip/nested",
        "skip/nested/e.rs",
        "top.rs~",
    ]
    .iter()
    .map(|name| sep(name))
    .collect();
    assert_eq!(unique, expected);
}

#[test]
fn pruned_directories_only_appear_after_slow_scan() {
    let temp = tempfile::tempdir().expect("tempdir");
    build_tree(temp.path(), &["src/lib.rs", "target/debug/build.log"]);

    let mut scanner = DirectoryScanner::new()
        .with_basedir(temp.path())
        .with_includes(["src/"]);
    scanner.scan().expect("scan");
    assert_eq!(scanner.counts().files_not_included, 0);
    assert_eq!(scanner.included_files(), [sep("src/lib.rs")]);

    assert_eq!(
        scanner.not_included_files().expect("slow"),
        [sep("target/debug/build.log")]
    );
    assert_eq!(scanner.state(), ScanState::FullyScanned);
}

#[test]
fn recursive_include_reaches_below_excluded_directory() {
    let temp = tempfile::tempdir().expect("tempdir");
    build_tree(temp.path(), &["build/gen/Keep.java"]);

    let mut scanner = DirectoryScanner::new()
        .with_basedir(temp.path())
        .with_includes(["**/*.java", "**/build"])
        .with_excludes(["build"]);
    scanner.scan().expect("scan");

    assert_eq!(scanner.included_files(), [sep("build/gen/Keep.java")]);
    assert_eq!(scanner.excluded_directories().expect("slow"), ["build"]);
    assert!(!scanner.is_everything_included());
}

#[test]
fn case_insensitive_scan() {
    let temp = tempfile::tempdir().expect("tempdir");
    build_tree(temp.path(), &["Docs/README.TXT", "docs2/other.md"]);

    let mut scanner = DirectoryScanner::new()
        .with_basedir(temp.path())
        .with_includes(["docs/*.txt"]);
    scanner.scan().expect("scan");
    assert!(scanner.included_files().is_empty());

    scanner.set_case_sensitive(false);
    scanner.scan().expect("rescan");
    assert_eq!(scanner.included_files(), [sep("Docs/README.TXT")]);
}

#[test]
fn rescan_resets_results() {
    let temp = tempfile::tempdir().expect("tempdir");
    build_tree(temp.path(), &["one.txt"]);

    let mut scanner = DirectoryScanner::new().with_basedir(temp.path());
    scanner.scan().expect("scan");
    build_tree(temp.path(), &["two.txt"]);
    scanner.scan().expect("rescan");

    assert_eq!(scanner.included_files(), ["one.txt", "two.txt"]);
    assert_eq!(scanner.included_directories(), [""]);
}

#[test]
fn missing_basedir_is_reported_with_path() {
    let temp = tempfile::tempdir().expect("tempdir");
    let missing = temp.path().join("absent");
    let mut scanner = DirectoryScanner::new().with_basedir(&missing);

    let error = scanner.scan().expect_err("missing basedir");
    assert!(matches!(error.kind(), ScanErrorKind::MissingBasedir { .. }));
    assert_eq!(error.path(), Some(missing.as_path()));
    assert!(!error.is_io());
}

#[test]
fn scanners_are_usable_through_the_trait() {
    let temp = tempfile::tempdir().expect("tempdir");
    build_tree(temp.path(), &["a/b.txt"]);

    let mut scanner: Box<dyn FileScanner> =
        Box::new(DirectoryScanner::from_selection(temp.path(), &Selection::default()));
    scanner.scan().expect("scan");
    assert_eq!(scanner.included_paths(), [temp.path().join("a").join("b.txt")]);
    assert!(scanner.excluded_files().expect("slow").is_empty());
}
