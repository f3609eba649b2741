use std::collections::HashMap;

use test_support::{FileTree, host_path};

use super::*;

#[test]
fn file_set_through_pattern_set_reference_chain() {
    let dir = FileTree::new()
        .file("src/a/Main.java")
        .file("src/a/Main.class")
        .file("src/a/CVS/Entries")
        .build();

    let mut registry = Registry::new();
    let mut java = PatternSet::new();
    java.set_includes("**/*.java").expect("owned");
    registry.insert("java", java);
    let mut alias = PatternSet::new();
    alias.set_refid("java").expect("empty");
    registry.insert("sources", alias);

    let set = FileSet::from(
        FileSetSpec::new()
            .with_dir("src")
            .with_pattern_set(PatternSet::reference("sources")),
    );
    let context = Context::new(&registry, dir.path());
    let scanner = set.scan(&context).expect("scan");
    assert_eq!(scanner.included_files(), [host_path("a/Main.java")]);
}

#[test]
fn cycle_through_file_set_is_reported_on_scan() {
    let dir = FileTree::new().file("a.txt").build();
    let mut registry = Registry::new();
    registry.insert("p1", PatternSet::reference("p2"));
    registry.insert("p2", PatternSet::reference("p1"));

    let set = FileSet::from(
        FileSetSpec::new()
            .with_dir(".")
            .with_pattern_set(PatternSet::reference("p1")),
    );
    let context = Context::new(&registry, dir.path());
    let error = set.scan(&context).expect_err("cycle");
    assert!(matches!(error, ConfigError::CircularReference { ref chain } if chain == "p1 -> p2 -> p1"));
    assert!(!error.is_io());
}

#[test]
fn properties_steer_conditional_patterns_of_a_file_set() {
    let dir = FileTree::new().file("debug.log").file("app.bin").build();
    let registry = Registry::new();
    let mut props = HashMap::new();
    props.insert("keep.logs".to_owned(), "true".to_owned());

    let mut set = FileSet::new();
    set.set_dir(".").expect("owned");
    set.add_exclude(matching::Pattern::new("*.log").unless_set("keep.logs"))
        .expect("owned");

    let lenient = Context::new(&registry, dir.path()).with_properties(&props);
    assert_eq!(set.scan(&lenient).expect("scan").included_files().len(), 2);

    let strict = Context::new(&registry, dir.path());
    assert_eq!(
        set.scan(&strict).expect("scan").included_files(),
        [host_path("app.bin")]
    );
}

#[test]
fn missing_list_file_message_names_the_path() {
    let dir = FileTree::new().file("a.txt").build();
    let registry = Registry::new();
    let context = Context::new(&registry, dir.path());

    let mut set = PatternSet::new();
    set.add_includes_file("missing-list.txt").expect("owned");
    let file_set = FileSet::from(FileSetSpec::new().with_dir(".").with_pattern_set(set));
    let error = file_set.scan(&context).expect_err("missing list");
    assert!(matches!(error, ConfigError::MissingListFile { kind: ListKind::Includes, .. }));
    assert_eq!(
        error.to_string(),
        format!("Includesfile {} not found.", dir.join("missing-list.txt").display())
    );
}

#[test]
fn registry_lookup_by_kind() {
    let mut registry = Registry::new();
    registry.insert("files", FileSet::new());
    assert_eq!(registry.len(), 1);
    assert!(registry.file_set(&RefId::from("files")).is_ok());
    let error = registry.path_list(&RefId::from("files")).expect_err("mismatch");
    assert_eq!(error.to_string(), "files doesn't denote a path (found a fileset)");
}
