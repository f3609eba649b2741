//! Path list composition: tokenizing, ordering, de-duplication and the
//! interaction with file sets and registered references.

use std::path::Path;

use filters::{
    ConfigError, Context, FileSet, FileSetSpec, PATH_LIST_SEPARATOR, PathList, Registry,
    split_path_list,
};
use proptest::prelude::*;
use test_support::FileTree;

fn absolute(base: &Path, names: &[&str]) -> Vec<String> {
    names
        .iter()
        .map(|name| base.join(name).to_string_lossy().into_owned())
        .collect()
}

// ============================================================================
// Ordering and de-duplication
// ============================================================================

#[test]
fn same_literal_twice_appears_once_in_first_position() {
    let registry = Registry::new();
    let base = std::env::temp_dir();
    let context = Context::new(&registry, &base);

    let mut list = PathList::new();
    list.add_literal("first");
    list.add_literal("second");
    list.add_literal("first");

    assert_eq!(
        list.resolve(&context).expect("resolve"),
        absolute(&base, &["first", "second"])
    );
}

#[test]
fn nested_lists_expand_before_deduplication() {
    let registry = Registry::new();
    let base = std::env::temp_dir();
    let context = Context::new(&registry, &base);

    let mut inner = PathList::new();
    inner.add_literal("b");
    inner.add_literal("a");
    let mut outer = PathList::new();
    outer.add_literal("a");
    outer.add_nested(inner);
    outer.add_literal("c");

    assert_eq!(
        outer.resolve(&context).expect("resolve"),
        absolute(&base, &["a", "b", "c"])
    );
}

#[test]
fn display_string_uses_platform_separator() {
    let registry = Registry::new();
    let base = std::env::temp_dir();
    let context = Context::new(&registry, &base);

    let mut list = PathList::new();
    list.add_path_string("one;two");
    let expected = absolute(&base, &["one", "two"]).join(&PATH_LIST_SEPARATOR.to_string()[..]);
    assert_eq!(list.to_display_string(&context).expect("display"), expected);
}

// ============================================================================
// File sets and references
// ============================================================================

#[test]
fn classpath_from_literals_and_registered_file_set() {
    let dir = FileTree::new()
        .file("lib/log.jar")
        .file("lib/core.jar")
        .file("lib/src.zip")
        .dir("classes")
        .build();

    let mut registry = Registry::new();
    registry.insert(
        "libs",
        FileSet::from(FileSetSpec::new().with_dir("lib").with_includes("*.jar")),
    );
    let mut classpath = PathList::new();
    classpath.add_literal("classes");
    classpath.add_reference("libs");
    classpath.add_file_set(FileSet::reference("libs"));
    registry.insert("classpath", classpath);

    let mut run = PathList::new();
    run.add_reference("classpath");
    run.add_literal("lib/core.jar");

    let context = Context::new(&registry, dir.path());
    assert_eq!(
        run.resolve(&context).expect("resolve"),
        absolute(dir.path(), &["classes", "lib/core.jar", "lib/log.jar"])
            .into_iter()
            .map(|entry| entry.replace('/', std::path::MAIN_SEPARATOR_STR))
            .collect::<Vec<_>>()
    );
}

#[test]
fn circular_path_references_are_rejected() {
    let mut registry = Registry::new();
    let mut a = PathList::new();
    a.add_reference("b");
    let mut b = PathList::new();
    b.add_literal("x");
    b.add_reference("a");
    registry.insert("a", a);
    registry.insert("b", b);

    let mut list = PathList::new();
    list.add_reference("a");
    let context = Context::new(&registry, Path::new("."));
    let error = list.resolve(&context).expect_err("cycle");
    assert!(matches!(error, ConfigError::CircularReference { ref chain } if chain == "a -> b -> a"));
}

#[test]
fn unknown_reference_is_reported() {
    let registry = Registry::new();
    let mut list = PathList::new();
    list.add_reference("nowhere");
    let context = Context::new(&registry, Path::new("."));
    assert_eq!(
        list.resolve(&context).expect_err("unknown").to_string(),
        "Reference nowhere not found."
    );
}

// ============================================================================
// Tokenizer properties
// ============================================================================

proptest! {
    #[test]
    fn tokens_never_contain_list_separators_or_empties(input in "[a-z/:;]{0,24}") {
        for token in split_path_list(&input) {
            prop_assert!(!token.is_empty());
            prop_assert!(!token.contains(';'));
            // A colon survives only as part of a drive prefix.
            if let Some(index) = token.find(':') {
                prop_assert_eq!(index, 1);
            }
        }
    }

    #[test]
    fn plain_names_round_trip(names in prop::collection::vec("[a-z0-9_.]{1,8}", 0..6)) {
        prop_assert_eq!(split_path_list(&names.join(":")), names);
    }
}
