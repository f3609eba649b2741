use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use engine::{FreshnessScanner, MapperRegistry};
use filters::{ConfigError, Context, FileSet, PathList, Registry};
use logging::{DebugFlag, DiagnosticSink, InfoFlag, info_log};
use matching::substitute_properties;
use walk::FileScanner;

use crate::arguments::{CommandArgs, PathArgs, ScanArgs, SelectionArgs, StaleArgs};
use crate::error::CliError;

/// Runs the selected subcommand against `base_dir`, writing results to
/// `stdout`.
pub(crate) fn execute<W: Write>(
    command: &CommandArgs,
    base_dir: &Path,
    stdout: &mut W,
) -> Result<(), CliError> {
    let registry = Registry::new();
    match command {
        CommandArgs::Scan(args) => scan(args, &registry, base_dir, stdout),
        CommandArgs::Stale(args) => stale(args, &registry, base_dir, stdout),
        CommandArgs::Path(args) => path(args, &registry, base_dir, stdout),
    }
}

fn properties(selection: &SelectionArgs) -> BTreeMap<String, String> {
    selection.properties.iter().cloned().collect()
}

/// Builds the file set for `dir`. `${name}` references in pattern lists are
/// expanded here, the way attribute values are expanded when read.
fn file_set(
    dir: &Path,
    selection: &SelectionArgs,
    properties: &BTreeMap<String, String>,
) -> Result<FileSet, ConfigError> {
    let mut set = FileSet::new();
    set.set_dir(dir)?;
    for list in &selection.includes {
        set.set_includes(&substitute_properties(list, properties))?;
    }
    for list in &selection.excludes {
        set.set_excludes(&substitute_properties(list, properties))?;
    }
    for file in &selection.includes_files {
        set.add_includes_file(file.as_str())?;
    }
    for file in &selection.excludes_files {
        set.add_excludes_file(file.as_str())?;
    }
    set.set_default_excludes(!selection.no_default_excludes)?;
    set.set_case_sensitive(!selection.ignore_case)?;
    Ok(set)
}

fn write_names<W: Write>(stdout: &mut W, names: &[String]) -> Result<(), CliError> {
    for name in names {
        writeln!(stdout, "{name}")?;
    }
    Ok(())
}

fn write_section<W: Write>(stdout: &mut W, title: &str, names: &[String]) -> Result<(), CliError> {
    writeln!(stdout, "{title} ({}):", names.len())?;
    for name in names {
        writeln!(stdout, "  {name}")?;
    }
    Ok(())
}

fn scan<W: Write>(
    args: &ScanArgs,
    registry: &Registry,
    base_dir: &Path,
    stdout: &mut W,
) -> Result<(), CliError> {
    let props = properties(&args.selection);
    let context = Context::new(registry, base_dir).with_properties(&props);
    let set = file_set(&args.basedir, &args.selection, &props)?;
    let mut scanner = set.scan(&context)?;

    if !args.all {
        return write_names(stdout, scanner.included_files());
    }
    write_buckets(scanner.as_mut(), stdout)
}

fn write_buckets<W: Write>(scanner: &mut dyn FileScanner, stdout: &mut W) -> Result<(), CliError> {
    write_section(stdout, "included files", scanner.included_files())?;
    write_section(stdout, "included directories", scanner.included_directories())?;
    let names = scanner.excluded_files().map_err(ConfigError::from)?.to_vec();
    write_section(stdout, "excluded files", &names)?;
    let names = scanner.excluded_directories().map_err(ConfigError::from)?.to_vec();
    write_section(stdout, "excluded directories", &names)?;
    let names = scanner.not_included_files().map_err(ConfigError::from)?.to_vec();
    write_section(stdout, "not included files", &names)?;
    let names = scanner.not_included_directories().map_err(ConfigError::from)?.to_vec();
    write_section(stdout, "not included directories", &names)
}

fn stale<W: Write>(
    args: &StaleArgs,
    registry: &Registry,
    base_dir: &Path,
    stdout: &mut W,
) -> Result<(), CliError> {
    let mapper = MapperRegistry::with_builtins().create(
        &args.mapper,
        args.from.as_deref(),
        args.to.as_deref(),
    )?;
    let props = properties(&args.selection);
    let context = Context::new(registry, base_dir).with_properties(&props);
    let set = file_set(&args.src, &args.selection, &props)?;
    let dest = context.resolve_path(&args.dest);

    let sink = DiagnosticSink::new(InfoFlag::Select, DebugFlag::Fresh);
    let stale = FreshnessScanner::new(&sink).restrict_file_set(&set, &context, &dest, mapper.as_ref())?;
    info_log!(Select, 1, "{} out of date relative to {}", stale.len(), dest.display());
    write_names(stdout, &stale)
}

fn path<W: Write>(
    args: &PathArgs,
    registry: &Registry,
    base_dir: &Path,
    stdout: &mut W,
) -> Result<(), CliError> {
    let context = Context::new(registry, base_dir);
    let mut requested = PathList::new();
    for entry in &args.entries {
        requested.add_path_string(entry.as_str());
    }

    let list = if args.existing {
        let mut existing = PathList::new();
        existing.add_existing(&requested, &context)?;
        existing
    } else {
        requested
    };
    writeln!(stdout, "{}", list.to_display_string(&context)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_support::{FileTree, host_path};

    fn selection() -> SelectionArgs {
        SelectionArgs::default()
    }

    fn run(command: &CommandArgs, base: &Path) -> Result<String, CliError> {
        let mut stdout = Vec::new();
        execute(command, base, &mut stdout)?;
        Ok(String::from_utf8(stdout).expect("utf8"))
    }

    #[test]
    fn scan_lists_included_files_relative_to_basedir() {
        let dir = FileTree::new()
            .file("src/lib.rs")
            .file("src/main.rs")
            .file("src/notes.txt")
            .build();
        let mut selection = selection();
        selection.includes.push("**/*.rs".to_owned());
        let command = CommandArgs::Scan(ScanArgs {
            basedir: "src".into(),
            selection,
            all: false,
        });

        let output = run(&command, dir.path()).expect("scan");
        let mut lines: Vec<&str> = output.lines().collect();
        lines.sort_unstable();
        assert_eq!(lines, ["lib.rs", "main.rs"]);
    }

    #[test]
    fn scan_all_prints_every_bucket() {
        let dir = FileTree::new().file("a.txt").file("b.log").build();
        let mut selection = selection();
        selection.excludes.push("*.log".to_owned());
        let command = CommandArgs::Scan(ScanArgs {
            basedir: ".".into(),
            selection,
            all: true,
        });

        let output = run(&command, dir.path()).expect("scan");
        assert!(output.contains("included files (1):\n  a.txt\n"));
        assert!(output.contains("excluded files (1):\n  b.log\n"));
        assert!(output.contains("not included directories (0):"));
    }

    #[test]
    fn stale_reports_sources_without_targets() {
        let dir = FileTree::new()
            .file_at("src/a.c", 1_000)
            .file_at("src/b.c", 1_000)
            .file_at("out/a.o", 2_000)
            .build();
        let command = CommandArgs::Stale(StaleArgs {
            src: "src".into(),
            dest: "out".into(),
            mapper: "glob".to_owned(),
            from: Some("*.c".to_owned()),
            to: Some("*.o".to_owned()),
            selection: selection(),
        });

        assert_eq!(run(&command, dir.path()).expect("stale"), "b.c\n");
    }

    #[test]
    fn stale_rejects_unknown_mappers() {
        let dir = FileTree::new().file("src/a.c").build();
        let command = CommandArgs::Stale(StaleArgs {
            src: "src".into(),
            dest: "out".into(),
            mapper: "chained".to_owned(),
            from: None,
            to: None,
            selection: selection(),
        });

        let error = run(&command, dir.path()).expect_err("unknown mapper");
        assert!(matches!(error, CliError::Mapper(_)));
    }

    #[test]
    fn path_drops_missing_entries_on_request() {
        let dir = FileTree::new().file("lib/a.jar").build();
        let command = CommandArgs::Path(PathArgs {
            entries: vec!["lib/a.jar;lib/missing.jar".to_owned()],
            existing: true,
        });

        let expected = format!("{}\n", dir.join(&host_path("lib/a.jar")).display());
        assert_eq!(run(&command, dir.path()).expect("path"), expected);
    }

    #[test]
    fn missing_basedir_is_a_configuration_error() {
        let dir = FileTree::new().build();
        let command = CommandArgs::Scan(ScanArgs {
            basedir: "absent".into(),
            selection: selection(),
            all: false,
        });

        let error = run(&command, dir.path()).expect_err("missing dir");
        assert_eq!(error.exit_code(), crate::error::EXIT_CONFIG);
    }
}
