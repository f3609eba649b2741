use std::ffi::OsString;
use std::path::PathBuf;

use clap::ArgMatches;

use crate::command::clap_command;

/// Pattern options shared by `scan` and `stale`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionArgs {
    /// `--include` values, each a comma or space separated list.
    pub includes: Vec<String>,
    /// `--exclude` values.
    pub excludes: Vec<String>,
    /// `--includes-file` values.
    pub includes_files: Vec<String>,
    /// `--excludes-file` values.
    pub excludes_files: Vec<String>,
    /// `--no-default-excludes`.
    pub no_default_excludes: bool,
    /// `--ignore-case`.
    pub ignore_case: bool,
    /// `-D NAME=VALUE` definitions in order.
    pub properties: Vec<(String, String)>,
}

/// Arguments of `scan`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanArgs {
    /// Directory to scan.
    pub basedir: PathBuf,
    /// Pattern options.
    pub selection: SelectionArgs,
    /// `--all`.
    pub all: bool,
}

/// Arguments of `stale`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StaleArgs {
    /// Source root.
    pub src: PathBuf,
    /// Destination root.
    pub dest: PathBuf,
    /// Mapper type name.
    pub mapper: String,
    /// Mapper `from` parameter.
    pub from: Option<String>,
    /// Mapper `to` parameter.
    pub to: Option<String>,
    /// Pattern options.
    pub selection: SelectionArgs,
}

/// Arguments of `path`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathArgs {
    /// Path strings in order.
    pub entries: Vec<String>,
    /// `--existing`.
    pub existing: bool,
}

/// The selected subcommand.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommandArgs {
    /// `scan`.
    Scan(ScanArgs),
    /// `stale`.
    Stale(StaleArgs),
    /// `path`.
    Path(PathArgs),
}

/// Parsed command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedArgs {
    /// Number of `-v` flags.
    pub verbose: u8,
    /// `--info` values.
    pub info: Vec<String>,
    /// `--debug` values.
    pub debug: Vec<String>,
    /// The subcommand and its arguments.
    pub command: CommandArgs,
}

fn strings(matches: &ArgMatches, id: &str) -> Vec<String> {
    matches
        .get_many::<String>(id)
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}

fn path(matches: &ArgMatches, id: &str) -> PathBuf {
    matches.get_one::<PathBuf>(id).cloned().unwrap_or_default()
}

fn selection(matches: &ArgMatches) -> SelectionArgs {
    SelectionArgs {
        includes: strings(matches, "include"),
        excludes: strings(matches, "exclude"),
        includes_files: strings(matches, "includes-file"),
        excludes_files: strings(matches, "excludes-file"),
        no_default_excludes: matches.get_flag("no-default-excludes"),
        ignore_case: matches.get_flag("ignore-case"),
        properties: matches
            .get_many::<(String, String)>("define")
            .map(|values| values.cloned().collect())
            .unwrap_or_default(),
    }
}

/// Parses the command line, including the program name.
///
/// # Errors
///
/// The `clap` error for unknown options, missing operands, or `--help` and
/// `--version` requests.
pub fn parse_args<I, S>(arguments: I) -> Result<ParsedArgs, clap::Error>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString> + Clone,
{
    let matches = clap_command().try_get_matches_from(arguments)?;

    let command = match matches.subcommand() {
        Some(("scan", sub)) => CommandArgs::Scan(ScanArgs {
            basedir: path(sub, "basedir"),
            selection: selection(sub),
            all: sub.get_flag("all"),
        }),
        Some(("stale", sub)) => CommandArgs::Stale(StaleArgs {
            src: path(sub, "src"),
            dest: path(sub, "dest"),
            mapper: sub.get_one::<String>("mapper").cloned().unwrap_or_default(),
            from: sub.get_one::<String>("from").cloned(),
            to: sub.get_one::<String>("to").cloned(),
            selection: selection(sub),
        }),
        Some(("path", sub)) => CommandArgs::Path(PathArgs {
            entries: strings(sub, "entries"),
            existing: sub.get_flag("existing"),
        }),
        _ => {
            return Err(clap_command().error(
                clap::error::ErrorKind::MissingSubcommand,
                "a subcommand is required",
            ));
        }
    };

    Ok(ParsedArgs {
        verbose: matches.get_count("verbose"),
        info: strings(&matches, "info"),
        debug: strings(&matches, "debug"),
        command,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_flags_follow_the_subcommand() {
        let parsed = parse_args(["scanset", "scan", "src", "-vv", "--debug", "refs"])
            .expect("parse");
        assert_eq!(parsed.verbose, 2);
        assert_eq!(parsed.debug, ["refs"]);
        assert!(matches!(parsed.command, CommandArgs::Scan(ref scan) if scan.basedir == PathBuf::from("src")));
    }

    #[test]
    fn selection_options_accumulate() {
        let parsed = parse_args([
            "scanset", "scan", "src", "-i", "**/*.rs", "--include", "*.toml", "-e", "target/**",
            "-D", "a=1", "-D", "b=2", "--no-default-excludes", "--ignore-case",
        ])
        .expect("parse");
        let CommandArgs::Scan(scan) = parsed.command else {
            panic!("expected scan");
        };
        assert_eq!(scan.selection.includes, ["**/*.rs", "*.toml"]);
        assert_eq!(scan.selection.excludes, ["target/**"]);
        assert_eq!(
            scan.selection.properties,
            [("a".to_owned(), "1".to_owned()), ("b".to_owned(), "2".to_owned())]
        );
        assert!(scan.selection.no_default_excludes);
        assert!(scan.selection.ignore_case);
        assert!(!scan.all);
    }

    #[test]
    fn stale_requires_a_mapper() {
        assert!(parse_args(["scanset", "stale", "src", "out"]).is_err());
        let parsed = parse_args([
            "scanset", "stale", "src", "out", "--mapper", "glob", "--from", "*.c", "--to", "*.o",
        ])
        .expect("parse");
        let CommandArgs::Stale(stale) = parsed.command else {
            panic!("expected stale");
        };
        assert_eq!(stale.mapper, "glob");
        assert_eq!(stale.from.as_deref(), Some("*.c"));
        assert_eq!(stale.to.as_deref(), Some("*.o"));
    }

    #[test]
    fn path_takes_many_entries() {
        let parsed = parse_args(["scanset", "path", "a:b", "c", "--existing"]).expect("parse");
        assert_eq!(
            parsed.command,
            CommandArgs::Path(PathArgs {
                entries: vec!["a:b".to_owned(), "c".to_owned()],
                existing: true,
            })
        );
    }

    #[test]
    fn missing_subcommand_is_an_error() {
        assert!(parse_args(["scanset"]).is_err());
        assert!(parse_args(["scanset", "-v"]).is_err());
    }
}
