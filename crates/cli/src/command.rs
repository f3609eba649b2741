use clap::{Arg, ArgAction, Command, value_parser};

/// Name used in usage text and diagnostics.
pub(crate) const PROGRAM_NAME: &str = "scanset";

/// Parses a `NAME=VALUE` property definition.
fn parse_property(definition: &str) -> Result<(String, String), String> {
    match definition.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_owned(), value.to_owned())),
        _ => Err(format!("expected NAME=VALUE, got '{definition}'")),
    }
}

/// Include/exclude options shared by the `scan` and `stale` subcommands.
fn selection_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("include")
                .long("include")
                .short('i')
                .value_name("PATTERNS")
                .help("Comma or space separated include patterns (repeatable).")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("exclude")
                .long("exclude")
                .short('e')
                .value_name("PATTERNS")
                .help("Comma or space separated exclude patterns (repeatable).")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("includes-file")
                .long("includes-file")
                .value_name("FILE")
                .help("Read include patterns from FILE, one per line.")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("excludes-file")
                .long("excludes-file")
                .value_name("FILE")
                .help("Read exclude patterns from FILE, one per line.")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("no-default-excludes")
                .long("no-default-excludes")
                .help("Do not exclude version-control and editor artifacts.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("ignore-case")
                .long("ignore-case")
                .help("Match patterns case-insensitively.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("define")
                .short('D')
                .value_name("NAME=VALUE")
                .help("Define a property for ${NAME} substitution and conditions.")
                .value_parser(parse_property)
                .action(ArgAction::Append),
        )
}

fn scan_command() -> Command {
    selection_args(
        Command::new("scan")
            .about("List the files selected under a directory.")
            .arg(
                Arg::new("basedir")
                    .value_name("BASEDIR")
                    .required(true)
                    .value_parser(value_parser!(std::path::PathBuf)),
            )
            .arg(
                Arg::new("all")
                    .long("all")
                    .help("Print all six classification buckets.")
                    .action(ArgAction::SetTrue),
            ),
    )
}

fn stale_command() -> Command {
    selection_args(
        Command::new("stale")
            .about("List the files under SRC whose targets under DEST are missing or older.")
            .arg(
                Arg::new("src")
                    .value_name("SRC")
                    .required(true)
                    .value_parser(value_parser!(std::path::PathBuf)),
            )
            .arg(
                Arg::new("dest")
                    .value_name("DEST")
                    .required(true)
                    .value_parser(value_parser!(std::path::PathBuf)),
            )
            .arg(
                Arg::new("mapper")
                    .long("mapper")
                    .value_name("KIND")
                    .required(true)
                    .help("Mapper type: identity, flatten, glob, merge or regexp."),
            )
            .arg(Arg::new("from").long("from").value_name("PATTERN"))
            .arg(Arg::new("to").long("to").value_name("PATTERN")),
    )
}

fn path_command() -> Command {
    Command::new("path")
        .about("Compose a de-duplicated path list from path strings.")
        .arg(
            Arg::new("entries")
                .value_name("ENTRY")
                .required(true)
                .num_args(1..)
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("existing")
                .long("existing")
                .help("Drop entries that do not exist.")
                .action(ArgAction::SetTrue),
        )
}

/// Builds the `clap` command used for parsing.
pub(crate) fn clap_command() -> Command {
    Command::new(PROGRAM_NAME)
        .version(env!("CARGO_PKG_VERSION"))
        .about("File selection and freshness checks for build trees.")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Increase verbosity (repeatable).")
                .action(ArgAction::Count)
                .global(true),
        )
        .arg(
            Arg::new("info")
                .long("info")
                .value_name("FLAGS")
                .help("Fine-grained info verbosity, e.g. scan2,path.")
                .action(ArgAction::Append)
                .global(true),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .value_name("FLAGS")
                .help("Fine-grained debug verbosity, e.g. refs,fresh2.")
                .action(ArgAction::Append)
                .global(true),
        )
        .subcommand(scan_command())
        .subcommand(stale_command())
        .subcommand(path_command())
}
