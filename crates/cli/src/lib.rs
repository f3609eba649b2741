#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `cli` is the command-line front end of `scanset`. It parses arguments
//! with `clap`, builds [`filters`] data types from them, and prints scan
//! results, stale sources or composed path lists.
//!
//! | Subcommand | Output |
//! |------------|--------|
//! | `scan BASEDIR` | included files, or all six buckets with `--all` |
//! | `stale SRC DEST --mapper KIND` | sources whose targets are missing or older |
//! | `path ENTRY...` | the de-duplicated path list joined with the host separator |
//!
//! # Design
//!
//! [`run`] takes the argument iterator and the two output streams so the
//! binary and the tests drive the same code. Diagnostics collected through
//! the `logging` crate are flushed to standard error after the command
//! finishes, prefixed with the program name.
//!
//! # Errors
//!
//! [`run`] never panics on bad input. It returns `0` on success, `1` for
//! usage and configuration mistakes, and `2` when the filesystem failed.
//!
//! # Examples
//!
//! ```
//! let mut stdout = Vec::new();
//! let mut stderr = Vec::new();
//! let status = cli::run(["scanset", "--version"], &mut stdout, &mut stderr);
//! assert_eq!(status, 0);
//! assert!(String::from_utf8(stdout).unwrap().starts_with("scanset "));
//! ```
//!
//! # See also
//!
//! - [`engine`] for the freshness checks behind `stale`.

use std::ffi::OsString;
use std::io::Write;

mod arguments;
mod command;
mod diagnostics;
mod error;
mod execution;

pub use arguments::{CommandArgs, ParsedArgs, PathArgs, ScanArgs, SelectionArgs, StaleArgs};
pub use error::{CliError, EXIT_CONFIG, EXIT_IO, EXIT_OK};

/// Parses `arguments`, runs the subcommand, and returns the exit status.
///
/// The first argument is the program name. `--help` and `--version` print
/// to `stdout`; parse errors print to `stderr`.
pub fn run<I, S, Out, Err>(arguments: I, stdout: &mut Out, stderr: &mut Err) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString> + Clone,
    Out: Write,
    Err: Write,
{
    let parsed = match arguments::parse_args(arguments) {
        Ok(parsed) => parsed,
        Err(error) => return render_parse_error(&error, stdout, stderr),
    };

    if let Err(error) = execute(&parsed, stdout) {
        // A stderr that cannot take the diagnostics outranks the error itself.
        let flushed = diagnostics::flush(stderr);
        let reported = diagnostics::report(stderr, &error);
        return match flushed.and(reported) {
            Ok(()) => error.exit_code(),
            Err(_) => EXIT_IO,
        };
    }
    match diagnostics::flush(stderr) {
        Ok(()) => EXIT_OK,
        Err(_) => EXIT_IO,
    }
}

fn execute<Out: Write>(parsed: &ParsedArgs, stdout: &mut Out) -> Result<(), CliError> {
    let config = diagnostics::verbosity(parsed)?;
    diagnostics::install(config);
    let base_dir = std::env::current_dir()?;
    execution::execute(&parsed.command, &base_dir, stdout)?;
    stdout.flush()?;
    Ok(())
}

fn render_parse_error<Out: Write, Err: Write>(
    error: &clap::Error,
    stdout: &mut Out,
    stderr: &mut Err,
) -> i32 {
    use clap::error::ErrorKind;

    let rendered = error.render().to_string();
    match error.kind() {
        ErrorKind::DisplayHelp
        | ErrorKind::DisplayVersion
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
            let _ = write!(stdout, "{rendered}");
            if error.kind() == ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand {
                EXIT_CONFIG
            } else {
                EXIT_OK
            }
        }
        _ => {
            let _ = write!(stderr, "{rendered}");
            EXIT_CONFIG
        }
    }
}

/// Helpers for exercising argument parsing without running a command.
pub mod test_utils {
    pub use crate::arguments::parse_args;
}
