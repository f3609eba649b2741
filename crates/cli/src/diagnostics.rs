use std::io::{self, Write};

use logging::{DiagnosticEvent, VerbosityConfig, drain_events};
use tracing_subscriber::EnvFilter;

use crate::arguments::ParsedArgs;
use crate::command::PROGRAM_NAME;
use crate::error::CliError;

/// Environment variable holding a `tracing` filter directive.
pub(crate) const LOG_ENV: &str = "SCANSET_LOG";

/// Builds the verbosity configuration from `-v`, `--info` and `--debug`.
pub(crate) fn verbosity(args: &ParsedArgs) -> Result<VerbosityConfig, CliError> {
    let mut config = VerbosityConfig::from_verbose_level(args.verbose);
    for list in &args.info {
        config
            .apply_info_flags(list)
            .map_err(|message| CliError::Usage(format!("--info: {message}")))?;
    }
    for list in &args.debug {
        config
            .apply_debug_flags(list)
            .map_err(|message| CliError::Usage(format!("--debug: {message}")))?;
    }
    Ok(config)
}

/// Applies `config` to this thread and installs the tracing bridge once per
/// process.
pub(crate) fn install(config: VerbosityConfig) {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("scanset=trace"));
    logging::init_tracing_with_filter(config, filter);
}

/// Writes the collected diagnostics to `stderr`.
pub(crate) fn flush<W: Write>(stderr: &mut W) -> io::Result<()> {
    for event in drain_events() {
        match event {
            DiagnosticEvent::Warning { message } => {
                writeln!(stderr, "{PROGRAM_NAME} warning: {message}")?;
            }
            other => writeln!(stderr, "{PROGRAM_NAME}: {}", other.message())?,
        }
    }
    Ok(())
}

/// Writes `error` to `stderr`.
pub(crate) fn report<W: Write>(stderr: &mut W, error: &CliError) -> io::Result<()> {
    writeln!(stderr, "{PROGRAM_NAME} error: {error}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arguments::{CommandArgs, PathArgs};
    use logging::{DebugFlag, InfoFlag};

    fn args(verbose: u8, info: &[&str], debug: &[&str]) -> ParsedArgs {
        ParsedArgs {
            verbose,
            info: info.iter().map(|s| (*s).to_owned()).collect(),
            debug: debug.iter().map(|s| (*s).to_owned()).collect(),
            command: CommandArgs::Path(PathArgs {
                entries: vec!["a".to_owned()],
                existing: false,
            }),
        }
    }

    #[test]
    fn flags_refine_the_verbose_level() {
        let config = verbosity(&args(0, &["path2"], &["refs"])).expect("valid flags");
        assert_eq!(config.info.get(InfoFlag::Path), 2);
        assert_eq!(config.debug.get(DebugFlag::Refs), 1);
        assert_eq!(config.debug.get(DebugFlag::Fresh), 0);
    }

    #[test]
    fn unknown_flags_are_usage_errors() {
        let error = verbosity(&args(0, &[], &["bogus"])).expect_err("unknown flag");
        assert!(matches!(error, CliError::Usage(ref message) if message.starts_with("--debug: ")));
    }

    #[test]
    fn warnings_are_prefixed_differently() {
        logging::init(VerbosityConfig::default());
        let _ = drain_events();
        logging::emit_warning("late".to_owned());
        let mut stderr = Vec::new();
        flush(&mut stderr).expect("write");
        assert_eq!(String::from_utf8(stderr).expect("utf8"), "scanset warning: late\n");
    }
}
