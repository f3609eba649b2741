use std::io;

use engine::MapperError;
use filters::ConfigError;
use thiserror::Error;

/// Exit status for success.
pub const EXIT_OK: i32 = 0;
/// Exit status for usage and configuration mistakes.
pub const EXIT_CONFIG: i32 = 1;
/// Exit status for filesystem failures.
pub const EXIT_IO: i32 = 2;

/// Failures reported by [`run`](crate::run).
#[derive(Debug, Error)]
pub enum CliError {
    /// Bad flag values that `clap` cannot catch.
    #[error("{0}")]
    Usage(String),
    /// Building or resolving a data type failed.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The mapper could not be built.
    #[error(transparent)]
    Mapper(#[from] MapperError),
    /// Writing output or reading the working directory failed.
    #[error("{0}")]
    Io(#[from] io::Error),
}

impl CliError {
    /// Process exit status for the failure.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(error) if error.is_io() => EXIT_IO,
            Self::Io(_) => EXIT_IO,
            Self::Usage(_) | Self::Config(_) | Self::Mapper(_) => EXIT_CONFIG,
        }
    }
}
