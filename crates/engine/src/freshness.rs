//! crates/engine/src/freshness.rs
//!
//! Selection of sources whose targets are missing or older.
//!
//! Each source name is mapped to its target names. A source is stale when
//! any target is missing or strictly older than the source; equal
//! modification times count as fresh. Sources the mapper does not handle
//! are skipped.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use filters::{ConfigError, Context, FileSet};
use logging::{LogSink, NullSink, Severity, debug_log};
use matching::normalize_separators;
use walk::FileScanner;

use crate::mapper::FileNameMapper;
use crate::trace;

/// Timestamp resolution of FAT-style filesystems.
pub const COARSE_TIMESTAMP_SLACK: Duration = Duration::from_millis(2000);

/// Slack added to the current time before warning about future sources.
pub const DEFAULT_FUTURE_SLACK: Duration = if cfg!(windows) {
    COARSE_TIMESTAMP_SLACK
} else {
    Duration::ZERO
};

/// Decides which sources need rebuilding.
///
/// # Examples
///
/// ```
/// use engine::{FreshnessScanner, Mapper, MapperKind};
/// use std::fs;
///
/// let src = tempfile::tempdir().unwrap();
/// let dest = tempfile::tempdir().unwrap();
/// fs::write(src.path().join("A.java"), b"class A {}").unwrap();
///
/// let mapper = Mapper::new(MapperKind::Glob, Some("*.java"), Some("*.class")).unwrap();
/// let stale = FreshnessScanner::default().restrict(&["A.java"], src.path(), dest.path(), &mapper);
/// assert_eq!(stale, ["A.java"]);
/// ```
#[derive(Clone, Copy)]
pub struct FreshnessScanner<'s> {
    sink: &'s dyn LogSink,
    future_slack: Duration,
    now: Option<SystemTime>,
}

impl std::fmt::Debug for FreshnessScanner<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FreshnessScanner")
            .field("future_slack", &self.future_slack)
            .field("now", &self.now)
            .finish_non_exhaustive()
    }
}

impl Default for FreshnessScanner<'static> {
    fn default() -> Self {
        Self::new(&NullSink)
    }
}

impl<'s> FreshnessScanner<'s> {
    /// Creates a scanner reporting to `sink`.
    #[must_use]
    pub fn new(sink: &'s dyn LogSink) -> Self {
        Self {
            sink,
            future_slack: DEFAULT_FUTURE_SLACK,
            now: None,
        }
    }

    /// Overrides the slack used for the future-timestamp warning.
    #[must_use]
    pub const fn with_future_slack(mut self, slack: Duration) -> Self {
        self.future_slack = slack;
        self
    }

    /// Pins the current time instead of reading the clock.
    #[must_use]
    pub const fn with_now(mut self, now: SystemTime) -> Self {
        self.now = Some(now);
        self
    }

    /// The names in `names` whose targets under `dest_root` are missing or
    /// older, in input order.
    ///
    /// Names are relative to `src_root`; target names produced by `mapper`
    /// are relative to `dest_root` unless absolute.
    pub fn restrict<S: AsRef<str>>(
        &self,
        names: &[S],
        src_root: &Path,
        dest_root: &Path,
        mapper: &dyn FileNameMapper,
    ) -> Vec<String> {
        // `None` when the slack reaches past the end of representable time.
        let horizon = self
            .now
            .unwrap_or_else(SystemTime::now)
            .checked_add(self.future_slack);
        let mut stale = Vec::new();
        for name in names {
            let name = normalize_separators(name.as_ref());
            if self.is_stale(&name, src_root, dest_root, mapper, horizon) {
                stale.push(name);
            }
        }
        debug_log!(Fresh, 1, "{} of {} sources are out of date", stale.len(), names.len());
        trace::restrict_finished(names.len(), stale.len());
        stale
    }

    /// Like [`restrict`](Self::restrict), returning the stale sources joined
    /// onto `src_root`.
    pub fn restrict_as_paths<S: AsRef<str>>(
        &self,
        names: &[S],
        src_root: &Path,
        dest_root: &Path,
        mapper: &dyn FileNameMapper,
    ) -> Vec<PathBuf> {
        self.restrict(names, src_root, dest_root, mapper)
            .into_iter()
            .map(|name| src_root.join(name))
            .collect()
    }

    /// Restricts the included files of a completed scan. Scanners without a
    /// base directory report names that are already paths.
    pub fn restrict_scanned(
        &self,
        scanner: &dyn FileScanner,
        dest_root: &Path,
        mapper: &dyn FileNameMapper,
    ) -> Vec<String> {
        let src_root = scanner.basedir().unwrap_or(Path::new(""));
        self.restrict(scanner.included_files(), src_root, dest_root, mapper)
    }

    /// Scans `set` and restricts its included files.
    ///
    /// # Errors
    ///
    /// Any failure resolving or scanning the file set.
    pub fn restrict_file_set(
        &self,
        set: &FileSet,
        context: &Context<'_>,
        dest_root: &Path,
        mapper: &dyn FileNameMapper,
    ) -> Result<Vec<String>, ConfigError> {
        let scanner = set.scan(context)?;
        Ok(self.restrict_scanned(scanner.as_ref(), dest_root, mapper))
    }

    fn is_stale(
        &self,
        name: &str,
        src_root: &Path,
        dest_root: &Path,
        mapper: &dyn FileNameMapper,
        horizon: Option<SystemTime>,
    ) -> bool {
        let targets = mapper.map_file_name(name);
        if targets.is_empty() {
            self.sink.log(
                &format!("{name} skipped - don't know how to handle it"),
                Severity::Verbose,
            );
            return false;
        }
        debug_log!(Map, 2, "{} maps to {:?}", name, targets);

        let source_time = modified(&src_root.join(name)).unwrap_or(SystemTime::UNIX_EPOCH);
        if horizon.is_some_and(|horizon| source_time > horizon) {
            self.sink.log(
                &format!("Warning: {name} modified in the future."),
                Severity::Warn,
            );
        }

        for target in &targets {
            let path = dest_root.join(target);
            let reason = match modified(&path) {
                None => "doesn't exist",
                Some(target_time) if source_time > target_time => "is outdated",
                Some(_) => continue,
            };
            self.sink.log(
                &format!("{name} added as {} {reason}.", path.display()),
                Severity::Verbose,
            );
            trace::source_checked(name, targets.len(), true);
            return true;
        }

        let verb = if targets.len() == 1 { "is" } else { "are" };
        self.sink.log(
            &format!("{name} omitted as {} {verb} up to date.", targets.join(", ")),
            Severity::Verbose,
        );
        trace::source_checked(name, targets.len(), false);
        false
    }
}

fn modified(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|metadata| metadata.modified()).ok()
}
