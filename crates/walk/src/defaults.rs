//! Built-in exclude patterns for version-control and editor artifacts.

use matching::normalize_pattern;

/// Patterns appended by [`DirectoryScanner::add_default_excludes`](crate::DirectoryScanner::add_default_excludes).
///
/// The strings are kept verbatim; separators are normalized when they are
/// added to a scanner.
pub const DEFAULT_EXCLUDES: [&str; 10] = [
    "**/*~",
    "**/#*#",
    "**/.#*",
    "**/%*%",
    "**/CVS",
    "**/CVS/**",
    "**/.cvsignore",
    "**/SCCS",
    "**/SCCS/**",
    "**/vssver.scc",
];

/// Returns the default excludes with host separators.
pub fn default_excludes() -> impl Iterator<Item = String> {
    DEFAULT_EXCLUDES.iter().map(|pattern| normalize_pattern(pattern))
}
