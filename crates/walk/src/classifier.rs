use logging::debug_log;
use matching::{match_path, match_prefix, normalize_pattern};

use crate::defaults::default_excludes;
use crate::trace;

/// Outcome of testing one relative name against the include and exclude
/// lists.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Classification {
    /// Matches at least one include and no exclude.
    Included,
    /// Matches at least one include and at least one exclude.
    Excluded,
    /// Matches no include.
    NotIncluded,
}

impl Classification {
    /// Lower-case label used in diagnostics.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Included => "included",
            Self::Excluded => "excluded",
            Self::NotIncluded => "not included",
        }
    }
}

/// The include/exclude lists and case flag a scanner classifies with.
///
/// `includes` of `None` means "not configured"; scanners replace it with
/// `["**"]` when a scan starts. An explicitly empty list includes nothing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Classifier {
    includes: Option<Vec<String>>,
    excludes: Vec<String>,
    case_sensitive: bool,
}

impl Default for Classifier {
    fn default() -> Self {
        Self {
            includes: None,
            excludes: Vec::new(),
            case_sensitive: true,
        }
    }
}

impl Classifier {
    /// Replaces the include list. Patterns are separator-normalized and a
    /// trailing separator selects the whole subtree.
    pub fn set_includes<I, S>(&mut self, patterns: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.includes = Some(normalize_all(patterns));
    }

    /// Replaces the exclude list, normalized like [`set_includes`](Self::set_includes).
    pub fn set_excludes<I, S>(&mut self, patterns: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.excludes = normalize_all(patterns);
    }

    /// Appends the default excludes, skipping any already present.
    pub fn add_default_excludes(&mut self) {
        for pattern in default_excludes() {
            if !self.excludes.contains(&pattern) {
                self.excludes.push(pattern);
            }
        }
    }

    /// Sets case sensitivity for every comparison.
    pub fn set_case_sensitive(&mut self, case_sensitive: bool) {
        self.case_sensitive = case_sensitive;
    }

    /// Installs `["**"]` when no include list was configured.
    pub(crate) fn default_includes(&mut self) {
        if self.includes.is_none() {
            self.includes = Some(vec!["**".to_owned()]);
        }
    }

    /// Configured include patterns, `None` when unset.
    #[must_use]
    pub fn includes(&self) -> Option<&[String]> {
        self.includes.as_deref()
    }

    /// Configured exclude patterns.
    #[must_use]
    pub fn excludes(&self) -> &[String] {
        &self.excludes
    }

    /// Whether comparisons are case sensitive.
    #[must_use]
    pub const fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    fn include_patterns(&self) -> &[String] {
        self.includes.as_deref().unwrap_or(&[])
    }

    /// Tests `name` against the include list.
    #[must_use]
    pub fn is_included(&self, name: &str) -> bool {
        self.include_patterns()
            .iter()
            .any(|pattern| match_path(pattern, name, self.case_sensitive))
    }

    /// Tests `name` against the exclude list.
    #[must_use]
    pub fn is_excluded(&self, name: &str) -> bool {
        self.excludes
            .iter()
            .any(|pattern| match_path(pattern, name, self.case_sensitive))
    }

    /// Whether entries below directory `name` could still be included.
    #[must_use]
    pub fn could_hold_included(&self, name: &str) -> bool {
        self.include_patterns()
            .iter()
            .any(|pattern| match_prefix(pattern, name, self.case_sensitive))
    }

    /// Places `name` in exactly one of the three classes.
    #[must_use]
    pub fn classify(&self, name: &str) -> Classification {
        let class = if !self.is_included(name) {
            Classification::NotIncluded
        } else if self.is_excluded(name) {
            Classification::Excluded
        } else {
            Classification::Included
        };
        debug_log!(Match, 2, "{:?} is {}", name, class.label());
        trace::entry_classified(name, class);
        class
    }
}

fn normalize_all<I, S>(patterns: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    patterns
        .into_iter()
        .map(|pattern| normalize_pattern(pattern.as_ref()))
        .collect()
}
