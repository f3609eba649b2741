//! crates/logging/src/levels.rs
//! Flag enums and per-flag level tables for info and debug output.

/// Categories of user-facing progress output.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InfoFlag {
    /// Directory scan summaries.
    Scan,
    /// Freshness selection results.
    Select,
    /// Path list composition.
    Path,
}

impl InfoFlag {
    /// Every info flag in declaration order.
    pub const ALL: [Self; 3] = [Self::Scan, Self::Select, Self::Path];

    /// Returns the token used on the command line for this flag.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Scan => "scan",
            Self::Select => "select",
            Self::Path => "path",
        }
    }
}

/// Categories of developer-facing trace output.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DebugFlag {
    /// Directory traversal and bucket classification.
    Scan,
    /// Individual pattern evaluation.
    Match,
    /// Reference resolution and cycle checks.
    Refs,
    /// Path list expansion and de-duplication.
    Path,
    /// Source/target timestamp comparison.
    Fresh,
    /// Name mapper construction and lookups.
    Map,
}

impl DebugFlag {
    /// Every debug flag in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Scan,
        Self::Match,
        Self::Refs,
        Self::Path,
        Self::Fresh,
        Self::Map,
    ];

    /// Returns the token used on the command line for this flag.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Scan => "scan",
            Self::Match => "match",
            Self::Refs => "refs",
            Self::Path => "path",
            Self::Fresh => "fresh",
            Self::Map => "map",
        }
    }
}

/// Info verbosity levels for each flag.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InfoLevels {
    /// Directory scan summary level.
    pub scan: u8,
    /// Freshness selection level.
    pub select: u8,
    /// Path list composition level.
    pub path: u8,
}

impl InfoLevels {
    /// Get the level for a specific flag.
    pub fn get(&self, flag: InfoFlag) -> u8 {
        match flag {
            InfoFlag::Scan => self.scan,
            InfoFlag::Select => self.select,
            InfoFlag::Path => self.path,
        }
    }

    /// Set the level for a specific flag.
    pub fn set(&mut self, flag: InfoFlag, level: u8) {
        match flag {
            InfoFlag::Scan => self.scan = level,
            InfoFlag::Select => self.select = level,
            InfoFlag::Path => self.path = level,
        }
    }

    /// Set all flags to the specified level.
    pub fn set_all(&mut self, level: u8) {
        for flag in InfoFlag::ALL {
            self.set(flag, level);
        }
    }
}

/// Debug verbosity levels for each flag.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DebugLevels {
    /// Traversal level.
    pub scan: u8,
    /// Pattern evaluation level.
    pub r#match: u8,
    /// Reference resolution level.
    pub refs: u8,
    /// Path list expansion level.
    pub path: u8,
    /// Timestamp comparison level.
    pub fresh: u8,
    /// Mapper level.
    pub map: u8,
}

impl DebugLevels {
    /// Get the level for a specific flag.
    pub fn get(&self, flag: DebugFlag) -> u8 {
        match flag {
            DebugFlag::Scan => self.scan,
            DebugFlag::Match => self.r#match,
            DebugFlag::Refs => self.refs,
            DebugFlag::Path => self.path,
            DebugFlag::Fresh => self.fresh,
            DebugFlag::Map => self.map,
        }
    }

    /// Set the level for a specific flag.
    pub fn set(&mut self, flag: DebugFlag, level: u8) {
        match flag {
            DebugFlag::Scan => self.scan = level,
            DebugFlag::Match => self.r#match = level,
            DebugFlag::Refs => self.refs = level,
            DebugFlag::Path => self.path = level,
            DebugFlag::Fresh => self.fresh = level,
            DebugFlag::Map => self.map = level,
        }
    }

    /// Set all flags to the specified level.
    pub fn set_all(&mut self, level: u8) {
        for flag in DebugFlag::ALL {
            self.set(flag, level);
        }
    }
}
