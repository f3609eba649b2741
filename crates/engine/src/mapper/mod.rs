//! crates/engine/src/mapper/mod.rs
//!
//! Source-to-target file name mappers.
//!
//! A mapper turns a source name relative to the source root into zero or
//! more target names relative to the destination root. An empty result means
//! the mapper does not handle the name.

mod glob;
mod regexp;
mod registry;

use std::fmt;
use std::str::FromStr;

use matching::is_separator;

use crate::error::MapperError;

pub use glob::GlobMapper;
pub use regexp::RegexpMapper;
pub use registry::{MapperFactory, MapperRegistry};

/// Maps a source name to the names of its targets.
pub trait FileNameMapper {
    /// Target names for `source`; empty when the name is not handled.
    fn map_file_name(&self, source: &str) -> Vec<String>;
}

impl<T: FileNameMapper + ?Sized> FileNameMapper for &T {
    fn map_file_name(&self, source: &str) -> Vec<String> {
        (**self).map_file_name(source)
    }
}

impl<T: FileNameMapper + ?Sized> FileNameMapper for Box<T> {
    fn map_file_name(&self, source: &str) -> Vec<String> {
        (**self).map_file_name(source)
    }
}

/// The built-in mapper variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MapperKind {
    /// Target name equals the source name.
    Identity,
    /// Target name is the source's final segment.
    Flatten,
    /// `*`-based prefix/suffix rewriting.
    Glob,
    /// Every source maps to one fixed target.
    Merge,
    /// Regular expression with back-references.
    Regexp,
}

impl MapperKind {
    /// Every built-in kind, in registration order.
    pub const ALL: [Self; 5] = [
        Self::Identity,
        Self::Flatten,
        Self::Glob,
        Self::Merge,
        Self::Regexp,
    ];

    /// Configuration name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Identity => "identity",
            Self::Flatten => "flatten",
            Self::Glob => "glob",
            Self::Merge => "merge",
            Self::Regexp => "regexp",
        }
    }
}

impl fmt::Display for MapperKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MapperKind {
    type Err = MapperError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == name)
            .ok_or_else(|| MapperError::UnknownMapper {
                name: name.to_owned(),
            })
    }
}

/// A configured built-in mapper.
///
/// # Examples
///
/// ```
/// use engine::{FileNameMapper, Mapper, MapperKind};
///
/// let mapper = Mapper::new(MapperKind::Glob, Some("*.java"), Some("*.class")).unwrap();
/// assert_eq!(mapper.map_file_name("Main.java"), ["Main.class"]);
/// assert!(mapper.map_file_name("README").is_empty());
/// ```
#[derive(Clone, Debug)]
pub enum Mapper {
    /// See [`MapperKind::Identity`].
    Identity,
    /// See [`MapperKind::Flatten`].
    Flatten,
    /// See [`MapperKind::Glob`].
    Glob(GlobMapper),
    /// See [`MapperKind::Merge`].
    Merge {
        /// The single target name.
        to: String,
    },
    /// See [`MapperKind::Regexp`].
    Regexp(RegexpMapper),
}

impl Mapper {
    /// Builds a mapper of `kind` from its `from` and `to` parameters.
    ///
    /// Parameters a kind does not use are ignored.
    ///
    /// # Errors
    ///
    /// [`MapperError::MissingAttribute`] when `glob` or `regexp` lack either
    /// parameter or `merge` lacks `to`; [`MapperError::InvalidRegex`] for a
    /// malformed expression.
    pub fn new(kind: MapperKind, from: Option<&str>, to: Option<&str>) -> Result<Self, MapperError> {
        let require = |value: Option<&str>, attribute| {
            value
                .map(str::to_owned)
                .ok_or(MapperError::missing(kind, attribute))
        };
        Ok(match kind {
            MapperKind::Identity => Self::Identity,
            MapperKind::Flatten => Self::Flatten,
            MapperKind::Merge => Self::Merge {
                to: require(to, "to")?,
            },
            MapperKind::Glob => {
                let from = require(from, "from")?;
                let to = require(to, "to")?;
                Self::Glob(GlobMapper::new(&from, &to))
            }
            MapperKind::Regexp => {
                let from = require(from, "from")?;
                let to = require(to, "to")?;
                Self::Regexp(RegexpMapper::new(&from, &to)?)
            }
        })
    }

    /// The variant of this mapper.
    #[must_use]
    pub const fn kind(&self) -> MapperKind {
        match self {
            Self::Identity => MapperKind::Identity,
            Self::Flatten => MapperKind::Flatten,
            Self::Glob(_) => MapperKind::Glob,
            Self::Merge { .. } => MapperKind::Merge,
            Self::Regexp(_) => MapperKind::Regexp,
        }
    }
}

impl FileNameMapper for Mapper {
    fn map_file_name(&self, source: &str) -> Vec<String> {
        match self {
            Self::Identity => vec![source.to_owned()],
            Self::Flatten => vec![base_name(source).to_owned()],
            Self::Glob(glob) => glob.map_file_name(source),
            Self::Merge { to } => vec![to.clone()],
            Self::Regexp(regexp) => regexp.map_file_name(source),
        }
    }
}

/// Final segment of `name`, splitting on either separator.
fn base_name(name: &str) -> &str {
    name.rsplit(is_separator).next().unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_parse_from_configuration_names() {
        for kind in MapperKind::ALL {
            assert_eq!(kind.as_str().parse::<MapperKind>().expect("known"), kind);
        }
        assert!(matches!(
            "package".parse::<MapperKind>(),
            Err(MapperError::UnknownMapper { ref name }) if name == "package"
        ));
    }

    #[test]
    fn identity_and_flatten() {
        let identity = Mapper::new(MapperKind::Identity, None, None).expect("identity");
        assert_eq!(identity.map_file_name("a/b/C.java"), ["a/b/C.java"]);

        let flatten = Mapper::new(MapperKind::Flatten, Some("ignored"), None).expect("flatten");
        assert_eq!(flatten.map_file_name("a/b/C.java"), ["C.java"]);
        assert_eq!(flatten.map_file_name("a\\b\\D.java"), ["D.java"]);
        assert_eq!(flatten.map_file_name("E.java"), ["E.java"]);
    }

    #[test]
    fn merge_maps_everything_to_one_target() {
        let merge = Mapper::new(MapperKind::Merge, None, Some("all.jar")).expect("merge");
        assert_eq!(merge.map_file_name("x/y"), ["all.jar"]);
        assert_eq!(merge.kind(), MapperKind::Merge);
    }

    #[test]
    fn required_parameters_are_checked() {
        assert!(matches!(
            Mapper::new(MapperKind::Merge, Some("x"), None),
            Err(MapperError::MissingAttribute { kind: MapperKind::Merge, attribute: "to" })
        ));
        assert!(matches!(
            Mapper::new(MapperKind::Glob, None, Some("*.class")),
            Err(MapperError::MissingAttribute { kind: MapperKind::Glob, attribute: "from" })
        ));
        assert!(matches!(
            Mapper::new(MapperKind::Regexp, Some("(a"), Some("x")),
            Err(MapperError::InvalidRegex { .. })
        ));
    }
}
