use std::fmt;

use rustc_hash::FxHashMap;

use super::{FileNameMapper, Mapper, MapperKind};
use crate::error::MapperError;

/// Builds a mapper from its `from` and `to` parameters.
pub type MapperFactory =
    fn(Option<&str>, Option<&str>) -> Result<Box<dyn FileNameMapper>, MapperError>;

/// Named mapper factories, pre-populated with the built-in kinds.
///
/// Hosts register additional factories at startup; lookups by an
/// unregistered name fail with [`MapperError::UnknownMapper`].
///
/// # Examples
///
/// ```
/// use engine::{FileNameMapper, MapperError, MapperRegistry};
///
/// fn upper(_from: Option<&str>, _to: Option<&str>)
///     -> Result<Box<dyn FileNameMapper>, MapperError>
/// {
///     struct Upper;
///     impl FileNameMapper for Upper {
///         fn map_file_name(&self, source: &str) -> Vec<String> {
///             vec![source.to_uppercase()]
///         }
///     }
///     Ok(Box::new(Upper))
/// }
///
/// let mut registry = MapperRegistry::with_builtins();
/// registry.register("upper", upper);
/// let mapper = registry.create("upper", None, None).unwrap();
/// assert_eq!(mapper.map_file_name("a.txt"), ["A.TXT"]);
/// ```
#[derive(Clone)]
pub struct MapperRegistry {
    factories: FxHashMap<String, MapperFactory>,
}

impl fmt::Debug for MapperRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("MapperRegistry").field("names", &names).finish()
    }
}

impl Default for MapperRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

fn builtin(kind: MapperKind) -> MapperFactory {
    match kind {
        MapperKind::Identity => |from, to| boxed(MapperKind::Identity, from, to),
        MapperKind::Flatten => |from, to| boxed(MapperKind::Flatten, from, to),
        MapperKind::Glob => |from, to| boxed(MapperKind::Glob, from, to),
        MapperKind::Merge => |from, to| boxed(MapperKind::Merge, from, to),
        MapperKind::Regexp => |from, to| boxed(MapperKind::Regexp, from, to),
    }
}

fn boxed(
    kind: MapperKind,
    from: Option<&str>,
    to: Option<&str>,
) -> Result<Box<dyn FileNameMapper>, MapperError> {
    Ok(Box::new(Mapper::new(kind, from, to)?))
}

impl MapperRegistry {
    /// A registry without any factory.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            factories: FxHashMap::default(),
        }
    }

    /// A registry holding the five built-in kinds under their
    /// configuration names.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        for kind in MapperKind::ALL {
            registry.register(kind.as_str(), builtin(kind));
        }
        registry
    }

    /// Registers `factory` under `name`, returning the factory it replaces.
    pub fn register(&mut self, name: impl Into<String>, factory: MapperFactory) -> Option<MapperFactory> {
        self.factories.insert(name.into(), factory)
    }

    /// Whether `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Builds the mapper registered under `name`.
    ///
    /// # Errors
    ///
    /// [`MapperError::UnknownMapper`] for an unregistered name, or whatever
    /// the factory reports.
    pub fn create(
        &self,
        name: &str,
        from: Option<&str>,
        to: Option<&str>,
    ) -> Result<Box<dyn FileNameMapper>, MapperError> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| MapperError::UnknownMapper {
                name: name.to_owned(),
            })?;
        factory(from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_are_registered_by_name() {
        let registry = MapperRegistry::with_builtins();
        for kind in MapperKind::ALL {
            assert!(registry.contains(kind.as_str()));
        }
        let glob = registry
            .create("glob", Some("*.c"), Some("*.o"))
            .expect("glob");
        assert_eq!(glob.map_file_name("main.c"), ["main.o"]);
    }

    #[test]
    fn unknown_names_fail() {
        let registry = MapperRegistry::empty();
        assert!(matches!(
            registry.create("identity", None, None),
            Err(MapperError::UnknownMapper { .. })
        ));
    }

    #[test]
    fn factories_can_be_replaced() {
        fn nothing(
            _from: Option<&str>,
            _to: Option<&str>,
        ) -> Result<Box<dyn FileNameMapper>, MapperError> {
            Ok(Box::new(Mapper::Merge { to: String::new() }))
        }
        let mut registry = MapperRegistry::with_builtins();
        assert!(registry.register("identity", nothing).is_some());
        let mapper = registry.create("identity", None, None).expect("replaced");
        assert_eq!(mapper.map_file_name("x"), [""]);
    }
}
