use std::fmt;
use std::path::{Component, Path, PathBuf};

use matching::{NoProperties, PropertyResolver};
use walk::ArchiveLister;

use crate::registry::Registry;

/// Everything resolution needs besides the value being resolved.
///
/// Relative `dir`, `src`, list-file and path locations are resolved against
/// [`base_dir`](Self::base_dir).
#[derive(Clone, Copy)]
pub struct Context<'a> {
    registry: &'a Registry,
    properties: &'a dyn PropertyResolver,
    base_dir: &'a Path,
    archive_lister: Option<&'a dyn ArchiveLister>,
}

impl fmt::Debug for Context<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("registry", self.registry)
            .field("base_dir", &self.base_dir)
            .field("has_archive_lister", &self.archive_lister.is_some())
            .finish_non_exhaustive()
    }
}

impl<'a> Context<'a> {
    /// Creates a context without properties or archive lister.
    #[must_use]
    pub fn new(registry: &'a Registry, base_dir: &'a Path) -> Self {
        Self {
            registry,
            properties: &NoProperties,
            base_dir,
            archive_lister: None,
        }
    }

    /// Uses `properties` for `${}` substitution and pattern conditions.
    #[must_use]
    pub fn with_properties(mut self, properties: &'a dyn PropertyResolver) -> Self {
        self.properties = properties;
        self
    }

    /// Supplies the lister used for archive-backed file sets.
    #[must_use]
    pub fn with_archive_lister(mut self, lister: &'a dyn ArchiveLister) -> Self {
        self.archive_lister = Some(lister);
        self
    }

    /// The reference table.
    #[must_use]
    pub const fn registry(&self) -> &'a Registry {
        self.registry
    }

    /// The property resolver.
    #[must_use]
    pub fn properties(&self) -> &'a dyn PropertyResolver {
        self.properties
    }

    /// Directory relative locations are resolved against.
    #[must_use]
    pub const fn base_dir(&self) -> &'a Path {
        self.base_dir
    }

    /// The archive lister, if any.
    #[must_use]
    pub fn archive_lister(&self) -> Option<&'a dyn ArchiveLister> {
        self.archive_lister
    }

    /// Resolves `path` against the base directory and removes `.` and `..`
    /// components lexically.
    #[must_use]
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        let joined = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        };
        normalize_lexically(&joined)
    }
}

fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push(component);
                }
            }
            other => normalized.push(other),
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_paths_join_the_base_dir() {
        let registry = Registry::new();
        let base = Path::new("/work/project");
        let context = Context::new(&registry, base);
        assert_eq!(
            context.resolve_path(Path::new("lib/./a.jar")),
            Path::new("/work/project/lib/a.jar")
        );
        assert_eq!(
            context.resolve_path(Path::new("../shared")),
            Path::new("/work/shared")
        );
    }

    #[cfg(unix)]
    #[test]
    fn absolute_paths_are_kept() {
        let registry = Registry::new();
        let context = Context::new(&registry, Path::new("/work"));
        assert_eq!(context.resolve_path(Path::new("/opt/x/../y")), Path::new("/opt/y"));
    }

    #[test]
    fn properties_default_to_none() {
        let registry = Registry::new();
        let context = Context::new(&registry, Path::new("."));
        assert_eq!(context.properties().property("anything"), None);
    }
}
