#![deny(unsafe_code)]

//! Scratch directories and tree builders shared by the workspace tests.
//!
//! Helpers panic with a descriptive message on I/O failure; they are only
//! meant for test code.

use std::fs;
use std::path::{MAIN_SEPARATOR, Path, PathBuf};

use filetime::FileTime;
use tempfile::TempDir;

/// Rewrites `/` in a relative name to the host separator, matching the names
/// scanners report.
#[must_use]
pub fn host_path(name: &str) -> String {
    name.replace('/', &MAIN_SEPARATOR.to_string())
}

/// A temporary directory removed on drop.
#[derive(Debug)]
pub struct TestDir {
    temp: TempDir,
}

impl Default for TestDir {
    fn default() -> Self {
        Self::new()
    }
}

impl TestDir {
    /// Creates an empty scratch directory.
    #[must_use]
    pub fn new() -> Self {
        Self {
            temp: tempfile::tempdir().expect("create scratch directory"),
        }
    }

    /// Root of the scratch directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    /// Joins a `/`-separated relative name onto the root.
    #[must_use]
    pub fn join(&self, relative: &str) -> PathBuf {
        relative
            .split('/')
            .filter(|segment| !segment.is_empty())
            .fold(self.path().to_path_buf(), |path, segment| path.join(segment))
    }

    /// Writes `contents` to `relative`, creating parent directories.
    pub fn write_file(&self, relative: &str, contents: impl AsRef<[u8]>) -> PathBuf {
        let path = self.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent directories");
        }
        fs::write(&path, contents).expect("write test file");
        path
    }

    /// Creates the directory `relative` and its parents.
    pub fn mkdir(&self, relative: &str) -> PathBuf {
        let path = self.join(relative);
        fs::create_dir_all(&path).expect("create test directory");
        path
    }

    /// Sets the modification time of `relative` to `seconds` after the epoch.
    pub fn set_mtime(&self, relative: &str, seconds: i64) {
        let path = self.join(relative);
        filetime::set_file_mtime(&path, FileTime::from_unix_time(seconds, 0))
            .expect("set modification time");
    }

    /// Writes a file and stamps it with `seconds` in one step.
    pub fn write_file_at(&self, relative: &str, seconds: i64) -> PathBuf {
        let path = self.write_file(relative, b"");
        self.set_mtime(relative, seconds);
        path
    }
}

#[derive(Clone, Debug)]
enum Node {
    File { path: String, contents: Vec<u8>, mtime: Option<i64> },
    Dir(String),
}

/// Declarative description of a directory tree.
///
/// ```
/// use test_support::{FileTree, TestDir};
///
/// let dir = TestDir::new();
/// FileTree::new()
///     .file("src/main.rs")
///     .file_at("build/main.o", 1_000)
///     .dir("empty")
///     .create_in(&dir);
/// assert!(dir.join("src/main.rs").is_file());
/// assert!(dir.join("empty").is_dir());
/// ```
#[derive(Clone, Debug, Default)]
pub struct FileTree {
    nodes: Vec<Node>,
}

impl FileTree {
    /// Starts an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an empty file.
    #[must_use]
    pub fn file(self, path: &str) -> Self {
        self.file_with(path, b"")
    }

    /// Adds a file with contents.
    #[must_use]
    pub fn file_with(mut self, path: &str, contents: impl AsRef<[u8]>) -> Self {
        self.nodes.push(Node::File {
            path: path.to_owned(),
            contents: contents.as_ref().to_vec(),
            mtime: None,
        });
        self
    }

    /// Adds an empty file with a fixed modification time.
    #[must_use]
    pub fn file_at(mut self, path: &str, seconds: i64) -> Self {
        self.nodes.push(Node::File {
            path: path.to_owned(),
            contents: Vec::new(),
            mtime: Some(seconds),
        });
        self
    }

    /// Adds a directory.
    #[must_use]
    pub fn dir(mut self, path: &str) -> Self {
        self.nodes.push(Node::Dir(path.to_owned()));
        self
    }

    /// Materializes the tree below `dir`.
    pub fn create_in(&self, dir: &TestDir) {
        for node in &self.nodes {
            match node {
                Node::File { path, contents, mtime } => {
                    dir.write_file(path, contents);
                    if let Some(seconds) = mtime {
                        dir.set_mtime(path, *seconds);
                    }
                }
                Node::Dir(path) => {
                    dir.mkdir(path);
                }
            }
        }
    }

    /// Creates a fresh [`TestDir`] holding the tree.
    #[must_use]
    pub fn build(&self) -> TestDir {
        let dir = TestDir::new();
        self.create_in(&dir);
        dir
    }
}
