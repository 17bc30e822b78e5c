//! Filesystem port for file I/O operations.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::PortError;

/// One node visited by [`FileSystem::walk`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkEntry {
    /// The path as produced by joining names onto the walk root.
    pub path: String,
    /// `true` for directories, `false` for every other kind of node.
    pub is_dir: bool,
}

impl WalkEntry {
    /// The final component of the path, or the whole path if it has none.
    #[must_use]
    pub fn file_name(&self) -> &str {
        Path::new(&self.path).file_name().and_then(|n| n.to_str()).unwrap_or(&self.path)
    }
}

/// Provides filesystem access for reading, writing and walking trees.
///
/// Abstracting the filesystem allows deterministic replay and testing
/// without touching the real disk.
pub trait FileSystem: Send + Sync {
    /// Reads the entire contents of a file as a UTF-8 string.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or is not valid UTF-8.
    fn read_to_string(&self, path: &Path) -> Result<String, PortError>;

    /// Writes the given contents to a file, creating or overwriting it.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails (permissions, disk full, etc.).
    fn write(&self, path: &Path, contents: &str) -> Result<(), PortError>;

    /// Returns `true` if the path exists on the filesystem.
    fn exists(&self, path: &Path) -> bool;

    /// Walks the tree under `root` depth-first, root included.
    ///
    /// A directory is always listed before its contents. Siblings are
    /// ordered by file name.
    ///
    /// # Errors
    ///
    /// Returns an error on the first entry that cannot be read.
    fn walk(&self, root: &Path) -> Result<Vec<WalkEntry>, PortError>;

    /// Removes a directory and everything beneath it.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be removed.
    fn remove_dir_all(&self, path: &Path) -> Result<(), PortError>;
}
