//! Single-pass walk over an extracted chart tree.

use std::path::{Path, PathBuf};

use super::{read_descriptor, ChartMetadata};
use crate::error::{Error, Result};
use crate::ports::{FileSystem, WalkEntry};

/// File name of a chart's release-notes log.
pub const RELEASE_NOTES_FILE: &str = "_release_notes.yaml";

/// Substring that marks an environment values file.
pub const VALUES_MARKER: &str = "-values.yaml";

/// Something of interest found during the walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Visit {
    /// A directory holding a usable chart descriptor.
    Chart(ChartMetadata),
    /// A release-notes file.
    ReleaseNotes(PathBuf),
    /// An environment values file.
    Values(PathBuf),
}

/// Lazy depth-first walk yielding one [`Visit`] per interesting node.
///
/// The tree listing is taken up front; descriptors are only read as the
/// iterator reaches their directory. Each chart's depth comes from its own
/// path, so the rows do not depend on visitation order.
pub struct TreeWalk<'a> {
    fs: &'a dyn FileSystem,
    entries: std::vec::IntoIter<WalkEntry>,
}

impl<'a> TreeWalk<'a> {
    /// Lists the tree under `root`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Walk`] if any part of the tree cannot be listed.
    pub fn new(fs: &'a dyn FileSystem, root: &Path) -> Result<Self> {
        let entries = fs
            .walk(root)
            .map_err(|e| Error::Walk { path: root.to_path_buf(), detail: e.to_string() })?;
        tracing::debug!(root = %root.display(), entries = entries.len(), "listed chart tree");
        Ok(Self { fs, entries: entries.into_iter() })
    }
}

impl Iterator for TreeWalk<'_> {
    type Item = Visit;

    fn next(&mut self) -> Option<Visit> {
        for entry in self.entries.by_ref() {
            if entry.is_dir {
                if let Some(chart) = read_descriptor(self.fs, &entry.path) {
                    return Some(Visit::Chart(chart));
                }
                continue;
            }
            let name = entry.file_name();
            if name == RELEASE_NOTES_FILE {
                return Some(Visit::ReleaseNotes(PathBuf::from(entry.path)));
            }
            if name.contains(VALUES_MARKER) {
                return Some(Visit::Values(PathBuf::from(entry.path)));
            }
        }
        None
    }
}

/// Every chart under `root`, in walk order.
///
/// # Errors
///
/// Returns [`Error::Walk`] if the tree cannot be listed.
pub fn charts<'a>(
    fs: &'a dyn FileSystem,
    root: &Path,
) -> Result<impl Iterator<Item = ChartMetadata> + 'a> {
    Ok(TreeWalk::new(fs, root)?.filter_map(|visit| match visit {
        Visit::Chart(chart) => Some(chart),
        Visit::ReleaseNotes(_) | Visit::Values(_) => None,
    }))
}

/// Table rows accumulated over a walk.
#[derive(Debug, Default)]
pub struct WalkState {
    current_depth: usize,
    rows: String,
    count: usize,
}

impl WalkState {
    /// Appends the row for `chart` and moves to its depth.
    pub fn record(&mut self, chart: &ChartMetadata) {
        self.current_depth = chart.depth;
        chart.render_row(&mut self.rows);
        self.count += 1;
    }

    /// Depth of the most recently recorded chart.
    #[must_use]
    pub fn current_depth(&self) -> usize {
        self.current_depth
    }

    /// Number of rows recorded so far.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// The accumulated `<tr>` rows.
    #[must_use]
    pub fn into_rows(self) -> String {
        self.rows
    }
}
