//! Live filesystem adapter using `std::fs` and `walkdir`.

use std::path::Path;

use walkdir::WalkDir;

use crate::ports::filesystem::{FileSystem, WalkEntry};
use crate::ports::PortError;

/// Live filesystem adapter backed by real disk I/O.
pub struct LiveFileSystem;

impl FileSystem for LiveFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String, PortError> {
        Ok(std::fs::read_to_string(path)?)
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), PortError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        Ok(std::fs::write(path, contents)?)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn walk(&self, root: &Path) -> Result<Vec<WalkEntry>, PortError> {
        let mut entries = Vec::new();
        for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
            let entry = entry?;
            entries.push(WalkEntry {
                path: entry.path().to_string_lossy().into_owned(),
                is_dir: entry.file_type().is_dir(),
            });
        }
        Ok(entries)
    }

    fn remove_dir_all(&self, path: &Path) -> Result<(), PortError> {
        Ok(std::fs::remove_dir_all(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walk_lists_directories_before_their_contents() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("chart");
        std::fs::create_dir_all(root.join("charts/b")).unwrap();
        std::fs::create_dir_all(root.join("charts/a")).unwrap();
        std::fs::write(root.join("Chart.yaml"), "name: chart\n").unwrap();

        let entries = LiveFileSystem.walk(&root).unwrap();
        let names: Vec<&str> = entries.iter().map(WalkEntry::file_name).collect();

        assert_eq!(names, vec!["chart", "Chart.yaml", "charts", "a", "b"]);
        assert!(entries[0].is_dir);
        assert!(!entries[1].is_dir);
        assert!(entries[0].path.ends_with("chart"));
    }

    #[test]
    fn walk_of_missing_root_fails() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(LiveFileSystem.walk(&tmp.path().join("absent")).is_err());
    }

    #[test]
    fn write_then_read_and_remove() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("out");
        let file = dir.join("nested/map.html");

        LiveFileSystem.write(&file, "<html></html>").unwrap();
        assert!(LiveFileSystem.exists(&file));
        assert_eq!(LiveFileSystem.read_to_string(&file).unwrap(), "<html></html>");

        LiveFileSystem.remove_dir_all(&dir).unwrap();
        assert!(!LiveFileSystem.exists(&dir));
    }
}
