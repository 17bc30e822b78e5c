//! Replaying adapter for the `FileSystem` port.

use std::path::Path;
use std::sync::Mutex;

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::{FileSystem, PortError, WalkEntry};

/// Replays recorded filesystem operations from a cassette.
pub struct ReplayingFileSystem {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingFileSystem {
    /// Creates a new replaying filesystem from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl FileSystem for ReplayingFileSystem {
    fn read_to_string(&self, _path: &Path) -> Result<String, PortError> {
        replay_result(next_output(&self.replayer, "fs", "read_to_string"), "fs::read_to_string")
    }

    fn write(&self, _path: &Path, _contents: &str) -> Result<(), PortError> {
        replay_result(next_output(&self.replayer, "fs", "write"), "fs::write")
    }

    fn exists(&self, _path: &Path) -> bool {
        next_output(&self.replayer, "fs", "exists")
            .as_bool()
            .expect("fs::exists: expected boolean output")
    }

    fn walk(&self, _root: &Path) -> Result<Vec<WalkEntry>, PortError> {
        replay_result(next_output(&self.replayer, "fs", "walk"), "fs::walk")
    }

    fn remove_dir_all(&self, _path: &Path) -> Result<(), PortError> {
        replay_result(next_output(&self.replayer, "fs", "remove_dir_all"), "fs::remove_dir_all")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::replaying::test_support::replayer;
    use serde_json::json;

    #[test]
    fn replaying_fs_read_to_string_error() {
        let fs = ReplayingFileSystem::new(replayer(&[(
            "fs",
            "read_to_string",
            json!({"err": "file not found"}),
        )]));
        let err = fs.read_to_string(Path::new("/missing")).unwrap_err();
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn replaying_fs_walk_and_write() {
        let fs = ReplayingFileSystem::new(replayer(&[
            ("fs", "walk", json!({"ok": [{"path": "./mychart", "is_dir": true}]})),
            ("fs", "write", json!({"ok": null})),
        ]));

        let entries = fs.walk(Path::new("./mychart")).unwrap();
        assert_eq!(entries, vec![WalkEntry { path: "./mychart".into(), is_dir: true }]);
        assert!(fs.write(Path::new("./mychart-map.html"), "<html/>").is_ok());
    }

    #[test]
    fn replaying_fs_exists() {
        let fs = ReplayingFileSystem::new(replayer(&[("fs", "exists", json!(true))]));
        assert!(fs.exists(Path::new("./mychart/Chart.yaml")));
    }
}
