//! Recording session managing per-port cassette recorders.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::Utc;

use super::recorder::CassetteRecorder;

/// Shared handle a recording adapter appends to.
pub type SharedRecorder = Arc<Mutex<CassetteRecorder>>;

/// Owns one `CassetteRecorder` per port for a single run.
///
/// All cassettes land in a timestamped directory under the base directory
/// given by `SURFBOARD_RECORD`.
pub struct RecordingSession {
    /// Recorder for filesystem interactions.
    pub fs: SharedRecorder,
    /// Recorder for process interactions.
    pub shell: SharedRecorder,
    /// Recorder for issue tracker interactions.
    pub issues: SharedRecorder,
    /// Recorder for clock interactions.
    pub clock: SharedRecorder,
    output_dir: PathBuf,
}

impl RecordingSession {
    /// Create a session writing to `<base>/<timestamp>/<port>.cassette.yaml`.
    ///
    /// # Errors
    ///
    /// Returns an error if the timestamped directory already exists or
    /// cannot be created.
    pub fn new(base: &Path) -> Result<Self, String> {
        let timestamp = Utc::now().format("%Y-%m-%dT%H-%M-%S").to_string();
        let output_dir = base.join(&timestamp);

        if output_dir.exists() {
            return Err(format!("cassette directory already exists: {}", output_dir.display()));
        }
        std::fs::create_dir_all(&output_dir)
            .map_err(|e| format!("failed to create cassette directory: {e}"))?;

        let make_recorder = |port: &str| -> SharedRecorder {
            let path = output_dir.join(format!("{port}.cassette.yaml"));
            Arc::new(Mutex::new(CassetteRecorder::new(path, format!("{timestamp}-{port}"))))
        };

        Ok(Self {
            fs: make_recorder("fs"),
            shell: make_recorder("shell"),
            issues: make_recorder("issues"),
            clock: make_recorder("clock"),
            output_dir,
        })
    }

    /// Directory the cassettes are written to.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write every port's cassette and return the output directory.
    ///
    /// All recording adapters must have been dropped first.
    ///
    /// # Errors
    ///
    /// Returns an error if an adapter still holds a recorder or a cassette
    /// file cannot be written.
    pub fn finish(self) -> Result<PathBuf, String> {
        fn finish_one(arc: SharedRecorder, port: &str) -> Result<(), String> {
            let recorder = Arc::try_unwrap(arc)
                .map_err(|_| format!("recording adapter for {port} still has references"))?
                .into_inner()
                .map_err(|e| format!("recorder lock for {port} poisoned: {e}"))?;
            recorder.finish().map_err(|e| format!("failed to write {port} cassette: {e}"))?;
            Ok(())
        }

        finish_one(self.fs, "fs")?;
        finish_one(self.shell, "shell")?;
        finish_one(self.issues, "issues")?;
        finish_one(self.clock, "clock")?;
        Ok(self.output_dir)
    }
}
