//! Fatal error taxonomy for a surfboard run.
//!
//! Anything that reaches this type aborts the run. Conditions the report can
//! live without, such as a subchart with no readable `Chart.yaml`, are logged
//! where they happen and never become an [`Error`].

use std::path::PathBuf;

use thiserror::Error;

/// Errors that end a run with a non-zero exit status.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The package manager could not be started or exited non-zero.
    #[error("failed to fetch chart {chart} version {version}: {detail}")]
    Fetch {
        /// Chart reference passed on the command line.
        chart: String,
        /// Requested chart version.
        version: String,
        /// Spawn error or the process's standard error.
        detail: String,
    },
    /// The extracted chart tree could not be walked.
    #[error("failed to walk {}: {detail}", path.display())]
    Walk {
        /// Root of the walk.
        path: PathBuf,
        /// Underlying I/O error.
        detail: String,
    },
    /// A release-notes file could not be read.
    #[error("failed to read release notes {}: {detail}", path.display())]
    ReleaseNotes {
        /// The release-notes file.
        path: PathBuf,
        /// Underlying I/O error.
        detail: String,
    },
    /// A values file could not be read or is not valid YAML.
    #[error("failed to load values file {}: {detail}", path.display())]
    Values {
        /// The values file.
        path: PathBuf,
        /// Underlying I/O or parse error.
        detail: String,
    },
    /// The ingress rules in a values file are not a list of mappings.
    #[error("malformed ingress rules in {}: {detail}", path.display())]
    MalformedRules {
        /// The values file.
        path: PathBuf,
        /// What was found instead.
        detail: String,
    },
    /// The report could not be written.
    #[error("failed to write {}: {detail}", path.display())]
    Write {
        /// Output file.
        path: PathBuf,
        /// Underlying I/O error.
        detail: String,
    },
    /// The viewer could not be launched for the written report.
    #[error("failed to open {}: {detail}", path.display())]
    Open {
        /// The report that was to be opened.
        path: PathBuf,
        /// Spawn error or the viewer's standard error.
        detail: String,
    },
    /// The run could not be set up (recording session, tracker client).
    #[error("setup failed: {0}")]
    Setup(String),
}

/// Result alias used throughout the pipeline.
pub type Result<T> = std::result::Result<T, Error>;
