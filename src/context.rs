//! Service context bundling all port trait objects.

use std::path::Path;
use std::sync::Arc;

use crate::adapters::live::clock::LiveClock;
use crate::adapters::live::filesystem::LiveFileSystem;
use crate::adapters::live::issues::LiveIssueTracker;
use crate::adapters::live::shell::LiveShellExecutor;
use crate::adapters::recording::{
    RecordingClock, RecordingFileSystem, RecordingIssueTracker, RecordingShellExecutor,
};
use crate::adapters::replaying::{
    ReplayingClock, ReplayingFileSystem, ReplayingIssueTracker, ReplayingShellExecutor,
};
use crate::cassette::format::Cassette;
use crate::cassette::replayer::CassetteReplayer;
use crate::cassette::session::RecordingSession;
use crate::config::Settings;
use crate::error::{Error, Result};
use crate::ports::{Clock, FileSystem, Issue, IssueTracker, PortError, ShellExecutor};

/// Bundles all port trait objects into a single context.
///
/// Each field provides access to one external boundary. Constructors
/// wire up different adapter implementations (live, recording, replaying).
pub struct ServiceContext {
    /// Filesystem for reading the chart tree and writing the map.
    pub fs: Box<dyn FileSystem>,
    /// Process runner for `helm` and the viewer.
    pub shell: Box<dyn ShellExecutor>,
    /// Issue tracker for ticket summaries.
    pub issues: Box<dyn IssueTracker>,
    /// Clock for the report timestamp.
    pub clock: Box<dyn Clock>,
}

impl ServiceContext {
    /// Creates a context with real adapters.
    ///
    /// Without tracker credentials the issues port refuses every lookup.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Setup`] if the tracker client cannot be created.
    pub fn live(settings: &Settings) -> Result<Self> {
        Ok(Self {
            fs: Box::new(LiveFileSystem),
            shell: Box::new(LiveShellExecutor),
            issues: live_tracker(settings)?,
            clock: Box::new(LiveClock),
        })
    }

    /// Creates a live context whose ports also record into `session`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Setup`] if the tracker client cannot be created.
    pub fn recording(settings: &Settings, session: &RecordingSession) -> Result<Self> {
        Ok(Self {
            fs: Box::new(RecordingFileSystem::new(Box::new(LiveFileSystem), Arc::clone(&session.fs))),
            shell: Box::new(RecordingShellExecutor::new(
                Box::new(LiveShellExecutor),
                Arc::clone(&session.shell),
            )),
            issues: Box::new(RecordingIssueTracker::new(
                live_tracker(settings)?,
                Arc::clone(&session.issues),
            )),
            clock: Box::new(RecordingClock::new(Box::new(LiveClock), Arc::clone(&session.clock))),
        })
    }

    /// Creates a replaying context from a single cassette.
    ///
    /// Every port gets its own replayer over the same interactions, so
    /// per-port cursors are independent.
    #[must_use]
    pub fn replaying_from(cassette: &Cassette) -> Self {
        Self {
            fs: Box::new(ReplayingFileSystem::new(CassetteReplayer::new(cassette))),
            shell: Box::new(ReplayingShellExecutor::new(CassetteReplayer::new(cassette))),
            issues: Box::new(ReplayingIssueTracker::new(CassetteReplayer::new(cassette))),
            clock: Box::new(ReplayingClock::new(CassetteReplayer::new(cassette))),
        }
    }

    /// Creates a replaying context from a cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> std::result::Result<Self, String> {
        Ok(Self::replaying_from(&Cassette::load(path)?))
    }
}

fn live_tracker(settings: &Settings) -> Result<Box<dyn IssueTracker>> {
    let Some((user, token)) = settings.tracker_credentials() else {
        return Ok(Box::new(NoTracker));
    };
    let tracker = LiveIssueTracker::new(&settings.tracker_url, user, token)
        .map_err(|e| Error::Setup(format!("issue tracker client: {e}")))?;
    Ok(Box::new(tracker))
}

/// Stands in for the tracker when no credentials are configured.
struct NoTracker;

impl IssueTracker for NoTracker {
    fn fetch_issue(&self, key: &str) -> std::result::Result<Issue, PortError> {
        Err(format!("no tracker credentials configured to look up {key}").into())
    }
}
