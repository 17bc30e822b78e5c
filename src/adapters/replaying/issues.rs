//! Replaying adapter for the `IssueTracker` port.

use std::sync::Mutex;

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::{Issue, IssueTracker, PortError};

/// Serves recorded tracker lookups from a cassette.
pub struct ReplayingIssueTracker {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingIssueTracker {
    /// Create a replaying issue tracker backed by the given replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl IssueTracker for ReplayingIssueTracker {
    fn fetch_issue(&self, _key: &str) -> Result<Issue, PortError> {
        replay_result(next_output(&self.replayer, "issues", "fetch_issue"), "issues::fetch_issue")
    }
}
