//! Issue tracker port for looking up tickets referenced in release notes.

use serde::{Deserialize, Serialize};

use super::PortError;

/// A ticket as reported by the tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// The ticket key, e.g. `ABCD-12345`.
    pub key: String,
    /// The one-line summary of the ticket.
    pub summary: String,
}

/// Read-only access to an external issue tracker.
pub trait IssueTracker: Send + Sync {
    /// Fetches the ticket identified by `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the tracker is unreachable, rejects the
    /// credentials, or does not know the ticket.
    fn fetch_issue(&self, key: &str) -> Result<Issue, PortError>;
}
