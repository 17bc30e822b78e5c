//! Recording adapter for the `IssueTracker` port.

use serde::Serialize;

use super::record_result;
use crate::cassette::session::SharedRecorder;
use crate::ports::{Issue, IssueTracker, PortError};

/// Records tracker lookups while delegating to an inner tracker.
pub struct RecordingIssueTracker {
    inner: Box<dyn IssueTracker>,
    recorder: SharedRecorder,
}

impl RecordingIssueTracker {
    /// Creates a new recording tracker wrapping the given implementation.
    pub fn new(inner: Box<dyn IssueTracker>, recorder: SharedRecorder) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct KeyInput<'a> {
    key: &'a str,
}

impl IssueTracker for RecordingIssueTracker {
    fn fetch_issue(&self, key: &str) -> Result<Issue, PortError> {
        let result = self.inner.fetch_issue(key);
        record_result(&self.recorder, "issues", "fetch_issue", &KeyInput { key }, &result);
        result
    }
}
