//! Live adapter for the `IssueTracker` port using the Jira REST API.

use reqwest::Client;
use serde::Deserialize;
use tokio::runtime::Runtime;

use crate::ports::{Issue, IssueTracker, PortError};

/// Live tracker client that calls `<base>/rest/api/latest/issue/<key>`.
///
/// The pipeline is synchronous, so the client owns a current-thread runtime
/// and blocks on each request.
pub struct LiveIssueTracker {
    client: Client,
    runtime: Runtime,
    base_url: String,
    user: String,
    token: String,
}

impl LiveIssueTracker {
    /// Creates a client for the tracker at `base_url` using basic auth.
    ///
    /// # Errors
    ///
    /// Returns an error if the async runtime cannot be started.
    pub fn new(base_url: &str, user: &str, token: &str) -> Result<Self, PortError> {
        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
        Ok(Self {
            client: Client::new(),
            runtime,
            base_url: base_url.trim_end_matches('/').to_string(),
            user: user.to_string(),
            token: token.to_string(),
        })
    }

    /// The REST endpoint queried for `key`.
    #[must_use]
    pub fn issue_url(&self, key: &str) -> String {
        format!("{}/rest/api/latest/issue/{key}?fields=summary", self.base_url)
    }
}

/// Subset of the Jira issue payload requested with `fields=summary`.
#[derive(Deserialize)]
struct IssueResponse {
    key: String,
    fields: IssueFields,
}

#[derive(Deserialize)]
struct IssueFields {
    #[serde(default)]
    summary: String,
}

impl IssueTracker for LiveIssueTracker {
    fn fetch_issue(&self, key: &str) -> Result<Issue, PortError> {
        let url = self.issue_url(key);
        self.runtime.block_on(async {
            let response = self
                .client
                .get(&url)
                .basic_auth(&self.user, Some(&self.token))
                .send()
                .await
                .map_err(|e| -> PortError { format!("tracker request failed: {e}").into() })?;

            let status = response.status();
            let body = response.text().await.map_err(|e| -> PortError {
                format!("failed to read tracker response: {e}").into()
            })?;

            if !status.is_success() {
                return Err(format!("tracker error ({}) for {key}", status.as_u16()).into());
            }

            let parsed: IssueResponse = serde_json::from_str(&body).map_err(|e| -> PortError {
                format!("failed to parse tracker response: {e}").into()
            })?;
            Ok(Issue { key: parsed.key, summary: parsed.fields.summary })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_url_targets_latest_api_with_summary_field() {
        let tracker = LiveIssueTracker::new("https://jira.example.com/", "me", "secret").unwrap();
        assert_eq!(
            tracker.issue_url("ABCD-12345"),
            "https://jira.example.com/rest/api/latest/issue/ABCD-12345?fields=summary"
        );
    }

    #[test]
    fn parses_summary_payload() {
        let body = r#"{"id":"1","key":"ABCD-12345","fields":{"summary":"Fix the gateway"}}"#;
        let parsed: IssueResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.key, "ABCD-12345");
        assert_eq!(parsed.fields.summary, "Fix the gateway");
    }

    #[test]
    fn unreachable_tracker_is_an_error() {
        let tracker = LiveIssueTracker::new("http://127.0.0.1:9", "me", "secret").unwrap();
        assert!(tracker.fetch_issue("ABCD-12345").is_err());
    }
}
