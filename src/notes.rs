//! Release-note grouping.
//!
//! A release-notes file is a free-form log. Lines that look like a version
//! change open a new group; ticket keys found on the other lines are listed
//! under the most recent group, once each.

use std::collections::HashSet;
use std::fmt::Write as _;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};
use crate::html::escape;
use crate::ports::{FileSystem, IssueTracker};

/// A dot, one to three digits, then a dash: `.12-`.
static VERSION_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.[0-9]{1,3}-").expect("version marker pattern is valid"));

/// Two or more capitals, a dash, four or more digits: `ABCD-12345`.
static ISSUE_REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Z]{2,}-[0-9]{4,}").expect("issue pattern is valid"));

/// Lines from automated builds look like version markers but are not.
pub const NOISE_TOKEN: &str = "JENKINS";

/// How a single release-notes line is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Starts a new version group; the whole line is shown.
    VersionMarker(&'a str),
    /// Mentions a ticket; only the key is shown.
    IssueReference(&'a str),
    /// Contributes nothing.
    Other,
}

/// Classifies one line. Version markers win over issue references.
#[must_use]
pub fn classify(line: &str) -> LineKind<'_> {
    if VERSION_MARKER.is_match(line) && !line.contains(NOISE_TOKEN) {
        return LineKind::VersionMarker(line);
    }
    match ISSUE_REFERENCE.find(line) {
        Some(m) => LineKind::IssueReference(m.as_str()),
        None => LineKind::Other,
    }
}

/// Renders the release-notes fragment for `service`.
///
/// Returns the fragment and the ticket keys it links to, in order. A key
/// appears at most once per version group and may reappear in later groups.
#[must_use]
pub fn render(service: &str, text: &str, tracker_url: &str) -> (String, Vec<String>) {
    let service = escape(service);
    let mut out = format!("<h2>Release Notes for <a name='{service}'>{service}</a></h2>");
    let mut emitted = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for line in text.lines() {
        match classify(line) {
            LineKind::VersionMarker(marker) => {
                seen.clear();
                let _ = write!(out, "{}<br>", escape(marker));
            }
            LineKind::IssueReference(key) => {
                if seen.insert(key) {
                    let _ = write!(
                        out,
                        "&nbsp;&nbsp;&nbsp;<a href='{tracker_url}/browse/{key}' target='_blank'>{key}</a><br>"
                    );
                    emitted.push(key.to_string());
                }
            }
            LineKind::Other => {}
        }
    }
    (out, emitted)
}

/// The service a release-notes file belongs to: its parent directory's name.
#[must_use]
pub fn service_name(path: &Path) -> String {
    path.parent()
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Reads `path` and renders its fragment.
///
/// When a tracker is given, each linked ticket is looked up and its summary
/// logged. Lookup failures are logged and otherwise ignored.
///
/// # Errors
///
/// Returns [`Error::ReleaseNotes`] if the file cannot be read.
pub fn generate(
    fs: &dyn FileSystem,
    path: &Path,
    tracker_url: &str,
    tracker: Option<&dyn IssueTracker>,
) -> Result<String> {
    let service = service_name(path);
    tracing::info!(service, "generating release notes");

    let text = fs
        .read_to_string(path)
        .map_err(|e| Error::ReleaseNotes { path: path.to_path_buf(), detail: e.to_string() })?;
    let (fragment, keys) = render(&service, &text, tracker_url);

    if let Some(tracker) = tracker {
        for key in &keys {
            match tracker.fetch_issue(key) {
                Ok(issue) => tracing::info!(key = %issue.key, summary = %issue.summary, "ticket"),
                Err(e) => tracing::warn!(key = %key, "ticket lookup failed: {e}"),
            }
        }
    }
    Ok(fragment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::replaying::test_support::replayer;
    use crate::adapters::replaying::{ReplayingFileSystem, ReplayingIssueTracker};
    use serde_json::json;

    const TRACKER: &str = "https://jira.example.com";

    #[test]
    fn classifies_lines() {
        assert_eq!(classify("gateway-1.12-3 released"), LineKind::VersionMarker("gateway-1.12-3 released"));
        assert_eq!(classify("  * OPS-1234 fix timeouts"), LineKind::IssueReference("OPS-1234"));
        assert_eq!(classify("merged pull request"), LineKind::Other);
        assert_eq!(classify("A-1234 too short a prefix"), LineKind::Other);
        assert_eq!(classify("OPS-123 too few digits"), LineKind::Other);
    }

    #[test]
    fn marker_needs_at_least_one_digit() {
        assert_eq!(classify("v1.-beta"), LineKind::Other);
    }

    #[test]
    fn repeated_reference_is_listed_once_per_version_group() {
        let text = "svc-1.2-0\nOPS-1234 a\nOPS-1234 b\nsvc-1.3-0\nOPS-1234 c\n";
        let (html, keys) = render("svc", text, TRACKER);

        assert_eq!(keys, vec!["OPS-1234", "OPS-1234"]);
        assert_eq!(html.matches("browse/OPS-1234").count(), 2);
        let first = html.find("svc-1.2-0").unwrap();
        let second = html.find("svc-1.3-0").unwrap();
        let links: Vec<usize> = html.match_indices("browse/OPS-1234").map(|(i, _)| i).collect();
        assert!(first < links[0] && links[0] < second && second < links[1]);
    }

    #[test]
    fn noise_line_does_not_reset_the_group() {
        let text = "svc-1.2-0\nOPS-1234 first\n2.3-JENKINS-build\nOPS-1234 again\n";
        let (html, keys) = render("svc", text, TRACKER);

        assert_eq!(keys, vec!["OPS-1234"]);
        assert!(!html.contains("JENKINS"));
    }

    #[test]
    fn lines_without_a_key_emit_nothing() {
        let (html, keys) = render("svc", "svc-1.0-0\nno ticket here\nanother line\n", TRACKER);
        assert!(keys.is_empty());
        assert!(!html.contains("<a href"));
        assert!(html.ends_with("svc-1.0-0<br>"));
    }

    #[test]
    fn references_before_any_marker_are_kept() {
        let (_, keys) = render("svc", "OPS-1111\nOPS-2222\nOPS-1111\n", TRACKER);
        assert_eq!(keys, vec!["OPS-1111", "OPS-2222"]);
    }

    #[test]
    fn links_use_tracker_browse_url_and_header_names_service() {
        let (html, _) = render("gateway", "CORE-98765 patched\n", TRACKER);
        assert!(html.starts_with(
            "<h2>Release Notes for <a name='gateway'>gateway</a></h2>"
        ));
        assert!(html.contains(
            "<a href='https://jira.example.com/browse/CORE-98765' target='_blank'>CORE-98765</a>"
        ));
    }

    #[test]
    fn service_is_parent_directory_name() {
        assert_eq!(service_name(Path::new("./mychart/charts/gateway/_release_notes.yaml")), "gateway");
        assert_eq!(service_name(Path::new("_release_notes.yaml")), "");
    }

    #[test]
    fn generate_looks_up_each_linked_ticket() {
        let fs = ReplayingFileSystem::new(replayer(&[(
            "fs",
            "read_to_string",
            json!({"ok": "gw-0.1-0\nOPS-1234\nOPS-5678\n"}),
        )]));
        let tracker = ReplayingIssueTracker::new(replayer(&[
            ("issues", "fetch_issue", json!({"ok": {"key": "OPS-1234", "summary": "one"}})),
            ("issues", "fetch_issue", json!({"err": "tracker error (404) for OPS-5678"})),
        ]));

        let html = generate(&fs, Path::new("./c/gw/_release_notes.yaml"), TRACKER, Some(&tracker))
            .unwrap();
        assert!(html.contains("OPS-5678"));
    }

    #[test]
    fn unreadable_notes_are_fatal() {
        let fs = ReplayingFileSystem::new(replayer(&[(
            "fs",
            "read_to_string",
            json!({"err": "Permission denied"}),
        )]));
        let err = generate(&fs, Path::new("./c/gw/_release_notes.yaml"), TRACKER, None).unwrap_err();
        assert!(matches!(err, Error::ReleaseNotes { .. }));
    }
}
