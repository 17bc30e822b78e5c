//! Run settings resolved from flags, the environment and `.env`.

use std::path::PathBuf;

use crate::cli::Cli;

/// Tracker used when `SURFBOARD_TRACKER_URL` is unset.
pub const DEFAULT_TRACKER_URL: &str = "https://jira.ipttools.info";

/// Stylesheet linked from the full page when `SURFBOARD_STYLESHEET` is unset.
pub const DEFAULT_STYLESHEET: &str = "chart-tbl.css";

/// Everything a run needs beyond the chart reference itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Package-manager binary.
    pub helm: String,
    /// Viewer command; the report path is appended as the last argument.
    pub opener: Vec<String>,
    /// Base URL of the issue tracker, without a trailing slash.
    pub tracker_url: String,
    /// Tracker user, from `--user` or `SURFBOARD_TRACKER_USER`.
    pub tracker_user: Option<String>,
    /// Tracker token, from `--token` or `SURFBOARD_TRACKER_TOKEN`.
    pub tracker_token: Option<String>,
    /// Stylesheet href for the full page.
    pub stylesheet: String,
    /// Base directory for cassette recording, if recording.
    pub record_dir: Option<PathBuf>,
}

fn default_opener() -> Vec<String> {
    let command: &[&str] = if cfg!(target_os = "macos") {
        &["open"]
    } else if cfg!(windows) {
        &["cmd", "/C", "start", ""]
    } else {
        &["xdg-open"]
    };
    command.iter().map(ToString::to_string).collect()
}

impl Settings {
    /// Loads `.env` (if present) and resolves settings from the process
    /// environment.
    #[must_use]
    pub fn load(cli: &Cli) -> Self {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
            Err(e) if e.not_found() => {}
            Err(e) => tracing::warn!("ignoring unreadable .env: {e}"),
        }
        Self::resolve(cli, |key| std::env::var(key).ok())
    }

    /// Resolves settings with `lookup` standing in for the environment.
    ///
    /// Flags win over variables; empty variables count as unset.
    pub fn resolve(cli: &Cli, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            helm: var("SURFBOARD_HELM").unwrap_or_else(|| "helm".to_string()),
            opener: var("SURFBOARD_OPENER")
                .map(|v| v.split_whitespace().map(ToString::to_string).collect())
                .unwrap_or_else(default_opener),
            tracker_url: var("SURFBOARD_TRACKER_URL")
                .unwrap_or_else(|| DEFAULT_TRACKER_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            tracker_user: cli.user.clone().or_else(|| var("SURFBOARD_TRACKER_USER")),
            tracker_token: cli.token.clone().or_else(|| var("SURFBOARD_TRACKER_TOKEN")),
            stylesheet: var("SURFBOARD_STYLESHEET").unwrap_or_else(|| DEFAULT_STYLESHEET.to_string()),
            record_dir: var("SURFBOARD_RECORD").map(PathBuf::from),
        }
    }

    /// User and token, when both are configured.
    #[must_use]
    pub fn tracker_credentials(&self) -> Option<(&str, &str)> {
        match (&self.tracker_user, &self.tracker_token) {
            (Some(user), Some(token)) if !user.is_empty() && !token.is_empty() => {
                Some((user.as_str(), token.as_str()))
            }
            _ => None,
        }
    }
}
