//! Fetching charts with the `helm` binary.

use crate::error::{Error, Result};
use crate::ports::ShellExecutor;

/// The directory name a chart reference untars to: its last `/` segment.
#[must_use]
pub fn project_name(chart: &str) -> &str {
    chart.trim_end_matches('/').rsplit('/').next().unwrap_or(chart)
}

/// Downloads `chart` at `version` and untars it into the working directory.
///
/// # Errors
///
/// Returns [`Error::Fetch`] if the chart reference does not name a
/// directory, or the binary cannot be started or exits non-zero.
pub fn fetch(shell: &dyn ShellExecutor, helm: &str, chart: &str, version: &str) -> Result<()> {
    let fetch_error = |detail: String| Error::Fetch {
        chart: chart.to_string(),
        version: version.to_string(),
        detail,
    };

    // The untarred directory is walked and then removed.
    if matches!(project_name(chart), "" | "." | "..") {
        return Err(fetch_error("chart reference does not name a chart directory".to_string()));
    }

    tracing::info!(chart, version, "fetching chart");
    let output = shell
        .run(helm, &["fetch", "--untar", chart, "--version", version])
        .map_err(|e| fetch_error(e.to_string()))?;

    if !output.stdout.trim().is_empty() {
        tracing::debug!("{}", output.stdout.trim_end());
    }
    if !output.success() {
        let detail = match output.stderr.trim() {
            "" => format!("{helm} exited with status {}", output.exit_code),
            stderr => stderr.to_string(),
        };
        return Err(fetch_error(detail));
    }
    Ok(())
}
