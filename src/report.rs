//! Assembling the dependency map from a single walk of the chart tree.

use std::path::Path;

use chrono::{DateTime, Utc};

use crate::chart::walker::{TreeWalk, Visit, WalkState};
use crate::context::ServiceContext;
use crate::error::Result;
use crate::html::escape;
use crate::{notes, routes};

/// Which optional sections to build.
#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    /// Render `_release_notes.yaml` files.
    pub notes: bool,
    /// Render `*-values.yaml` files.
    pub routes: bool,
    /// Base URL ticket links point at.
    pub tracker_url: String,
    /// Look up each linked ticket through the tracker port.
    pub lookup_issues: bool,
}

/// The three accumulated sections of a map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    /// `<tr>` rows, one per chart.
    pub rows: String,
    /// Release-notes fragments, in walk order.
    pub notes: String,
    /// Route fragments, in walk order.
    pub routes: String,
    /// Number of chart rows.
    pub charts: usize,
}

/// Walks `root` once, routing each node to the section that consumes it.
///
/// # Errors
///
/// Fails on the first fatal error: an unlistable tree, an unreadable
/// release-notes file, or an unreadable or malformed values file.
pub fn build(ctx: &ServiceContext, root: &Path, options: &ReportOptions) -> Result<Report> {
    let tracker = options.lookup_issues.then_some(ctx.issues.as_ref());
    let mut state = WalkState::default();
    let mut report = Report::default();

    for visit in TreeWalk::new(ctx.fs.as_ref(), root)? {
        match visit {
            Visit::Chart(chart) => {
                let previous = state.current_depth();
                state.record(&chart);
                tracing::debug!(
                    name = %chart.name,
                    from = previous,
                    depth = state.current_depth(),
                    "chart"
                );
            }
            Visit::ReleaseNotes(path) if options.notes => {
                report.notes.push_str(&notes::generate(
                    ctx.fs.as_ref(),
                    &path,
                    &options.tracker_url,
                    tracker,
                )?);
            }
            Visit::Values(path) if options.routes => {
                report.routes.push_str(&routes::extract(ctx.fs.as_ref(), &path)?);
            }
            Visit::ReleaseNotes(_) | Visit::Values(_) => {}
        }
    }

    report.charts = state.count();
    report.rows = state.into_rows();
    Ok(report)
}

impl Report {
    /// Body content shared by the page and the insert.
    fn body(&self, project: &str, generated_at: DateTime<Utc>) -> String {
        format!(
            "<h1>Surfboard for {} Helm Chart</h1><table>{}</table>{}{}<p class='generated'>Generated {}</p>",
            escape(project),
            self.rows,
            self.notes,
            self.routes,
            generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
        )
    }

    /// A complete HTML page linking `stylesheet`.
    #[must_use]
    pub fn to_page(&self, project: &str, stylesheet: &str, generated_at: DateTime<Utc>) -> String {
        format!(
            "<html><head><link rel='stylesheet' href='{}'></head><body>{}</body></html>",
            escape(stylesheet),
            self.body(project, generated_at)
        )
    }

    /// The body-only fragment for pasting into another page.
    #[must_use]
    pub fn to_insert(&self, project: &str, generated_at: DateTime<Utc>) -> String {
        self.body(project, generated_at)
    }
}
