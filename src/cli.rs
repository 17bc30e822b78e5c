//! CLI argument definitions.

use clap::Parser;

/// Fetch a Helm chart and render its subchart tree as an HTML map.
#[derive(Debug, Parser)]
#[command(name = "surfboard", version, about = "Map a Helm chart's subcharts to an HTML page")]
pub struct Cli {
    /// Chart reference passed to `helm fetch`, e.g. `stable/mychart`.
    pub chart: String,
    /// Chart version to fetch.
    #[arg(id = "chart_version", value_name = "VERSION")]
    pub version: String,
    /// Add release notes from `_release_notes.yaml` files.
    #[arg(long)]
    pub notes: bool,
    /// Add ingress routes from `*-values.yaml` files.
    #[arg(long)]
    pub routes: bool,
    /// Do not open the map in the default viewer.
    #[arg(long)]
    pub silent: bool,
    /// Write a body-only `<project>-map.insert` fragment instead of a page.
    #[arg(long)]
    pub insert: bool,
    /// Keep the extracted chart directory after the map is written.
    #[arg(long)]
    pub keep: bool,
    /// Issue tracker user for ticket summary lookups.
    #[arg(long)]
    pub user: Option<String>,
    /// Issue tracker API token for ticket summary lookups.
    #[arg(long)]
    pub token: Option<String>,
    /// Log at debug level (ignored when `RUST_LOG` is set).
    #[arg(short, long)]
    pub verbose: bool,
}
