//! The map command: fetch, walk, render, write, open, clean up.

use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::config::Settings;
use crate::context::ServiceContext;
use crate::error::{Error, Result};
use crate::helm;
use crate::ports::ShellExecutor;
use crate::report::{self, ReportOptions};

/// What a successful run produced.
#[derive(Debug, Clone)]
pub struct MapOutput {
    /// The written report.
    pub path: PathBuf,
    /// The report's contents.
    pub contents: String,
    /// Number of chart rows in the table.
    pub charts: usize,
}

/// File name of the report for `project`.
#[must_use]
pub fn output_file_name(project: &str, insert: bool) -> String {
    if insert {
        format!("{project}-map.insert")
    } else {
        format!("{project}-map.html")
    }
}

/// Execute the map command against `ctx`.
///
/// The extracted chart is removed afterwards unless `--keep` was given,
/// whether or not the report could be built.
///
/// # Errors
///
/// Returns the first fatal error: fetch, walk, release notes, values,
/// write, or viewer launch.
pub fn run(ctx: &ServiceContext, cli: &Cli, settings: &Settings) -> Result<MapOutput> {
    let project = helm::project_name(&cli.chart);
    tracing::info!(project, version = %cli.version, "building map");

    helm::fetch(ctx.shell.as_ref(), &settings.helm, &cli.chart, &cli.version)?;

    let root = Path::new(".").join(project);
    let options = ReportOptions {
        notes: cli.notes,
        routes: cli.routes,
        tracker_url: settings.tracker_url.clone(),
        lookup_issues: settings.tracker_credentials().is_some(),
    };
    let built = report::build(ctx, &root, &options);

    if !cli.keep {
        if let Err(e) = ctx.fs.remove_dir_all(&root) {
            tracing::warn!(path = %root.display(), "failed to remove extracted chart: {e}");
        }
    }
    let report = built?;

    let generated_at = ctx.clock.now();
    let contents = if cli.insert {
        report.to_insert(project, generated_at)
    } else {
        report.to_page(project, &settings.stylesheet, generated_at)
    };

    let path = Path::new(".").join(output_file_name(project, cli.insert));
    ctx.fs
        .write(&path, &contents)
        .map_err(|e| Error::Write { path: path.clone(), detail: e.to_string() })?;
    tracing::info!(path = %path.display(), charts = report.charts, "map written");

    if !cli.silent && !cli.insert {
        open(ctx.shell.as_ref(), &settings.opener, &path)?;
    }

    Ok(MapOutput { path, contents, charts: report.charts })
}

/// Launches the configured viewer on `path`.
fn open(shell: &dyn ShellExecutor, opener: &[String], path: &Path) -> Result<()> {
    let open_error = |detail: String| Error::Open { path: path.to_path_buf(), detail };
    let Some((program, args)) = opener.split_first() else {
        return Err(open_error("no viewer command configured".to_string()));
    };

    let target = path.display().to_string();
    let mut argv: Vec<&str> = args.iter().map(String::as_str).collect();
    argv.push(&target);

    let output = shell.run(program, &argv).map_err(|e| open_error(e.to_string()))?;
    if !output.success() {
        return Err(open_error(format!(
            "{program} exited with status {}: {}",
            output.exit_code,
            output.stderr.trim()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::replaying::test_support::{cassette, replayer};
    use crate::adapters::replaying::ReplayingShellExecutor;
    use clap::Parser;
    use serde_json::{json, Value};

    fn ok_run() -> Value {
        json!({"ok": {"exit_code": 0, "stdout": "", "stderr": ""}})
    }

    fn cli(extra: &[&str]) -> Cli {
        let mut argv = vec!["surfboard", "stable/mychart", "0.4.0"];
        argv.extend_from_slice(extra);
        Cli::parse_from(argv)
    }

    fn settings(cli: &Cli) -> Settings {
        Settings::resolve(cli, |key| {
            (key == "SURFBOARD_TRACKER_URL").then(|| "https://jira.example.com".to_string())
        })
    }

    /// A chart with one subchart, release notes and one values file.
    fn chart_cassette(extra: Vec<(&'static str, &'static str, Value)>) -> Vec<(&'static str, &'static str, Value)> {
        let mut calls = vec![
            ("shell", "run", ok_run()),
            (
                "fs",
                "walk",
                json!({"ok": [
                    {"path": "./mychart", "is_dir": true},
                    {"path": "./mychart/Chart.yaml", "is_dir": false},
                    {"path": "./mychart/_release_notes.yaml", "is_dir": false},
                    {"path": "./mychart/charts", "is_dir": true},
                    {"path": "./mychart/charts/gateway", "is_dir": true},
                    {"path": "./mychart/charts/gateway/Chart.yaml", "is_dir": false},
                    {"path": "./mychart/env", "is_dir": true},
                    {"path": "./mychart/env/status-eu-west-qa-blue-values.yaml", "is_dir": false},
                ]}),
            ),
            // ./mychart, ./mychart/charts (both spellings), ./mychart/charts/gateway, ./mychart/env
            ("fs", "exists", json!(true)),
            ("fs", "exists", json!(false)),
            ("fs", "exists", json!(false)),
            ("fs", "exists", json!(true)),
            ("fs", "exists", json!(false)),
            ("fs", "exists", json!(false)),
            ("fs", "read_to_string", json!({"ok": "name: mychart\nversion: 0.4.0\ndescription: Umbrella\n"})),
            ("fs", "read_to_string", json!({"ok": "mychart-0.4-1\nOPS-1234 gateway timeouts\nOPS-1234 again\n"})),
            ("fs", "read_to_string", json!({"ok": "name: gateway\nversion: 1.2.0\n"})),
            (
                "fs",
                "read_to_string",
                json!({"ok": "status-api-gateway:\n  ingress:\n    host: h\n    rules:\n      - ServiceName: status-api\n"}),
            ),
            ("fs", "remove_dir_all", json!({"ok": null})),
            ("clock", "now", json!("2025-06-15T10:00:00Z")),
            ("fs", "write", json!({"ok": null})),
        ];
        calls.extend(extra);
        calls
    }

    #[test]
    fn full_page_with_notes_and_routes() {
        let ctx = ServiceContext::replaying_from(&cassette(&chart_cassette(vec![(
            "shell",
            "run",
            ok_run(),
        )])));
        let cli = cli(&["--notes", "--routes"]);

        let output = run(&ctx, &cli, &settings(&cli)).unwrap();

        assert_eq!(output.path, Path::new("./mychart-map.html"));
        assert_eq!(output.charts, 2);
        let html = &output.contents;
        assert!(html.starts_with("<html><head><link rel='stylesheet' href='chart-tbl.css'>"));
        assert!(html.contains("<h1>Surfboard for mychart Helm Chart</h1>"));
        assert!(html.contains("<tr><td></td><td><h2><a href='#mychart'>mychart</a></h2>0.4.0<br>Umbrella</td></tr>"));
        assert!(html.contains("<tr><td></td><td></td><td></td><td><h2><a href='#gateway'>gateway</a></h2>1.2.0<br></td></tr>"));
        assert_eq!(html.matches("browse/OPS-1234").count(), 1);
        assert!(html.contains("https://jira.example.com/browse/OPS-1234"));
        assert!(html.contains("<a name='qa'>status-eu-west-qa-blue</a></h2><ul><li>status api</li></ul>"));
        assert!(html.contains("Generated 2025-06-15 10:00:00 UTC"));
    }

    #[test]
    fn silent_insert_skips_viewer_and_document_wrapper() {
        let ctx = ServiceContext::replaying_from(&cassette(&chart_cassette(vec![])));
        let cli = cli(&["--notes", "--routes", "--insert"]);

        let output = run(&ctx, &cli, &settings(&cli)).unwrap();

        assert_eq!(output.path, Path::new("./mychart-map.insert"));
        assert!(output.contents.starts_with("<h1>Surfboard for mychart Helm Chart</h1>"));
    }

    #[test]
    fn failed_fetch_stops_before_walking() {
        let ctx = ServiceContext::replaying_from(&cassette(&[(
            "shell",
            "run",
            json!({"ok": {"exit_code": 1, "stdout": "", "stderr": "Error: repo stable not found"}}),
        )]));
        let cli = cli(&["--silent"]);

        let err = run(&ctx, &cli, &settings(&cli)).unwrap_err();
        assert!(matches!(err, Error::Fetch { .. }));
    }

    #[test]
    fn parent_directory_reference_never_reaches_cleanup() {
        // An empty cassette panics on any fetch, walk or removal.
        let ctx = ServiceContext::replaying_from(&cassette(&[]));
        let cli = Cli::parse_from(["surfboard", "repo/..", "1.0.0", "--silent"]);

        let err = run(&ctx, &cli, &settings(&cli)).unwrap_err();
        assert!(matches!(err, Error::Fetch { .. }));
    }

    #[test]
    fn walk_failure_still_cleans_up() {
        let ctx = ServiceContext::replaying_from(&cassette(&[
            ("shell", "run", ok_run()),
            ("fs", "walk", json!({"err": "No such file or directory"})),
            ("fs", "remove_dir_all", json!({"err": "No such file or directory"})),
        ]));
        let cli = cli(&["--silent"]);

        let err = run(&ctx, &cli, &settings(&cli)).unwrap_err();
        assert!(matches!(err, Error::Walk { .. }));
    }

    #[test]
    fn write_failure_is_fatal() {
        let ctx = ServiceContext::replaying_from(&cassette(&[
            ("shell", "run", ok_run()),
            ("fs", "walk", json!({"ok": []})),
            ("clock", "now", json!("2025-06-15T10:00:00Z")),
            ("fs", "write", json!({"err": "Read-only file system"})),
        ]));
        let cli = cli(&["--silent", "--keep"]);

        let err = run(&ctx, &cli, &settings(&cli)).unwrap_err();
        assert!(matches!(err, Error::Write { .. }));
    }

    #[test]
    fn viewer_failure_is_reported() {
        let shell = ReplayingShellExecutor::new(replayer(&[(
            "shell",
            "run",
            json!({"ok": {"exit_code": 3, "stdout": "", "stderr": "no display"}}),
        )]));
        let err = open(&shell, &["xdg-open".to_string()], Path::new("./m-map.html")).unwrap_err();
        assert!(err.to_string().contains("xdg-open exited with status 3: no display"));

        let err = open(&shell, &[], Path::new("./m-map.html")).unwrap_err();
        assert!(err.to_string().contains("no viewer command"));
    }

    #[test]
    fn output_names() {
        assert_eq!(output_file_name("mychart", false), "mychart-map.html");
        assert_eq!(output_file_name("mychart", true), "mychart-map.insert");
    }
}
