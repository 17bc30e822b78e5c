//! Chart descriptors and the subchart tree walk.

pub mod walker;

use std::fmt::Write as _;
use std::path::{is_separator, Path};

use serde_yaml::Value;

use crate::html::escape;
use crate::ports::FileSystem;
use crate::yaml;

/// Descriptor file names probed in every directory, in order.
pub const DESCRIPTOR_NAMES: [&str; 2] = ["Chart.yaml", "chart.yaml"];

/// The fields of one `Chart.yaml`, plus where in the tree it was found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChartMetadata {
    /// Chart name; also the anchor that release notes link back to.
    pub name: String,
    /// Chart version.
    pub version: String,
    /// Version of the application the chart deploys.
    pub app_version: String,
    /// Free-text description.
    pub description: String,
    /// Separator count of the directory path the descriptor was found in.
    pub depth: usize,
}

/// Number of path-separator characters in `path`.
///
/// This is a textual property of the path string, not the number of
/// directories between the walk root and `path`. A walk rooted at
/// `./mychart` therefore starts at depth 1.
#[must_use]
pub fn depth(path: &str) -> usize {
    path.chars().filter(|c| is_separator(*c)).count()
}

/// Parses descriptor text. Returns `None` unless it is a YAML mapping or
/// an empty document.
///
/// Missing keys become empty strings, so an empty descriptor still yields
/// a row.
#[must_use]
pub fn parse_descriptor(contents: &str, depth: usize) -> Option<ChartMetadata> {
    let doc: Value = serde_yaml::from_str(contents).ok()?;
    if !matches!(doc, Value::Mapping(_) | Value::Null) {
        return None;
    }
    Some(ChartMetadata {
        name: yaml::get_string(&doc, "name"),
        version: yaml::get_string(&doc, "version"),
        app_version: yaml::get_string(&doc, "appVersion"),
        description: yaml::get_string(&doc, "description"),
        depth,
    })
}

/// Reads the descriptor in `dir`, if there is a usable one.
///
/// A missing, unreadable or malformed descriptor means "no chart here" and
/// yields `None`; the caller carries on with the rest of the tree.
pub fn read_descriptor(fs: &dyn FileSystem, dir: &str) -> Option<ChartMetadata> {
    let name = DESCRIPTOR_NAMES.iter().find(|name| fs.exists(&Path::new(dir).join(name)))?;
    let path = Path::new(dir).join(name);

    let contents = match fs.read_to_string(&path) {
        Ok(contents) => contents,
        Err(e) => {
            tracing::warn!(path = %path.display(), "skipping unreadable chart descriptor: {e}");
            return None;
        }
    };

    let chart = parse_descriptor(&contents, depth(dir));
    if chart.is_none() {
        tracing::warn!(path = %path.display(), "skipping malformed chart descriptor");
    }
    chart
}

impl ChartMetadata {
    /// Appends this chart's table row: `depth` empty cells, then the content cell.
    pub fn render_row(&self, out: &mut String) {
        out.push_str("<tr>");
        for _ in 0..self.depth {
            out.push_str("<td></td>");
        }
        let name = escape(&self.name);
        let _ = write!(
            out,
            "<td><h2><a href='#{name}'>{name}</a></h2>{}<br>{}",
            escape(&self.version),
            escape(&self.description),
        );
        if !self.app_version.is_empty() {
            let _ = write!(out, "<br><small>app {}</small>", escape(&self.app_version));
        }
        out.push_str("</td></tr>");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn depth_counts_separators_not_ancestors() {
        assert_eq!(depth("mychart"), 0);
        assert_eq!(depth("./mychart"), 1);
        assert_eq!(depth("./mychart/charts/gateway"), 3);
        assert_eq!(depth("/abs/./mychart"), 3);
    }

    #[test]
    fn parses_all_recognised_keys() {
        let chart = parse_descriptor(
            "apiVersion: v2\nname: gateway\nversion: 1.4.2\nappVersion: \"3.0\"\ndescription: Edge API\n",
            2,
        )
        .unwrap();
        assert_eq!(
            chart,
            ChartMetadata {
                name: "gateway".into(),
                version: "1.4.2".into(),
                app_version: "3.0".into(),
                description: "Edge API".into(),
                depth: 2,
            }
        );
    }

    #[test]
    fn missing_keys_become_empty_strings() {
        let chart = parse_descriptor("name: bare\n", 1).unwrap();
        assert_eq!(chart.version, "");
        assert_eq!(chart.description, "");

        let mut row = String::new();
        chart.render_row(&mut row);
        assert_eq!(row, "<tr><td></td><td><h2><a href='#bare'>bare</a></h2><br></td></tr>");
    }

    #[test]
    fn malformed_descriptors_are_rejected() {
        assert!(parse_descriptor("name: [unclosed", 0).is_none());
        assert!(parse_descriptor("just a string", 0).is_none());
        assert!(parse_descriptor("- a\n- b\n", 0).is_none());
    }

    #[test]
    fn empty_descriptor_yields_an_empty_row() {
        for contents in ["", "# just a comment\n", "---\n"] {
            let chart = parse_descriptor(contents, 2).unwrap();
            assert_eq!(chart, ChartMetadata { depth: 2, ..ChartMetadata::default() });
        }
    }

    #[test]
    fn row_is_indented_by_depth_and_escaped() {
        let chart = ChartMetadata {
            name: "svc-a".into(),
            version: "1.0".into(),
            app_version: "2.0".into(),
            description: "Routes <api> traffic".into(),
            depth: 3,
        };
        let mut row = String::new();
        chart.render_row(&mut row);

        assert!(row.starts_with("<tr><td></td><td></td><td></td><td><h2>"));
        assert!(row.contains("<a href='#svc-a'>svc-a</a>"));
        assert!(row.contains("1.0<br>Routes &lt;api&gt; traffic"));
        assert!(row.ends_with("<small>app 2.0</small></td></tr>"));
    }

    proptest! {
        #[test]
        fn depth_equals_separator_count(
            segments in proptest::collection::vec("[a-z0-9._-]{0,8}", 0..12),
            leading in proptest::bool::ANY,
        ) {
            let mut path = segments.join("/");
            if leading {
                path.insert(0, '/');
            }
            let expected = path.matches('/').count();
            prop_assert_eq!(depth(&path), expected);
        }

        #[test]
        fn row_has_one_empty_cell_per_level(level in 0usize..40) {
            let chart = ChartMetadata { name: "c".into(), depth: level, ..ChartMetadata::default() };
            let mut row = String::new();
            chart.render_row(&mut row);
            prop_assert_eq!(row.matches("<td></td>").count(), level);
        }
    }
}
