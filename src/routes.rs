//! Ingress route summaries from environment values files.

use std::fmt::Write as _;
use std::path::Path;

use serde_yaml::Value;

use crate::error::{Error, Result};
use crate::html::escape;
use crate::ports::FileSystem;
use crate::yaml;

/// Key holding the gateway's external host name.
pub const HOST_KEY: &str = "status-api-gateway.ingress.host";

/// Key holding the gateway's routing rules.
pub const RULES_KEY: &str = "status-api-gateway.ingress.rules";

/// One routing rule from the gateway ingress.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngressRule {
    /// Routing target.
    pub target: String,
    /// Matched request path.
    pub path: String,
    /// Backend service name.
    pub service_name: String,
    /// Backend service port.
    pub service_port: String,
}

/// The namespace a values file describes: its name minus `.yaml` and `-values`.
#[must_use]
pub fn namespace_of(file_name: &str) -> String {
    file_name.replacen(".yaml", "", 1).replacen("-values", "", 1)
}

/// The environment label: the fourth `-`-separated segment of the namespace.
///
/// Namespaces with fewer segments are their own label.
#[must_use]
pub fn environment_of(namespace: &str) -> &str {
    namespace.split('-').nth(3).unwrap_or(namespace)
}

/// Reads the rules list. An absent key is an empty list.
///
/// # Errors
///
/// Returns a description of the problem if the rules are not a list of
/// mappings.
pub fn parse_rules(doc: &Value) -> std::result::Result<Vec<IngressRule>, String> {
    let rules = match yaml::get(doc, RULES_KEY) {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Sequence(rules)) => rules,
        Some(other) => return Err(format!("expected a list of rules, found {}", kind(other))),
    };

    rules
        .iter()
        .enumerate()
        .map(|(i, rule)| -> std::result::Result<IngressRule, String> {
            let rule = rule
                .as_mapping()
                .ok_or_else(|| format!("rule {i} is {}, not a mapping", kind(rule)))?;
            let field =
                |key: &str| yaml::get_key(rule, key).map(yaml::scalar_to_string).unwrap_or_default();
            Ok(IngressRule {
                target: field("Target"),
                path: field("Path"),
                service_name: field("ServiceName"),
                service_port: field("ServicePort"),
            })
        })
        .collect()
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

/// Renders the route fragment for one values document.
///
/// Returns an empty string when the document has no gateway host.
///
/// # Errors
///
/// Returns [`Error::MalformedRules`] if the rules are not a list of mappings.
pub fn render(path: &Path, file_name: &str, doc: &Value) -> Result<String> {
    let host = yaml::get_string(doc, HOST_KEY);
    if host.is_empty() {
        tracing::debug!(path = %path.display(), "no gateway host, no routes");
        return Ok(String::new());
    }

    let rules = parse_rules(doc)
        .map_err(|detail| Error::MalformedRules { path: path.to_path_buf(), detail })?;

    let namespace = namespace_of(file_name);
    let mut out = format!(
        "<h2>Namespace: <a name='{}'>{}</a></h2>",
        escape(environment_of(&namespace)),
        escape(&namespace)
    );
    if !rules.is_empty() {
        out.push_str("<ul>");
        for rule in &rules {
            let _ = write!(out, "<li>{}</li>", escape(&rule.service_name.replace('-', " ")));
        }
        out.push_str("</ul>");
    }
    Ok(out)
}

/// Reads the values file at `path` and renders its route fragment.
///
/// # Errors
///
/// Returns [`Error::Values`] if the file cannot be read or parsed, and
/// [`Error::MalformedRules`] if its rules are malformed.
pub fn extract(fs: &dyn FileSystem, path: &Path) -> Result<String> {
    let file_name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
    tracing::info!(path = %path.display(), "generating version routes");

    let values_error = |detail: String| Error::Values { path: path.to_path_buf(), detail };
    let contents = fs.read_to_string(path).map_err(|e| values_error(e.to_string()))?;
    let doc: Value = serde_yaml::from_str(&contents).map_err(|e| values_error(e.to_string()))?;

    render(path, &file_name, &doc)
}
