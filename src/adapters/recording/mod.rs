//! Recording adapters that capture interactions to cassettes.

pub mod clock;
pub mod filesystem;
pub mod issues;
pub mod shell;

pub use clock::RecordingClock;
pub use filesystem::RecordingFileSystem;
pub use issues::RecordingIssueTracker;
pub use shell::RecordingShellExecutor;

use std::sync::PoisonError;

use serde::Serialize;

use crate::cassette::session::SharedRecorder;

fn to_json<T: Serialize>(value: &T) -> serde_json::Value {
    serde_json::to_value(value).unwrap_or_else(|e| {
        tracing::warn!("failed to serialize cassette value: {e}");
        serde_json::Value::Null
    })
}

/// Record an interaction with a plain (non-Result) return value.
pub(crate) fn record_interaction<I, O>(
    recorder: &SharedRecorder,
    port: &str,
    method: &str,
    input: &I,
    output: &O,
) where
    I: Serialize,
    O: Serialize,
{
    let mut guard = recorder.lock().unwrap_or_else(PoisonError::into_inner);
    guard.record(port, method, to_json(input), to_json(output));
}

/// Record a `Result` interaction as `{"ok": value}` or `{"err": message}`.
///
/// This is the shape `replaying::replay_result` reads back.
pub(crate) fn record_result<T, E, I>(
    recorder: &SharedRecorder,
    port: &str,
    method: &str,
    input: &I,
    result: &Result<T, E>,
) where
    T: Serialize,
    E: std::fmt::Display,
    I: Serialize,
{
    let output = match result {
        Ok(v) => serde_json::json!({ "ok": to_json(v) }),
        Err(e) => serde_json::json!({ "err": e.to_string() }),
    };
    let mut guard = recorder.lock().unwrap_or_else(PoisonError::into_inner);
    guard.record(port, method, to_json(input), output);
}
