//! Replaying adapters that serve recorded interactions.

pub mod clock;
pub mod filesystem;
pub mod issues;
pub mod shell;

pub use clock::ReplayingClock;
pub use filesystem::ReplayingFileSystem;
pub use issues::ReplayingIssueTracker;
pub use shell::ReplayingShellExecutor;

use std::sync::{Mutex, PoisonError};

use serde::de::DeserializeOwned;

use crate::cassette::replayer::CassetteReplayer;
use crate::ports::PortError;

/// Take the output of the next `port::method` interaction.
pub(crate) fn next_output(
    replayer: &Mutex<CassetteReplayer>,
    port: &str,
    method: &str,
) -> serde_json::Value {
    let mut replayer = replayer.lock().unwrap_or_else(PoisonError::into_inner);
    replayer.next_interaction(port, method).output.clone()
}

/// Rebuild a `Result` from the `{"ok": value}` / `{"err": message}` shape
/// written by the recording adapters.
pub(crate) fn replay_result<T: DeserializeOwned>(
    output: serde_json::Value,
    context: &str,
) -> Result<T, PortError> {
    if let Some(err) = output.get("err") {
        let msg = err.as_str().unwrap_or("unknown error").to_string();
        return Err(msg.into());
    }
    let value = output.get("ok").cloned().unwrap_or(output);
    serde_json::from_value(value).map_err(|e| format!("{context}: failed to deserialize: {e}").into())
}
