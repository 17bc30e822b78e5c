//! Replaying adapter for the `ShellExecutor` port.

use std::sync::Mutex;

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::{PortError, ShellExecutor, ShellOutput};

/// Replays recorded process results from a cassette.
pub struct ReplayingShellExecutor {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingShellExecutor {
    /// Creates a new replaying executor from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl ShellExecutor for ReplayingShellExecutor {
    fn run(&self, _program: &str, _args: &[&str]) -> Result<ShellOutput, PortError> {
        replay_result(next_output(&self.replayer, "shell", "run"), "shell::run")
    }
}
