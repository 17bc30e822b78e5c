//! Shell executor port for running external programs.

use serde::{Deserialize, Serialize};

use super::PortError;

/// The output of a finished process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellOutput {
    /// The exit code of the process (`-1` when terminated by a signal).
    pub exit_code: i32,
    /// The captured standard output.
    pub stdout: String,
    /// The captured standard error.
    pub stderr: String,
}

impl ShellOutput {
    /// Returns `true` if the process exited with status zero.
    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Executes external programs.
///
/// Arguments are passed straight to the process, never through a shell, so
/// chart names and versions cannot be interpreted as shell syntax.
pub trait ShellExecutor: Send + Sync {
    /// Runs `program` with `args`, blocking until it exits.
    ///
    /// # Errors
    ///
    /// Returns an error if the program cannot be spawned.
    fn run(&self, program: &str, args: &[&str]) -> Result<ShellOutput, PortError>;
}
