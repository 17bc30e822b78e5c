//! Live shell executor using `std::process::Command`.

use std::process::Command;

use crate::ports::shell::{ShellExecutor, ShellOutput};
use crate::ports::PortError;

/// Live executor that spawns real processes.
pub struct LiveShellExecutor;

impl ShellExecutor for LiveShellExecutor {
    fn run(&self, program: &str, args: &[&str]) -> Result<ShellOutput, PortError> {
        tracing::debug!(program, ?args, "spawning");
        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|e| format!("failed to spawn `{program}`: {e}"))?;
        Ok(ShellOutput {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
