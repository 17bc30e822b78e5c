//! Recording adapter for the `ShellExecutor` port.

use serde::Serialize;

use super::record_result;
use crate::cassette::session::SharedRecorder;
use crate::ports::{PortError, ShellExecutor, ShellOutput};

/// Records process runs while delegating to an inner executor.
pub struct RecordingShellExecutor {
    inner: Box<dyn ShellExecutor>,
    recorder: SharedRecorder,
}

impl RecordingShellExecutor {
    /// Creates a new recording executor wrapping the given implementation.
    pub fn new(inner: Box<dyn ShellExecutor>, recorder: SharedRecorder) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct RunInput<'a> {
    program: &'a str,
    args: &'a [&'a str],
}

impl ShellExecutor for RecordingShellExecutor {
    fn run(&self, program: &str, args: &[&str]) -> Result<ShellOutput, PortError> {
        let result = self.inner.run(program, args);
        record_result(&self.recorder, "shell", "run", &RunInput { program, args }, &result);
        result
    }
}
