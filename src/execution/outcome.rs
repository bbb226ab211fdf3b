//! Execution outcome types.

use crate::error::PtylineError;

/// Final status of an executed child process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitStatus(u32);

impl ExitStatus {
    /// Wrap a numeric exit code.
    pub fn new(code: u32) -> Self {
        Self(code)
    }

    /// Whether the child signaled success (exit code 0).
    pub fn success(&self) -> bool {
        self.0 == 0
    }

    /// The numeric exit code.
    pub fn code(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ExitStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Captured output and final status of one execution.
///
/// The output is always populated; a failing child does not discard what
/// it printed before exiting.
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    /// Captured lines, trailing whitespace stripped, joined by `\n`.
    pub output: String,
    /// The child's final status.
    pub status: ExitStatus,
}

impl ExecutionResult {
    /// Create a result from captured output and an exit status.
    pub fn new(output: String, status: ExitStatus) -> Self {
        Self { output, status }
    }

    /// Whether the child succeeded.
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// The message handed to error callbacks and carried by the raised
    /// error in hard-fail mode. Same text either way.
    pub fn failure_message(&self) -> String {
        PtylineError::ExitFailure {
            status: self.status.code(),
            output: self.output.clone(),
        }
        .to_string()
    }
}
