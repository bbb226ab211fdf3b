//! Error types for ptyline.

use thiserror::Error;

/// Main error type for ptyline operations.
#[derive(Error, Debug)]
pub enum PtylineError {
    /// The OS could not start the process at all.
    #[error("failed to spawn `{command}`: {reason}")]
    Spawn {
        /// The command string handed to the spawn facility.
        command: String,
        /// Reason reported by the PTY layer.
        reason: String,
    },

    /// Unclassified I/O error while reading child output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Child process completed with a non-zero exit status.
    ///
    /// Carries the full captured output so callers can recover it from
    /// the error value alone.
    #[error("Exit status: {status}\n{output}")]
    ExitFailure {
        /// Numeric exit code reported by the child.
        status: u32,
        /// Everything captured before the child exited.
        output: String,
    },
}

impl PtylineError {
    /// The exit code carried by an [`PtylineError::ExitFailure`], if any.
    pub fn exit_status(&self) -> Option<u32> {
        match self {
            Self::ExitFailure { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Convenience Result type for ptyline operations.
pub type Result<T> = std::result::Result<T, PtylineError>;
