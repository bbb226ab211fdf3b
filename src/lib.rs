//! # ptyline
//!
//! Line-oriented command execution over a pseudo-terminal.
//!
//! This crate spawns an external command on a PTY so its combined
//! stdout/stderr arrives line-buffered and in real time, streams each
//! line to an optional observer, captures the full output, and reports
//! the child's exit status. A companion resolver maps a bare command
//! name to an absolute executable path along the search path.
//!
//! ## Features
//!
//! - **PTY capture**: combined, line-buffered output via a cross-platform
//!   pseudo-terminal, where plain pipes reorder or deadlock
//! - **Read-error tolerance**: a single garbled terminal line is dropped,
//!   never the whole capture
//! - **Soft or hard failure**: non-zero exit either raises or invokes a
//!   caller-supplied error callback, per request
//! - **Executable resolution**: `which` with platform suffix conventions
//!
//! ## Quick Start
//!
//! ```no_run
//! use ptyline::{execute, which, ExecRequest};
//!
//! fn main() -> ptyline::Result<()> {
//!     // Initialize logging
//!     ptyline::logging::try_init().ok();
//!
//!     // Resolve a tool, then run it and stream its output
//!     let git = which("git").expect("git on PATH");
//!     let output = execute(
//!         ExecRequest::new(format!("{} status", git.display())).print_all(true),
//!     )?;
//!
//!     println!("captured {} bytes", output.len());
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod execution;
pub mod logging;
pub mod pty;
pub mod resolve;

// Re-export commonly used types
pub use error::{PtylineError, Result};
pub use execution::{
    execute, execute_simple, run, ExecRequest, ExecutionResult, ExitStatus, LinePrefix,
};
pub use pty::{LineError, LineSource, PtyLineReader, PtySession};
pub use resolve::{which, which_in};
