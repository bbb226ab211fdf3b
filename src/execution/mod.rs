//! Command execution engine.
//!
//! This module pairs a tagged-outcome layer ([`run`]) with a failure
//! policy layer ([`execute`]): `run` reports whatever the child did,
//! `execute` turns a non-zero exit into either an error or an
//! error-callback invocation, as the request asks.
//!
//! # Example
//!
//! ```no_run
//! use ptyline::{execute, ExecRequest};
//!
//! let output = execute(ExecRequest::new("echo hello").print_all(true))?;
//! assert_eq!(output, "hello");
//! # Ok::<(), ptyline::PtylineError>(())
//! ```
//!
//! A non-zero exit raises by default; attach an error callback to
//! inspect the failure and keep the captured output instead.

mod executor;
mod outcome;
mod request;

pub use executor::{execute, execute_simple, run};
pub use outcome::{ExecutionResult, ExitStatus};
pub use request::{ErrorCallback, ExecRequest, LineObserver, LinePrefix};
