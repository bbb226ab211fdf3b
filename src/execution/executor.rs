//! Command execution engine.

use tracing::{debug, info};

use super::outcome::{ExecutionResult, ExitStatus};
use super::request::ExecRequest;
use crate::error::PtylineError;
use crate::pty::{LineError, LineSource, PtySession};
use crate::Result;

/// Run the command and return the tagged outcome.
///
/// Errors only for spawn failures and unclassified read errors; a child
/// that runs to completion always yields an [`ExecutionResult`], whatever
/// its exit status. Use [`execute`] for the raise-on-nonzero policy.
pub fn run(mut request: ExecRequest) -> Result<ExecutionResult> {
    if request.print_command && !request.suppress_output {
        info!("$ {}", request.command);
    }

    let echo = request.print_all && !request.suppress_output;
    if echo {
        if let Some(loading) = &request.loading {
            debug!("{loading}");
        }
    }

    let mut session = PtySession::spawn(&request.command)?;
    let mut source = match session.line_reader() {
        Ok(source) => source,
        Err(err) => {
            session.terminate();
            return Err(err);
        }
    };
    let captured = match pump_lines(&mut source, echo, &mut request) {
        Ok(captured) => captured,
        Err(err) => {
            // The child may still be running; reap it before bailing.
            session.terminate();
            return Err(err);
        }
    };
    let status = session.wait()?;

    // portable-pty folds signal deaths into exit_code; trust success()
    // for the zero case.
    let code = if status.success() {
        0
    } else {
        status.exit_code()
    };

    Ok(ExecutionResult::new(
        captured.join("\n"),
        ExitStatus::new(code),
    ))
}

/// Execute the command and return its captured output.
///
/// On non-zero exit: with an error callback on the request, the callback
/// receives the failure message and status and the output is still
/// returned; without one, [`PtylineError::ExitFailure`] is raised carrying
/// the same message.
pub fn execute(mut request: ExecRequest) -> Result<String> {
    let error_callback = request.error_callback.take();
    finish(run(request)?, error_callback)
}

/// Execute a command line with default flags.
pub fn execute_simple(command: &str) -> Result<String> {
    execute(ExecRequest::new(command))
}

/// Apply the soft-fail/hard-fail policy to a finished run.
fn finish(
    result: ExecutionResult,
    error_callback: Option<super::request::ErrorCallback>,
) -> Result<String> {
    if result.success() {
        return Ok(result.output);
    }

    match error_callback {
        Some(callback) => {
            callback(&result.failure_message(), result.status);
            Ok(result.output)
        }
        None => Err(PtylineError::ExitFailure {
            status: result.status.code(),
            output: result.output,
        }),
    }
}

/// Drain a line source, echoing and capturing as the request asks.
///
/// A corrupted line is dropped and iteration continues; any other read
/// failure aborts the capture.
fn pump_lines<S: LineSource>(
    source: &mut S,
    echo: bool,
    request: &mut ExecRequest,
) -> Result<Vec<String>> {
    let mut captured = Vec::new();

    while let Some(line) = source.next_line() {
        match line {
            Ok(raw) => {
                let line = raw.trim_end().to_string();
                if echo {
                    let shown = request.apply_prefixes(&line);
                    match request.observer.as_mut() {
                        Some(observer) => observer(&shown),
                        None => info!("{shown}"),
                    }
                }
                captured.push(line);
            }
            Err(LineError::Corrupted) => continue,
            Err(LineError::Fatal(e)) => return Err(PtylineError::Io(e)),
        }
    }

    Ok(captured)
}
