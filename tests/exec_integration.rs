//! Executor integration tests.
//!
//! These run real commands through the PTY layer and so are Unix-only;
//! the platform-independent scheduling and policy logic is covered by
//! unit tests against a fake line source.

#![cfg(unix)]

use std::cell::RefCell;
use std::rc::Rc;

use ptyline::{execute, execute_simple, run, which, ExecRequest, ExitStatus};

// ============================================================================
// Capture Tests
// ============================================================================

#[test]
fn test_echo_roundtrip() {
    let output = execute_simple("echo foobar").unwrap();
    assert_eq!(output, "foobar");
}

#[test]
fn test_multiline_capture_joined_by_newlines() {
    let output = execute_simple("printf 'one\\ntwo\\n'").unwrap();
    assert_eq!(output, "one\ntwo");
}

#[test]
fn test_empty_output() {
    let output = execute_simple("true").unwrap();
    assert_eq!(output, "");
}

#[test]
fn test_run_reports_success_status() {
    let result = run(ExecRequest::new("echo fine")).unwrap();
    assert!(result.success());
    assert_eq!(result.status, ExitStatus::new(0));
    assert_eq!(result.output, "fine");
}

// ============================================================================
// Failure Mode Tests
// ============================================================================

#[test]
fn test_nonzero_exit_raises_without_callback() {
    let err = execute(ExecRequest::new("echo visible && exit 4")).unwrap_err();

    assert_eq!(err.exit_status(), Some(4));
    let msg = err.to_string();
    assert!(msg.contains("Exit status: 4"));
    assert!(msg.contains("visible"));
}

#[test]
fn test_nonzero_exit_with_callback_returns_output() {
    let seen = Rc::new(RefCell::new(None));
    let slot = Rc::clone(&seen);

    let request = ExecRequest::new("echo visible && exit 4").error_callback(
        move |message: &str, status: ExitStatus| {
            *slot.borrow_mut() = Some((message.to_string(), status));
        },
    );

    let output = execute(request).unwrap();
    assert_eq!(output, "visible");

    let (message, status) = seen.borrow().clone().unwrap();
    assert_eq!(status.code(), 4);
    assert!(message.contains("Exit status: 4"));
    assert!(message.contains("visible"));
}

#[test]
fn test_run_keeps_output_of_failing_command() {
    let result = run(ExecRequest::new("echo kept && exit 9")).unwrap();
    assert!(!result.success());
    assert_eq!(result.status.code(), 9);
    assert_eq!(result.output, "kept");
}

#[test]
fn test_missing_command_surfaces_shell_exit_code() {
    // The shell itself spawns fine and reports the lookup failure as 127.
    let err = execute_simple("definitely_not_a_real_command_xyz").unwrap_err();
    assert_eq!(err.exit_status(), Some(127));
}

// ============================================================================
// Streaming Tests
// ============================================================================

#[test]
fn test_observer_receives_lines_in_order() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);

    let request = ExecRequest::new("printf 'alpha\\nbeta\\n'")
        .print_all(true)
        .observer(move |line| sink.borrow_mut().push(line.to_string()));

    let output = execute(request).unwrap();
    assert_eq!(output, "alpha\nbeta");
    assert_eq!(*seen.borrow(), vec!["alpha", "beta"]);
}

#[test]
fn test_suppress_output_silences_observer_but_not_capture() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);

    let request = ExecRequest::new("echo secret")
        .print_all(true)
        .suppress_output(true)
        .observer(move |line| sink.borrow_mut().push(line.to_string()));

    let output = execute(request).unwrap();
    assert_eq!(output, "secret");
    assert!(seen.borrow().is_empty());
}

// ============================================================================
// Concurrency and Resolution Tests
// ============================================================================

#[test]
fn test_concurrent_executions_are_independent() {
    let handles: Vec<_> = (0..4)
        .map(|i| {
            std::thread::spawn(move || {
                let output = execute_simple(&format!("echo worker_{i}")).unwrap();
                assert_eq!(output, format!("worker_{i}"));
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_which_finds_the_shell() {
    let sh = which("sh").expect("sh should be on PATH");
    assert!(sh.is_absolute());
    assert!(sh.file_name().is_some_and(|name| name == "sh"));
}

#[test]
fn test_resolved_path_is_executable() {
    let sh = which("sh").expect("sh should be on PATH");
    let output = execute_simple(&format!("{} -c 'echo resolved'", sh.display())).unwrap();
    assert_eq!(output, "resolved");
}
