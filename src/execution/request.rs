//! Execution request building and representation.

use super::outcome::ExitStatus;

/// Per-line observer invoked synchronously as output arrives.
pub type LineObserver = Box<dyn FnMut(&str)>;

/// Handler invoked instead of raising when the child exits non-zero.
/// Receives the formatted failure message and the exit status.
pub type ErrorCallback = Box<dyn FnOnce(&str, ExitStatus)>;

/// A label prepended to echoed lines, optionally gated by a predicate.
///
/// Prefixes affect what is shown, never what is captured.
pub struct LinePrefix {
    label: String,
    when: Option<Box<dyn Fn(&str) -> bool>>,
}

impl LinePrefix {
    /// Prefix every echoed line with `label`.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            when: None,
        }
    }

    /// Only prefix lines for which `predicate` returns true.
    pub fn when(mut self, predicate: impl Fn(&str) -> bool + 'static) -> Self {
        self.when = Some(Box::new(predicate));
        self
    }

    fn matches(&self, line: &str) -> bool {
        self.when.as_ref().map_or(true, |pred| pred(line))
    }
}

/// A command to execute, plus the flags and callbacks governing how its
/// output is echoed and how failure is signaled.
pub struct ExecRequest {
    /// The command line, passed verbatim to the OS spawn facility.
    pub command: String,
    /// Echo each captured line as it arrives.
    pub print_all: bool,
    /// Echo the command string before running it.
    pub print_command: bool,
    /// Suppress both echoes; capture is unaffected.
    pub suppress_output: bool,
    /// Cosmetic progress text shown once before streaming begins.
    pub loading: Option<String>,
    pub(crate) prefixes: Vec<LinePrefix>,
    pub(crate) observer: Option<LineObserver>,
    pub(crate) error_callback: Option<ErrorCallback>,
}

impl ExecRequest {
    /// Create a request with the given command line and default flags.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            print_all: false,
            print_command: true,
            suppress_output: false,
            loading: None,
            prefixes: Vec::new(),
            observer: None,
            error_callback: None,
        }
    }

    /// Set whether captured lines are echoed.
    pub fn print_all(mut self, print_all: bool) -> Self {
        self.print_all = print_all;
        self
    }

    /// Set whether the command string is echoed before running.
    pub fn print_command(mut self, print_command: bool) -> Self {
        self.print_command = print_command;
        self
    }

    /// Suppress all echoing, for commands whose text is sensitive.
    pub fn suppress_output(mut self, suppress: bool) -> Self {
        self.suppress_output = suppress;
        self
    }

    /// Set the cosmetic loading text.
    pub fn loading(mut self, text: impl Into<String>) -> Self {
        self.loading = Some(text.into());
        self
    }

    /// Add a prefix applied to echoed lines.
    pub fn prefix(mut self, prefix: LinePrefix) -> Self {
        self.prefixes.push(prefix);
        self
    }

    /// Route echoed lines to `observer` instead of the default sink.
    ///
    /// Only invoked when `print_all` is set and output is not suppressed.
    pub fn observer(mut self, observer: impl FnMut(&str) + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Switch to soft-fail mode: on non-zero exit, invoke `callback` with
    /// the failure message and status instead of returning an error.
    pub fn error_callback(mut self, callback: impl FnOnce(&str, ExitStatus) + 'static) -> Self {
        self.error_callback = Some(Box::new(callback));
        self
    }

    pub(crate) fn apply_prefixes(&self, line: &str) -> String {
        let mut shown = line.to_string();
        for prefix in &self.prefixes {
            if prefix.matches(line) {
                shown = format!("{}{}", prefix.label, shown);
            }
        }
        shown
    }
}

impl std::fmt::Debug for ExecRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecRequest")
            .field("command", &self.command)
            .field("print_all", &self.print_all)
            .field("print_command", &self.print_command)
            .field("suppress_output", &self.suppress_output)
            .field("loading", &self.loading)
            .field("prefixes", &self.prefixes.len())
            .field("observer", &self.observer.is_some())
            .field("error_callback", &self.error_callback.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let request = ExecRequest::new("ls -la");
        assert_eq!(request.command, "ls -la");
        assert!(!request.print_all);
        assert!(request.print_command);
        assert!(!request.suppress_output);
        assert!(request.loading.is_none());
        assert!(request.observer.is_none());
        assert!(request.error_callback.is_none());
    }

    #[test]
    fn test_request_builder_chain() {
        let request = ExecRequest::new("make all")
            .print_all(true)
            .print_command(false)
            .suppress_output(true)
            .loading("building");

        assert!(request.print_all);
        assert!(!request.print_command);
        assert!(request.suppress_output);
        assert_eq!(request.loading.as_deref(), Some("building"));
    }

    #[test]
    fn test_unconditional_prefix() {
        let request = ExecRequest::new("true").prefix(LinePrefix::new("▸ "));
        assert_eq!(request.apply_prefixes("hello"), "▸ hello");
    }

    #[test]
    fn test_conditional_prefix_skips_non_matching_lines() {
        let request = ExecRequest::new("true")
            .prefix(LinePrefix::new("[warn] ").when(|line| line.contains("warning")));

        assert_eq!(request.apply_prefixes("warning: oops"), "[warn] warning: oops");
        assert_eq!(request.apply_prefixes("all good"), "all good");
    }

    #[test]
    fn test_prefixes_stack_in_order() {
        let request = ExecRequest::new("true")
            .prefix(LinePrefix::new("inner "))
            .prefix(LinePrefix::new("outer "));

        assert_eq!(request.apply_prefixes("line"), "outer inner line");
    }

    #[test]
    fn test_debug_hides_callback_bodies() {
        let request = ExecRequest::new("true").observer(|_| {});
        let rendered = format!("{:?}", request);
        assert!(rendered.contains("observer: true"));
        assert!(rendered.contains("error_callback: false"));
    }
}
