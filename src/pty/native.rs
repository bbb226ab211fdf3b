//! Native PTY implementation using portable-pty.

use std::io::{BufReader, ErrorKind, Read};
use std::time::Duration;

use portable_pty::{native_pty_system, Child, ChildKiller, CommandBuilder, MasterPty, PtySize};

use super::{LineError, LineSource};
use crate::error::PtylineError;
use crate::Result;

/// A command spawned on a pseudo-terminal.
///
/// Owns the master side of the PTY pair and the child handle. The slave
/// side is dropped right after spawning so the master reader observes a
/// hangup once the child exits. Dropping the session releases the PTY
/// descriptors on every exit path.
pub struct PtySession {
    master: Box<dyn MasterPty + Send>,
    child: Box<dyn Child + Send + Sync>,
}

impl PtySession {
    /// Spawn `command` through the platform shell on a fresh PTY.
    ///
    /// The command string is passed verbatim to `/bin/sh -c` on Unix and
    /// `cmd.exe /c` on Windows; no quoting or parsing happens here.
    pub fn spawn(command: &str) -> Result<Self> {
        let pty_system = native_pty_system();

        let pair = pty_system
            .openpty(PtySize {
                rows: 24,
                cols: 80,
                pixel_width: 0,
                pixel_height: 0,
            })
            .map_err(|e| spawn_error(command, e))?;

        #[cfg(unix)]
        let cmd = {
            let mut c = CommandBuilder::new("/bin/sh");
            c.arg("-c");
            c.arg(command);
            c
        };

        #[cfg(windows)]
        let cmd = {
            let mut c = CommandBuilder::new("cmd.exe");
            c.arg("/c");
            c.arg(command);
            c
        };

        let child = pair
            .slave
            .spawn_command(cmd)
            .map_err(|e| spawn_error(command, e))?;

        // Without this the master never sees end-of-stream.
        drop(pair.slave);

        Ok(Self {
            master: pair.master,
            child,
        })
    }

    /// Obtain a line reader over the child's combined output.
    pub fn line_reader(&self) -> Result<PtyLineReader> {
        let reader = self
            .master
            .try_clone_reader()
            .map_err(|e| PtylineError::Io(std::io::Error::other(e.to_string())))?;
        Ok(PtyLineReader::new(reader))
    }

    /// Reap the child and return its exit status.
    ///
    /// Must be called exactly once per spawn, after the output stream is
    /// exhausted.
    pub fn wait(&mut self) -> std::io::Result<portable_pty::ExitStatus> {
        self.child.wait()
    }

    /// Best-effort kill and reap, for abandoning a capture midway.
    ///
    /// The child may still be producing output when a fatal read error
    /// aborts the capture; waiting without killing could block forever.
    pub fn terminate(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

fn spawn_error(command: &str, err: impl std::fmt::Display) -> PtylineError {
    PtylineError::Spawn {
        command: command.to_string(),
        reason: err.to_string(),
    }
}

/// Line-buffered reader over a PTY master.
pub struct PtyLineReader {
    reader: BufReader<Box<dyn Read + Send>>,
}

impl PtyLineReader {
    fn new(reader: Box<dyn Read + Send>) -> Self {
        Self {
            reader: BufReader::new(reader),
        }
    }
}

impl LineSource for PtyLineReader {
    fn next_line(&mut self) -> Option<std::result::Result<String, LineError>> {
        use std::io::BufRead;

        let mut buf = Vec::new();
        loop {
            match self.reader.read_until(b'\n', &mut buf) {
                // EOF; flush any unterminated final line first.
                Ok(0) => {
                    return if buf.is_empty() {
                        None
                    } else {
                        Some(decode(buf))
                    };
                }
                Ok(_) => return Some(decode(buf)),
                Err(ref e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(ref e) if e.kind() == ErrorKind::WouldBlock => {
                    std::thread::sleep(Duration::from_millis(10));
                    continue;
                }
                // PTY hangup after child exit is the normal end of the
                // stream on Unix, not a failure.
                Err(ref e) if is_hangup(e) => {
                    return if buf.is_empty() {
                        None
                    } else {
                        Some(decode(buf))
                    };
                }
                Err(e) => return Some(Err(LineError::Fatal(e))),
            }
        }
    }
}

fn decode(bytes: Vec<u8>) -> std::result::Result<String, LineError> {
    String::from_utf8(bytes).map_err(|_| LineError::Corrupted)
}

#[cfg(unix)]
fn is_hangup(err: &std::io::Error) -> bool {
    err.raw_os_error() == Some(libc::EIO)
}

#[cfg(windows)]
fn is_hangup(err: &std::io::Error) -> bool {
    matches!(
        err.kind(),
        ErrorKind::BrokenPipe | ErrorKind::UnexpectedEof
    )
}
