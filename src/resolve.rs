//! Executable resolution along the search path.
//!
//! `which` answers the question callers ask right before building a
//! command line: where does this tool actually live. Resolution is
//! deterministic (directory order, then suffix order, exact name first)
//! and absence of a match is a normal outcome, not an error.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tracing::debug;

/// Resolve `command` to an absolute executable path using the live
/// environment (`PATH`, and `PATHEXT` on Windows).
///
/// Returns `None` when nothing on the search path matches.
pub fn which(command: &str) -> Option<PathBuf> {
    let path = std::env::var_os("PATH");

    #[cfg(windows)]
    let pathext = std::env::var_os("PATHEXT");
    #[cfg(not(windows))]
    let pathext: Option<std::ffi::OsString> = None;

    which_in(command, path.as_deref(), pathext.as_deref())
}

/// Resolve `command` against an explicit search path and suffix list.
///
/// `pathext: None` means the platform has no extension convention and
/// only the exact name is tried. `Some(list)` is a `;`-separated suffix
/// list; entries are matched case-insensitively (ASCII-lowercased) and
/// the exact name is always tried before any suffix.
pub fn which_in(command: &str, path: Option<&OsStr>, pathext: Option<&OsStr>) -> Option<PathBuf> {
    let suffixes = candidate_suffixes(pathext);

    for dir in search_dirs(path) {
        for suffix in &suffixes {
            let candidate = dir.join(format!("{command}{suffix}"));
            if is_executable(&candidate) {
                debug!("resolved {} to {}", command, candidate.display());
                return Some(candidate);
            }
        }
    }

    None
}

fn search_dirs(path: Option<&OsStr>) -> Vec<PathBuf> {
    match path {
        Some(raw) => std::env::split_paths(raw)
            .filter(|dir| !dir.as_os_str().is_empty())
            .collect(),
        None => Vec::new(),
    }
}

fn candidate_suffixes(pathext: Option<&OsStr>) -> Vec<String> {
    // The empty suffix leads so an exact-name match always wins.
    let mut suffixes = vec![String::new()];

    if let Some(raw) = pathext {
        for entry in raw.to_string_lossy().split(';') {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }
            suffixes.push(entry.to_ascii_lowercase());
        }
    }

    suffixes
}

fn is_executable(path: &Path) -> bool {
    std::fs::metadata(path).is_ok_and(|meta| meta.is_file() && has_execute_permission(&meta))
}

#[cfg(unix)]
fn has_execute_permission(meta: &std::fs::Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    meta.permissions().mode() & 0o111 != 0
}

#[cfg(not(unix))]
fn has_execute_permission(meta: &std::fs::Metadata) -> bool {
    meta.is_file()
}
