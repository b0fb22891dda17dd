//! Bounded file reads whose failures come back as text.

use std::fs;
use std::path::Path;

use tracing::warn;

/// Reads at most `max_lines` lines of `path`.
///
/// Errors are returned as an `Error reading file: ...` string so a tool can
/// hand them back to the client like any other content.
pub fn read_truncated(path: &Path, max_lines: usize) -> String {
    match fs::read_to_string(path) {
        Ok(content) => content
            .split('\n')
            .take(max_lines)
            .collect::<Vec<_>>()
            .join("\n"),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to read example");
            format!("Error reading file: {}", e)
        }
    }
}
