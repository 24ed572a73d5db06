//! Scene file scanner
//!
//! Expands `<root>/<pattern>` (by default `<root>/*/*`) into the list of scene
//! files to classify.

use glob::MatchOptions;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Discovery errors
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Invalid scene pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("Failed to read {}: {}", .0.path().display(), .0.error())]
    Unreadable(#[from] glob::GlobError),

    #[error("Scene root is not valid UTF-8: {}", .0.display())]
    NonUtf8Root(PathBuf),
}

/// Shell-like matching: `*` never crosses `/` and never matches a leading dot.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

/// Build the full glob for `pattern` under `root`.
///
/// The root is escaped so directory names containing `[`, `*` or `?` are
/// taken literally.
pub fn scene_glob(root: &Path, pattern: &str) -> Result<String, ScanError> {
    let root_str = root
        .to_str()
        .ok_or_else(|| ScanError::NonUtf8Root(root.to_path_buf()))?;
    let root_str = root_str.trim_end_matches('/');
    let pattern = pattern.trim_start_matches('/');
    if root_str.is_empty() {
        // Root was "/" itself
        return Ok(format!("/{pattern}"));
    }
    Ok(format!("{}/{pattern}", glob::Pattern::escape(root_str)))
}

/// Discover scene files matching `<root>/<pattern>`, in glob order.
///
/// Only regular files are returned. A missing root is not an error: like a
/// shell glob it simply matches nothing.
pub fn discover(root: &Path, pattern: &str) -> Result<Vec<PathBuf>, ScanError> {
    let full = scene_glob(root, pattern)?;

    if !root.is_dir() {
        warn!(root = %root.display(), "Scene root does not exist or is not a directory");
    }

    let entries = glob::glob_with(&full, MATCH_OPTIONS).map_err(|source| ScanError::Pattern {
        pattern: full.clone(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry?;
        if path.is_file() {
            files.push(path);
        } else {
            debug!(path = %path.display(), "Skipping non-file match");
        }
    }

    info!(pattern = %full, files = files.len(), "Discovered scene files");
    Ok(files)
}
