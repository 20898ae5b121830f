//! Configuration types.
//!
//! `CheckConfig` applies to the check itself; `DiscoverConfig` only describes
//! how the bundled host turns command-line roots into a file list.

use std::path::PathBuf;

use crate::loader::DEFAULT_MAX_FILE_SIZE;

/// Options for running the check over a list of files.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct CheckConfig {
    /// Files larger than this (in bytes) are skipped. Default: 10 MB.
    pub max_file_size: u64,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

/// Filesystem discovery options.
///
/// NOTE: `paths` must be non-empty. Picking default roots is the caller's
/// job, not this crate's.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct DiscoverConfig {
    /// Files or directories to search.
    pub paths: Vec<PathBuf>,
    /// Exclude patterns (glob format), matched against the full path and the file name.
    pub exclude: Vec<String>,
    /// Whether to follow symbolic links. Defaults to `false`.
    pub follow_links: bool,
    /// Maximum directory traversal depth (default: 64).
    pub max_depth: usize,
}

impl Default for DiscoverConfig {
    fn default() -> Self {
        Self {
            paths: Vec::new(),
            exclude: Vec::new(),
            follow_links: false,
            max_depth: 64,
        }
    }
}
