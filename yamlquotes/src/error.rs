//! Error types for loading and discovering YAML files.
//!
//! None of these stop a check run: a file that fails to load is skipped,
//! and the host decides whether to surface the failure.

use std::path::PathBuf;

use thiserror::Error;

/// Why a file could not be turned into a document tree.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    /// The file could not be opened or read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is larger than the configured limit.
    #[error("file exceeds maximum size of {max_file_size} bytes")]
    FileTooLarge { max_file_size: u64 },

    /// The file content is neither UTF-8 nor UTF-16 with a byte order mark.
    #[error("file is not valid UTF-8 or UTF-16")]
    InvalidEncoding,

    /// The content is not valid YAML.
    #[error("YAML parse error at line {line}, column {column}: {message}")]
    Parse {
        line: usize,
        column: usize,
        message: String,
    },

    /// Collections nest deeper than the loader accepts.
    #[error("document nesting exceeds {max_depth} levels at line {line}, column {column}")]
    TooDeep {
        max_depth: usize,
        line: usize,
        column: usize,
    },
}

/// Failure to build the list of candidate files.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DiscoverError {
    /// A root path given to discovery does not exist.
    #[error("path does not exist: {}", .0.display())]
    MissingPath(PathBuf),

    /// An exclude glob could not be parsed.
    #[error("invalid exclude glob pattern '{pattern}': {source}")]
    InvalidExcludePattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
}
