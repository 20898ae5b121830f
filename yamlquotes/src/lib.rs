//! # yamlquotes
//!
//! A static check that reports YAML string values not written in
//! double-quoted style.
//!
//! Each candidate file is loaded into a style-aware tree ([`loader`]), and
//! the tree is walked depth-first ([`inspect`]). Every scalar that resolves
//! to a non-empty string and is written plain, single-quoted, or as a block
//! scalar produces one issue. Mapping keys are never inspected. Files that
//! cannot be read or parsed are skipped.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//! use yamlquotes::{CheckConfig, check_files};
//!
//! let files = vec![PathBuf::from("config/app.yaml"), PathBuf::from("README.md")];
//! let report = check_files(&files, &CheckConfig::default());
//! for diagnostic in &report.diagnostics {
//!     println!("{}", diagnostic.format_human_readable());
//! }
//! println!("OK: {}", report.ok);
//! ```
//!
//! Hosts that drive checks generically use [`new_analyzers`] and a [`Pass`]
//! instead.

mod analyzer;
mod config;
mod discover;
mod error;
pub mod inspect;
pub mod loader;
pub mod output;
mod report;
mod resolve;
pub mod tree;

pub use analyzer::{
    ANALYZER_DOC, ANALYZER_NAME, Analyzer, Diagnostic, DiagnosticSink, Pass, PassSummary,
    new_analyzers,
};
pub use config::{CheckConfig, DiscoverConfig};
pub use discover::find_files;
pub use error::{DiscoverError, LoadError};
pub use report::CheckReport;
pub use resolve::resolve_scalar;

use std::path::PathBuf;

/// Run the check over `files` and collect everything into a report.
///
/// Paths without a `.yaml` or `.yml` suffix are ignored. Unreadable or
/// unparsable YAML files are counted as skipped and never abort the run.
#[must_use]
pub fn check_files(files: &[PathBuf], config: &CheckConfig) -> CheckReport {
    let mut diagnostics = Vec::new();
    let mut pass = Pass {
        files,
        max_file_size: config.max_file_size,
        sink: &mut diagnostics,
    };

    let mut summary = PassSummary::default();
    for analyzer in new_analyzers(&serde_json::Value::Null) {
        let pass_summary = analyzer.run(&mut pass);
        summary.inspected_files += pass_summary.inspected_files;
        summary.skipped_files += pass_summary.skipped_files;
    }

    CheckReport::new(summary, diagnostics)
}
