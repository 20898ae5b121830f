//! Check report types.

use serde::Serialize;

use crate::analyzer::{Diagnostic, PassSummary};

/// Result of running the check over a set of files.
///
/// Files that could not be read or parsed are counted in `skipped_files`
/// and contribute no diagnostics; they do not make the report fail.
#[derive(Debug, Clone, Serialize)]
#[non_exhaustive]
pub struct CheckReport {
    /// Number of YAML files loaded and inspected.
    pub inspected_files: usize,
    /// Number of YAML files skipped because they could not be loaded.
    pub skipped_files: usize,
    /// Whether no diagnostics were produced.
    pub ok: bool,
    /// Diagnostics in file order, then source order within each file.
    pub diagnostics: Vec<Diagnostic>,
}

impl CheckReport {
    #[must_use]
    pub fn new(summary: PassSummary, diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            inspected_files: summary.inspected_files,
            skipped_files: summary.skipped_files,
            ok: diagnostics.is_empty(),
            diagnostics,
        }
    }

    /// Total number of YAML files attempted (inspected + skipped).
    #[must_use]
    pub fn files_attempted(&self) -> usize {
        self.inspected_files + self.skipped_files
    }

    /// Number of diagnostics found.
    #[must_use]
    pub fn issues_count(&self) -> usize {
        self.diagnostics.len()
    }
}
