//! Host integration.
//!
//! A host (lint runner, CI wrapper, the bundled CLI) obtains the check from
//! [`new_analyzers`], hands it a [`Pass`] with the candidate files and a
//! [`DiagnosticSink`], and collects what comes back.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::inspect::{Issue, check_document};
use crate::loader::{is_yaml_path, load};
use crate::tree::Location;

/// Name the check registers under.
pub const ANALYZER_NAME: &str = "yamlquotes";

/// One-line description shown by hosts.
pub const ANALYZER_DOC: &str = "checks for unquoted strings in YAML files";

/// A finding forwarded to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct Diagnostic {
    /// File the issue was found in.
    pub file: PathBuf,
    /// Position of the offending scalar.
    pub location: Location,
    /// `YAML Quote Issue: Value '<literal>' is not double-quoted in file <path>`
    pub message: String,
}

impl Diagnostic {
    #[must_use]
    pub fn from_issue(file: &Path, issue: &Issue) -> Self {
        Self {
            file: file.to_owned(),
            location: issue.location,
            message: format!("YAML Quote Issue: {issue} in file {}", file.display()),
        }
    }

    /// Format the diagnostic as `{file}:{line}:{column}: {message}`.
    #[must_use]
    pub fn format_human_readable(&self) -> String {
        format!(
            "{}:{}: {}",
            self.file.display(),
            self.location,
            self.message
        )
    }
}

/// Receives diagnostics as they are produced.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// Everything a single run of the check needs from its host.
pub struct Pass<'a> {
    /// Candidate files; anything not ending in `.yaml` or `.yml` is ignored.
    pub files: &'a [PathBuf],
    /// Files larger than this are skipped.
    pub max_file_size: u64,
    pub sink: &'a mut dyn DiagnosticSink,
}

/// File counts for one pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PassSummary {
    /// YAML files that were loaded and inspected.
    pub inspected_files: usize,
    /// YAML files that could not be read or parsed.
    pub skipped_files: usize,
}

/// A check descriptor as registered with a host.
#[derive(Debug, Clone, Copy)]
pub struct Analyzer {
    pub name: &'static str,
    pub doc: &'static str,
    run: fn(&mut Pass<'_>) -> PassSummary,
}

impl Analyzer {
    /// Execute the check over the pass's files.
    pub fn run(&self, pass: &mut Pass<'_>) -> PassSummary {
        (self.run)(pass)
    }
}

/// Build the check descriptors exposed to a host.
///
/// `settings` is whatever configuration the host holds for this check. It is
/// accepted so hosts can pass it uniformly, and does not influence the check.
#[must_use]
pub fn new_analyzers(settings: &serde_json::Value) -> Vec<Analyzer> {
    tracing::trace!(%settings, "registering {ANALYZER_NAME}");
    vec![Analyzer {
        name: ANALYZER_NAME,
        doc: ANALYZER_DOC,
        run: run_pass,
    }]
}

fn run_pass(pass: &mut Pass<'_>) -> PassSummary {
    let mut summary = PassSummary::default();

    for file in pass.files {
        if !is_yaml_path(file) {
            continue;
        }

        let root = match load(file, pass.max_file_size) {
            Ok(root) => root,
            Err(e) => {
                tracing::debug!(file = %file.display(), error = %e, "skipping file");
                summary.skipped_files += 1;
                continue;
            }
        };
        summary.inspected_files += 1;

        for issue in check_document(root.as_ref()) {
            tracing::trace!(file = %file.display(), location = %issue.location, "{issue}");
            pass.sink.report(Diagnostic::from_issue(file, &issue));
        }
    }

    summary
}
