//! Type definitions for lint results.

use crate::rules::Finding;
use serde::Serialize;
use std::path::PathBuf;

/// Represents a file that could not be read or parsed.
#[derive(Debug, Serialize, Clone)]
pub struct ParseError {
    /// The file where the error occurred.
    pub file: PathBuf,
    /// The error message.
    pub error: String,
}

/// Holds the results of a lint run.
/// This struct is serialized to JSON if requested.
#[derive(Debug, Serialize, Clone, Default)]
pub struct LintReport {
    /// Findings across all files, ordered by file then position.
    pub findings: Vec<Finding>,
    /// Files that were skipped because they could not be read or parsed.
    pub parse_errors: Vec<ParseError>,
    /// Summary statistics of the run.
    pub summary: LintSummary,
}

impl LintReport {
    /// Whether any finding was reported.
    #[must_use]
    pub fn has_findings(&self) -> bool {
        !self.findings.is_empty()
    }

    /// Findings grouped by file, keeping report order.
    #[must_use]
    pub fn findings_by_file(&self) -> indexmap::IndexMap<&PathBuf, Vec<&Finding>> {
        let mut grouped: indexmap::IndexMap<&PathBuf, Vec<&Finding>> = indexmap::IndexMap::new();
        for finding in &self.findings {
            grouped.entry(&finding.file).or_default().push(finding);
        }
        grouped
    }
}

/// Summary statistics for a lint run.
#[derive(Debug, Serialize, Clone, Default)]
pub struct LintSummary {
    /// Total number of files scanned.
    pub total_files: usize,
    /// Total number of lines scanned.
    pub total_lines_analyzed: usize,
    /// Total number of findings.
    pub findings_count: usize,
    /// Number of findings that carry a fix.
    pub fixable_count: usize,
    /// Number of files with parse errors.
    pub parse_errors_count: usize,
}

/// Outcome of processing one file.
#[derive(Debug, Clone)]
pub(crate) enum FileOutcome {
    /// The file was linted.
    Linted {
        /// Findings in source order
        findings: Vec<Finding>,
        /// Number of lines in the file
        lines: usize,
    },
    /// The file could not be read or parsed.
    Failed(ParseError),
}
