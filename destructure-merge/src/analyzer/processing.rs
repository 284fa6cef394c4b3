//! Processing methods for the analyzer.
//!
//! Contains: `analyze_paths`, `analyze_code`, per-file processing and aggregation.

use super::types::FileOutcome;
use super::{DestructureMerge, LintReport, LintSummary, ParseError};
use crate::linter::{lint_source, FileReport};
use crate::utils::{collect_source_files, is_source_file, LineIndex};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

/// Number of files to process per chunk in parallel processing.
/// Bounds how many sources are held in memory at once.
const CHUNK_SIZE: usize = 500;

impl DestructureMerge {
    /// Runs the analysis on multiple paths (files or directories).
    ///
    /// - No paths: the current directory
    /// - Directories: walked for JavaScript/TypeScript sources
    /// - Files: analyzed if they have a source extension
    ///
    /// Paths that do not exist are skipped with a warning.
    pub fn analyze_paths(&mut self, paths: &[PathBuf]) -> LintReport {
        let files = self.collect_files(paths);
        self.analyze_file_list(&files)
    }

    /// Resolves input paths to the sorted, de-duplicated list of files to lint.
    #[must_use]
    pub fn collect_files(&self, paths: &[PathBuf]) -> Vec<PathBuf> {
        let default_root = [PathBuf::from(".")];
        let paths = if paths.is_empty() { &default_root[..] } else { paths };

        let mut files = Vec::new();
        for path in paths {
            if path.is_file() {
                if is_source_file(path, self.include_typescript) {
                    files.push(path.clone());
                } else {
                    tracing::debug!(path = %path.display(), "skipping non-source file");
                }
            } else if path.is_dir() {
                let (dir_files, dir_count) = collect_source_files(
                    path,
                    &self.exclude_folders,
                    &self.include_folders,
                    self.include_typescript,
                );
                tracing::debug!(
                    root = %path.display(),
                    files = dir_files.len(),
                    directories = dir_count,
                    "collected source files"
                );
                files.extend(dir_files);
            } else {
                tracing::warn!(path = %path.display(), "path does not exist");
            }
        }
        files.sort();
        files.dedup();
        files
    }

    /// Analyzes a specific list of files in parallel.
    pub fn analyze_file_list(&mut self, files: &[PathBuf]) -> LintReport {
        let mut outcomes = Vec::with_capacity(files.len());
        for chunk in files.chunks(CHUNK_SIZE) {
            let chunk_outcomes: Vec<FileOutcome> = chunk
                .par_iter()
                .map(|file_path| self.process_single_file(file_path))
                .collect();
            outcomes.extend(chunk_outcomes);
        }
        self.aggregate_results(outcomes, files.len())
    }

    /// Lints one in-memory source, reporting it under `file_path`.
    #[must_use]
    pub fn analyze_code(&self, code: &str, file_path: &Path) -> LintReport {
        let outcome = self.lint_one(code, file_path);
        let mut analyzer = self.clone();
        analyzer.aggregate_results(vec![outcome], 1)
    }

    fn process_single_file(&self, file_path: &Path) -> FileOutcome {
        match fs::read_to_string(file_path) {
            Ok(source) => self.lint_one(&source, file_path),
            Err(e) => {
                tracing::warn!(path = %file_path.display(), error = %e, "cannot read file");
                FileOutcome::Failed(ParseError {
                    file: file_path.to_path_buf(),
                    error: e.to_string(),
                })
            }
        }
    }

    fn lint_one(&self, source: &str, file_path: &Path) -> FileOutcome {
        match lint_source(source, file_path, &self.config) {
            Ok(FileReport { findings, .. }) => FileOutcome::Linted {
                findings,
                lines: LineIndex::new(source).line_count(),
            },
            Err(e) => {
                tracing::debug!(path = %file_path.display(), error = %e, "skipping unparsable file");
                FileOutcome::Failed(ParseError {
                    file: file_path.to_path_buf(),
                    error: e.to_string(),
                })
            }
        }
    }

    fn aggregate_results(&mut self, outcomes: Vec<FileOutcome>, total_files: usize) -> LintReport {
        let mut findings = Vec::new();
        let mut parse_errors = Vec::new();
        let mut total_lines = 0;

        for outcome in outcomes {
            match outcome {
                FileOutcome::Linted {
                    findings: mut file_findings,
                    lines,
                } => {
                    total_lines += lines;
                    findings.append(&mut file_findings);
                }
                FileOutcome::Failed(error) => parse_errors.push(error),
            }
        }

        self.total_files_analyzed = total_files;
        self.total_lines_analyzed = total_lines;

        let fixable_count = findings.iter().filter(|f| f.fix.is_some()).count();
        LintReport {
            summary: LintSummary {
                total_files,
                total_lines_analyzed: total_lines,
                findings_count: findings.len(),
                fixable_count,
                parse_errors_count: parse_errors.len(),
            },
            findings,
            parse_errors,
        }
    }
}
