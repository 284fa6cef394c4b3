//! Destructure-merge analyzer module.
//!
//! This module contains the lint driver, broken down into:
//! - `types`: Result types (`LintReport`, `ParseError`, `LintSummary`)
//! - `builder`: Builder-style configuration methods
//! - `processing`: File discovery, per-file linting and aggregation

mod builder;
mod processing;
/// Result types and lint summaries.
pub mod types;

pub use types::{LintReport, LintSummary, ParseError};

use crate::config::Config;
use std::path::PathBuf;

/// The main analyzer struct.
/// Configuration options for a lint run are stored here.
#[derive(Debug, Clone)]
pub struct DestructureMerge {
    /// Folders to exclude from analysis.
    pub exclude_folders: Vec<String>,
    /// Folders to force-include in analysis (overrides default exclusions).
    pub include_folders: Vec<String>,
    /// Whether to include TypeScript files in the analysis.
    pub include_typescript: bool,
    /// Total number of files analyzed.
    pub total_files_analyzed: usize,
    /// Total number of lines analyzed.
    pub total_lines_analyzed: usize,
    /// Configuration object.
    pub config: Config,
    /// Analysis root for path containment and relative resolution.
    pub analysis_root: PathBuf,
}

impl Default for DestructureMerge {
    fn default() -> Self {
        Self {
            exclude_folders: Vec::new(),
            include_folders: Vec::new(),
            include_typescript: true,
            total_files_analyzed: 0,
            total_lines_analyzed: 0,
            config: Config::default(),
            analysis_root: PathBuf::from("."),
        }
    }
}
