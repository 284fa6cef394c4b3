//! Destructuring merge fix command.

use crate::analyzer::LintReport;
use crate::cst::Dialect;
use crate::fix::{ByteRangeRewriter, Edit};
use crate::rules::Finding;
use crate::utils::{normalize_display_path, validate_output_path};

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Options for the fix command
#[derive(Debug, Default)]
pub struct FixOptions {
    /// Dry-run mode (show what would change)
    pub dry_run: bool,
    /// Verbose output
    pub verbose: bool,
    /// Analysis root for path containment
    pub analysis_root: PathBuf,
}

/// Result of fixing one file
#[derive(Debug, Serialize)]
pub struct FixResult {
    /// File that was fixed
    pub file: String,
    /// Number of runs merged
    pub merges_applied: usize,
    /// Declarations written in place of each run
    pub replacements: Vec<String>,
}

/// Apply the fixes carried by a report's findings.
///
/// Each file is rewritten once with all of its edits. A file whose
/// rewritten text no longer parses is left untouched.
///
/// # Errors
///
/// Returns an error if writing to `writer` fails or a file escapes the root.
pub fn run_fix<W: Write>(
    report: &LintReport,
    options: &FixOptions,
    mut writer: W,
) -> Result<Vec<FixResult>> {
    if options.dry_run {
        writeln!(
            writer,
            "\n{}",
            "[DRY-RUN] Declarations that would be merged:".yellow()
        )?;
    } else {
        writeln!(writer, "\n{}", "Applying destructuring merges...".cyan())?;
    }

    let by_file = report.findings_by_file();
    if by_file.values().all(|findings| findings.iter().all(|f| f.fix.is_none())) {
        writeln!(writer, "  No mergeable declarations to fix.")?;
        return Ok(vec![]);
    }

    if options.verbose {
        writeln!(writer, "[VERBOSE] Fix Statistics:")?;
        writeln!(writer, "   Files to modify: {}", by_file.len())?;
        writeln!(writer, "   Runs to merge: {}", report.summary.fixable_count)?;
        writeln!(writer)?;
    }

    let mut all_results = Vec::new();
    for (file_path, findings) in by_file {
        if let Some(result) = apply_fixes_to_file(&mut writer, file_path, &findings, options)? {
            all_results.push(result);
        }
    }

    Ok(all_results)
}

fn apply_fixes_to_file<W: Write>(
    writer: &mut W,
    file_path: &Path,
    findings: &[&Finding],
    options: &FixOptions,
) -> Result<Option<FixResult>> {
    let edits: Vec<&Edit> = findings.iter().filter_map(|f| f.fix.as_ref()).collect();
    if edits.is_empty() {
        return Ok(None);
    }

    let shown = normalize_display_path(file_path);

    if options.dry_run {
        for finding in findings {
            if let Some(fix) = &finding.fix {
                writeln!(
                    writer,
                    "  Would merge lines {}-{} of {}: {}",
                    finding.line, finding.end_line, shown, fix.replacement
                )?;
            }
        }
        return Ok(None);
    }

    let absolute = std::path::absolute(file_path)?;
    let file_path = validate_output_path(&absolute, Some(&options.analysis_root))?;

    let content = match fs::read_to_string(&file_path) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!(path = %shown, error = %e, "cannot read file to fix");
            writeln!(writer, "  {} {}: {}", "Skip:".yellow(), shown, e)?;
            return Ok(None);
        }
    };

    let dialect = Dialect::from_path(&file_path).unwrap_or(Dialect::JavaScript);
    let mut rewriter = ByteRangeRewriter::new(content);
    rewriter.add_edits(edits.iter().map(|edit| (*edit).clone()));

    match rewriter.apply_verified(dialect) {
        Ok(fixed) => {
            fs::write(&file_path, fixed)?;
            let replacements: Vec<String> =
                edits.iter().map(|edit| edit.replacement.clone()).collect();
            writeln!(
                writer,
                "  {} {} ({} merged)",
                "Fixed:".green(),
                shown,
                replacements.len()
            )?;
            Ok(Some(FixResult {
                file: shown,
                merges_applied: replacements.len(),
                replacements,
            }))
        }
        Err(e) => {
            tracing::warn!(path = %shown, error = %e, "refusing to write fix");
            writeln!(writer, "  {} {}: {}", "Skip:".yellow(), shown, e)?;
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::DestructureMerge;
    use tempfile::TempDir;

    fn lint_dir(dir: &Path) -> LintReport {
        DestructureMerge::default().analyze_paths(&[dir.to_path_buf()])
    }

    fn options(root: &Path, dry_run: bool) -> FixOptions {
        FixOptions {
            dry_run,
            verbose: false,
            analysis_root: root.to_path_buf(),
        }
    }

    #[test]
    fn test_fix_rewrites_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("handler.js");
        fs::write(
            &file,
            "function handle(req) {\n  const { a } = req;\n  const { b } = req.cookies;\n  const { c } = req.cookies;\n  return [a, b, c];\n}\n",
        )
        .unwrap();

        let report = lint_dir(dir.path());
        let mut buffer = Vec::new();
        let results = run_fix(&report, &options(dir.path(), false), &mut buffer).unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].merges_applied, 1);
        assert_eq!(
            fs::read_to_string(&file).unwrap(),
            "function handle(req) {\n  const { a, cookies: { b, c } } = req;\n  return [a, b, c];\n}\n"
        );
    }

    #[test]
    fn test_dry_run_leaves_file_untouched() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a.js");
        let source = "let { x } = req.query\nlet { y } = req.query\n";
        fs::write(&file, source).unwrap();

        let report = lint_dir(dir.path());
        let mut buffer = Vec::new();
        let results = run_fix(&report, &options(dir.path(), true), &mut buffer).unwrap();

        assert!(results.is_empty());
        assert_eq!(fs::read_to_string(&file).unwrap(), source);
        let output = String::from_utf8(buffer).unwrap();
        assert!(output.contains("Would merge lines 1-2"));
        assert!(output.contains("let { x, y } = req.query"));
    }

    #[test]
    fn test_multiple_runs_in_one_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a.mjs");
        fs::write(
            &file,
            "const { a } = x;\nconst { b } = x;\nrun();\nvar { c } = y.z;\nvar { d } = y.z;\n",
        )
        .unwrap();

        let report = lint_dir(dir.path());
        let results = run_fix(&report, &options(dir.path(), false), Vec::new()).unwrap();

        assert_eq!(results[0].merges_applied, 2);
        assert_eq!(
            fs::read_to_string(&file).unwrap(),
            "const { a, b } = x;\nrun();\nvar { c, d } = y.z;\n"
        );
    }

    #[test]
    fn test_unparsable_result_is_skipped() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a.js");
        let source = "const { a } = req;\nconst { b } = req;\n";
        fs::write(&file, source).unwrap();

        let mut report = lint_dir(dir.path());
        if let Some(fix) = report.findings[0].fix.as_mut() {
            fix.replacement = "const { a, b = req;".to_owned();
        }
        let mut buffer = Vec::new();
        let results = run_fix(&report, &options(dir.path(), false), &mut buffer).unwrap();

        assert!(results.is_empty());
        assert_eq!(fs::read_to_string(&file).unwrap(), source);
        assert!(String::from_utf8(buffer).unwrap().contains("a.js"));
    }

    #[test]
    fn test_unreadable_file_is_skipped() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a.js");
        fs::write(&file, "const { a } = req;\nconst { b } = req;\n").unwrap();

        let report = lint_dir(dir.path());
        fs::remove_file(&file).unwrap();
        let mut buffer = Vec::new();
        let results = run_fix(&report, &options(dir.path(), false), &mut buffer).unwrap();

        assert!(results.is_empty());
        assert!(!file.exists());
        assert!(String::from_utf8(buffer).unwrap().contains("a.js"));
    }

    #[test]
    fn test_no_findings() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.js"), "const { a } = req;\n").unwrap();

        let report = lint_dir(dir.path());
        let mut buffer = Vec::new();
        let results = run_fix(&report, &options(dir.path(), false), &mut buffer).unwrap();
        assert!(results.is_empty());
        assert!(String::from_utf8(buffer)
            .unwrap()
            .contains("No mergeable declarations to fix."));
    }
}
