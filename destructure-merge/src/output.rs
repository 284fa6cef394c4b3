use crate::analyzer::{LintReport, LintSummary, ParseError};
use crate::rules::Finding;
use crate::utils::normalize_display_path;
use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use std::io::Write;

/// Print the exclusion list in styled format.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_exclusion_list(writer: &mut impl Write, folders: &[String]) -> std::io::Result<()> {
    if folders.is_empty() {
        let defaults = crate::constants::DEFAULT_EXCLUDE_FOLDERS();
        let mut sorted_defaults: Vec<&str> = defaults.iter().copied().collect();
        sorted_defaults.sort_unstable();
        writeln!(
            writer,
            "{} {}",
            "[OK] Using default exclusions only:".green(),
            sorted_defaults.join(", ").dimmed()
        )?;
    } else {
        writeln!(writer, "{} {}", "Excluding:".yellow().bold(), folders.join(", "))?;
    }
    Ok(())
}

/// Print the main header with box-drawing characters.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_header(writer: &mut impl Write) -> std::io::Result<()> {
    writeln!(writer)?;
    writeln!(
        writer,
        "{}",
        "╔════════════════════════════════════════╗".cyan()
    )?;
    writeln!(
        writer,
        "{}",
        "║  Destructuring Merge Results           ║".cyan().bold()
    )?;
    writeln!(
        writer,
        "{}",
        "╚════════════════════════════════════════╝".cyan()
    )?;
    writeln!(writer)?;
    Ok(())
}

/// Print summary with colored "pills".
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_summary_pills(writer: &mut impl Write, summary: &LintSummary) -> std::io::Result<()> {
    fn pill(label: &str, count: usize) -> String {
        if count == 0 {
            format!("{}: {}", label, count.to_string().green())
        } else {
            format!("{}: {}", label, count.to_string().red().bold())
        }
    }

    writeln!(
        writer,
        "{}  {}  {}",
        pill("Mergeable", summary.findings_count),
        pill("Fixable", summary.fixable_count),
        pill("Parse Errors", summary.parse_errors_count),
    )?;
    writeln!(writer)?;
    Ok(())
}

/// Print analysis statistics (files and lines processed).
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_analysis_stats(writer: &mut impl Write, summary: &LintSummary) -> std::io::Result<()> {
    writeln!(
        writer,
        "{}",
        format!(
            "Analyzed {} files ({} lines)",
            summary.total_files.to_string().bold(),
            summary.total_lines_analyzed.to_string().bold()
        )
        .dimmed()
    )?;
    writeln!(writer)?;
    Ok(())
}

fn create_table(headers: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers);
    table
}

fn get_severity_color(severity: &str) -> Color {
    match severity.to_uppercase().as_str() {
        "CRITICAL" | "HIGH" => Color::Red,
        "MEDIUM" => Color::Yellow,
        "LOW" => Color::Blue,
        _ => Color::White,
    }
}

/// Print a list of findings with their suggested replacement.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_findings(
    writer: &mut impl Write,
    title: &str,
    findings: &[Finding],
) -> std::io::Result<()> {
    if findings.is_empty() {
        return Ok(());
    }

    writeln!(writer, "\n{}", title.bold().underline())?;

    let mut table = create_table(vec!["Rule ID", "Location", "Suggestion", "Severity"]);

    for f in findings {
        let location = if f.end_line > f.line {
            format!("{}:{}-{}", normalize_display_path(&f.file), f.line, f.end_line)
        } else {
            format!("{}:{}", normalize_display_path(&f.file), f.line)
        };
        let suggestion = f
            .fix
            .as_ref()
            .map_or_else(|| f.message.clone(), |fix| fix.replacement.clone());

        table.add_row(vec![
            Cell::new(&f.rule_id).add_attribute(Attribute::Dim),
            Cell::new(location),
            Cell::new(suggestion).add_attribute(Attribute::Bold),
            Cell::new(&f.severity).fg(get_severity_color(&f.severity)),
        ]);
    }

    writeln!(writer, "{table}")?;
    Ok(())
}

/// Print files that could not be parsed.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_parse_errors(writer: &mut impl Write, errors: &[ParseError]) -> std::io::Result<()> {
    if errors.is_empty() {
        return Ok(());
    }

    writeln!(writer, "\n{}", "Parse Errors".bold().underline().red())?;

    let mut table = create_table(vec!["File", "Error"]);

    for e in errors {
        table.add_row(vec![
            Cell::new(normalize_display_path(&e.file)).add_attribute(Attribute::Bold),
            Cell::new(&e.error).fg(Color::Red),
        ]);
    }

    writeln!(writer, "{table}")?;
    Ok(())
}

/// Print the full report.
///
/// # Errors
///
/// Returns an error if writing to the writer fails.
pub fn print_report(writer: &mut impl Write, report: &LintReport) -> std::io::Result<()> {
    print_header(writer)?;

    if report.findings.is_empty() && report.parse_errors.is_empty() {
        writeln!(writer, "{}", "✓ All clean! No mergeable declarations found.".green())?;
        return Ok(());
    }

    print_findings(writer, "Mergeable Destructuring", &report.findings)?;
    print_parse_errors(writer, &report.parse_errors)?;

    // Summary is printed by entry_point after the detailed sections.
    Ok(())
}

/// Print a quiet report (no detailed tables) for CI/CD mode.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_report_quiet(writer: &mut impl Write, report: &LintReport) -> std::io::Result<()> {
    writeln!(writer)?;
    writeln!(
        writer,
        "[SUMMARY] {} mergeable runs in {} files, {} parse errors",
        report.summary.findings_count,
        report.findings_by_file().len(),
        report.summary.parse_errors_count
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::DestructureMerge;
    use std::path::Path;

    fn sample_report() -> LintReport {
        DestructureMerge::default().analyze_code(
            "const { a } = req;\nconst { b } = req;\n",
            Path::new("src/app.js"),
        )
    }

    #[test]
    fn test_print_report_lists_suggestion() {
        colored::control::set_override(false);
        let mut buffer = Vec::new();
        print_report(&mut buffer, &sample_report()).unwrap();
        let output = String::from_utf8(buffer).unwrap();
        assert!(output.contains("Mergeable Destructuring"));
        assert!(output.contains("DSM-001"));
        assert!(output.contains("src/app.js:1-2"));
        assert!(output.contains("const { a, b } = req;"));
    }

    #[test]
    fn test_print_report_clean() {
        colored::control::set_override(false);
        let report = DestructureMerge::default().analyze_code("const x = 1;\n", Path::new("a.js"));
        let mut buffer = Vec::new();
        print_report(&mut buffer, &report).unwrap();
        assert!(String::from_utf8(buffer).unwrap().contains("All clean"));
    }

    #[test]
    fn test_print_report_quiet() {
        let mut buffer = Vec::new();
        print_report_quiet(&mut buffer, &sample_report()).unwrap();
        let output = String::from_utf8(buffer).unwrap();
        assert!(output.contains("[SUMMARY] 1 mergeable runs in 1 files, 0 parse errors"));
    }
}
