use crate::syntax::DeclarationKind;
use clap::{Args, Parser};
use std::path::PathBuf;

/// Help text for configuration file options, shown at the bottom of --help.
const CONFIG_HELP: &str = "\
CONFIGURATION FILE (.destructure-merge.toml):
  Create this file in your project root to set defaults.

  [destructure-merge]
  kinds = [\"const\", \"let\", \"var\"]  # Declaration kinds to merge
  typescript = true                # Scan .ts/.tsx files
  ignore = []                      # Rule ids or names to switch off

  # Path filters
  exclude_folders = [\"vendor\"]
  include_folders = [\"build\"]      # Force-include these

  # CI/CD
  fail_on_findings = false         # Exit 1 when merges are possible

  The same keys may be placed in package.json under \"destructureMerge\".
";

/// Options for output formatting and verbosity.
#[derive(Args, Debug, Default, Clone)]
#[allow(clippy::struct_excessive_bools)] // CLI flags are legitimately booleans
pub struct OutputOptions {
    /// Output raw JSON.
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output for debugging (shows files being analyzed).
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet mode: show only the summary (no detailed tables).
    #[arg(long)]
    pub quiet: bool,

    /// Exit with code 1 if any mergeable declarations are found.
    #[arg(long)]
    pub fail_on_findings: bool,
}

/// Shared path arguments (mutually exclusive paths/root).
#[derive(Args, Debug, Default, Clone)]
pub struct PathArgs {
    /// Paths to analyze (files or directories).
    /// When no paths are provided, defaults to the current directory.
    /// Cannot be used with --root.
    #[arg(conflicts_with = "root")]
    pub paths: Vec<PathBuf>,

    /// Project root for path containment and analysis.
    /// When specified, this path is used as both the analysis target AND the
    /// containment boundary for rewritten files.
    #[arg(long, conflicts_with = "paths")]
    pub root: Option<PathBuf>,
}

/// Options for rewriting files.
#[derive(Args, Debug, Default, Clone)]
pub struct FixArgs {
    /// Rewrite files, merging every reported run.
    #[arg(long)]
    pub fix: bool,

    /// With --fix, print the merges instead of writing them.
    #[arg(long, requires = "fix")]
    pub dry_run: bool,
}

fn parse_kind(value: &str) -> Result<DeclarationKind, String> {
    DeclarationKind::from_keyword(value.trim())
        .ok_or_else(|| format!("unknown declaration kind '{value}' (expected const, let or var)"))
}

/// Command line arguments for destructure-merge.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "destructure-merge - Merge consecutive object destructuring declarations in JavaScript and TypeScript",
    long_about = None,
    after_help = CONFIG_HELP
)]
pub struct Cli {
    /// Path options (paths vs root).
    #[command(flatten)]
    pub paths: PathArgs,

    /// Output options.
    #[command(flatten)]
    pub output: OutputOptions,

    /// Fix options.
    #[command(flatten)]
    pub fix: FixArgs,

    /// Declaration kinds to merge, comma separated.
    #[arg(long, value_delimiter = ',', value_parser = parse_kind)]
    pub kinds: Vec<DeclarationKind>,

    /// Folders to exclude from analysis.
    #[arg(long, alias = "exclude-folder")]
    pub exclude_folders: Vec<String>,

    /// Folders to force-include in analysis (overrides default exclusions).
    #[arg(long, alias = "include-folder")]
    pub include_folders: Vec<String>,

    /// Skip TypeScript files.
    #[arg(long)]
    pub no_typescript: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::try_parse_from(["destructure-merge"]).unwrap();
        assert!(cli.paths.paths.is_empty());
        assert!(!cli.fix.fix);
        assert!(cli.kinds.is_empty());
    }

    #[test]
    fn test_parse_kinds_and_flags() {
        let cli = Cli::try_parse_from([
            "destructure-merge",
            "src",
            "--kinds",
            "const,let",
            "--fix",
            "--dry-run",
            "--exclude-folder",
            "vendor",
            "--no-typescript",
            "--fail-on-findings",
        ])
        .unwrap();
        assert_eq!(cli.paths.paths, vec![PathBuf::from("src")]);
        assert_eq!(cli.kinds, vec![DeclarationKind::Const, DeclarationKind::Let]);
        assert!(cli.fix.dry_run);
        assert_eq!(cli.exclude_folders, vec!["vendor".to_owned()]);
        assert!(cli.no_typescript);
        assert!(cli.output.fail_on_findings);
    }

    #[test]
    fn test_rejects_unknown_kind() {
        assert!(Cli::try_parse_from(["destructure-merge", "--kinds", "function"]).is_err());
    }

    #[test]
    fn test_dry_run_requires_fix() {
        assert!(Cli::try_parse_from(["destructure-merge", "--dry-run"]).is_err());
    }

    #[test]
    fn test_paths_conflict_with_root() {
        assert!(Cli::try_parse_from(["destructure-merge", "src", "--root", "."]).is_err());
    }
}
