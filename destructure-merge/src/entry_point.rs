use crate::analyzer::DestructureMerge;
use crate::cli::Cli;
use crate::config::Config;
use crate::constants::LOG_ENV_VAR;
use anyhow::Result;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the stderr `tracing` subscriber.
///
/// The filter comes from `DESTRUCTURE_MERGE_LOG`, then `RUST_LOG`, then
/// `debug` in verbose mode and `warn` otherwise. Later calls are no-ops.
fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

/// Runs the tool with the given arguments.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn run_with_args(args: Vec<String>) -> Result<i32> {
    run_with_args_to(args, &mut std::io::stdout())
}

/// Runs the tool with the given arguments, writing output to the specified writer.
///
/// This is the testable version of `run_with_args` that allows output capture.
///
/// # Errors
///
/// Returns an error if writing output fails or a fix cannot be written.
pub fn run_with_args_to<W: std::io::Write>(args: Vec<String>, writer: &mut W) -> Result<i32> {
    let mut program_args = vec!["destructure-merge".to_owned()];
    program_args.extend(args);
    let cli_var = match Cli::try_parse_from(program_args) {
        Ok(c) => c,
        Err(e) => match e.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                write!(writer, "{e}")?;
                writer.flush()?;
                return Ok(0);
            }
            _ => {
                eprint!("{e}");
                return Ok(1);
            }
        },
    };

    init_tracing(cli_var.output.verbose);

    let paths: Vec<PathBuf> = match &cli_var.paths.root {
        Some(root) => vec![root.clone()],
        None => cli_var.paths.paths.clone(),
    };
    for path in &paths {
        if !path.exists() {
            eprintln!(
                "Error: The file or directory '{}' does not exist.",
                path.display()
            );
            return Ok(1);
        }
    }

    // Rewritten files must stay inside this directory.
    let analysis_root = match (&cli_var.paths.root, paths.as_slice()) {
        (Some(root), _) => root.clone(),
        (None, [single]) if single.is_dir() => single.clone(),
        (None, [single]) => single
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map_or_else(std::env::current_dir, |parent| Ok(parent.to_path_buf()))?,
        _ => std::env::current_dir()?,
    };

    let config_path = paths.first().map_or(Path::new("."), PathBuf::as_path);
    let mut config = Config::load_from_path(config_path);
    if !cli_var.kinds.is_empty() {
        config.destructure_merge.kinds = Some(cli_var.kinds.clone());
    }

    let fail_on_findings =
        cli_var.output.fail_on_findings || config.destructure_merge.fail_on_findings.unwrap_or(false);

    let mut analyzer = DestructureMerge::new(config)
        .with_root(analysis_root.clone())
        .with_excludes(cli_var.exclude_folders.clone())
        .with_includes(cli_var.include_folders.clone());
    if cli_var.no_typescript {
        analyzer = analyzer.with_typescript(false);
    }

    if cli_var.output.verbose && !cli_var.output.json {
        eprintln!("[VERBOSE] destructure-merge v{}", env!("CARGO_PKG_VERSION"));
        eprintln!("[VERBOSE] Using {} threads", rayon::current_num_threads());
        if let Some(config_file) = &analyzer.config.config_file_path {
            eprintln!("[VERBOSE] Config: {}", config_file.display());
        }
        eprintln!("[VERBOSE] Kinds: {:?}", analyzer.config.enabled_kinds());
        eprintln!("[VERBOSE] Excludes: {:?}", analyzer.exclude_folders);
        eprintln!();
    }

    let report = analyzer.analyze_paths(&paths);

    if cli_var.output.json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&report)?)?;
    } else if cli_var.output.quiet {
        crate::output::print_report_quiet(writer, &report)?;
    } else {
        if cli_var.output.verbose {
            crate::output::print_exclusion_list(writer, &analyzer.exclude_folders)?;
        }
        crate::output::print_report(writer, &report)?;
        writeln!(writer)?;
        crate::output::print_summary_pills(writer, &report.summary)?;
        crate::output::print_analysis_stats(writer, &report.summary)?;
    }

    if cli_var.fix.fix {
        let fix_options = crate::commands::FixOptions {
            dry_run: cli_var.fix.dry_run,
            verbose: cli_var.output.verbose,
            analysis_root,
        };
        if cli_var.output.json {
            // Keep stdout valid JSON.
            crate::commands::run_fix(&report, &fix_options, std::io::sink())?;
        } else {
            crate::commands::run_fix(&report, &fix_options, &mut *writer)?;
        }
        return Ok(0);
    }

    if fail_on_findings && report.has_findings() {
        if !cli_var.output.json {
            eprintln!(
                "\n[GATE] Mergeable declarations: {} - FAILED",
                report.summary.findings_count
            );
        }
        return Ok(1);
    }

    Ok(0)
}
