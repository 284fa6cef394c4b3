//! End-to-end tests for applying merges to files on disk.
#![allow(clippy::unwrap_used)]

use destructure_merge::analyzer::DestructureMerge;
use destructure_merge::commands::{run_fix, FixOptions};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn options(root: &Path, dry_run: bool) -> FixOptions {
    FixOptions {
        dry_run,
        verbose: false,
        analysis_root: root.to_path_buf(),
    }
}

fn analyzer(root: &Path) -> DestructureMerge {
    DestructureMerge::default().with_root(root.to_path_buf())
}

#[test]
fn test_fix_whole_directory() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("src");
    fs::create_dir(&src).unwrap();
    fs::write(
        src.join("routes.js"),
        "function handler(req, res) {\n  const { id } = req.params;\n  const { page } = req.query;\n  const { limit } = req.query;\n  res.send(id, page, limit);\n}\n",
    )
    .unwrap();
    fs::write(
        src.join("view.ts"),
        "export function render(props: Props) {\n  let { title } = props\n  let { body } = props\n  return title + body\n}\n",
    )
    .unwrap();

    let report = analyzer(dir.path()).analyze_paths(&[dir.path().to_path_buf()]);
    assert_eq!(report.summary.total_files, 2);
    assert_eq!(report.summary.findings_count, 2);
    assert_eq!(report.summary.fixable_count, 2);

    let mut out = Vec::new();
    let results = run_fix(&report, &options(dir.path(), false), &mut out).unwrap();
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.merges_applied == 1));

    assert_eq!(
        fs::read_to_string(src.join("routes.js")).unwrap(),
        "function handler(req, res) {\n  const { params: { id }, query: { page, limit } } = req;\n  res.send(id, page, limit);\n}\n"
    );
    assert_eq!(
        fs::read_to_string(src.join("view.ts")).unwrap(),
        "export function render(props: Props) {\n  let { title, body } = props\n  return title + body\n}\n"
    );
}

#[test]
fn test_second_run_finds_nothing() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("a.js");
    fs::write(
        &file,
        "const { a } = req;\nconst { b } = req.body;\nconst { c } = req.body;\n",
    )
    .unwrap();

    let report = analyzer(dir.path()).analyze_paths(&[dir.path().to_path_buf()]);
    run_fix(&report, &options(dir.path(), false), Vec::new()).unwrap();
    let fixed = fs::read_to_string(&file).unwrap();
    assert_eq!(fixed, "const { a, body: { b, c } } = req;\n");

    let again = analyzer(dir.path()).analyze_paths(&[dir.path().to_path_buf()]);
    assert!(!again.has_findings());
    let results = run_fix(&again, &options(dir.path(), false), Vec::new()).unwrap();
    assert!(results.is_empty());
    assert_eq!(fs::read_to_string(&file).unwrap(), fixed);
}

#[test]
fn test_dry_run_leaves_files_alone() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("a.js");
    let original = "var { x } = opts;\nvar { y } = opts;\n";
    fs::write(&file, original).unwrap();

    let report = analyzer(dir.path()).analyze_paths(&[dir.path().to_path_buf()]);
    let mut out = Vec::new();
    let results = run_fix(&report, &options(dir.path(), true), &mut out).unwrap();

    assert!(results.is_empty());
    assert_eq!(fs::read_to_string(&file).unwrap(), original);
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Would merge lines 1-2"));
    assert!(text.contains("var { x, y } = opts;"));
}

#[test]
fn test_broken_file_is_reported_and_untouched() {
    let dir = TempDir::new().unwrap();
    let broken = dir.path().join("broken.js");
    let good = dir.path().join("good.js");
    let broken_text = "const { a } = req;\nconst { b } = req;\nfunction (\n";
    fs::write(&broken, broken_text).unwrap();
    fs::write(&good, "const { a } = req;\nconst { b } = req;\n").unwrap();

    let report = analyzer(dir.path()).analyze_paths(&[dir.path().to_path_buf()]);
    assert_eq!(report.summary.parse_errors_count, 1);
    assert!(report.parse_errors[0].file.ends_with("broken.js"));
    assert_eq!(report.summary.findings_count, 1);

    run_fix(&report, &options(dir.path(), false), Vec::new()).unwrap();
    assert_eq!(fs::read_to_string(&broken).unwrap(), broken_text);
    assert_eq!(
        fs::read_to_string(&good).unwrap(),
        "const { a, b } = req;\n"
    );
}

#[test]
fn test_excluded_folders_are_not_touched() {
    let dir = TempDir::new().unwrap();
    let vendor = dir.path().join("node_modules");
    fs::create_dir(&vendor).unwrap();
    let source = "const { a } = req;\nconst { b } = req;\n";
    fs::write(vendor.join("lib.js"), source).unwrap();
    fs::write(dir.path().join("app.js"), source).unwrap();

    let report = analyzer(dir.path()).analyze_paths(&[dir.path().to_path_buf()]);
    assert_eq!(report.summary.total_files, 1);
    run_fix(&report, &options(dir.path(), false), Vec::new()).unwrap();
    assert_eq!(fs::read_to_string(vendor.join("lib.js")).unwrap(), source);
}

#[test]
fn test_typescript_can_be_disabled() {
    let dir = TempDir::new().unwrap();
    let source = "const { a } = req;\nconst { b } = req;\n";
    fs::write(dir.path().join("a.ts"), source).unwrap();
    fs::write(dir.path().join("b.js"), source).unwrap();

    let report = analyzer(dir.path())
        .with_typescript(false)
        .analyze_paths(&[dir.path().to_path_buf()]);
    assert_eq!(report.summary.total_files, 1);
    assert!(report.findings[0].file.ends_with("b.js"));
}
