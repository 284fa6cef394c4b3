//! Path utilities for destructure-merge.
//!
//! This module consolidates all path-related logic for:
//! - Cross-platform path normalization
//! - Path traversal validation
//! - JavaScript/TypeScript file discovery with gitignore support

use crate::constants::{DEFAULT_EXCLUDE_FOLDERS, JS_EXTENSIONS, TS_EXTENSIONS};
use std::path::{Component, Path, PathBuf};

/// Normalizes a path for CLI display.
///
/// - Converts backslashes to forward slashes (for cross-platform consistency)
/// - Strips leading "./" or ".\" prefix (for cleaner output)
///
/// # Examples
/// ```
/// use std::path::Path;
/// use destructure_merge::utils::normalize_display_path;
///
/// assert_eq!(normalize_display_path(Path::new(".\\src\\index.js")), "src/index.js");
/// assert_eq!(normalize_display_path(Path::new("./lib/app.ts")), "lib/app.ts");
/// ```
#[must_use]
pub fn normalize_display_path(path: &Path) -> String {
    let s = path.to_string_lossy();
    // Strip Windows extended path prefix if present
    let clean = s.trim_start_matches(r"\\?\");
    let normalized = clean.replace('\\', "/");
    normalized
        .strip_prefix("./")
        .unwrap_or(&normalized)
        .to_owned()
}

/// Checks if a name matches any exclusion pattern.
/// Supports exact matching and wildcard patterns starting with `*.`.
#[must_use]
pub fn is_excluded(name: &str, excludes: &[String]) -> bool {
    excludes.iter().any(|exclude| match exclude.strip_prefix('*') {
        Some(suffix) if suffix.starts_with('.') => name.ends_with(suffix),
        _ => name == exclude,
    })
}

/// Whether `path` has a JavaScript extension, or a TypeScript one when
/// `include_typescript` is set.
#[must_use]
pub fn is_source_file(path: &Path, include_typescript: bool) -> bool {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return false;
    };
    JS_EXTENSIONS.contains(&ext) || (include_typescript && TS_EXTENSIONS.contains(&ext))
}

/// Validates that an output path doesn't escape via traversal.
///
/// When `root` is `Some`, uses that as the containment boundary.
/// When `root` is `None`, falls back to the current working directory.
///
/// The longest existing ancestor is canonicalized to resolve symlinks,
/// and the remaining components must not contain `..`.
///
/// # Errors
///
/// Returns an error if:
/// - The root directory cannot be determined or resolved.
/// - The path traverses outside the allowed root.
/// - The path contains `..` components in the non-existent portion.
pub fn validate_output_path(path: &Path, root: Option<&Path>) -> anyhow::Result<PathBuf> {
    let current_dir = std::env::current_dir()?;
    let root_dir = root.unwrap_or(&current_dir);
    let canonical_root = root_dir.canonicalize().map_err(|e| {
        anyhow::anyhow!(
            "Failed to canonicalize root directory {}: {}",
            root_dir.display(),
            e
        )
    })?;

    let absolute_path = if path.is_absolute() {
        path.to_path_buf()
    } else {
        canonical_root.join(path)
    };

    let mut ancestor = absolute_path.as_path();
    while !ancestor.exists() {
        match ancestor.parent() {
            Some(p) => ancestor = p,
            None => break,
        }
    }

    let canonical_ancestor = ancestor.canonicalize().map_err(|e| {
        anyhow::anyhow!(
            "Failed to canonicalize ancestor path {}: {}",
            ancestor.display(),
            e
        )
    })?;

    if !canonical_ancestor.starts_with(&canonical_root) {
        let clean_path = canonical_ancestor
            .to_string_lossy()
            .trim_start_matches(r"\\?\")
            .to_owned();
        let clean_root = canonical_root
            .to_string_lossy()
            .trim_start_matches(r"\\?\")
            .to_owned();

        anyhow::bail!(
            "Output path '{clean_path}' is outside the analysis root '{clean_root}'.\n\
             Hint: Pass --root with a directory that contains the files to fix."
        );
    }

    // `canonicalize` cannot see through components that do not exist yet.
    if let Ok(remainder) = absolute_path.strip_prefix(ancestor) {
        if remainder
            .components()
            .any(|component| matches!(component, Component::ParentDir))
        {
            anyhow::bail!(
                "Security Error: Path contains '..' in non-existent portion: '{}'",
                path.display()
            );
        }
    }

    Ok(absolute_path)
}

/// Collects JavaScript and TypeScript files from a directory with gitignore support.
///
/// Uses the `ignore` crate to respect .gitignore, .git/info/exclude, and global gitignore
/// in addition to the default exclusions (`node_modules`, `dist`, `build`, ...).
///
/// # Arguments
/// * `root` - Root directory to search
/// * `exclude` - Additional user-specified exclusion patterns
/// * `include` - Folders to force-include (overrides excludes)
/// * `include_typescript` - Whether to include `.ts`/`.tsx` files
///
/// # Returns
/// Tuple of (sorted source files found, directory count)
#[must_use]
pub fn collect_source_files(
    root: &Path,
    exclude: &[String],
    include: &[String],
    include_typescript: bool,
) -> (Vec<PathBuf>, usize) {
    use ignore::WalkBuilder;

    let default_excludes = DEFAULT_EXCLUDE_FOLDERS().iter().map(|&s| s.to_owned());
    let mut all_excludes: Vec<String> = exclude.iter().cloned().chain(default_excludes).collect();
    all_excludes.retain(|ex| !include.iter().any(|inc| ex == inc));

    let root_for_filter = root.to_path_buf();

    // Excluded directories are pruned at traversal time so the walker
    // never descends into `node_modules` and friends.
    let walker = WalkBuilder::new(root)
        .hidden(false)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .filter_entry(move |entry| {
            if entry.path() == root_for_filter {
                return true;
            }
            if !entry.file_type().is_some_and(|ft| ft.is_dir()) {
                return true;
            }
            entry
                .file_name()
                .to_str()
                .is_none_or(|name| !is_excluded(name, &all_excludes))
        })
        .build();

    let mut files = Vec::new();
    let mut dir_count = 0;

    for result in walker {
        match result {
            Ok(entry) => {
                let path = entry.path();
                if entry.file_type().is_some_and(|ft| ft.is_dir()) {
                    if path != root {
                        dir_count += 1;
                    }
                    continue;
                }
                if is_source_file(path, include_typescript) {
                    files.push(path.to_path_buf());
                }
            }
            Err(e) => tracing::warn!(error = %e, "walk error"),
        }
    }

    files.sort();
    (files, dir_count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_validate_output_path_with_root() -> anyhow::Result<()> {
        let temp = tempdir()?;
        let root = temp.path();
        fs::create_dir_all(root.join("src"))?;
        fs::write(root.join("src/index.js"), "")?;

        assert!(validate_output_path(&root.join("src/index.js"), Some(root)).is_ok());
        assert!(validate_output_path(Path::new("src/new.js"), Some(root)).is_ok());
        assert!(validate_output_path(Path::new("../outside.js"), Some(root)).is_err());
        assert!(validate_output_path(Path::new("src/../../escape.js"), Some(root)).is_err());
        assert!(validate_output_path(Path::new("missing/../../x.js"), Some(root)).is_err());

        Ok(())
    }

    #[test]
    fn test_is_excluded_patterns() {
        let excludes = vec!["vendor".to_owned(), "*.min.js".to_owned()];
        assert!(is_excluded("vendor", &excludes));
        assert!(is_excluded("app.min.js", &excludes));
        assert!(!is_excluded("vendors", &excludes));
        assert!(!is_excluded("app.js", &excludes));
    }

    #[test]
    fn test_is_source_file() {
        assert!(is_source_file(Path::new("a/b.js"), false));
        assert!(is_source_file(Path::new("a/b.mjs"), false));
        assert!(is_source_file(Path::new("a/b.jsx"), false));
        assert!(!is_source_file(Path::new("a/b.ts"), false));
        assert!(is_source_file(Path::new("a/b.ts"), true));
        assert!(is_source_file(Path::new("a/b.tsx"), true));
        assert!(!is_source_file(Path::new("a/b.json"), true));
        assert!(!is_source_file(Path::new("Makefile"), true));
    }

    #[test]
    fn test_collect_source_files_exclusion() -> anyhow::Result<()> {
        let temp = tempdir()?;
        let root = temp.path();

        fs::write(root.join("index.js"), "// main")?;
        fs::write(root.join("app.ts"), "// app")?;
        fs::write(root.join("README.md"), "# readme")?;

        fs::create_dir_all(root.join("node_modules/pkg"))?;
        fs::write(root.join("node_modules/pkg/index.js"), "// dep")?;

        fs::create_dir_all(root.join("dist"))?;
        fs::write(root.join("dist/bundle.js"), "// built")?;

        fs::create_dir_all(root.join("src"))?;
        fs::write(root.join("src/module.mjs"), "// module")?;

        let (files, _) = collect_source_files(root, &[], &[], true);
        let file_names: Vec<_> = files
            .iter()
            .filter_map(|p| p.file_name())
            .filter_map(|f| f.to_str())
            .collect();

        assert_eq!(file_names.len(), 3);
        assert!(file_names.contains(&"index.js"));
        assert!(file_names.contains(&"app.ts"));
        assert!(file_names.contains(&"module.mjs"));
        assert!(!file_names.contains(&"bundle.js"));

        let (files, _) = collect_source_files(root, &[], &[], false);
        assert_eq!(files.len(), 2);

        Ok(())
    }

    #[test]
    fn test_collect_source_files_force_include() -> anyhow::Result<()> {
        let temp = tempdir()?;
        let root = temp.path();

        fs::create_dir_all(root.join("build"))?;
        fs::write(root.join("build/config.js"), "// build script")?;

        let (files, _) = collect_source_files(root, &[], &[], true);
        assert!(files.is_empty());

        let (files, _) = collect_source_files(root, &[], &["build".to_owned()], true);
        assert_eq!(files.len(), 1);

        Ok(())
    }

    #[test]
    fn test_collect_source_files_user_exclude() -> anyhow::Result<()> {
        let temp = tempdir()?;
        let root = temp.path();

        fs::create_dir_all(root.join("vendor"))?;
        fs::write(root.join("vendor/lib.js"), "")?;
        fs::write(root.join("main.js"), "")?;

        let (files, dirs) = collect_source_files(root, &["vendor".to_owned()], &[], true);
        assert_eq!(files, vec![root.join("main.js")]);
        assert_eq!(dirs, 0);

        Ok(())
    }
}
