use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{CONFIG_FILENAME, PACKAGE_JSON_FILENAME, PACKAGE_JSON_KEY};
use crate::syntax::DeclarationKind;

#[derive(Debug, Deserialize, Default, Clone)]
/// Top-level configuration struct.
pub struct Config {
    #[serde(default, rename = "destructure-merge")]
    /// The main configuration section.
    pub destructure_merge: DestructureMergeConfig,
    /// The path to the configuration file this was loaded from.
    /// Set during `load_from_path`, `None` if using defaults or programmatic config.
    #[serde(skip)]
    pub config_file_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Default, Clone)]
/// Configuration options for destructure-merge.
pub struct DestructureMergeConfig {
    /// Declaration kinds whose runs are merged. All kinds when unset.
    pub kinds: Option<Vec<DeclarationKind>>,
    /// List of folders to exclude.
    pub exclude_folders: Option<Vec<String>>,
    /// List of folders to include.
    pub include_folders: Option<Vec<String>>,
    /// Whether to scan TypeScript files.
    pub typescript: Option<bool>,
    /// Exit with status 1 when findings are reported.
    pub fail_on_findings: Option<bool>,
    /// List of rule codes or names to ignore.
    pub ignore: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Clone)]
struct PackageJson {
    #[serde(rename = "destructureMerge")]
    destructure_merge: DestructureMergeConfig,
}

impl Config {
    /// Loads configuration from default locations (current dir and up).
    #[must_use]
    pub fn load() -> Self {
        Self::load_from_path(Path::new("."))
    }

    /// Loads configuration starting from a specific path and traversing up.
    ///
    /// A `.destructure-merge.toml` wins over a `package.json` in the same
    /// directory. Files that fail to parse are skipped with a warning.
    #[must_use]
    pub fn load_from_path(path: &Path) -> Self {
        let mut current = path.to_path_buf();
        if current.is_file() {
            current.pop();
        }

        loop {
            let toml_path = current.join(CONFIG_FILENAME);
            if toml_path.exists() {
                match fs::read_to_string(&toml_path).map(|c| toml::from_str::<Config>(&c)) {
                    Ok(Ok(mut config)) => {
                        config.config_file_path = Some(toml_path);
                        return config;
                    }
                    Ok(Err(e)) => {
                        tracing::warn!(path = %toml_path.display(), error = %e, "ignoring invalid config file");
                    }
                    Err(e) => {
                        tracing::warn!(path = %toml_path.display(), error = %e, "cannot read config file");
                    }
                }
            }

            let package_json = current.join(PACKAGE_JSON_FILENAME);
            if package_json.exists() {
                if let Some(config) = Self::from_package_json(&package_json) {
                    return config;
                }
            }

            if !current.pop() {
                break;
            }
        }

        Config::default()
    }

    /// A `package.json` only counts when it has a configuration object.
    fn from_package_json(path: &Path) -> Option<Self> {
        let content = fs::read_to_string(path).ok()?;
        let value: serde_json::Value = serde_json::from_str(&content).ok()?;
        value.get(PACKAGE_JSON_KEY)?;
        match serde_json::from_value::<PackageJson>(value) {
            Ok(package) => Some(Config {
                destructure_merge: package.destructure_merge,
                config_file_path: Some(path.to_path_buf()),
            }),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring invalid package.json configuration");
                None
            }
        }
    }

    /// Declaration kinds the rule may merge.
    #[must_use]
    pub fn enabled_kinds(&self) -> Vec<DeclarationKind> {
        self.destructure_merge
            .kinds
            .clone()
            .unwrap_or_else(|| DeclarationKind::ALL.to_vec())
    }

    /// Whether TypeScript files are scanned.
    #[must_use]
    pub fn include_typescript(&self) -> bool {
        self.destructure_merge.typescript.unwrap_or(true)
    }

    /// Whether a rule is switched off by id or by name.
    #[must_use]
    pub fn is_rule_ignored(&self, code: &str, name: &str) -> bool {
        self.destructure_merge
            .ignore
            .as_deref()
            .unwrap_or_default()
            .iter()
            .any(|entry| entry.eq_ignore_ascii_case(code) || entry == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_load_from_path_no_config() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from_path(dir.path());
        assert!(config.config_file_path.is_none());
        assert_eq!(config.enabled_kinds(), DeclarationKind::ALL.to_vec());
        assert!(config.include_typescript());
    }

    #[test]
    fn test_load_from_path_toml() {
        let dir = TempDir::new().unwrap();
        let mut file = std::fs::File::create(dir.path().join(CONFIG_FILENAME)).unwrap();
        writeln!(
            file,
            r#"[destructure-merge]
kinds = ["const", "let"]
typescript = false
exclude_folders = ["vendor"]
"#
        )
        .unwrap();

        let config = Config::load_from_path(dir.path());
        assert_eq!(
            config.enabled_kinds(),
            vec![DeclarationKind::Const, DeclarationKind::Let]
        );
        assert!(!config.include_typescript());
        assert_eq!(
            config.destructure_merge.exclude_folders,
            Some(vec!["vendor".to_owned()])
        );
        assert_eq!(
            config.config_file_path,
            Some(dir.path().join(CONFIG_FILENAME))
        );
    }

    #[test]
    fn test_load_from_path_package_json() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("package.json"),
            r#"{ "name": "app", "destructureMerge": { "kinds": ["var"], "fail_on_findings": true } }"#,
        )
        .unwrap();

        let config = Config::load_from_path(dir.path());
        assert_eq!(config.enabled_kinds(), vec![DeclarationKind::Var]);
        assert_eq!(config.destructure_merge.fail_on_findings, Some(true));
    }

    #[test]
    fn test_package_json_without_section_keeps_walking() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("packages").join("web");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(nested.join("package.json"), r#"{ "name": "web" }"#).unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILENAME),
            "[destructure-merge]\nkinds = [\"let\"]\n",
        )
        .unwrap();

        let config = Config::load_from_path(&nested);
        assert_eq!(config.enabled_kinds(), vec![DeclarationKind::Let]);
    }

    #[test]
    fn test_load_from_path_traverses_up() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("src").join("lib");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILENAME),
            "[destructure-merge]\nignore = [\"DSM-001\"]\n",
        )
        .unwrap();

        let config = Config::load_from_path(&nested);
        assert!(config.is_rule_ignored("DSM-001", "destructuring-merge"));
    }

    #[test]
    fn test_load_from_file_path() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILENAME),
            "[destructure-merge]\ntypescript = false\n",
        )
        .unwrap();
        let js_file = dir.path().join("index.js");
        std::fs::write(&js_file, "const x = 1;").unwrap();

        let config = Config::load_from_path(&js_file);
        assert!(!config.include_typescript());
    }

    #[test]
    fn test_invalid_toml_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILENAME),
            "[destructure-merge]\nkinds = [\"function\"]\n",
        )
        .unwrap();

        let config = Config::load_from_path(dir.path());
        assert!(config.config_file_path.is_none());
        assert_eq!(config.enabled_kinds(), DeclarationKind::ALL.to_vec());
    }

    #[test]
    fn test_rule_ignored_by_name() {
        let mut config = Config::default();
        config.destructure_merge.ignore = Some(vec!["destructuring-merge".to_owned()]);
        assert!(config.is_rule_ignored("DSM-001", "destructuring-merge"));
        config.destructure_merge.ignore = Some(vec!["dsm-001".to_owned()]);
        assert!(config.is_rule_ignored("DSM-001", "destructuring-merge"));
    }
}
