use rustc_hash::FxHashSet;
use std::sync::OnceLock;

/// Dedicated configuration file name.
pub const CONFIG_FILENAME: &str = ".destructure-merge.toml";

/// Table name inside [`CONFIG_FILENAME`].
pub const CONFIG_TABLE: &str = "destructure-merge";

/// Package manifest that may carry a configuration object.
pub const PACKAGE_JSON_FILENAME: &str = "package.json";

/// Key of the configuration object inside `package.json`.
pub const PACKAGE_JSON_KEY: &str = "destructureMerge";

/// Environment variable holding a `tracing` filter directive.
pub const LOG_ENV_VAR: &str = "DESTRUCTURE_MERGE_LOG";

/// JavaScript source extensions.
pub const JS_EXTENSIONS: &[&str] = &["js", "mjs", "cjs", "jsx"];

/// TypeScript source extensions.
pub const TS_EXTENSIONS: &[&str] = &["ts", "mts", "cts", "tsx"];

/// Folders excluded by default from directory walks.
pub fn get_default_exclude_folders() -> &'static FxHashSet<&'static str> {
    static SET: OnceLock<FxHashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| {
        let mut s = FxHashSet::default();
        s.insert("node_modules");
        s.insert("dist");
        s.insert("build");
        s.insert("out");
        s.insert("coverage");
        s.insert(".git");
        s.insert(".next");
        s.insert(".nuxt");
        s.insert(".cache");
        s.insert(".turbo");
        s.insert("bower_components");
        s.insert("target");
        s
    })
}

pub use get_default_exclude_folders as DEFAULT_EXCLUDE_FOLDERS;
