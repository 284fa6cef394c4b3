//! Builder-style methods for the analyzer.

use super::DestructureMerge;
use crate::config::Config;
use std::path::PathBuf;

impl DestructureMerge {
    /// Creates an analyzer from a loaded configuration.
    ///
    /// Folder lists and the TypeScript switch are taken from the
    /// configuration; CLI overrides are applied with the builder methods.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let section = &config.destructure_merge;
        Self {
            exclude_folders: section.exclude_folders.clone().unwrap_or_default(),
            include_folders: section.include_folders.clone().unwrap_or_default(),
            include_typescript: config.include_typescript(),
            config,
            ..Self::default()
        }
    }

    /// Builder-style method to set the analysis root.
    #[must_use]
    pub fn with_root(mut self, root: PathBuf) -> Self {
        self.analysis_root = root;
        self
    }

    /// Builder-style method to add excluded folders.
    #[must_use]
    pub fn with_excludes(mut self, folders: impl IntoIterator<Item = String>) -> Self {
        self.exclude_folders.extend(folders);
        self
    }

    /// Builder-style method to add force-included folders.
    #[must_use]
    pub fn with_includes(mut self, folders: impl IntoIterator<Item = String>) -> Self {
        self.include_folders.extend(folders);
        self
    }

    /// Builder-style method to switch TypeScript scanning.
    #[must_use]
    pub fn with_typescript(mut self, include: bool) -> Self {
        self.include_typescript = include;
        self
    }
}
