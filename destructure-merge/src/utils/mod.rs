//! Utilities module for destructure-merge.
//!
//! Line mapping for findings and the path helpers used by the commands.

mod paths;

pub use paths::{
    collect_source_files, is_excluded, is_source_file, normalize_display_path,
    validate_output_path,
};

/// A utility struct to convert byte offsets to line numbers.
///
/// The CST works with byte offsets, but findings are reported
/// with line numbers which are more human-readable.
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Stores the byte index of the start of each line.
    line_starts: Vec<usize>,
}

impl LineIndex {
    /// Creates a new `LineIndex` by scanning the source code for newlines.
    /// Uses byte iteration since '\n' is always a single byte in UTF-8.
    #[must_use]
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, byte) in source.as_bytes().iter().enumerate() {
            if *byte == b'\n' {
                line_starts.push(i + 1);
            }
        }
        Self { line_starts }
    }

    /// Converts a byte offset to a 1-indexed line number.
    #[must_use]
    pub fn line_index(&self, offset: usize) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(line) => line + 1,
            Err(line) => line,
        }
    }

    /// Converts a byte offset to a 0-indexed byte column on its line.
    #[must_use]
    pub fn column_index(&self, offset: usize) -> usize {
        let line = self.line_index(offset);
        let line_start = self
            .line_starts
            .get(line.saturating_sub(1))
            .copied()
            .unwrap_or_default();
        offset.saturating_sub(line_start)
    }

    /// Number of lines in the source.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_and_column() {
        let source = "const { a } = req;\n  const { b } = req;\n";
        let index = LineIndex::new(source);
        assert_eq!(index.line_index(0), 1);
        assert_eq!(index.column_index(0), 0);
        let second = source.find("const { b }").unwrap();
        assert_eq!(index.line_index(second), 2);
        assert_eq!(index.column_index(second), 2);
        assert_eq!(index.line_count(), 3);
    }

    #[test]
    fn test_offset_at_line_start() {
        let index = LineIndex::new("a\nb\nc");
        assert_eq!(index.line_index(2), 2);
        assert_eq!(index.column_index(2), 0);
        assert_eq!(index.line_index(5), 3);
    }
}
