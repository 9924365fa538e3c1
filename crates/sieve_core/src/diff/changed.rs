use std::collections::{BTreeMap, BTreeSet};

#[cfg(feature = "tracing")]
use tracing::debug;

use super::error::DiffError;
use super::parse::{FileDiff, parse_unified_diff};

/// Lines added by a diff, keyed by repository-relative path of the new file.
///
/// Only additions are recorded: removed lines have no position in the new
/// file and context lines were not touched. Files without any added line
/// (deletions, binary changes, renames, mode changes) have no entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangedLines {
    files: BTreeMap<String, BTreeSet<u32>>,
}

impl ChangedLines {
    /// Parses unified-diff text and indexes its added lines.
    ///
    /// Parse errors are returned unchanged; no partial index is produced.
    pub fn from_diff(text: &str) -> Result<Self, DiffError> {
        let files = parse_unified_diff(text)?;
        Ok(Self::from_files(&files))
    }

    /// Indexes the added lines of already parsed file diffs.
    #[must_use]
    pub fn from_files(files: &[FileDiff]) -> Self {
        let mut index = Self::default();

        for file in files {
            let Some(path) = file.new_path.as_deref() else {
                continue;
            };

            let mut added = file.added_lines().peekable();
            if added.peek().is_none() {
                continue;
            }

            index.files.entry(path.to_string()).or_default().extend(added);
        }

        #[cfg(feature = "tracing")]
        debug!(files = index.file_count(), lines = index.line_count(), "indexed changed lines");

        index
    }

    /// Returns `true` if `line` was added to `path` by the diff.
    #[must_use]
    pub fn contains(&self, path: &str, line: u32) -> bool {
        self.files.get(path).is_some_and(|lines| lines.contains(&line))
    }

    /// Returns the added lines for `path`, if the file gained any.
    #[must_use]
    pub fn lines(&self, path: &str) -> Option<&BTreeSet<u32>> {
        self.files.get(path)
    }

    /// Iterates over every changed file and its added lines, ordered by path.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<u32>)> {
        self.files.iter().map(|(path, lines)| (path.as_str(), lines))
    }

    /// Number of files with at least one added line.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Total number of added lines across all files.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.files.values().map(BTreeSet::len).sum()
    }

    /// Returns `true` if the diff added no lines at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl FromIterator<(String, u32)> for ChangedLines {
    fn from_iter<I: IntoIterator<Item = (String, u32)>>(iter: I) -> Self {
        let mut index = Self::default();
        for (path, line) in iter {
            index.files.entry(path).or_default().insert(line);
        }
        index
    }
}
