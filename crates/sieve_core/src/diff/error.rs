use thiserror::Error;

/// Errors that can occur when parsing unified-diff text.
///
/// Line numbers refer to the 1-indexed line of the diff text itself, not to
/// a line in any of the files being compared.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DiffError {
    /// A line starting with `@@` did not have the `@@ -a,b +c,d @@` shape.
    #[error("malformed hunk header on diff line {line}: {text:?}")]
    MalformedHunkHeader {
        /// Line of the diff text holding the header.
        line: usize,
        /// The offending header text.
        text: String,
    },

    /// A hunk appeared before any file header introduced a file.
    #[error("hunk on diff line {line} does not belong to any file")]
    HunkWithoutFile {
        /// Line of the diff text holding the orphaned hunk header.
        line: usize,
    },

    /// A hunk ended before all of the lines announced in its header were seen.
    #[error("hunk truncated at diff line {line}")]
    TruncatedHunk {
        /// Line of the diff text where the hunk body was cut short.
        line: usize,
    },
}
