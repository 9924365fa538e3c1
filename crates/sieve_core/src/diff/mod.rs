//! Unified-diff parsing and the changed-line index built from it.

mod changed;
mod error;
mod parse;

pub use changed::ChangedLines;
pub use error::DiffError;
pub use parse::{ChangeKind, DEV_NULL, FileDiff, Hunk, LineChange, parse_unified_diff};
