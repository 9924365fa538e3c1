//! Core engine for sieve: keeps only the static-analysis findings that a
//! pull request actually touched.
//!
//! The pipeline has three stages, each a pure function of its input:
//!
//! 1. [`ChangedLines::from_diff`] indexes the lines a unified diff adds.
//! 2. [`extract_violations`] flattens a SARIF report into one [`Violation`]
//!    per location and marks the ones sitting on an added line.
//! 3. [`build_check_run`] turns the marked violations into counts,
//!    annotations, and a pass/fail conclusion.
//!
//! Fetching the diff, reading report files, and publishing the result are
//! left to the caller (see the `sieve_github` and `sieve_cli` crates).
//!
//! # Error Handling
//!
//! This crate uses [`thiserror`] for structured, typed errors:
//!
//! - [`DiffError`] - Malformed unified-diff text
//! - [`SarifError`] - Report JSON that does not parse
//! - [`ConfigError`] - Unusable run configuration
//! - [`SieveError`] - Top-level error enum combining the above

/// Check-run assembly: severity mapping, counts, annotations.
pub mod check_run;
/// Run configuration.
pub mod config;
/// Unified-diff parsing and the changed-line index.
pub mod diff;
/// Error types for the full pipeline.
pub mod error;
/// Common re-exports for internal use.
pub mod prelude;
/// SARIF input model.
pub mod sarif;
#[cfg(test)]
pub(crate) mod test_utils;
/// Violation records and their extraction from SARIF.
pub mod violation;

pub use check_run::{
    Annotation, AnnotationLevel, CHECK_NAME, CheckRunOutput, CheckRunPayload, Conclusion, Counts, build_check_run,
};
pub use config::{Config, ConfigError};
pub use diff::{ChangedLines, DiffError};
pub use error::SieveError;
pub use sarif::{Level, SarifError, SarifLog};
pub use violation::{PathNormalizer, Violation, ViolationDraft, extract_violations};
