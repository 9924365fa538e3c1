use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the sieve pipeline.
///
/// Unifies configuration, diff, and SARIF errors into a single type for
/// callers that orchestrate the full workflow.
#[derive(Debug, Error)]
pub enum SieveError {
    /// The run configuration was unusable.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// The diff could not be parsed.
    #[error(transparent)]
    Diff(#[from] crate::diff::DiffError),

    /// A SARIF report could not be parsed.
    #[error(transparent)]
    Sarif(#[from] crate::sarif::SarifError),

    /// A SARIF report on disk could not be parsed.
    #[error("invalid report '{}': {source}", path.display())]
    Report {
        /// The report that failed to parse.
        path: PathBuf,
        /// The underlying parse failure.
        source: crate::sarif::SarifError,
    },
}
