use std::path::PathBuf;

/// Errors that can occur while talking to GitHub or reading workflow context.
#[derive(Debug, thiserror::Error)]
pub enum GitHubError {
    /// The HTTP client could not be initialised.
    #[error("failed to initialize HTTP client: {0}")]
    ClientInit(String),

    /// An HTTP request failed before a response was received.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("GitHub API returned {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// The `message` field of the error body, or the raw body.
        message: String,
    },

    /// The workflow event payload could not be read.
    #[error("failed to read event payload '{path}': {source}")]
    EventRead {
        /// Path of the payload file.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The workflow event payload was not valid JSON.
    #[error("failed to parse event payload '{path}': {source}")]
    EventParse {
        /// Path of the payload file.
        path: PathBuf,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The workflow was not triggered by a pull request.
    #[error("event payload '{path}' does not describe a pull request")]
    NotPullRequest {
        /// Path of the payload file.
        path: PathBuf,
    },

    /// A repository slug was not of the form `owner/name`.
    #[error("invalid repository '{value}' (expected owner/name)")]
    InvalidRepository {
        /// The rejected value.
        value: String,
    },
}
