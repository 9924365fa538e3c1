//! GitHub integration for sieve.
//!
//! Reads the pull-request context a workflow runs in, downloads the pull
//! request's diff, and publishes a completed check run with annotations.

mod client;
mod context;
mod error;
mod request;

pub use client::{CheckRunId, DEFAULT_API_URL, GitHubClient};
pub use context::{PullRequest, Repository};
pub use error::GitHubError;
pub use request::MAX_ANNOTATIONS_PER_REQUEST;

/// HTTP `User-Agent` header sent with every API request.
pub(crate) const USER_AGENT: &str = concat!("sieve/", env!("CARGO_PKG_VERSION"));
