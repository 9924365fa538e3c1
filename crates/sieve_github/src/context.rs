//! The pull request a workflow run is acting on.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::GitHubError;

/// A repository addressed as `owner/name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    /// Account or organisation that owns the repository.
    pub owner: String,
    /// Repository name.
    pub name: String,
}

impl FromStr for Repository {
    type Err = GitHubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || GitHubError::InvalidRepository { value: s.to_string() };

        let (owner, name) = s.trim().split_once('/').ok_or_else(invalid)?;
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return Err(invalid());
        }

        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// The parts of a `pull_request` event that sieve needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequest {
    /// Pull-request number within the repository.
    pub number: u64,
    /// Commit the check run is attached to.
    pub head_sha: String,
}

#[derive(Deserialize)]
struct EventPayload {
    pull_request: Option<PullRequestPayload>,
}

#[derive(Deserialize)]
struct PullRequestPayload {
    number: u64,
    head: HeadPayload,
}

#[derive(Deserialize)]
struct HeadPayload {
    sha: String,
}

impl PullRequest {
    /// Reads the event payload file that GitHub Actions points to with
    /// `GITHUB_EVENT_PATH`.
    pub fn from_event_file(path: &Path) -> Result<Self, GitHubError> {
        let content = std::fs::read_to_string(path).map_err(|source| GitHubError::EventRead {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_event_json(path, &content)
    }

    /// Parses an event payload. `path` is used only for error messages.
    pub fn from_event_json(path: &Path, content: &str) -> Result<Self, GitHubError> {
        let payload: EventPayload = serde_json::from_str(content).map_err(|source| GitHubError::EventParse {
            path: path.to_path_buf(),
            source,
        })?;

        let pr = payload.pull_request.ok_or_else(|| GitHubError::NotPullRequest {
            path: path.to_path_buf(),
        })?;

        Ok(Self {
            number: pr.number,
            head_sha: pr.head.sha,
        })
    }
}
