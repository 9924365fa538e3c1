//! Authenticated access to the GitHub REST API.

use std::time::Duration;

use serde::Deserialize;
use sieve_core::CheckRunPayload;
use tracing::{debug, info};

use crate::USER_AGENT;
use crate::context::Repository;
use crate::error::GitHubError;
use crate::request::batches;

/// Public GitHub API root. GitHub Enterprise exposes its own via `GITHUB_API_URL`.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const ACCEPT_JSON: &str = "application/vnd.github+json";
const ACCEPT_DIFF: &str = "application/vnd.github.v3.diff";
const API_VERSION: &str = "2022-11-28";

/// Identifier of a created check run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CheckRunId(pub u64);

#[derive(Deserialize)]
struct CreatedCheckRun {
    id: u64,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Client for the handful of endpoints sieve uses.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    api_url: String,
    token: String,
}

impl GitHubClient {
    /// Creates a client authenticating with `token` against `api_url`.
    pub fn new(token: &str, api_url: &str) -> Result<Self, GitHubError> {
        let http = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| GitHubError::ClientInit(e.to_string()))?;

        Ok(Self {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    /// Downloads the unified diff of a pull request.
    pub async fn fetch_diff(&self, repo: &Repository, number: u64) -> Result<String, GitHubError> {
        let url = format!("{}/repos/{}/{}/pulls/{number}", self.api_url, repo.owner, repo.name);
        debug!(%url, "fetching pull request diff");

        let response = self.request(reqwest::Method::GET, &url, ACCEPT_DIFF).send().await?;
        let response = check_status(response).await?;

        Ok(response.text().await?)
    }

    /// Publishes `payload` as a completed check run on `head_sha`.
    ///
    /// Annotations beyond the per-request limit are appended with follow-up
    /// updates to the same check run.
    pub async fn create_check_run(
        &self,
        repo: &Repository,
        head_sha: &str,
        payload: &CheckRunPayload,
    ) -> Result<CheckRunId, GitHubError> {
        let url = format!("{}/repos/{}/{}/check-runs", self.api_url, repo.owner, repo.name);
        let (create, updates) = batches(head_sha, payload);

        let response = self
            .request(reqwest::Method::POST, &url, ACCEPT_JSON)
            .json(&create)
            .send()
            .await?;
        let created: CreatedCheckRun = check_status(response).await?.json().await?;
        let id = CheckRunId(created.id);

        info!(check_run = id.0, conclusion = %payload.conclusion, "created check run");

        let update_url = format!("{url}/{}", id.0);
        for (idx, update) in updates.iter().enumerate() {
            debug!(check_run = id.0, batch = idx + 1, "appending annotations");

            let response = self
                .request(reqwest::Method::PATCH, &update_url, ACCEPT_JSON)
                .json(update)
                .send()
                .await?;
            check_status(response).await?;
        }

        Ok(id)
    }

    fn request(&self, method: reqwest::Method, url: &str, accept: &str) -> reqwest::RequestBuilder {
        self.http
            .request(method, url)
            .bearer_auth(&self.token)
            .header("Accept", accept)
            .header("X-GitHub-Api-Version", API_VERSION)
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, GitHubError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorBody>(&body).map_or(body, |b| b.message);

    Err(GitHubError::Api {
        status: status.as_u16(),
        message,
    })
}
