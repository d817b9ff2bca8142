//! GitHub API access: fetch trait, wire models, and the reqwest client.

mod client;
pub mod models;

pub use client::GitHubClient;

use crate::error::AppError;
use async_trait::async_trait;
use models::{Commit, Issue, PullRequest, Repository};
use serde_json::json;

/// Errors that can occur while talking to the GitHub API.
#[derive(Debug, thiserror::Error)]
pub enum GitHubError {
    #[error("GitHub request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("GitHub returned {status} for {url}")]
    Status { status: u16, url: String },

    #[error("GitHub request timed out after {0:?}")]
    Timeout(std::time::Duration),
}

impl From<GitHubError> for AppError {
    fn from(e: GitHubError) -> Self {
        AppError::upstream_fetch(e.to_string(), json!({}))
    }
}

/// Result type for GitHub operations.
pub type GitHubResult<T> = Result<T, GitHubError>;

/// The four fetch operations the aggregator needs from GitHub.
///
/// Every call is subject to the client's per-request deadline; a lapse or a
/// non-success status is a [`GitHubError`], which aborts the aggregation of
/// the repository being fetched.
///
/// # Implementations
///
/// - [`GitHubClient`] - reqwest implementation against the real (or a mock) API
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GitHubApi: Send + Sync {
    /// `GET /repos/{owner}/{repo}` - repository metadata.
    async fn get_repository(&self, owner: &str, repo: &str) -> GitHubResult<Repository>;

    /// Up to 100 most recent commits, newest first, with line-change stats
    /// filled in for at most the first 20.
    async fn list_commits(&self, owner: &str, repo: &str) -> GitHubResult<Vec<Commit>>;

    /// Up to 100 open plus up to 100 closed issues, pull requests excluded.
    async fn list_issues(&self, owner: &str, repo: &str) -> GitHubResult<Vec<Issue>>;

    /// Up to 100 open plus up to 100 closed pull requests.
    async fn list_pull_requests(&self, owner: &str, repo: &str)
    -> GitHubResult<Vec<PullRequest>>;
}
