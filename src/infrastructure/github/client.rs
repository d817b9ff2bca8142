//! reqwest-backed implementation of [`GitHubApi`].

use async_trait::async_trait;
use futures::future::join_all;
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::models::{Commit, Issue, PullRequest, Repository};
use super::{GitHubApi, GitHubError, GitHubResult};

/// Page size used for every list fetch. Later pages are never requested.
const PER_PAGE: &str = "100";

/// Line-change stats are fetched per commit; beyond this many commits the
/// extra requests are not worth the rate-limit budget and stats stay absent.
const COMMIT_DETAIL_LIMIT: usize = 20;

const APP_USER_AGENT: &str = concat!("hacktion/", env!("CARGO_PKG_VERSION"));

/// GitHub REST client with an optional bearer token and a hard per-request
/// deadline.
pub struct GitHubClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
    timeout: Duration,
}

impl GitHubClient {
    /// Creates a client against `base_url` (`https://api.github.com` in
    /// production, a local mock server in tests).
    ///
    /// # Errors
    ///
    /// Returns [`GitHubError::Http`] if the underlying HTTP client cannot
    /// be constructed.
    pub fn new(
        base_url: impl Into<String>,
        token: Option<String>,
        timeout: Duration,
    ) -> GitHubResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(APP_USER_AGENT)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
            timeout,
        })
    }

    /// Issues one GET under the configured deadline and decodes the JSON body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> GitHubResult<T> {
        let url = format!("{}{}", self.base_url, path);

        let mut request = self
            .http
            .get(&url)
            .header(ACCEPT, "application/vnd.github+json")
            .query(query);

        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = tokio::time::timeout(self.timeout, request.send())
            .await
            .map_err(|_| GitHubError::Timeout(self.timeout))??;

        let status = response.status();
        if !status.is_success() {
            return Err(GitHubError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let body = tokio::time::timeout(self.timeout, response.json::<T>())
            .await
            .map_err(|_| GitHubError::Timeout(self.timeout))??;

        Ok(body)
    }

    /// `GET /repos/{owner}/{repo}/commits/{sha}` - single commit with stats.
    async fn commit_detail(&self, owner: &str, repo: &str, sha: &str) -> GitHubResult<Commit> {
        self.get_json(&format!("/repos/{owner}/{repo}/commits/{sha}"), &[])
            .await
    }
}

#[async_trait]
impl GitHubApi for GitHubClient {
    async fn get_repository(&self, owner: &str, repo: &str) -> GitHubResult<Repository> {
        self.get_json(&format!("/repos/{owner}/{repo}"), &[]).await
    }

    async fn list_commits(&self, owner: &str, repo: &str) -> GitHubResult<Vec<Commit>> {
        let mut commits: Vec<Commit> = self
            .get_json(
                &format!("/repos/{owner}/{repo}/commits"),
                &[("per_page", PER_PAGE)],
            )
            .await?;

        let shas: Vec<String> = commits
            .iter()
            .take(COMMIT_DETAIL_LIMIT)
            .map(|c| c.sha.clone())
            .collect();

        let details = join_all(
            shas.iter()
                .map(|sha| self.commit_detail(owner, repo, sha)),
        )
        .await;

        // A failed detail fetch leaves that commit without line stats
        // instead of failing the whole listing.
        for (commit, detail) in commits.iter_mut().zip(details) {
            match detail {
                Ok(detailed) => commit.stats = detailed.stats,
                Err(e) => {
                    tracing::debug!(sha = %commit.sha, "commit detail fetch failed: {e}");
                }
            }
        }

        Ok(commits)
    }

    async fn list_issues(&self, owner: &str, repo: &str) -> GitHubResult<Vec<Issue>> {
        let path = format!("/repos/{owner}/{repo}/issues");

        let (open, closed) = tokio::try_join!(
            self.get_json::<Vec<Issue>>(&path, &[("state", "open"), ("per_page", PER_PAGE)]),
            self.get_json::<Vec<Issue>>(&path, &[("state", "closed"), ("per_page", PER_PAGE)]),
        )?;

        // The issues endpoint interleaves pull requests; drop them.
        Ok(open
            .into_iter()
            .chain(closed)
            .filter(|issue| !issue.is_pull_request())
            .collect())
    }

    async fn list_pull_requests(&self, owner: &str, repo: &str) -> GitHubResult<Vec<PullRequest>> {
        let path = format!("/repos/{owner}/{repo}/pulls");

        let (open, closed) = tokio::try_join!(
            self.get_json::<Vec<PullRequest>>(&path, &[("state", "open"), ("per_page", PER_PAGE)]),
            self.get_json::<Vec<PullRequest>>(
                &path,
                &[("state", "closed"), ("per_page", PER_PAGE)]
            ),
        )?;

        Ok(open.into_iter().chain(closed).collect())
    }
}
