//! Freshness-gated statistics service.
//!
//! Serves persisted [`TeamStats`] when the cache is fresh; otherwise fans
//! out one aggregation per configured repository and persists the results.

use chrono::{Duration, Utc};
use futures::future::join_all;
use serde_json::json;
use std::sync::Arc;

use crate::application::services::StatsAggregator;
use crate::domain::entities::{RepoRef, TeamStats};
use crate::domain::repositories::StatsRepository;
use crate::error::AppError;
use crate::infrastructure::github::GitHubApi;

/// Per-repository result of a batch refresh.
///
/// Failures stay visible to callers instead of vanishing into logs; batch
/// endpoints surface them, tests assert on them.
#[derive(Debug)]
pub struct RefreshOutcome {
    pub url: String,
    pub result: Result<TeamStats, AppError>,
}

impl RefreshOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Service combining the aggregator with the freshness-gated cache policy.
///
/// The freshness decision is all-or-nothing for the whole batch: only the
/// newest `updated_at` across the persisted set is compared against the
/// window, and a hit returns every persisted record unchanged.
pub struct TeamStatsService<R: StatsRepository, G: GitHubApi> {
    repository: Arc<R>,
    aggregator: StatsAggregator<G>,
    freshness: Duration,
}

impl<R: StatsRepository, G: GitHubApi> TeamStatsService<R, G> {
    /// Creates a new service.
    ///
    /// `freshness` is the age below which the persisted set is served
    /// without touching GitHub.
    pub fn new(repository: Arc<R>, github: Arc<G>, freshness: Duration) -> Self {
        Self {
            repository,
            aggregator: StatsAggregator::new(github),
            freshness,
        }
    }

    /// Returns cached-or-fresh statistics for the configured repositories.
    ///
    /// On a cache hit the persisted set is returned as loaded (already
    /// sorted by the store). On a miss every configured repository is
    /// aggregated in parallel; repositories that fail are dropped from the
    /// result while their stale records stay in storage.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors. Aggregation
    /// failures never fail the batch.
    pub async fn team_stats(
        &self,
        hackathon_id: Option<&str>,
        repo_urls: &[String],
    ) -> Result<Vec<TeamStats>, AppError> {
        let cached = self.repository.get_all(hackathon_id).await?;

        let newest = cached.iter().filter_map(|s| s.updated_at).max();
        if let Some(newest) = newest
            && Utc::now() - newest < self.freshness
        {
            metrics::counter!("stats_cache_hits_total").increment(1);
            tracing::debug!(records = cached.len(), "serving cached statistics");
            return Ok(cached);
        }

        metrics::counter!("stats_cache_misses_total").increment(1);

        if repo_urls.is_empty() {
            return Ok(Vec::new());
        }

        let outcomes = self.refresh(hackathon_id, repo_urls).await;

        let mut fresh: Vec<TeamStats> = outcomes
            .into_iter()
            .filter_map(|o| o.result.ok())
            .collect();
        sort_stats(&mut fresh);

        Ok(fresh)
    }

    /// Aggregates and persists every given repository, in parallel,
    /// bypassing the freshness check.
    ///
    /// Each successful result is saved with `updated_at` set to now,
    /// replacing any prior record for the same repository identity. A
    /// failed repository keeps its previously persisted record.
    pub async fn refresh(
        &self,
        hackathon_id: Option<&str>,
        repo_urls: &[String],
    ) -> Vec<RefreshOutcome> {
        join_all(
            repo_urls
                .iter()
                .map(|url| self.refresh_one(hackathon_id, url)),
        )
        .await
    }

    async fn refresh_one(&self, hackathon_id: Option<&str>, url: &str) -> RefreshOutcome {
        let result = async {
            let repo = RepoRef::parse(url)?;
            let mut stats = self.aggregator.aggregate(&repo).await?;
            stats.hackathon_id = hackathon_id.map(str::to_string);
            stats.updated_at = Some(Utc::now());
            self.repository.save(&stats).await?;
            Ok(stats)
        }
        .await;

        if let Err(e) = &result {
            metrics::counter!("stats_refresh_failures_total").increment(1);
            tracing::warn!(%url, "repository refresh failed: {e}");
        }

        RefreshOutcome {
            url: url.to_string(),
            result,
        }
    }

    /// Loads one cached record by repository id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record exists for the id.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn team_by_id(&self, id: i64) -> Result<TeamStats, AppError> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Team not found", json!({ "id": id })))
    }
}

/// Dashboard ordering: most active today first, total commits as tie-break.
fn sort_stats(stats: &mut [TeamStats]) {
    stats.sort_by(|a, b| {
        b.commits_today
            .cmp(&a.commits_today)
            .then_with(|| b.total_commits.cmp(&a.total_commits))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockStatsRepository;
    use crate::infrastructure::github::models::{
        Author, Commit, CommitDetail, CommitStats, GitAuthor, Issue, Owner, PullRequest,
        Repository,
    };
    use crate::infrastructure::github::{GitHubError, MockGitHubApi};
    use chrono::Local;

    const FRESHNESS: i64 = 300;

    fn cached_stats(id: i64, commits_today: i64, age_secs: i64) -> TeamStats {
        TeamStats {
            id,
            name: format!("repo{id}"),
            full_name: format!("owner{id}/repo{id}"),
            owner: format!("owner{id}"),
            avatar_url: String::new(),
            description: None,
            html_url: format!("https://github.com/owner{id}/repo{id}"),
            hackathon_id: None,
            total_commits: 10 * id,
            commits_today,
            issues_open: 0,
            issues_closed: 0,
            issues_completion_rate: 0.0,
            pull_requests_merged: 0,
            last_commit_time: None,
            code_additions: 0,
            code_deletions: 0,
            contributors: vec![],
            commits_over_time: vec![],
            updated_at: Some(Utc::now() - Duration::seconds(age_secs)),
        }
    }

    fn repository(owner: &str, name: &str, id: i64) -> Repository {
        Repository {
            id,
            name: name.to_string(),
            full_name: format!("{owner}/{name}"),
            owner: Owner {
                login: owner.to_string(),
                avatar_url: String::new(),
            },
            description: None,
            html_url: format!("https://github.com/{owner}/{name}"),
        }
    }

    fn one_commit(login: &str) -> Vec<Commit> {
        vec![Commit {
            sha: "abc".to_string(),
            commit: CommitDetail {
                author: Some(GitAuthor {
                    name: Some(login.to_string()),
                    email: None,
                    date: Some(Local::now().with_timezone(&Utc)),
                }),
                message: "msg".to_string(),
            },
            author: Some(Author {
                login: login.to_string(),
                avatar_url: String::new(),
            }),
            stats: Some(CommitStats {
                additions: 1,
                deletions: 0,
                total: 1,
            }),
        }]
    }

    /// Wires successful fetch expectations for one repository.
    fn wire_success(github: &mut MockGitHubApi, owner: &'static str, id: i64) {
        let o = owner;
        github
            .expect_get_repository()
            .withf(move |got, _| got == o)
            .times(1)
            .returning(move |owner, name| Ok(repository(owner, name, id)));
        github
            .expect_list_commits()
            .withf(move |got, _| got == o)
            .times(1)
            .returning(|owner, _| Ok(one_commit(owner)));
        github
            .expect_list_issues()
            .withf(move |got, _| got == o)
            .times(1)
            .returning(|_, _| Ok(Vec::<Issue>::new()));
        github
            .expect_list_pull_requests()
            .withf(move |got, _| got == o)
            .times(1)
            .returning(|_, _| Ok(Vec::<PullRequest>::new()));
    }

    /// Wires a failing metadata fetch for one repository. The remaining
    /// fetches may or may not run before the failure cancels them.
    fn wire_failure(github: &mut MockGitHubApi, owner: &'static str) {
        let o = owner;
        github
            .expect_get_repository()
            .withf(move |got, _| got == o)
            .returning(|owner, repo| {
                Err(GitHubError::Status {
                    status: 404,
                    url: format!("https://api.github.com/repos/{owner}/{repo}"),
                })
            });
        github
            .expect_list_commits()
            .withf(move |got, _| got == o)
            .returning(|_, _| Ok(Vec::<Commit>::new()));
        github
            .expect_list_issues()
            .withf(move |got, _| got == o)
            .returning(|_, _| Ok(Vec::<Issue>::new()));
        github
            .expect_list_pull_requests()
            .withf(move |got, _| got == o)
            .returning(|_, _| Ok(Vec::<PullRequest>::new()));
    }

    fn service(
        repo: MockStatsRepository,
        github: MockGitHubApi,
    ) -> TeamStatsService<MockStatsRepository, MockGitHubApi> {
        TeamStatsService::new(
            Arc::new(repo),
            Arc::new(github),
            Duration::seconds(FRESHNESS),
        )
    }

    #[tokio::test]
    async fn test_fresh_cache_returns_persisted_set_without_fetching() {
        let mut repo = MockStatsRepository::new();
        // Newest record is 4 minutes old: inside the 5 minute window.
        repo.expect_get_all().times(1).returning(|_| {
            Ok(vec![cached_stats(1, 5, 240), cached_stats(2, 2, 400)])
        });
        repo.expect_save().times(0);

        // No expectations: any GitHub call would panic the test.
        let github = MockGitHubApi::new();

        let svc = service(repo, github);
        let urls = vec!["https://github.com/a/b".to_string()];
        let stats = svc.team_stats(None, &urls).await.unwrap();

        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].id, 1);
    }

    #[tokio::test]
    async fn test_stale_cache_triggers_one_aggregation_per_repository() {
        let mut repo = MockStatsRepository::new();
        // Newest record is 6 minutes old: outside the window.
        repo.expect_get_all()
            .times(1)
            .returning(|_| Ok(vec![cached_stats(1, 5, 360)]));
        repo.expect_save().times(2).returning(|_| Ok(()));

        let mut github = MockGitHubApi::new();
        wire_success(&mut github, "alice", 101);
        wire_success(&mut github, "bob", 102);

        let svc = service(repo, github);
        let urls = vec![
            "https://github.com/alice/repo1".to_string(),
            "https://github.com/bob/repo2".to_string(),
        ];
        let stats = svc.team_stats(None, &urls).await.unwrap();

        assert_eq!(stats.len(), 2);
        assert!(stats.iter().all(|s| s.updated_at.is_some()));
    }

    #[tokio::test]
    async fn test_partial_failure_drops_only_failing_repository() {
        let mut repo = MockStatsRepository::new();
        repo.expect_get_all().times(1).returning(|_| Ok(vec![]));
        // Only the two successes are persisted.
        repo.expect_save()
            .times(2)
            .withf(|s| s.id == 101 || s.id == 103)
            .returning(|_| Ok(()));

        let mut github = MockGitHubApi::new();
        wire_success(&mut github, "alice", 101);
        wire_failure(&mut github, "broken");
        wire_success(&mut github, "carol", 103);

        let svc = service(repo, github);
        let urls = vec![
            "https://github.com/alice/repo1".to_string(),
            "https://github.com/broken/repo2".to_string(),
            "https://github.com/carol/repo3".to_string(),
        ];
        let stats = svc.team_stats(None, &urls).await.unwrap();

        assert_eq!(stats.len(), 2);
        assert!(stats.iter().all(|s| s.id != 102));
    }

    #[tokio::test]
    async fn test_refresh_reports_structured_outcomes() {
        let mut repo = MockStatsRepository::new();
        repo.expect_save().times(1).returning(|_| Ok(()));

        let mut github = MockGitHubApi::new();
        wire_success(&mut github, "alice", 101);

        let svc = service(repo, github);
        let urls = vec![
            "https://github.com/alice/repo1".to_string(),
            "not-a-repository-url".to_string(),
        ];
        let outcomes = svc.refresh(None, &urls).await;

        assert_eq!(outcomes.len(), 2);
        assert!(outcomes[0].is_success());
        assert!(!outcomes[1].is_success());
        assert!(matches!(
            outcomes[1].result.as_ref().unwrap_err(),
            AppError::InvalidReference { .. }
        ));
    }

    #[tokio::test]
    async fn test_empty_configuration_yields_empty_set() {
        let mut repo = MockStatsRepository::new();
        repo.expect_get_all().times(1).returning(|_| Ok(vec![]));

        let github = MockGitHubApi::new();

        let svc = service(repo, github);
        let stats = svc.team_stats(None, &[]).await.unwrap();

        assert!(stats.is_empty());
    }

    #[tokio::test]
    async fn test_fresh_results_sorted_by_activity() {
        let mut repo = MockStatsRepository::new();
        repo.expect_get_all().times(1).returning(|_| Ok(vec![]));
        repo.expect_save().times(2).returning(|_| Ok(()));

        let mut github = MockGitHubApi::new();
        // bob's repo has one commit today; alice's has none.
        let o = "alice";
        github
            .expect_get_repository()
            .withf(move |got, _| got == o)
            .times(1)
            .returning(|owner, name| Ok(repository(owner, name, 201)));
        github
            .expect_list_commits()
            .withf(move |got, _| got == o)
            .times(1)
            .returning(|_, _| Ok(Vec::<Commit>::new()));
        github
            .expect_list_issues()
            .withf(move |got, _| got == o)
            .times(1)
            .returning(|_, _| Ok(Vec::<Issue>::new()));
        github
            .expect_list_pull_requests()
            .withf(move |got, _| got == o)
            .times(1)
            .returning(|_, _| Ok(Vec::<PullRequest>::new()));
        wire_success(&mut github, "bob", 202);

        let svc = service(repo, github);
        let urls = vec![
            "https://github.com/alice/idle".to_string(),
            "https://github.com/bob/busy".to_string(),
        ];
        let stats = svc.team_stats(None, &urls).await.unwrap();

        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].id, 202);
        assert_eq!(stats[1].id, 201);
    }

    #[tokio::test]
    async fn test_team_by_id_not_found() {
        let mut repo = MockStatsRepository::new();
        repo.expect_get_by_id()
            .withf(|id| *id == 7)
            .times(1)
            .returning(|_| Ok(None));

        let github = MockGitHubApi::new();

        let svc = service(repo, github);
        let err = svc.team_by_id(7).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }
}
