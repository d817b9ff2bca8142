//! Stats aggregation: turns a repository reference into a fully derived
//! [`TeamStats`] value.

use chrono::{DateTime, Duration, Local, NaiveDate};
use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::entities::{ContributorStats, DailyActivity, RepoRef, TeamStats};
use crate::error::AppError;
use crate::infrastructure::github::GitHubApi;
use crate::infrastructure::github::models::{Commit, Issue, PullRequest, Repository};

/// Length of the daily activity window, in calendar days.
const DAILY_WINDOW_DAYS: i64 = 7;

/// Fallback contributor key when a commit carries neither a GitHub account
/// nor a git author name.
const UNKNOWN_AUTHOR: &str = "Unknown";

/// Converts a [`RepoRef`] into a [`TeamStats`] value.
///
/// The four remote fetches run concurrently; a failure of any one aborts
/// the aggregation. The produced record carries no refresh timestamp;
/// stamping it is the cache layer's responsibility.
pub struct StatsAggregator<G: GitHubApi> {
    github: Arc<G>,
}

impl<G: GitHubApi> StatsAggregator<G> {
    /// Creates a new aggregator over a GitHub client.
    pub fn new(github: Arc<G>) -> Self {
        Self { github }
    }

    /// Fetches and derives statistics for one repository.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::UpstreamFetch`] if any of the four fetches fails
    /// or times out.
    pub async fn aggregate(&self, repo: &RepoRef) -> Result<TeamStats, AppError> {
        let (repository, commits, issues, pulls) = tokio::try_join!(
            self.github.get_repository(&repo.owner, &repo.name),
            self.github.list_commits(&repo.owner, &repo.name),
            self.github.list_issues(&repo.owner, &repo.name),
            self.github.list_pull_requests(&repo.owner, &repo.name),
        )?;

        Ok(derive_team_stats(
            repository,
            &commits,
            &issues,
            &pulls,
            Local::now(),
        ))
    }
}

/// Local calendar date of a commit's author timestamp, if it has one.
fn author_local_date(commit: &Commit, now: &DateTime<Local>) -> Option<NaiveDate> {
    commit
        .commit
        .author
        .as_ref()
        .and_then(|a| a.date)
        .map(|d| d.with_timezone(&now.timezone()).date_naive())
}

/// Derives a [`TeamStats`] record from fetched repository data.
///
/// Pure with respect to `now`, so the calendar-sensitive rules
/// (`commits_today`, the trailing-week rollup) are testable with a fixed
/// clock.
pub fn derive_team_stats(
    repository: Repository,
    commits: &[Commit],
    issues: &[Issue],
    pulls: &[PullRequest],
    now: DateTime<Local>,
) -> TeamStats {
    let today = now.date_naive();

    let commits_today = commits
        .iter()
        .filter(|c| author_local_date(c, &now).is_some_and(|d| d >= today))
        .count() as i64;

    let issues_open = issues.iter().filter(|i| i.state == "open").count() as i64;
    let issues_closed = issues.iter().filter(|i| i.state == "closed").count() as i64;
    let issues_total = issues_open + issues_closed;
    let issues_completion_rate = if issues_total > 0 {
        issues_closed as f64 / issues_total as f64 * 100.0
    } else {
        0.0
    };

    let pull_requests_merged = pulls.iter().filter(|p| p.is_merged()).count() as i64;

    // Contributor rollup, keyed by login -> git author name -> "Unknown".
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut contributors: Vec<ContributorStats> = Vec::new();
    for commit in commits {
        let login = commit
            .author
            .as_ref()
            .map(|a| a.login.clone())
            .or_else(|| {
                commit
                    .commit
                    .author
                    .as_ref()
                    .and_then(|a| a.name.clone())
            })
            .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string());

        let slot = *index.entry(login.clone()).or_insert_with(|| {
            contributors.push(ContributorStats {
                login,
                avatar_url: commit
                    .author
                    .as_ref()
                    .map(|a| a.avatar_url.clone())
                    .unwrap_or_default(),
                commits: 0,
                additions: 0,
                deletions: 0,
            });
            contributors.len() - 1
        });

        let entry = &mut contributors[slot];
        entry.commits += 1;
        if let Some(stats) = &commit.stats {
            entry.additions += stats.additions;
            entry.deletions += stats.deletions;
        }
    }
    contributors.sort_by(|a, b| b.commits.cmp(&a.commits).then_with(|| a.login.cmp(&b.login)));

    // Trailing-week rollup, oldest day first; empty days keep zero counts.
    let mut commits_over_time = Vec::with_capacity(DAILY_WINDOW_DAYS as usize);
    for offset in (0..DAILY_WINDOW_DAYS).rev() {
        let date = today - Duration::days(offset);

        let mut day = DailyActivity {
            date,
            commits: 0,
            additions: 0,
            deletions: 0,
        };
        for commit in commits {
            if author_local_date(commit, &now) == Some(date) {
                day.commits += 1;
                if let Some(stats) = &commit.stats {
                    day.additions += stats.additions;
                    day.deletions += stats.deletions;
                }
            }
        }
        commits_over_time.push(day);
    }

    let code_additions = commits
        .iter()
        .filter_map(|c| c.stats.as_ref())
        .map(|s| s.additions)
        .sum();
    let code_deletions = commits
        .iter()
        .filter_map(|c| c.stats.as_ref())
        .map(|s| s.deletions)
        .sum();

    // The list is newest-first, so the head carries the latest author date.
    let last_commit_time = commits
        .first()
        .and_then(|c| c.commit.author.as_ref())
        .and_then(|a| a.date);

    TeamStats {
        id: repository.id,
        name: repository.name,
        full_name: repository.full_name,
        owner: repository.owner.login,
        avatar_url: repository.owner.avatar_url,
        description: repository.description,
        html_url: repository.html_url,
        hackathon_id: None,
        total_commits: commits.len() as i64,
        commits_today,
        issues_open,
        issues_closed,
        issues_completion_rate,
        pull_requests_merged,
        last_commit_time,
        code_additions,
        code_deletions,
        contributors,
        commits_over_time,
        updated_at: None,
    }
}
