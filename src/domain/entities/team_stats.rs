//! Aggregated per-repository statistics shown on the dashboard.

use chrono::{DateTime, NaiveDate, Utc};

/// Commit activity of one contributor within a repository.
///
/// Unique per login within a [`TeamStats`] record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContributorStats {
    pub login: String,
    pub avatar_url: String,
    pub commits: i64,
    pub additions: i64,
    pub deletions: i64,
}

/// Commit activity for one calendar day (local-midnight boundaries).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyActivity {
    pub date: NaiveDate,
    pub commits: i64,
    pub additions: i64,
    pub deletions: i64,
}

/// The aggregate result for one repository.
///
/// `id` is the upstream repository id and serves as the replace-by-identity
/// key in the cache. `updated_at` is stamped by the cache layer when the
/// record is persisted, never by the aggregator.
#[derive(Debug, Clone)]
pub struct TeamStats {
    pub id: i64,
    pub name: String,
    pub full_name: String,
    pub owner: String,
    pub avatar_url: String,
    pub description: Option<String>,
    pub html_url: String,
    pub hackathon_id: Option<String>,
    pub total_commits: i64,
    pub commits_today: i64,
    pub issues_open: i64,
    pub issues_closed: i64,
    pub issues_completion_rate: f64,
    pub pull_requests_merged: i64,
    pub last_commit_time: Option<DateTime<Utc>>,
    pub code_additions: i64,
    pub code_deletions: i64,
    /// Ordered by commit count descending.
    pub contributors: Vec<ContributorStats>,
    /// One entry per day of the trailing week, oldest first.
    pub commits_over_time: Vec<DailyActivity>,
    pub updated_at: Option<DateTime<Utc>>,
}

