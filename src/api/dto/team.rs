//! DTOs for team statistics endpoints.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{ContributorStats, DailyActivity, TeamStats};

/// Query parameters for the team list endpoint.
#[derive(Debug, Deserialize)]
pub struct TeamsQueryParams {
    /// Restricts the result to one hackathon's repositories. The dashboard
    /// sends `hackathonId`; the snake_case form is accepted too.
    #[serde(alias = "hackathonId")]
    pub hackathon_id: Option<String>,
}

/// One contributor's activity within a repository.
#[derive(Debug, Serialize)]
pub struct ContributorItem {
    pub login: String,
    pub avatar_url: String,
    pub commits: i64,
    pub additions: i64,
    pub deletions: i64,
}

/// Commit activity for one calendar day.
#[derive(Debug, Serialize)]
pub struct DailyActivityItem {
    pub date: NaiveDate,
    pub commits: i64,
    pub additions: i64,
    pub deletions: i64,
}

/// Full statistics record for one repository.
#[derive(Debug, Serialize)]
pub struct TeamStatsResponse {
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
    pub contributors: Vec<ContributorItem>,
    pub commits_over_time: Vec<DailyActivityItem>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<ContributorStats> for ContributorItem {
    fn from(c: ContributorStats) -> Self {
        ContributorItem {
            login: c.login,
            avatar_url: c.avatar_url,
            commits: c.commits,
            additions: c.additions,
            deletions: c.deletions,
        }
    }
}

impl From<DailyActivity> for DailyActivityItem {
    fn from(d: DailyActivity) -> Self {
        DailyActivityItem {
            date: d.date,
            commits: d.commits,
            additions: d.additions,
            deletions: d.deletions,
        }
    }
}

impl From<TeamStats> for TeamStatsResponse {
    fn from(s: TeamStats) -> Self {
        TeamStatsResponse {
            id: s.id,
            name: s.name,
            full_name: s.full_name,
            owner: s.owner,
            avatar_url: s.avatar_url,
            description: s.description,
            html_url: s.html_url,
            hackathon_id: s.hackathon_id,
            total_commits: s.total_commits,
            commits_today: s.commits_today,
            issues_open: s.issues_open,
            issues_closed: s.issues_closed,
            issues_completion_rate: s.issues_completion_rate,
            pull_requests_merged: s.pull_requests_merged,
            last_commit_time: s.last_commit_time,
            code_additions: s.code_additions,
            code_deletions: s.code_deletions,
            contributors: s.contributors.into_iter().map(Into::into).collect(),
            commits_over_time: s.commits_over_time.into_iter().map(Into::into).collect(),
            updated_at: s.updated_at,
        }
    }
}
