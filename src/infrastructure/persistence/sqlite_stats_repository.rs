//! SQLite implementation of the statistics cache repository.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::domain::entities::{ContributorStats, DailyActivity, TeamStats};
use crate::domain::repositories::StatsRepository;
use crate::error::AppError;

/// SQLite repository for cached team statistics.
///
/// Each record spans three tables: the `team_stats` row plus `contributors`
/// and `commits_timeline` children, all keyed by the upstream repository id.
pub struct SqliteStatsRepository {
    pool: Arc<SqlitePool>,
}

#[derive(sqlx::FromRow)]
struct TeamStatsRow {
    id: i64,
    name: String,
    full_name: String,
    owner: String,
    avatar_url: String,
    description: Option<String>,
    html_url: String,
    hackathon_id: Option<String>,
    total_commits: i64,
    commits_today: i64,
    issues_open: i64,
    issues_closed: i64,
    issues_completion_rate: f64,
    pull_requests_merged: i64,
    last_commit_time: Option<DateTime<Utc>>,
    code_additions: i64,
    code_deletions: i64,
    updated_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct ContributorRow {
    login: String,
    avatar_url: String,
    commits: i64,
    additions: i64,
    deletions: i64,
}

#[derive(sqlx::FromRow)]
struct TimelineRow {
    date: NaiveDate,
    commits: i64,
    additions: i64,
    deletions: i64,
}

impl SqliteStatsRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }

    /// Loads the contributor and timeline children for one team row.
    async fn assemble(&self, row: TeamStatsRow) -> Result<TeamStats, AppError> {
        let contributors = sqlx::query_as::<_, ContributorRow>(
            r#"
            SELECT login, avatar_url, commits, additions, deletions
            FROM contributors WHERE team_id = ?1
            ORDER BY commits DESC, login ASC
            "#,
        )
        .bind(row.id)
        .fetch_all(self.pool.as_ref())
        .await?;

        let timeline = sqlx::query_as::<_, TimelineRow>(
            r#"
            SELECT date, commits, additions, deletions
            FROM commits_timeline WHERE team_id = ?1
            ORDER BY date ASC
            "#,
        )
        .bind(row.id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(TeamStats {
            id: row.id,
            name: row.name,
            full_name: row.full_name,
            owner: row.owner,
            avatar_url: row.avatar_url,
            description: row.description,
            html_url: row.html_url,
            hackathon_id: row.hackathon_id,
            total_commits: row.total_commits,
            commits_today: row.commits_today,
            issues_open: row.issues_open,
            issues_closed: row.issues_closed,
            issues_completion_rate: row.issues_completion_rate,
            pull_requests_merged: row.pull_requests_merged,
            last_commit_time: row.last_commit_time,
            code_additions: row.code_additions,
            code_deletions: row.code_deletions,
            contributors: contributors
                .into_iter()
                .map(|c| ContributorStats {
                    login: c.login,
                    avatar_url: c.avatar_url,
                    commits: c.commits,
                    additions: c.additions,
                    deletions: c.deletions,
                })
                .collect(),
            commits_over_time: timeline
                .into_iter()
                .map(|t| DailyActivity {
                    date: t.date,
                    commits: t.commits,
                    additions: t.additions,
                    deletions: t.deletions,
                })
                .collect(),
            updated_at: Some(row.updated_at),
        })
    }
}

#[async_trait]
impl StatsRepository for SqliteStatsRepository {
    async fn get_all<'a>(&self, hackathon_id: Option<&'a str>) -> Result<Vec<TeamStats>, AppError> {
        let rows = sqlx::query_as::<_, TeamStatsRow>(
            r#"
            SELECT id, name, full_name, owner, avatar_url, description, html_url,
                   hackathon_id, total_commits, commits_today, issues_open,
                   issues_closed, issues_completion_rate, pull_requests_merged,
                   last_commit_time, code_additions, code_deletions, updated_at
            FROM team_stats
            WHERE ?1 IS NULL OR hackathon_id = ?1
            ORDER BY commits_today DESC, total_commits DESC
            "#,
        )
        .bind(hackathon_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        let mut stats = Vec::with_capacity(rows.len());
        for row in rows {
            stats.push(self.assemble(row).await?);
        }

        Ok(stats)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<TeamStats>, AppError> {
        let row = sqlx::query_as::<_, TeamStatsRow>(
            r#"
            SELECT id, name, full_name, owner, avatar_url, description, html_url,
                   hackathon_id, total_commits, commits_today, issues_open,
                   issues_closed, issues_completion_rate, pull_requests_merged,
                   last_commit_time, code_additions, code_deletions, updated_at
            FROM team_stats
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        match row {
            Some(row) => Ok(Some(self.assemble(row).await?)),
            None => Ok(None),
        }
    }

    async fn save(&self, stats: &TeamStats) -> Result<(), AppError> {
        let updated_at = stats.updated_at.unwrap_or_else(Utc::now);

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT OR REPLACE INTO team_stats (
                id, name, full_name, owner, avatar_url, description, html_url,
                hackathon_id, total_commits, commits_today, issues_open,
                issues_closed, issues_completion_rate, pull_requests_merged,
                last_commit_time, code_additions, code_deletions, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18)
            "#,
        )
        .bind(stats.id)
        .bind(&stats.name)
        .bind(&stats.full_name)
        .bind(&stats.owner)
        .bind(&stats.avatar_url)
        .bind(&stats.description)
        .bind(&stats.html_url)
        .bind(&stats.hackathon_id)
        .bind(stats.total_commits)
        .bind(stats.commits_today)
        .bind(stats.issues_open)
        .bind(stats.issues_closed)
        .bind(stats.issues_completion_rate)
        .bind(stats.pull_requests_merged)
        .bind(stats.last_commit_time)
        .bind(stats.code_additions)
        .bind(stats.code_deletions)
        .bind(updated_at)
        .execute(&mut *tx)
        .await?;

        // Children are rewritten wholesale to match the new record.
        sqlx::query("DELETE FROM contributors WHERE team_id = ?1")
            .bind(stats.id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM commits_timeline WHERE team_id = ?1")
            .bind(stats.id)
            .execute(&mut *tx)
            .await?;

        for contributor in &stats.contributors {
            sqlx::query(
                r#"
                INSERT INTO contributors (team_id, login, avatar_url, commits, additions, deletions)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
            )
            .bind(stats.id)
            .bind(&contributor.login)
            .bind(&contributor.avatar_url)
            .bind(contributor.commits)
            .bind(contributor.additions)
            .bind(contributor.deletions)
            .execute(&mut *tx)
            .await?;
        }

        for day in &stats.commits_over_time {
            sqlx::query(
                r#"
                INSERT INTO commits_timeline (team_id, date, commits, additions, deletions)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )
            .bind(stats.id)
            .bind(day.date)
            .bind(day.commits)
            .bind(day.additions)
            .bind(day.deletions)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(())
    }
}
