//! SQLite implementation of the hackathon and roster repository.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::json;
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::domain::entities::{
    Hackathon, Member, NewHackathon, NewMember, NewTeam, Team, TeamWithMembers,
};
use crate::domain::repositories::HackathonRepository;
use crate::error::AppError;

/// SQLite repository for hackathons, roster teams, members and
/// team-repository assignments.
pub struct SqliteHackathonRepository {
    pool: Arc<SqlitePool>,
}

#[derive(sqlx::FromRow)]
struct HackathonRow {
    id: String,
    name: String,
    description: Option<String>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    created_at: DateTime<Utc>,
}

impl From<HackathonRow> for Hackathon {
    fn from(row: HackathonRow) -> Self {
        Hackathon {
            id: row.id,
            name: row.name,
            description: row.description,
            start_date: row.start_date,
            end_date: row.end_date,
            created_at: row.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct TeamRow {
    id: i64,
    hackathon_id: Option<String>,
    name: String,
    description: Option<String>,
    color: Option<String>,
}

impl From<TeamRow> for Team {
    fn from(row: TeamRow) -> Self {
        Team {
            id: row.id,
            hackathon_id: row.hackathon_id,
            name: row.name,
            description: row.description,
            color: row.color,
        }
    }
}

#[derive(sqlx::FromRow)]
struct MemberRow {
    id: i64,
    team_id: i64,
    name: String,
    github_username: Option<String>,
    email: Option<String>,
    role: Option<String>,
}

impl From<MemberRow> for Member {
    fn from(row: MemberRow) -> Self {
        Member {
            id: row.id,
            team_id: row.team_id,
            name: row.name,
            github_username: row.github_username,
            email: row.email,
            role: row.role,
        }
    }
}

impl SqliteHackathonRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HackathonRepository for SqliteHackathonRepository {
    async fn create(&self, new_hackathon: NewHackathon) -> Result<Hackathon, AppError> {
        sqlx::query(
            r#"
            INSERT INTO hackathons (id, name, description, start_date, end_date)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&new_hackathon.id)
        .bind(&new_hackathon.name)
        .bind(&new_hackathon.description)
        .bind(new_hackathon.start_date)
        .bind(new_hackathon.end_date)
        .execute(self.pool.as_ref())
        .await
        .map_err(|e| {
            if e.as_database_error()
                .is_some_and(|db| db.is_unique_violation())
            {
                AppError::conflict(
                    "Hackathon already exists",
                    json!({ "id": new_hackathon.id.clone() }),
                )
            } else {
                e.into()
            }
        })?;

        let row = sqlx::query_as::<_, HackathonRow>(
            r#"
            SELECT id, name, description, start_date, end_date, created_at
            FROM hackathons WHERE id = ?1
            "#,
        )
        .bind(&new_hackathon.id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn list(&self) -> Result<Vec<Hackathon>, AppError> {
        let rows = sqlx::query_as::<_, HackathonRow>(
            r#"
            SELECT id, name, description, start_date, end_date, created_at
            FROM hackathons ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Hackathon>, AppError> {
        let row = sqlx::query_as::<_, HackathonRow>(
            r#"
            SELECT id, name, description, start_date, end_date, created_at
            FROM hackathons WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM hackathons WHERE id = ?1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                "Hackathon not found",
                json!({ "id": id }),
            ));
        }

        Ok(())
    }

    async fn add_team(&self, new_team: NewTeam) -> Result<Team, AppError> {
        let result = sqlx::query(
            r#"
            INSERT INTO teams (hackathon_id, name, description, color)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&new_team.hackathon_id)
        .bind(&new_team.name)
        .bind(&new_team.description)
        .bind(&new_team.color)
        .execute(self.pool.as_ref())
        .await?;

        Ok(Team {
            id: result.last_insert_rowid(),
            hackathon_id: new_team.hackathon_id,
            name: new_team.name,
            description: new_team.description,
            color: new_team.color,
        })
    }

    async fn delete_team(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM teams WHERE id = ?1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Team not found", json!({ "id": id })));
        }

        Ok(())
    }

    async fn teams_for_hackathon(
        &self,
        hackathon_id: &str,
    ) -> Result<Vec<TeamWithMembers>, AppError> {
        let team_rows = sqlx::query_as::<_, TeamRow>(
            r#"
            SELECT id, hackathon_id, name, description, color
            FROM teams WHERE hackathon_id = ?1
            ORDER BY id ASC
            "#,
        )
        .bind(hackathon_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        let mut teams = Vec::with_capacity(team_rows.len());
        for row in team_rows {
            let members = sqlx::query_as::<_, MemberRow>(
                r#"
                SELECT id, team_id, name, github_username, email, role
                FROM members WHERE team_id = ?1
                ORDER BY id ASC
                "#,
            )
            .bind(row.id)
            .fetch_all(self.pool.as_ref())
            .await?;

            teams.push(TeamWithMembers {
                team: row.into(),
                members: members.into_iter().map(Into::into).collect(),
            });
        }

        Ok(teams)
    }

    async fn add_member(&self, new_member: NewMember) -> Result<Member, AppError> {
        let team_exists =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM teams WHERE id = ?1")
                .bind(new_member.team_id)
                .fetch_one(self.pool.as_ref())
                .await?;

        if team_exists == 0 {
            return Err(AppError::bad_request(
                "Team does not exist",
                json!({ "team_id": new_member.team_id }),
            ));
        }

        let result = sqlx::query(
            r#"
            INSERT INTO members (team_id, name, github_username, email, role)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(new_member.team_id)
        .bind(&new_member.name)
        .bind(&new_member.github_username)
        .bind(&new_member.email)
        .bind(&new_member.role)
        .execute(self.pool.as_ref())
        .await?;

        Ok(Member {
            id: result.last_insert_rowid(),
            team_id: new_member.team_id,
            name: new_member.name,
            github_username: new_member.github_username,
            email: new_member.email,
            role: new_member.role,
        })
    }

    async fn delete_member(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM members WHERE id = ?1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Member not found", json!({ "id": id })));
        }

        Ok(())
    }

    async fn assign_repository(&self, team_id: i64, repository_id: i64) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT OR IGNORE INTO team_repositories (team_id, repository_id)
            VALUES (?1, ?2)
            "#,
        )
        .bind(team_id)
        .bind(repository_id)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn unassign_repository(&self, team_id: i64, repository_id: i64) -> Result<(), AppError> {
        sqlx::query(
            "DELETE FROM team_repositories WHERE team_id = ?1 AND repository_id = ?2",
        )
        .bind(team_id)
        .bind(repository_id)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }
}
