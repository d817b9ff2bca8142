//! SQLite implementation of the tracked-repository configuration repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::domain::entities::{NewRepository, TrackedRepository};
use crate::domain::repositories::RepoConfigRepository;
use crate::error::AppError;

/// SQLite repository for the repository URLs the dashboard polls.
pub struct SqliteRepoConfigRepository {
    pool: Arc<SqlitePool>,
}

#[derive(sqlx::FromRow)]
struct RepositoryRow {
    id: i64,
    hackathon_id: Option<String>,
    url: String,
    name: Option<String>,
    description: Option<String>,
    active: bool,
    created_at: DateTime<Utc>,
}

impl From<RepositoryRow> for TrackedRepository {
    fn from(row: RepositoryRow) -> Self {
        TrackedRepository {
            id: row.id,
            hackathon_id: row.hackathon_id,
            url: row.url,
            name: row.name,
            description: row.description,
            active: row.active,
            created_at: row.created_at,
        }
    }
}

impl SqliteRepoConfigRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RepoConfigRepository for SqliteRepoConfigRepository {
    async fn add(&self, new_repo: NewRepository) -> Result<TrackedRepository, AppError> {
        let result = sqlx::query(
            r#"
            INSERT INTO repositories (hackathon_id, url, name, description)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&new_repo.hackathon_id)
        .bind(&new_repo.url)
        .bind(&new_repo.name)
        .bind(&new_repo.description)
        .execute(self.pool.as_ref())
        .await
        .map_err(|e| {
            if e.as_database_error()
                .is_some_and(|db| db.is_unique_violation())
            {
                AppError::conflict(
                    "Repository already registered",
                    json!({ "url": new_repo.url.clone() }),
                )
            } else {
                e.into()
            }
        })?;

        let id = result.last_insert_rowid();

        let row = sqlx::query_as::<_, RepositoryRow>(
            r#"
            SELECT id, hackathon_id, url, name, description, active, created_at
            FROM repositories WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM repositories WHERE id = ?1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                "Repository not found",
                json!({ "id": id }),
            ));
        }

        Ok(())
    }

    async fn active_urls(&self) -> Result<Vec<String>, AppError> {
        let urls = sqlx::query_scalar::<_, String>(
            "SELECT url FROM repositories WHERE active = 1 ORDER BY id ASC",
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(urls)
    }

    async fn active_urls_for_hackathon(
        &self,
        hackathon_id: &str,
    ) -> Result<Vec<String>, AppError> {
        let urls = sqlx::query_scalar::<_, String>(
            r#"
            SELECT url FROM repositories
            WHERE active = 1 AND hackathon_id = ?1
            ORDER BY id ASC
            "#,
        )
        .bind(hackathon_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(urls)
    }

    async fn list_for_hackathon(
        &self,
        hackathon_id: &str,
    ) -> Result<Vec<TrackedRepository>, AppError> {
        let rows = sqlx::query_as::<_, RepositoryRow>(
            r#"
            SELECT id, hackathon_id, url, name, description, active, created_at
            FROM repositories WHERE hackathon_id = ?1
            ORDER BY id ASC
            "#,
        )
        .bind(hackathon_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
