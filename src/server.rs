//! HTTP server initialization and runtime setup.
//!
//! Handles database connection, migrations, GitHub client construction,
//! service wiring and the Axum server lifecycle.

use crate::application::services::{ConfigService, TeamStatsService};
use crate::config::Config;
use crate::infrastructure::github::GitHubClient;
use crate::infrastructure::persistence::{
    SqliteHackathonRepository, SqliteRepoConfigRepository, SqliteStatsRepository,
};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::sqlite::SqlitePoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - SQLite connection pool
/// - Schema migrations
/// - GitHub client (optional bearer token, per-request deadline)
/// - Application services
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = SqlitePoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect(&config.database_url)
        .await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations").run(&pool).await?;

    let pool = Arc::new(pool);
    let stats_repository = Arc::new(SqliteStatsRepository::new(pool.clone()));
    let hackathon_repository = Arc::new(SqliteHackathonRepository::new(pool.clone()));
    let repo_config_repository = Arc::new(SqliteRepoConfigRepository::new(pool.clone()));

    let github = Arc::new(GitHubClient::new(
        config.github_api_url.as_str(),
        config.github_token.clone(),
        Duration::from_secs(config.github_fetch_timeout_secs),
    )?);

    let stats_service = Arc::new(TeamStatsService::new(
        stats_repository,
        github,
        chrono::Duration::seconds(config.stats_freshness_secs as i64),
    ));
    let config_service = Arc::new(ConfigService::new(
        hackathon_repository,
        repo_config_repository,
        config.github_repositories.clone(),
    ));

    let state = AppState {
        stats_service,
        config_service,
        db: pool,
    };

    let app = app_router(state, &config.cors_origins);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service(app),
    )
    .await?;

    Ok(())
}
