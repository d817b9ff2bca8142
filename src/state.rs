//! Shared application state injected into every handler.

use sqlx::SqlitePool;
use std::sync::Arc;

use crate::application::services::{ConfigService, TeamStatsService};
use crate::infrastructure::github::GitHubClient;
use crate::infrastructure::persistence::{
    SqliteHackathonRepository, SqliteRepoConfigRepository, SqliteStatsRepository,
};

/// Application state: the wired services plus the raw pool for health checks.
///
/// Constructed once in [`crate::server::run`] (or by tests) and cloned into
/// handlers; there is no process-wide global.
#[derive(Clone)]
pub struct AppState {
    pub stats_service: Arc<TeamStatsService<SqliteStatsRepository, GitHubClient>>,
    pub config_service: Arc<ConfigService<SqliteHackathonRepository, SqliteRepoConfigRepository>>,
    pub db: Arc<SqlitePool>,
}
