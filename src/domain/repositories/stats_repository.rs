//! Repository trait for cached team statistics.

use crate::domain::entities::TeamStats;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the persisted statistics cache.
///
/// Records are keyed by the upstream repository id; `save` replaces the
/// whole record (team row plus contributor and timeline children) for that
/// identity. Reads surface records ordered by `commits_today` descending,
/// then `total_commits` descending.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::SqliteStatsRepository`] - SQLite implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_stats.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatsRepository: Send + Sync {
    /// Loads every persisted record, optionally scoped to one hackathon,
    /// ordered by `commits_today` DESC then `total_commits` DESC.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn get_all<'a>(&self, hackathon_id: Option<&'a str>) -> Result<Vec<TeamStats>, AppError>;

    /// Loads one record by repository id.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(stats))` if a record exists
    /// - `Ok(None)` otherwise
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn get_by_id(&self, id: i64) -> Result<Option<TeamStats>, AppError>;

    /// Persists a record, replacing any prior record with the same
    /// repository id. Contributor and timeline rows are rewritten to match
    /// the given record exactly.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn save(&self, stats: &TeamStats) -> Result<(), AppError>;
}
