//! Repository trait for tracked-repository configuration.

use crate::domain::entities::{NewRepository, TrackedRepository};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the repository URLs the dashboard polls.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::SqliteRepoConfigRepository`] - SQLite implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_config.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RepoConfigRepository: Send + Sync {
    /// Registers a repository URL for polling.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the URL is already registered.
    /// Returns [`AppError::Internal`] on database errors.
    async fn add(&self, new_repo: NewRepository) -> Result<TrackedRepository, AppError>;

    /// Removes a tracked repository. Cached statistics for the repository
    /// are left untouched; they age out of the dashboard with the cache.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the repository does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, id: i64) -> Result<(), AppError>;

    /// URLs of every active tracked repository, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn active_urls(&self) -> Result<Vec<String>, AppError>;

    /// URLs of the active repositories registered under one hackathon.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn active_urls_for_hackathon(&self, hackathon_id: &str)
    -> Result<Vec<String>, AppError>;

    /// Tracked repositories registered under one hackathon.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_for_hackathon(
        &self,
        hackathon_id: &str,
    ) -> Result<Vec<TrackedRepository>, AppError>;
}
