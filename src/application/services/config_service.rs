//! Configuration service: hackathons, tracked repositories, and the roster.
//!
//! The stats core consumes this service only through
//! [`ConfigService::configured_repositories`].

use serde_json::json;
use std::sync::Arc;

use crate::domain::entities::{
    Hackathon, HackathonDetail, Member, NewHackathon, NewMember, NewRepository, NewTeam, RepoRef,
    Team, TrackedRepository,
};
use crate::domain::repositories::{HackathonRepository, RepoConfigRepository};
use crate::error::AppError;

/// Demo repositories served when nothing is configured anywhere.
const FALLBACK_REPOSITORIES: [&str; 3] = [
    "https://github.com/vercel/next.js",
    "https://github.com/facebook/react",
    "https://github.com/microsoft/vscode",
];

/// Service managing configuration data and resolving the repository URL
/// list the aggregation fan-out runs over.
pub struct ConfigService<H: HackathonRepository, C: RepoConfigRepository> {
    hackathons: Arc<H>,
    repositories: Arc<C>,
    /// Repository URLs from the `GITHUB_REPOSITORIES` environment value,
    /// injected at startup.
    env_repositories: Option<Vec<String>>,
}

impl<H: HackathonRepository, C: RepoConfigRepository> ConfigService<H, C> {
    /// Creates a new configuration service.
    pub fn new(
        hackathons: Arc<H>,
        repositories: Arc<C>,
        env_repositories: Option<Vec<String>>,
    ) -> Self {
        Self {
            hackathons,
            repositories,
            env_repositories,
        }
    }

    /// Resolves the repository URLs to poll.
    ///
    /// Hackathon-scoped requests use only that hackathon's active
    /// repositories. Unscoped requests resolve with priority: active
    /// database rows, then the environment list, then the demo fallback.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn configured_repositories(
        &self,
        hackathon_id: Option<&str>,
    ) -> Result<Vec<String>, AppError> {
        if let Some(id) = hackathon_id {
            return self.repositories.active_urls_for_hackathon(id).await;
        }

        let db_urls = self.repositories.active_urls().await?;
        if !db_urls.is_empty() {
            return Ok(db_urls);
        }

        if let Some(env_urls) = &self.env_repositories
            && !env_urls.is_empty()
        {
            return Ok(env_urls.clone());
        }

        Ok(FALLBACK_REPOSITORIES
            .iter()
            .map(|s| s.to_string())
            .collect())
    }

    /// Creates a hackathon.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the id is already taken.
    pub async fn create_hackathon(
        &self,
        new_hackathon: NewHackathon,
    ) -> Result<Hackathon, AppError> {
        self.hackathons.create(new_hackathon).await
    }

    /// Lists all hackathons, newest first.
    pub async fn list_hackathons(&self) -> Result<Vec<Hackathon>, AppError> {
        self.hackathons.list().await
    }

    /// Loads a hackathon with its repositories and roster.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the hackathon does not exist.
    pub async fn hackathon_detail(&self, id: &str) -> Result<HackathonDetail, AppError> {
        let hackathon = self
            .hackathons
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Hackathon not found", json!({ "id": id })))?;

        let repositories = self.repositories.list_for_hackathon(id).await?;
        let teams = self.hackathons.teams_for_hackathon(id).await?;

        Ok(HackathonDetail {
            hackathon,
            repositories,
            teams,
        })
    }

    /// Deletes a hackathon along with its repositories, teams and members.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the hackathon does not exist.
    pub async fn delete_hackathon(&self, id: &str) -> Result<(), AppError> {
        self.hackathons.delete(id).await
    }

    /// Registers a repository URL for polling.
    ///
    /// The URL must parse as a repository reference up front, so a typo is
    /// rejected here instead of surfacing later as a silent refresh failure.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidReference`] if the URL does not carry an
    /// `owner/name` path.
    /// Returns [`AppError::Conflict`] if the URL is already registered.
    pub async fn add_repository(
        &self,
        new_repo: NewRepository,
    ) -> Result<TrackedRepository, AppError> {
        RepoRef::parse(&new_repo.url)?;
        self.repositories.add(new_repo).await
    }

    /// Removes a tracked repository.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the repository does not exist.
    pub async fn delete_repository(&self, id: i64) -> Result<(), AppError> {
        self.repositories.delete(id).await
    }

    /// Adds a roster team.
    pub async fn add_team(&self, new_team: NewTeam) -> Result<Team, AppError> {
        self.hackathons.add_team(new_team).await
    }

    /// Deletes a roster team and its members.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the team does not exist.
    pub async fn delete_team(&self, id: i64) -> Result<(), AppError> {
        self.hackathons.delete_team(id).await
    }

    /// Adds a member to a roster team.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the team does not exist.
    pub async fn add_member(&self, new_member: NewMember) -> Result<Member, AppError> {
        self.hackathons.add_member(new_member).await
    }

    /// Removes a member.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the member does not exist.
    pub async fn delete_member(&self, id: i64) -> Result<(), AppError> {
        self.hackathons.delete_member(id).await
    }

    /// Assigns a tracked repository to a roster team.
    pub async fn assign_repository(
        &self,
        team_id: i64,
        repository_id: i64,
    ) -> Result<(), AppError> {
        self.hackathons
            .assign_repository(team_id, repository_id)
            .await
    }

    /// Removes a team-repository assignment.
    pub async fn unassign_repository(
        &self,
        team_id: i64,
        repository_id: i64,
    ) -> Result<(), AppError> {
        self.hackathons
            .unassign_repository(team_id, repository_id)
            .await
    }
}
