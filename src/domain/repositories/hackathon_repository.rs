//! Repository trait for hackathons and the team roster.

use crate::domain::entities::{
    Hackathon, Member, NewHackathon, NewMember, NewTeam, Team, TeamWithMembers,
};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for hackathon events and their roster
/// (teams, members, team-repository assignments).
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::SqliteHackathonRepository`] - SQLite implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HackathonRepository: Send + Sync {
    /// Creates a hackathon with a caller-provided id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the id is already taken.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_hackathon: NewHackathon) -> Result<Hackathon, AppError>;

    /// Lists all hackathons, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(&self) -> Result<Vec<Hackathon>, AppError>;

    /// Finds a hackathon by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: &str) -> Result<Option<Hackathon>, AppError>;

    /// Deletes a hackathon and, via cascade, its repositories, teams and
    /// members.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the hackathon does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, id: &str) -> Result<(), AppError>;

    /// Adds a roster team.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn add_team(&self, new_team: NewTeam) -> Result<Team, AppError>;

    /// Deletes a roster team and its members.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the team does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete_team(&self, id: i64) -> Result<(), AppError>;

    /// Roster teams of one hackathon, each with its members.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn teams_for_hackathon(
        &self,
        hackathon_id: &str,
    ) -> Result<Vec<TeamWithMembers>, AppError>;

    /// Adds a member to a roster team.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the team does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    async fn add_member(&self, new_member: NewMember) -> Result<Member, AppError>;

    /// Removes a member.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the member does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete_member(&self, id: i64) -> Result<(), AppError>;

    /// Assigns a tracked repository to a roster team.
    ///
    /// Assigning twice is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn assign_repository(&self, team_id: i64, repository_id: i64) -> Result<(), AppError>;

    /// Removes a team-repository assignment.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn unassign_repository(&self, team_id: i64, repository_id: i64) -> Result<(), AppError>;
}
