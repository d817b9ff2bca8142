//! Handlers for roster teams, members and repository assignments.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::hackathon::{AddMemberRequest, CreateTeamRequest, MemberItem, TeamItem};
use crate::domain::entities::{NewMember, NewTeam};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a roster team under a hackathon.
///
/// # Endpoint
///
/// `POST /api/hackathons/{id}/teams`
///
/// # Errors
///
/// Returns 400 if the payload is invalid.
pub async fn create_team_handler(
    State(state): State<AppState>,
    Path(hackathon_id): Path<String>,
    Json(payload): Json<CreateTeamRequest>,
) -> Result<(StatusCode, Json<TeamItem>), AppError> {
    payload.validate()?;

    let team = state
        .config_service
        .add_team(NewTeam {
            hackathon_id: Some(hackathon_id),
            name: payload.name,
            description: payload.description,
            color: payload.color,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(team.into())))
}

/// Deletes a roster team and its members.
///
/// Distinct from `GET /api/teams/{id}`, which addresses the cached
/// statistics record for a repository.
///
/// # Endpoint
///
/// `DELETE /api/teams/{id}`
///
/// # Errors
///
/// Returns 404 if the team does not exist.
pub async fn delete_team_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.config_service.delete_team(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Adds a member to a roster team.
///
/// # Endpoint
///
/// `POST /api/teams/{id}/members`
///
/// # Errors
///
/// Returns 400 if the payload is invalid or the team does not exist.
pub async fn add_member_handler(
    State(state): State<AppState>,
    Path(team_id): Path<i64>,
    Json(payload): Json<AddMemberRequest>,
) -> Result<(StatusCode, Json<MemberItem>), AppError> {
    payload.validate()?;

    let member = state
        .config_service
        .add_member(NewMember {
            team_id,
            name: payload.name,
            github_username: payload.github_username,
            email: payload.email,
            role: payload.role,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(member.into())))
}

/// Removes a member.
///
/// # Endpoint
///
/// `DELETE /api/members/{id}`
///
/// # Errors
///
/// Returns 404 if the member does not exist.
pub async fn delete_member_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.config_service.delete_member(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Assigns a tracked repository to a roster team.
///
/// Assigning twice is a no-op.
///
/// # Endpoint
///
/// `POST /api/teams/{team_id}/repositories/{repo_id}`
pub async fn assign_repository_handler(
    State(state): State<AppState>,
    Path((team_id, repo_id)): Path<(i64, i64)>,
) -> Result<StatusCode, AppError> {
    state
        .config_service
        .assign_repository(team_id, repo_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Removes a team-repository assignment.
///
/// # Endpoint
///
/// `DELETE /api/teams/{team_id}/repositories/{repo_id}`
pub async fn unassign_repository_handler(
    State(state): State<AppState>,
    Path((team_id, repo_id)): Path<(i64, i64)>,
) -> Result<StatusCode, AppError> {
    state
        .config_service
        .unassign_repository(team_id, repo_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
