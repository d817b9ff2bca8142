//! Handlers for tracked-repository management endpoints.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::hackathon::{AddRepositoryRequest, RepositoryItem};
use crate::domain::entities::NewRepository;
use crate::error::AppError;
use crate::state::AppState;

/// Registers a repository URL under a hackathon.
///
/// # Endpoint
///
/// `POST /api/hackathons/{id}/repositories`
///
/// # Errors
///
/// Returns 400 if the URL does not carry an `owner/name` path.
/// Returns 409 if the URL is already registered.
pub async fn add_repository_handler(
    State(state): State<AppState>,
    Path(hackathon_id): Path<String>,
    Json(payload): Json<AddRepositoryRequest>,
) -> Result<(StatusCode, Json<RepositoryItem>), AppError> {
    payload.validate()?;

    let repository = state
        .config_service
        .add_repository(NewRepository {
            hackathon_id: Some(hackathon_id),
            url: payload.url,
            name: payload.name,
            description: payload.description,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(repository.into())))
}

/// Removes a tracked repository.
///
/// Cached statistics for the repository are left in place; they simply stop
/// being refreshed.
///
/// # Endpoint
///
/// `DELETE /api/repositories/{id}`
///
/// # Errors
///
/// Returns 404 if the repository does not exist.
pub async fn delete_repository_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.config_service.delete_repository(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
