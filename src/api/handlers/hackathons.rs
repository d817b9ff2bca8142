//! Handlers for hackathon management endpoints.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::hackathon::{
    CreateHackathonRequest, HackathonDetailResponse, HackathonItem, HackathonListResponse,
};
use crate::domain::entities::NewHackathon;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a hackathon.
///
/// # Endpoint
///
/// `POST /api/hackathons`
///
/// # Errors
///
/// Returns 400 if the payload is invalid.
/// Returns 409 if the id is already taken.
pub async fn create_hackathon_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateHackathonRequest>,
) -> Result<(StatusCode, Json<HackathonItem>), AppError> {
    payload.validate()?;

    let hackathon = state
        .config_service
        .create_hackathon(NewHackathon {
            id: payload.id,
            name: payload.name,
            description: payload.description,
            start_date: payload.start_date,
            end_date: payload.end_date,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(hackathon.into())))
}

/// Lists all hackathons, newest first.
///
/// # Endpoint
///
/// `GET /api/hackathons`
pub async fn hackathon_list_handler(
    State(state): State<AppState>,
) -> Result<Json<HackathonListResponse>, AppError> {
    let hackathons = state.config_service.list_hackathons().await?;

    Ok(Json(HackathonListResponse {
        items: hackathons.into_iter().map(Into::into).collect(),
    }))
}

/// Returns a hackathon with its repositories and roster teams.
///
/// # Endpoint
///
/// `GET /api/hackathons/{id}`
///
/// # Errors
///
/// Returns 404 if the hackathon does not exist.
pub async fn hackathon_detail_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<HackathonDetailResponse>, AppError> {
    let detail = state.config_service.hackathon_detail(&id).await?;
    Ok(Json(detail.into()))
}

/// Deletes a hackathon and, via cascade, its repositories, teams and members.
///
/// # Endpoint
///
/// `DELETE /api/hackathons/{id}`
///
/// # Errors
///
/// Returns 404 if the hackathon does not exist.
pub async fn delete_hackathon_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.config_service.delete_hackathon(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
