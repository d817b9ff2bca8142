//! Handlers for team statistics endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::api::dto::refresh::RefreshResponse;
use crate::api::dto::team::{TeamStatsResponse, TeamsQueryParams};
use crate::error::AppError;
use crate::state::AppState;

/// Returns cached-or-fresh statistics for every configured repository.
///
/// # Endpoint
///
/// `GET /api/teams`
///
/// # Query Parameters
///
/// - `hackathon_id` (optional): restricts results and the polled repository
///   set to one hackathon
///
/// # Caching
///
/// If the newest persisted record is younger than the freshness window the
/// whole persisted set is returned without touching GitHub. Otherwise every
/// configured repository is refreshed in parallel; repositories that fail
/// are omitted from the response while their stale records stay persisted.
///
/// # Response
///
/// Records ordered by `commits_today` descending, then `total_commits`
/// descending. An empty repository configuration yields `[]`.
pub async fn teams_handler(
    State(state): State<AppState>,
    Query(params): Query<TeamsQueryParams>,
) -> Result<Json<Vec<TeamStatsResponse>>, AppError> {
    let hackathon_id = params.hackathon_id.as_deref();

    let repo_urls = state
        .config_service
        .configured_repositories(hackathon_id)
        .await?;

    let stats = state
        .stats_service
        .team_stats(hackathon_id, &repo_urls)
        .await?;

    Ok(Json(stats.into_iter().map(Into::into).collect()))
}

/// Returns one cached statistics record.
///
/// # Endpoint
///
/// `GET /api/teams/{id}`
///
/// `id` is the upstream repository id.
///
/// # Errors
///
/// Returns 404 Not Found if no record exists for the id.
pub async fn team_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<TeamStatsResponse>, AppError> {
    let stats = state.stats_service.team_by_id(id).await?;
    Ok(Json(stats.into()))
}

/// Forces a cache-bypassing refresh of every configured repository.
///
/// # Endpoint
///
/// `POST /api/teams/refresh`
///
/// # Response
///
/// Reports the refreshed count and, per failed repository, its URL and the
/// failure message. Partial failure is a 200: the endpoint degrades
/// gracefully rather than failing the batch.
pub async fn refresh_teams_handler(
    State(state): State<AppState>,
) -> Result<Json<RefreshResponse>, AppError> {
    let repo_urls = state.config_service.configured_repositories(None).await?;

    if repo_urls.is_empty() {
        return Ok(Json(RefreshResponse {
            message: "No repositories configured".to_string(),
            refreshed: 0,
            failed: vec![],
        }));
    }

    let outcomes = state.stats_service.refresh(None, &repo_urls).await;

    Ok(Json(RefreshResponse::from_outcomes(outcomes)))
}
