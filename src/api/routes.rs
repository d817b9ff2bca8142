//! API route configuration.

use crate::api::handlers::{
    add_member_handler, add_repository_handler, assign_repository_handler,
    create_hackathon_handler, create_team_handler, delete_hackathon_handler,
    delete_member_handler, delete_repository_handler, delete_team_handler,
    hackathon_detail_handler, hackathon_list_handler, refresh_teams_handler, team_handler,
    teams_handler, unassign_repository_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post},
};

/// All API routes.
///
/// # Endpoints
///
/// - `GET    /teams`                    - Cached-or-fresh statistics for all configured repositories
/// - `GET    /teams/{id}`               - One cached statistics record
/// - `POST   /teams/refresh`            - Cache-bypassing refresh cycle
/// - `DELETE /teams/{id}`               - Delete a roster team
/// - `POST   /teams/{id}/members`       - Add a member to a roster team
/// - `POST   /teams/{tid}/repositories/{rid}`   - Assign a repository to a team
/// - `DELETE /teams/{tid}/repositories/{rid}`   - Remove an assignment
/// - `DELETE /members/{id}`             - Remove a member
/// - `GET    /hackathons`               - List hackathons
/// - `POST   /hackathons`               - Create a hackathon
/// - `GET    /hackathons/{id}`          - Hackathon with repositories and roster
/// - `DELETE /hackathons/{id}`          - Delete a hackathon
/// - `POST   /hackathons/{id}/repositories` - Register a repository URL
/// - `POST   /hackathons/{id}/teams`    - Create a roster team
/// - `DELETE /repositories/{id}`        - Remove a tracked repository
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/teams", get(teams_handler))
        .route("/teams/refresh", post(refresh_teams_handler))
        .route(
            "/teams/{id}",
            get(team_handler).delete(delete_team_handler),
        )
        .route("/teams/{id}/members", post(add_member_handler))
        .route(
            "/teams/{team_id}/repositories/{repo_id}",
            post(assign_repository_handler).delete(unassign_repository_handler),
        )
        .route("/members/{id}", delete(delete_member_handler))
        .route(
            "/hackathons",
            get(hackathon_list_handler).post(create_hackathon_handler),
        )
        .route(
            "/hackathons/{id}",
            get(hackathon_detail_handler).delete(delete_hackathon_handler),
        )
        .route("/hackathons/{id}/repositories", post(add_repository_handler))
        .route("/hackathons/{id}/teams", post(create_team_handler))
        .route("/repositories/{id}", delete(delete_repository_handler))
}
