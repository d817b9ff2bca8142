//! REST API request handlers.

mod hackathons;
mod health;
mod repositories;
mod roster;
mod teams;

pub use hackathons::{
    create_hackathon_handler, delete_hackathon_handler, hackathon_detail_handler,
    hackathon_list_handler,
};
pub use health::health_handler;
pub use repositories::{add_repository_handler, delete_repository_handler};
pub use roster::{
    add_member_handler, assign_repository_handler, create_team_handler, delete_member_handler,
    delete_team_handler, unassign_repository_handler,
};
pub use teams::{refresh_teams_handler, team_handler, teams_handler};
