//! Configuration entities: hackathons, tracked repositories, and the team
//! roster. The stats core consumes these only as a source of repository URLs.

use chrono::{DateTime, NaiveDate, Utc};

/// A hackathon event grouping tracked repositories and roster teams.
#[derive(Debug, Clone)]
pub struct Hackathon {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

/// Input data for creating a hackathon.
#[derive(Debug, Clone)]
pub struct NewHackathon {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// A repository URL registered for statistics polling.
#[derive(Debug, Clone)]
pub struct TrackedRepository {
    pub id: i64,
    pub hackathon_id: Option<String>,
    pub url: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

/// Input data for registering a repository.
#[derive(Debug, Clone)]
pub struct NewRepository {
    pub hackathon_id: Option<String>,
    pub url: String,
    pub name: Option<String>,
    pub description: Option<String>,
}

/// A roster team, distinct from the cached [`super::TeamStats`] record.
#[derive(Debug, Clone)]
pub struct Team {
    pub id: i64,
    pub hackathon_id: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub color: Option<String>,
}

/// Input data for creating a roster team.
#[derive(Debug, Clone)]
pub struct NewTeam {
    pub hackathon_id: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub color: Option<String>,
}

/// A person on a roster team.
#[derive(Debug, Clone)]
pub struct Member {
    pub id: i64,
    pub team_id: i64,
    pub name: String,
    pub github_username: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
}

/// Input data for adding a member to a team.
#[derive(Debug, Clone)]
pub struct NewMember {
    pub team_id: i64,
    pub name: String,
    pub github_username: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
}

/// A roster team together with its members.
#[derive(Debug, Clone)]
pub struct TeamWithMembers {
    pub team: Team,
    pub members: Vec<Member>,
}

/// A hackathon together with its tracked repositories and roster.
#[derive(Debug, Clone)]
pub struct HackathonDetail {
    pub hackathon: Hackathon,
    pub repositories: Vec<TrackedRepository>,
    pub teams: Vec<TeamWithMembers>,
}
