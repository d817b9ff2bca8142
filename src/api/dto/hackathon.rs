//! DTOs for hackathon, repository and roster configuration endpoints.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::{
    Hackathon, HackathonDetail, Member, Team, TeamWithMembers, TrackedRepository,
};

/// Request to create a hackathon. The id is caller-provided so the
/// dashboard can use its own slug.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateHackathonRequest {
    #[validate(length(min = 1, max = 64))]
    pub id: String,

    #[validate(length(min = 1, max = 200))]
    pub name: String,

    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Request to register a repository URL under a hackathon.
#[derive(Debug, Deserialize, Validate)]
pub struct AddRepositoryRequest {
    #[validate(length(min = 1))]
    pub url: String,

    pub name: Option<String>,
    pub description: Option<String>,
}

/// Request to create a roster team.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTeamRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,

    pub description: Option<String>,
    pub color: Option<String>,
}

/// Request to add a member to a roster team.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddMemberRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,

    pub github_username: Option<String>,

    #[validate(email)]
    pub email: Option<String>,

    pub role: Option<String>,
}

/// Individual hackathon information.
#[derive(Debug, Serialize)]
pub struct HackathonItem {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl From<Hackathon> for HackathonItem {
    fn from(h: Hackathon) -> Self {
        HackathonItem {
            id: h.id,
            name: h.name,
            description: h.description,
            start_date: h.start_date,
            end_date: h.end_date,
            created_at: h.created_at,
        }
    }
}

/// Response containing list of hackathons.
#[derive(Debug, Serialize)]
pub struct HackathonListResponse {
    pub items: Vec<HackathonItem>,
}

/// Individual tracked repository information.
#[derive(Debug, Serialize)]
pub struct RepositoryItem {
    pub id: i64,
    pub hackathon_id: Option<String>,
    pub url: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<TrackedRepository> for RepositoryItem {
    fn from(r: TrackedRepository) -> Self {
        RepositoryItem {
            id: r.id,
            hackathon_id: r.hackathon_id,
            url: r.url,
            name: r.name,
            description: r.description,
            active: r.active,
            created_at: r.created_at,
        }
    }
}

/// Individual member information.
#[derive(Debug, Serialize)]
pub struct MemberItem {
    pub id: i64,
    pub team_id: i64,
    pub name: String,
    pub github_username: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
}

impl From<Member> for MemberItem {
    fn from(m: Member) -> Self {
        MemberItem {
            id: m.id,
            team_id: m.team_id,
            name: m.name,
            github_username: m.github_username,
            email: m.email,
            role: m.role,
        }
    }
}

/// Roster team with its members.
#[derive(Debug, Serialize)]
pub struct TeamItem {
    pub id: i64,
    pub hackathon_id: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub color: Option<String>,
    pub members: Vec<MemberItem>,
}

impl From<Team> for TeamItem {
    fn from(t: Team) -> Self {
        TeamItem {
            id: t.id,
            hackathon_id: t.hackathon_id,
            name: t.name,
            description: t.description,
            color: t.color,
            members: vec![],
        }
    }
}

impl From<TeamWithMembers> for TeamItem {
    fn from(t: TeamWithMembers) -> Self {
        let mut item: TeamItem = t.team.into();
        item.members = t.members.into_iter().map(Into::into).collect();
        item
    }
}

/// Hackathon with its repositories and roster.
#[derive(Debug, Serialize)]
pub struct HackathonDetailResponse {
    #[serde(flatten)]
    pub hackathon: HackathonItem,
    pub repositories: Vec<RepositoryItem>,
    pub teams: Vec<TeamItem>,
}

impl From<HackathonDetail> for HackathonDetailResponse {
    fn from(d: HackathonDetail) -> Self {
        HackathonDetailResponse {
            hackathon: d.hackathon.into(),
            repositories: d.repositories.into_iter().map(Into::into).collect(),
            teams: d.teams.into_iter().map(Into::into).collect(),
        }
    }
}
