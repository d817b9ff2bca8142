#![allow(dead_code)]

use chrono::{Duration, Utc};
use sqlx::SqlitePool;
use std::sync::Arc;

use hacktion::application::services::{ConfigService, TeamStatsService};
use hacktion::infrastructure::github::GitHubClient;
use hacktion::infrastructure::persistence::{
    SqliteHackathonRepository, SqliteRepoConfigRepository, SqliteStatsRepository,
};
use hacktion::state::AppState;

pub const FRESHNESS_SECS: i64 = 300;

/// Builds an [`AppState`] over the given pool, with the GitHub client
/// pointed at `github_base_url` (a mock server, or an unroutable address in
/// tests that must not fetch).
pub fn create_test_state(pool: SqlitePool, github_base_url: &str) -> AppState {
    let pool = Arc::new(pool);

    let stats_repo = Arc::new(SqliteStatsRepository::new(pool.clone()));
    let hackathon_repo = Arc::new(SqliteHackathonRepository::new(pool.clone()));
    let repo_config_repo = Arc::new(SqliteRepoConfigRepository::new(pool.clone()));

    let github = Arc::new(
        GitHubClient::new(github_base_url, None, std::time::Duration::from_secs(5))
            .expect("test github client"),
    );

    let stats_service = Arc::new(TeamStatsService::new(
        stats_repo,
        github,
        Duration::seconds(FRESHNESS_SECS),
    ));
    let config_service = Arc::new(ConfigService::new(hackathon_repo, repo_config_repo, None));

    AppState {
        stats_service,
        config_service,
        db: pool,
    }
}

/// Inserts a cached statistics row whose refresh timestamp is `age_secs` in
/// the past.
pub async fn seed_team_stats(
    pool: &SqlitePool,
    id: i64,
    commits_today: i64,
    total_commits: i64,
    age_secs: i64,
) {
    let updated_at = Utc::now() - Duration::seconds(age_secs);

    sqlx::query(
        r#"
        INSERT INTO team_stats (
            id, name, full_name, owner, avatar_url, description, html_url,
            total_commits, commits_today, issues_open, issues_closed,
            issues_completion_rate, pull_requests_merged, code_additions,
            code_deletions, updated_at
        ) VALUES (?1, ?2, ?3, ?4, '', NULL, ?5, ?6, ?7, 0, 0, 0, 0, 0, 0, ?8)
        "#,
    )
    .bind(id)
    .bind(format!("repo{id}"))
    .bind(format!("owner{id}/repo{id}"))
    .bind(format!("owner{id}"))
    .bind(format!("https://github.com/owner{id}/repo{id}"))
    .bind(total_commits)
    .bind(commits_today)
    .bind(updated_at)
    .execute(pool)
    .await
    .unwrap();
}

pub async fn seed_contributor(pool: &SqlitePool, team_id: i64, login: &str, commits: i64) {
    sqlx::query(
        r#"
        INSERT INTO contributors (team_id, login, avatar_url, commits, additions, deletions)
        VALUES (?1, ?2, '', ?3, 0, 0)
        "#,
    )
    .bind(team_id)
    .bind(login)
    .bind(commits)
    .execute(pool)
    .await
    .unwrap();
}

pub async fn seed_hackathon(pool: &SqlitePool, id: &str, name: &str) {
    sqlx::query("INSERT INTO hackathons (id, name) VALUES (?1, ?2)")
        .bind(id)
        .bind(name)
        .execute(pool)
        .await
        .unwrap();
}

/// Registers a repository URL, optionally under a hackathon, returning its id.
pub async fn seed_repository(
    pool: &SqlitePool,
    url: &str,
    hackathon_id: Option<&str>,
) -> i64 {
    let result = sqlx::query(
        "INSERT INTO repositories (hackathon_id, url) VALUES (?1, ?2)",
    )
    .bind(hackathon_id)
    .bind(url)
    .execute(pool)
    .await
    .unwrap();

    result.last_insert_rowid()
}

pub async fn team_stats_total_commits(pool: &SqlitePool, id: i64) -> Option<i64> {
    sqlx::query_scalar("SELECT total_commits FROM team_stats WHERE id = ?1")
        .bind(id)
        .fetch_optional(pool)
        .await
        .unwrap()
}

/// Mocks the four GitHub fetches for one repository on a mockito server.
///
/// The repository gets two commits; `commits_today` of them (0..=2) carry
/// today's date, the rest are three days old. Line stats are served for
/// both via the detail endpoint (10/2 and 5/1). Issues: one open, one
/// closed, plus a closed pull request masquerading as an issue (which the
/// client must filter). Pull requests: one merged, one open.
pub async fn mock_github_repo(
    server: &mut mockito::ServerGuard,
    owner: &str,
    name: &str,
    id: i64,
    commits_today: usize,
) {
    use mockito::Matcher;

    let now = Utc::now();
    let old = now - Duration::days(3);
    let avatar = format!("https://github.com/{owner}.png");

    let repo_body = serde_json::json!({
        "id": id,
        "name": name,
        "full_name": format!("{owner}/{name}"),
        "owner": { "login": owner, "avatar_url": avatar },
        "description": "seeded repository",
        "html_url": format!("https://github.com/{owner}/{name}"),
    });
    server
        .mock("GET", format!("/repos/{owner}/{name}").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(repo_body.to_string())
        .create_async()
        .await;

    let dates = [
        if commits_today >= 1 { now } else { old },
        if commits_today >= 2 { now } else { old },
    ];
    let shas = [format!("{name}-sha1"), format!("{name}-sha2")];
    let stats = [(10, 2), (5, 1)];

    let commits_body: Vec<serde_json::Value> = shas
        .iter()
        .zip(dates.iter())
        .map(|(sha, date)| {
            serde_json::json!({
                "sha": sha,
                "commit": {
                    "author": { "name": owner, "date": date.to_rfc3339() },
                    "message": "work"
                },
                "author": { "login": owner, "avatar_url": avatar },
            })
        })
        .collect();
    server
        .mock("GET", format!("/repos/{owner}/{name}/commits").as_str())
        .match_query(Matcher::UrlEncoded("per_page".into(), "100".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(serde_json::to_string(&commits_body).unwrap())
        .create_async()
        .await;

    for ((sha, date), (additions, deletions)) in shas.iter().zip(dates.iter()).zip(stats.iter()) {
        let detail_body = serde_json::json!({
            "sha": sha,
            "commit": {
                "author": { "name": owner, "date": date.to_rfc3339() },
                "message": "work"
            },
            "author": { "login": owner, "avatar_url": avatar },
            "stats": { "additions": additions, "deletions": deletions, "total": additions + deletions },
        });
        server
            .mock("GET", format!("/repos/{owner}/{name}/commits/{sha}").as_str())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(detail_body.to_string())
            .create_async()
            .await;
    }

    let open_issues = serde_json::json!([
        { "id": 1, "number": 1, "state": "open" },
    ]);
    let closed_issues = serde_json::json!([
        { "id": 2, "number": 2, "state": "closed" },
        { "id": 3, "number": 3, "state": "closed",
          "pull_request": { "url": format!("https://api.github.com/repos/{owner}/{name}/pulls/3") } },
    ]);
    server
        .mock("GET", format!("/repos/{owner}/{name}/issues").as_str())
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("state".into(), "open".into()),
            Matcher::UrlEncoded("per_page".into(), "100".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(open_issues.to_string())
        .create_async()
        .await;
    server
        .mock("GET", format!("/repos/{owner}/{name}/issues").as_str())
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("state".into(), "closed".into()),
            Matcher::UrlEncoded("per_page".into(), "100".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(closed_issues.to_string())
        .create_async()
        .await;

    let open_pulls = serde_json::json!([
        { "id": 20, "number": 20, "state": "open", "merged_at": null },
    ]);
    let closed_pulls = serde_json::json!([
        { "id": 21, "number": 21, "state": "closed", "merged_at": now.to_rfc3339() },
    ]);
    server
        .mock("GET", format!("/repos/{owner}/{name}/pulls").as_str())
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("state".into(), "open".into()),
            Matcher::UrlEncoded("per_page".into(), "100".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(open_pulls.to_string())
        .create_async()
        .await;
    server
        .mock("GET", format!("/repos/{owner}/{name}/pulls").as_str())
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("state".into(), "closed".into()),
            Matcher::UrlEncoded("per_page".into(), "100".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(closed_pulls.to_string())
        .create_async()
        .await;
}
