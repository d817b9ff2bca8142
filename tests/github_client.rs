mod common;

use mockito::Matcher;
use std::time::Duration;

use hacktion::infrastructure::github::{GitHubApi, GitHubClient, GitHubError};

fn client(base_url: &str, token: Option<&str>) -> GitHubClient {
    GitHubClient::new(
        base_url,
        token.map(str::to_string),
        Duration::from_secs(5),
    )
    .unwrap()
}

#[tokio::test]
async fn test_get_repository_decodes_metadata() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("GET", "/repos/alice/repo1")
        .match_header("accept", "application/vnd.github+json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "id": 42,
                "name": "repo1",
                "full_name": "alice/repo1",
                "owner": { "login": "alice", "avatar_url": "https://github.com/alice.png" },
                "description": null,
                "html_url": "https://github.com/alice/repo1"
            }"#,
        )
        .create_async()
        .await;

    let github = client(&server.url(), None);
    let repo = github.get_repository("alice", "repo1").await.unwrap();

    assert_eq!(repo.id, 42);
    assert_eq!(repo.full_name, "alice/repo1");
    assert_eq!(repo.owner.login, "alice");
    assert!(repo.description.is_none());
}

#[tokio::test]
async fn test_bearer_token_is_forwarded() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("GET", "/repos/alice/repo1")
        .match_header("authorization", "Bearer ghp_testtoken")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "id": 1,
                "name": "repo1",
                "full_name": "alice/repo1",
                "owner": { "login": "alice", "avatar_url": "" },
                "html_url": "https://github.com/alice/repo1"
            }"#,
        )
        .create_async()
        .await;

    let github = client(&server.url(), Some("ghp_testtoken"));
    github.get_repository("alice", "repo1").await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_error_status_surfaces_as_fetch_failure() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("GET", "/repos/alice/missing")
        .with_status(404)
        .with_body(r#"{ "message": "Not Found" }"#)
        .create_async()
        .await;

    let github = client(&server.url(), None);
    let err = github.get_repository("alice", "missing").await.unwrap_err();

    assert!(matches!(err, GitHubError::Status { status: 404, .. }));
}

#[tokio::test]
async fn test_list_commits_enriches_head_with_stats() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("GET", "/repos/alice/repo1/commits")
        .match_query(Matcher::UrlEncoded("per_page".into(), "100".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[
                { "sha": "aaa", "commit": { "author": { "name": "Alice", "date": "2026-08-06T10:00:00Z" }, "message": "one" },
                  "author": { "login": "alice", "avatar_url": "" } },
                { "sha": "bbb", "commit": { "author": { "name": "Alice", "date": "2026-08-05T10:00:00Z" }, "message": "two" },
                  "author": { "login": "alice", "avatar_url": "" } }
            ]"#,
        )
        .create_async()
        .await;

    // Only the first commit has a detail mock; the second enrichment fails
    // and must be tolerated.
    server
        .mock("GET", "/repos/alice/repo1/commits/aaa")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{ "sha": "aaa",
                 "commit": { "author": { "name": "Alice", "date": "2026-08-06T10:00:00Z" }, "message": "one" },
                 "author": { "login": "alice", "avatar_url": "" },
                 "stats": { "additions": 12, "deletions": 3, "total": 15 } }"#,
        )
        .create_async()
        .await;

    let github = client(&server.url(), None);
    let commits = github.list_commits("alice", "repo1").await.unwrap();

    assert_eq!(commits.len(), 2);
    assert_eq!(commits[0].stats.unwrap().additions, 12);
    assert!(commits[1].stats.is_none());
}

#[tokio::test]
async fn test_list_commits_fails_when_listing_fails() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("GET", "/repos/alice/repo1/commits")
        .match_query(Matcher::UrlEncoded("per_page".into(), "100".into()))
        .with_status(403)
        .with_body(r#"{ "message": "rate limited" }"#)
        .create_async()
        .await;

    let github = client(&server.url(), None);
    let err = github.list_commits("alice", "repo1").await.unwrap_err();

    assert!(matches!(err, GitHubError::Status { status: 403, .. }));
}

#[tokio::test]
async fn test_list_issues_merges_states_and_filters_pull_requests() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("GET", "/repos/alice/repo1/issues")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("state".into(), "open".into()),
            Matcher::UrlEncoded("per_page".into(), "100".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[ { "id": 1, "number": 1, "state": "open" } ]"#)
        .create_async()
        .await;
    server
        .mock("GET", "/repos/alice/repo1/issues")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("state".into(), "closed".into()),
            Matcher::UrlEncoded("per_page".into(), "100".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[
                { "id": 2, "number": 2, "state": "closed" },
                { "id": 3, "number": 3, "state": "closed",
                  "pull_request": { "url": "https://api.github.com/repos/alice/repo1/pulls/3" } }
            ]"#,
        )
        .create_async()
        .await;

    let github = client(&server.url(), None);
    let issues = github.list_issues("alice", "repo1").await.unwrap();

    // The pull request entry is filtered out.
    assert_eq!(issues.len(), 2);
    assert!(issues.iter().all(|i| !i.is_pull_request()));
}

#[tokio::test]
async fn test_list_pull_requests_merges_states() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("GET", "/repos/alice/repo1/pulls")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("state".into(), "open".into()),
            Matcher::UrlEncoded("per_page".into(), "100".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[ { "id": 1, "number": 1, "state": "open", "merged_at": null } ]"#)
        .create_async()
        .await;
    server
        .mock("GET", "/repos/alice/repo1/pulls")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("state".into(), "closed".into()),
            Matcher::UrlEncoded("per_page".into(), "100".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[ { "id": 2, "number": 2, "state": "closed", "merged_at": "2026-08-01T12:00:00Z" } ]"#,
        )
        .create_async()
        .await;

    let github = client(&server.url(), None);
    let pulls = github.list_pull_requests("alice", "repo1").await.unwrap();

    assert_eq!(pulls.len(), 2);
    assert_eq!(pulls.iter().filter(|p| p.is_merged()).count(), 1);
}
