//! Integration tests for the Octocrab gateway against a mock GitHub API.

use check_valid_pr::{
    CheckError, OctocrabGateway, PersonalAccessToken, PullRequestGateway, PullRequestLocator,
    PullRequestState,
};
use serde_json::json;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PULL_PATH: &str = "/repos/owner/repo/pulls/3";
const FILES_PATH: &str = "/repos/owner/repo/pulls/3/files";

fn gateway_for(server: &MockServer) -> (OctocrabGateway, PullRequestLocator) {
    let locator =
        PullRequestLocator::new(&server.uri(), "owner/repo", "3").expect("locator should build");
    let token = PersonalAccessToken::new("test-token").expect("token should be valid");
    let gateway = OctocrabGateway::for_token(&token, &locator).expect("gateway should build");
    (gateway, locator)
}

fn file_entries(names: &[&str]) -> serde_json::Value {
    serde_json::Value::Array(
        names
            .iter()
            .map(|name| json!({ "filename": name, "status": "modified" }))
            .collect(),
    )
}

#[tokio::test]
async fn pull_request_keeps_raw_payload() {
    let server = MockServer::start().await;
    let body = json!({
        "number": 3,
        "state": "open",
        "title": "Tidy docs",
        "head": { "sha": "abc123", "ref": "docs" },
        "user": { "login": "octocat" }
    });
    Mock::given(method("GET"))
        .and(path(PULL_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(&body)
                .insert_header("X-GitHub-Request-Id", "0400:1234"),
        )
        .mount(&server)
        .await;

    let (gateway, locator) = gateway_for(&server);
    let snapshot = gateway
        .pull_request(&locator)
        .await
        .expect("pull request should load");

    assert_eq!(snapshot.number, 3);
    assert_eq!(snapshot.state, PullRequestState::Open);
    assert_eq!(snapshot.head_sha, "abc123");
    assert_eq!(snapshot.raw.get("data"), Some(&body));
    assert_eq!(snapshot.raw.pointer("/status"), Some(&json!(200)));
    assert_eq!(
        snapshot.raw.pointer("/url"),
        Some(&json!(format!("{}{PULL_PATH}", server.uri())))
    );
    assert_eq!(
        snapshot.raw.pointer("/headers/x-github-request-id"),
        Some(&json!("0400:1234"))
    );

    let payload: serde_json::Value = serde_json::from_str(
        &snapshot
            .serialise_payload()
            .expect("payload should serialise"),
    )
    .expect("payload should be JSON");
    assert_eq!(payload.pointer("/data/head/sha"), Some(&json!("abc123")));
    assert_eq!(payload.pointer("/data/head/ref"), Some(&json!("docs")));
}

#[tokio::test]
async fn changed_files_follow_next_links() {
    let server = MockServer::start().await;
    let next_link = format!(
        "<{}{FILES_PATH}?per_page=100&page=2>; rel=\"next\"",
        server.uri()
    );

    Mock::given(method("GET"))
        .and(path(FILES_PATH))
        .and(query_param("per_page", "100"))
        .and(query_param_is_missing("page"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(file_entries(&["src/a.rs", "README.md"]))
                .insert_header("Link", next_link.as_str()),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(FILES_PATH))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(file_entries(&[".github/workflows/ci.yml"])),
        )
        .mount(&server)
        .await;

    let (gateway, locator) = gateway_for(&server);
    let files = gateway
        .changed_files(&locator)
        .await
        .expect("files should load");

    assert_eq!(
        files.filenames(),
        ["src/a.rs", "README.md", ".github/workflows/ci.yml"]
    );
}

#[tokio::test]
async fn unauthorised_request_maps_to_authentication_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PULL_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Bad credentials",
            "documentation_url": "https://docs.github.com/rest"
        })))
        .mount(&server)
        .await;

    let (gateway, locator) = gateway_for(&server);
    let error = gateway
        .pull_request(&locator)
        .await
        .expect_err("401 should fail");

    assert!(
        matches!(error, CheckError::Authentication { .. }),
        "expected Authentication, got {error:?}"
    );
}

#[tokio::test]
async fn rate_limited_request_maps_to_rate_limit_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(FILES_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "message": "API rate limit exceeded for 127.0.0.1.",
            "documentation_url": "https://docs.github.com/rest/overview/rate-limits-for-the-rest-api"
        })))
        .mount(&server)
        .await;

    let (gateway, locator) = gateway_for(&server);
    let error = gateway
        .changed_files(&locator)
        .await
        .expect_err("403 should fail");

    assert!(
        matches!(error, CheckError::RateLimitExceeded { .. }),
        "expected RateLimitExceeded, got {error:?}"
    );
}

#[tokio::test]
async fn missing_pull_request_keeps_not_found_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PULL_PATH))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "Not Found",
            "documentation_url": "https://docs.github.com/rest/pulls/pulls#get-a-pull-request"
        })))
        .mount(&server)
        .await;

    let (gateway, locator) = gateway_for(&server);
    let error = gateway
        .pull_request(&locator)
        .await
        .expect_err("404 should fail");

    assert!(
        matches!(error, CheckError::Api { .. }),
        "expected Api, got {error:?}"
    );
    assert_eq!(error.status(), Some(http::StatusCode::NOT_FOUND));
}

#[tokio::test]
async fn pull_request_without_state_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PULL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "number": 3 })))
        .mount(&server)
        .await;

    let (gateway, locator) = gateway_for(&server);
    let error = gateway
        .pull_request(&locator)
        .await
        .expect_err("malformed body should fail");

    assert!(
        matches!(error, CheckError::Decode { .. }),
        "expected Decode, got {error:?}"
    );
}
