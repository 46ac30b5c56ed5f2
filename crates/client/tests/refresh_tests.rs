//! Integration tests for refresh coalescing and 401 recovery

mod common;

use common::{client_with_margin, token_expiring_in};
use forno_client::ClientError;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MARGIN: Duration = Duration::from_secs(15);

#[tokio::test]
async fn test_concurrent_refresh_triggers_issue_one_network_call() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"accessToken": "tok-fresh"}))
                .set_delay(Duration::from_millis(150)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_with_margin(&mock_server.uri(), MARGIN);
    client.session().set_session("tok-stale").await.unwrap();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let client = client.clone();
        handles.push(tokio::spawn(async move {
            client.session().refresh().await
        }));
    }

    for handle in handles {
        let token = handle.await.unwrap().unwrap();
        assert_eq!(token, "tok-fresh");
    }

    assert_eq!(
        client.session().token().await.unwrap().as_deref(),
        Some("tok-fresh")
    );
}

#[tokio::test]
async fn test_sequential_refreshes_each_hit_the_server() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"accessToken": "tok-fresh"})),
        )
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = client_with_margin(&mock_server.uri(), MARGIN);
    client.session().refresh().await.unwrap();
    client.session().refresh().await.unwrap();
}

#[tokio::test]
async fn test_unauthorized_request_is_retried_once_with_fresh_token() {
    let mock_server = MockServer::start().await;

    // first call with the stale token is rejected
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .and(header("authorization", "Bearer tok-stale"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&mock_server)
        .await;

    // the retry carries the refreshed token
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .and(header("authorization", "Bearer tok-fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1,
            "username": "mario",
            "fullName": "Mario Rossi",
            "role": "USER"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"accessToken": "tok-fresh"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_with_margin(&mock_server.uri(), MARGIN);
    client.session().set_session("tok-stale").await.unwrap();

    let user = client.me().await.unwrap();
    assert_eq!(user.username, "mario");
    assert_eq!(
        client.session().token().await.unwrap().as_deref(),
        Some("tok-fresh")
    );
}

#[tokio::test]
async fn test_second_unauthorized_surfaces_without_third_attempt() {
    let mock_server = MockServer::start().await;

    // rejected before and after the refresh: exactly two calls, never three
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "TOKEN_REVOKED",
            "message": "Session revoked"
        })))
        .expect(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"accessToken": "tok-fresh"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_with_margin(&mock_server.uri(), MARGIN);
    client.session().set_session("tok-stale").await.unwrap();

    let err = client.me().await.unwrap_err();
    let ClientError::AuthenticationFailed(failure) = err else {
        panic!("expected AuthenticationFailed, got {err:?}");
    };
    assert_eq!(failure.code(), Some("TOKEN_REVOKED"));
}

#[tokio::test]
async fn test_failed_refresh_clears_stored_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/me"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_with_margin(&mock_server.uri(), MARGIN);
    client
        .session()
        .set_session(&token_expiring_in(3600))
        .await
        .unwrap();

    let err = client.me().await.unwrap_err();
    assert!(matches!(err, ClientError::RefreshFailed(_)));
    assert!(err.is_auth_expired());
    assert_eq!(client.session().token().await.unwrap(), None);
}

#[tokio::test]
async fn test_refresh_without_access_token_in_body_fails_and_clears() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"unexpected": true})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_with_margin(&mock_server.uri(), MARGIN);
    client.session().set_session("tok-stale").await.unwrap();

    let err = client.session().refresh().await.unwrap_err();
    assert!(matches!(err, ClientError::RefreshFailed(_)));
    assert_eq!(client.session().token().await.unwrap(), None);
}

#[tokio::test]
async fn test_concurrent_failures_share_one_attempt() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(
            ResponseTemplate::new(503)
                .set_body_string("maintenance")
                .set_delay(Duration::from_millis(150)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_with_margin(&mock_server.uri(), MARGIN);

    let mut handles = Vec::new();
    for _ in 0..4 {
        let client = client.clone();
        handles.push(tokio::spawn(async move {
            client.session().refresh().await
        }));
    }

    for handle in handles {
        let err = handle.await.unwrap().unwrap_err();
        assert!(matches!(err, ClientError::RefreshFailed(_)));
    }
}
