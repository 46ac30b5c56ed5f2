//! Integration tests for the proactive refresh scheduler

mod common;

use common::{client_with_margin, token_expiring_in};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_scheduler_refreshes_before_expiry_and_rearms() {
    let mock_server = MockServer::start().await;
    let fresh = token_expiring_in(3600);

    // the refreshed token is long-lived, so no second call happens
    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accessToken": fresh
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    // expiry two seconds out with a ~1.8s margin: fires after ~200ms
    let client = client_with_margin(&mock_server.uri(), Duration::from_millis(1800));
    client
        .session()
        .set_session(&token_expiring_in(2))
        .await
        .unwrap();
    client.session().start();

    tokio::time::sleep(Duration::from_millis(700)).await;

    let token = client.session().token().await.unwrap();
    assert_eq!(token.as_deref(), Some(fresh.as_str()));

    client.session().stop();
}

#[tokio::test]
async fn test_failed_scheduled_refresh_clears_token_and_parks() {
    let mock_server = MockServer::start().await;

    // exactly one attempt: a failure must not loop against the server
    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_with_margin(&mock_server.uri(), Duration::from_secs(15));
    // already inside the margin: the timer fires immediately
    client
        .session()
        .set_session(&token_expiring_in(5))
        .await
        .unwrap();
    client.session().start();

    tokio::time::sleep(Duration::from_millis(500)).await;

    assert_eq!(client.session().token().await.unwrap(), None);
    client.session().stop();
}

#[tokio::test]
async fn test_token_without_expiry_arms_no_timer() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accessToken": "never"
        })))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = client_with_margin(&mock_server.uri(), Duration::from_secs(15));
    client
        .session()
        .set_session("opaque-token-without-claims")
        .await
        .unwrap();
    client.session().start();

    tokio::time::sleep(Duration::from_millis(300)).await;

    // the token is left in place; only refresh outcomes may clear it
    assert_eq!(
        client.session().token().await.unwrap().as_deref(),
        Some("opaque-token-without-claims")
    );
    client.session().stop();
}

#[tokio::test]
async fn test_scheduler_rearms_when_a_new_token_arrives() {
    let mock_server = MockServer::start().await;
    let fresh = token_expiring_in(3600);

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accessToken": fresh
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_with_margin(&mock_server.uri(), Duration::from_secs(15));
    // no token yet: the scheduler parks
    client.session().start();
    tokio::time::sleep(Duration::from_millis(200)).await;

    // a login-style token inside the margin wakes it up immediately
    client
        .session()
        .set_session(&token_expiring_in(5))
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_millis(500)).await;

    assert_eq!(
        client.session().token().await.unwrap().as_deref(),
        Some(fresh.as_str())
    );
    client.session().stop();
}

#[tokio::test]
async fn test_stopped_scheduler_issues_no_calls() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accessToken": "tok-fresh"
        })))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = client_with_margin(&mock_server.uri(), Duration::from_secs(15));
    client.session().start();
    client.session().stop();

    let short_lived = token_expiring_in(1);
    client.session().set_session(&short_lived).await.unwrap();
    tokio::time::sleep(Duration::from_millis(300)).await;

    assert_eq!(
        client.session().token().await.unwrap().as_deref(),
        Some(short_lived.as_str())
    );
}
