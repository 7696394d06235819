use super::*;
use crate::store::MemoryTokenStore;
use crate::test_support::{MockService, unreachable_base_url};
use serde_json::json;
use std::time::Duration;

// =============================================================================
// Token injection
// =============================================================================

#[tokio::test]
async fn request_carries_bearer_token_when_stored() {
    let mock = MockService::start().await;
    mock.respond(Method::GET, "/getUser", 200, json!({ "login": "ann" }));
    let (client, _store) = mock.client_with_token(Some("tok-123"));

    client.get("/getUser").await.unwrap();

    let seen = mock.last_request("/getUser");
    assert_eq!(seen.authorization.as_deref(), Some("Bearer tok-123"));
    assert_eq!(seen.content_type.as_deref(), Some("application/json"));
}

#[tokio::test]
async fn request_omits_authorization_without_token() {
    let mock = MockService::start().await;
    mock.respond(Method::GET, "/ping", 200, json!({ "message": "pong" }));
    let (client, _store) = mock.client_with_token(None);

    client.get("/ping").await.unwrap();

    assert_eq!(mock.last_request("/ping").authorization, None);
}

#[tokio::test]
async fn token_is_read_fresh_for_every_request() {
    let mock = MockService::start().await;
    mock.respond(Method::GET, "/getUser", 200, json!({ "login": "ann" }));
    let store = Arc::new(MemoryTokenStore::new());
    let client = mock.client(store.clone());

    client.get("/getUser").await.unwrap();
    store.set_token("later").unwrap();
    client.get("/getUser").await.unwrap();
    store.clear().unwrap();
    client.get("/getUser").await.unwrap();

    let auth: Vec<_> = mock.requests().into_iter().map(|r| r.authorization).collect();
    assert_eq!(auth, vec![None, Some("Bearer later".to_owned()), None]);
}

#[tokio::test]
async fn every_concurrent_request_carries_the_token() {
    let mock = MockService::start().await;
    mock.respond(Method::GET, "/expression", 200, json!({ "expressions": [] }));
    mock.respond(Method::GET, "/getComputingPowers", 200, json!({ "servers": [] }));
    mock.respond(Method::GET, "/getOperationsAndTimes", 200, json!({ "data": {} }));
    let (client, _store) = mock.client_with_token(Some("shared"));

    let (a, b, c) = tokio::join!(
        client.get("/expression"),
        client.get("/getComputingPowers"),
        client.get("/getOperationsAndTimes"),
    );
    assert!(a.is_ok() && b.is_ok() && c.is_ok());

    let requests = mock.requests();
    assert_eq!(requests.len(), 3);
    assert!(requests.iter().all(|r| r.authorization.as_deref() == Some("Bearer shared")));
}

#[tokio::test]
async fn post_sends_json_body() {
    let mock = MockService::start().await;
    mock.respond(Method::POST, "/expression", 200, json!({ "id": 7, "message": "ok" }));
    let (client, _store) = mock.client_with_token(Some("t"));

    let response = client.post("/expression", &json!({ "expression": "1+1" })).await.unwrap();

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["id"], 7);
    assert_eq!(mock.last_request("/expression").body, json!({ "expression": "1+1" }));
}

#[tokio::test]
async fn token_with_newline_is_rejected_before_sending() {
    let mock = MockService::start().await;
    let (client, _store) = mock.client_with_token(Some("bad\ntoken"));

    let err = client.get("/getUser").await.unwrap_err();

    assert!(matches!(err, ApiError::InvalidToken));
    assert!(mock.requests().is_empty());
}

// =============================================================================
// Status handling
// =============================================================================

#[tokio::test]
async fn unauthorized_is_a_distinct_outcome() {
    let mock = MockService::start().await;
    mock.respond(Method::GET, "/getUser", 401, json!({ "message": "token expired" }));
    let (client, _store) = mock.client_with_token(Some("stale"));

    let err = client.get("/getUser").await.unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
    assert_eq!(mock.hits("/getUser"), 1, "401 must not be retried");
}

#[tokio::test]
async fn other_error_statuses_pass_through() {
    let mock = MockService::start().await;
    mock.respond(Method::POST, "/register", 409, json!({ "message": "user already exists" }));
    mock.respond(Method::GET, "/expression", 500, json!({ "message": "db down" }));
    let (client, _store) = mock.client_with_token(None);

    let conflict = client.post("/register", &json!({})).await.unwrap_err();
    let ApiError::Status { status, body, .. } = conflict else {
        panic!("expected status error, got {conflict:?}");
    };
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "user already exists");

    let server = client.get("/expression").await.unwrap_err();
    assert_eq!(server.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
    assert_eq!(mock.hits("/expression"), 1);
}

#[tokio::test]
async fn undecodable_success_body_is_decode_error() {
    let mock = MockService::start().await;
    mock.respond(Method::GET, "/getUser", 200, json!({ "unexpected": true }));
    let (client, _store) = mock.client_with_token(Some("t"));

    let response = client.get("/getUser").await.unwrap();
    let err = response.json::<crate::types::UserInfo>("/getUser").unwrap_err();

    assert!(matches!(err, ApiError::Decode { .. }));
}

// =============================================================================
// Transport failures
// =============================================================================

#[tokio::test]
async fn refused_connection_is_transport_error() {
    let config = ClientConfig::default().with_base_url(&unreachable_base_url()).unwrap();
    let client = ApiClient::new(&config, Arc::new(MemoryTokenStore::new())).unwrap();

    let err = client.get("/ping").await.unwrap_err();

    assert!(matches!(err, ApiError::Transport(_)), "got {err:?}");
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn slow_response_times_out() {
    let mock = MockService::start().await;
    mock.respond_after(Method::GET, "/expression", Duration::from_millis(600), json!({ "expressions": [] }));
    let mut config = mock.config();
    config.timeout = Duration::from_millis(100);
    let client = ApiClient::new(&config, Arc::new(MemoryTokenStore::new())).unwrap();

    let err = client.get("/expression").await.unwrap_err();

    let ApiError::Transport(source) = err else {
        panic!("expected transport error, got {err:?}");
    };
    assert!(source.is_timeout());
}

#[test]
fn url_joins_base_and_path() {
    let config = ClientConfig::default().with_base_url("http://calc.test/api/v1/").unwrap();
    let client = ApiClient::new(&config, Arc::new(MemoryTokenStore::new())).unwrap();
    assert_eq!(client.base_url(), "http://calc.test/api/v1");
    assert_eq!(client.url("/expression"), "http://calc.test/api/v1/expression");
}

#[test]
fn empty_body_parses_as_null() {
    assert_eq!(parse_body("  ").unwrap(), Value::Null);
    assert!(parse_body("{oops").is_err());
}
