//! In-process mock of the calculation service for async tests.
//!
//! Routes are canned `(method, path) -> (status, json)` entries; every
//! inbound request is recorded with its auth header and JSON body so tests
//! can assert on what the client actually sent.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};

use crate::api::CalcApi;
use crate::client::ApiClient;
use crate::config::ClientConfig;
use crate::store::{MemoryTokenStore, TokenStore};

pub const API_PREFIX: &str = "/api/v1";

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Value,
}

#[derive(Clone)]
struct Canned {
    status: StatusCode,
    body: Value,
    delay: Option<Duration>,
}

#[derive(Clone, Default)]
struct MockState {
    routes: Arc<Mutex<HashMap<(Method, String), Canned>>>,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

pub struct MockService {
    pub base_url: String,
    state: MockState,
}

impl MockService {
    pub async fn start() -> Self {
        let state = MockState::default();
        let app = Router::new().fallback(handle).with_state(state.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("mock listener should bind");
        let addr = listener.local_addr().expect("mock listener should have an address");
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        Self { base_url: format!("http://{addr}{API_PREFIX}"), state }
    }

    pub fn respond(&self, method: Method, path: &str, status: u16, body: Value) -> &Self {
        self.insert(method, path, status, body, None)
    }

    pub fn respond_after(&self, method: Method, path: &str, delay: Duration, body: Value) -> &Self {
        self.insert(method, path, 200, body, Some(delay))
    }

    fn insert(&self, method: Method, path: &str, status: u16, body: Value, delay: Option<Duration>) -> &Self {
        let status = StatusCode::from_u16(status).expect("canned status should be valid");
        self.state
            .routes
            .lock()
            .unwrap()
            .insert((method, path.to_owned()), Canned { status, body, delay });
        self
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn hits(&self, path: &str) -> usize {
        self.requests().iter().filter(|r| r.path == path).count()
    }

    pub fn last_request(&self, path: &str) -> Recorded {
        self.requests()
            .into_iter()
            .rev()
            .find(|r| r.path == path)
            .unwrap_or_else(|| panic!("no request recorded for {path}"))
    }

    pub fn client(&self, store: Arc<dyn TokenStore>) -> ApiClient {
        ApiClient::new(&self.config(), store).expect("client should build")
    }

    pub fn client_with_token(&self, token: Option<&str>) -> (ApiClient, Arc<dyn TokenStore>) {
        let store: Arc<dyn TokenStore> = match token {
            Some(token) => Arc::new(MemoryTokenStore::with_token(token)),
            None => Arc::new(MemoryTokenStore::new()),
        };
        (self.client(store.clone()), store)
    }

    pub fn api_with_token(&self, token: Option<&str>) -> (CalcApi, Arc<dyn TokenStore>) {
        let (client, store) = self.client_with_token(token);
        (CalcApi::new(client), store)
    }

    pub fn config(&self) -> ClientConfig {
        ClientConfig::default()
            .with_base_url(&self.base_url)
            .expect("mock url should be valid")
    }
}

async fn handle(State(state): State<MockState>, method: Method, uri: Uri, headers: HeaderMap, body: Bytes) -> Response {
    let path = uri.path().strip_prefix(API_PREFIX).unwrap_or(uri.path()).to_owned();
    let header = |name: axum::http::header::HeaderName| headers.get(name).and_then(|v| v.to_str().ok()).map(ToOwned::to_owned);
    let recorded = Recorded {
        method: method.clone(),
        path: path.clone(),
        authorization: header(axum::http::header::AUTHORIZATION),
        content_type: header(axum::http::header::CONTENT_TYPE),
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
    };
    state.requests.lock().unwrap().push(recorded);

    let canned = state.routes.lock().unwrap().get(&(method, path)).cloned();
    let Some(canned) = canned else {
        return (StatusCode::NOT_FOUND, Json(json!({ "message": "no such route" }))).into_response();
    };
    if let Some(delay) = canned.delay {
        tokio::time::sleep(delay).await;
    }
    (canned.status, Json(canned.body)).into_response()
}

/// A base URL nothing is listening on.
pub fn unreachable_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("probe listener should bind");
    let addr = listener.local_addr().expect("probe listener should have an address");
    drop(listener);
    format!("http://{addr}{API_PREFIX}")
}
