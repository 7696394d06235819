//! Authenticated HTTP client for the calculation service.
//!
//! DESIGN
//! ======
//! One `ApiClient` is built at start-up and shared by every view. Each call
//! reads the token store right before sending and sets
//! `Authorization: Bearer <token>` when a token is present, so a login or
//! logout takes effect on the very next request.
//!
//! ERROR HANDLING
//! ==============
//! A 401 response becomes [`ApiError::Unauthorized`] instead of a navigation
//! side effect; the router decides what to do with it. Transport failures
//! (timeout, DNS, refused connection) stay distinct from HTTP statuses.
//! There is exactly one attempt per call.

use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::store::TokenStore;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The service rejected the session (HTTP 401).
    #[error("unauthorized: {path}")]
    Unauthorized { path: String },

    /// Any other non-success HTTP status.
    #[error("HTTP {status} for {path}: {body}")]
    Status { status: StatusCode, path: String, body: Value },

    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The response body did not match the expected shape.
    #[error("response decode failed for {path}: {source}")]
    Decode { path: String, source: serde_json::Error },

    /// The request body could not be serialized.
    #[error("request encode failed for {path}: {source}")]
    Encode { path: String, source: serde_json::Error },

    /// The stored token cannot be sent as a header value.
    #[error("stored session token is not a valid header value")]
    InvalidToken,

    #[error("HTTP client build failed: {0}")]
    ClientBuild(#[source] reqwest::Error),
}

impl ApiError {
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// HTTP status carried by the error, if the service answered at all.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Unauthorized { .. } => Some(StatusCode::UNAUTHORIZED),
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// A successful (2xx) response. An empty body decodes as `Value::Null`.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl ApiResponse {
    pub fn json<T: DeserializeOwned>(self, path: &str) -> Result<T, ApiError> {
        serde_json::from_value(self.body).map_err(|source| ApiError::Decode { path: path.to_owned(), source })
    }
}

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    store: Arc<dyn TokenStore>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient").field("base_url", &self.base_url).finish_non_exhaustive()
    }
}

impl ApiClient {
    pub fn new(config: &ClientConfig, store: Arc<dyn TokenStore>) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(ApiError::ClientBuild)?;
        Ok(Self { http, base_url: config.base_url.trim_end_matches('/').to_owned(), store })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn store(&self) -> &Arc<dyn TokenStore> {
        &self.store
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Issue one request to `base_url + path`.
    pub async fn request(&self, method: Method, path: &str, body: Option<&Value>) -> Result<ApiResponse, ApiError> {
        let mut request = self.http.request(method.clone(), self.url(path));
        if let Some(header) = self.authorization()? {
            request = request.header(AUTHORIZATION, header);
        }
        if let Some(json) = body {
            request = request.json(json);
        }

        let response = request.send().await.map_err(|e| {
            tracing::debug!(%method, path, error = %e, "request failed before a response");
            ApiError::Transport(e)
        })?;
        let status = response.status();
        let text = response.text().await.map_err(ApiError::Transport)?;
        tracing::debug!(%method, path, status = status.as_u16(), "response received");

        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!(%method, path, "session rejected by service");
            return Err(ApiError::Unauthorized { path: path.to_owned() });
        }

        let parsed = parse_body(&text);
        if !status.is_success() {
            return Err(ApiError::Status { status, path: path.to_owned(), body: parsed.unwrap_or(Value::String(text)) });
        }
        let body = parsed.map_err(|source| ApiError::Decode { path: path.to_owned(), source })?;
        Ok(ApiResponse { status, body })
    }

    pub async fn get(&self, path: &str) -> Result<ApiResponse, ApiError> {
        self.request(Method::GET, path, None).await
    }

    pub async fn post(&self, path: &str, body: &Value) -> Result<ApiResponse, ApiError> {
        self.request(Method::POST, path, Some(body)).await
    }

    fn authorization(&self) -> Result<Option<HeaderValue>, ApiError> {
        let Some(token) = self.store.token() else {
            return Ok(None);
        };
        let mut value = HeaderValue::from_str(&bearer(&token)).map_err(|_| ApiError::InvalidToken)?;
        value.set_sensitive(true);
        Ok(Some(value))
    }
}

fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

fn parse_body(text: &str) -> Result<Value, serde_json::Error> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(text)
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
