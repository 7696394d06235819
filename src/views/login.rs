//! Login screen.

use reqwest::StatusCode;

use super::{Notice, ViewResult, store_session};
use crate::api::CalcApi;
use crate::router::View;
use crate::types::Credentials;

pub const MISSING_CREDENTIALS: &str = "Enter login and password";
pub const INVALID_CREDENTIALS: &str = "Invalid login or password";
pub const LOGIN_FAILED: &str = "Error logging in";
pub const SUCCESS: &str = "Success";

#[derive(Debug, Clone, Default)]
pub struct LoginView {
    pub login: String,
    pub password: String,
    pub notice: Option<Notice>,
}

impl LoginView {
    #[must_use]
    pub fn new(login: impl Into<String>, password: impl Into<String>) -> Self {
        Self { login: login.into(), password: password.into(), notice: None }
    }

    /// Exchange credentials for a session token. On success the token is
    /// stored and the home screen is requested; on failure nothing is stored.
    pub async fn submit(&mut self, api: &CalcApi) -> ViewResult {
        let Some(credentials) = credentials(&self.login, &self.password) else {
            self.notice = Some(Notice::error(MISSING_CREDENTIALS));
            return Ok(None);
        };

        match api.login(&credentials).await {
            Ok(token) if !token.access.is_empty() => {
                store_session(api, &token.access)?;
                tracing::info!(login = %credentials.login, "logged in");
                self.notice = Some(Notice::success(SUCCESS));
                Ok(Some(View::Home))
            }
            Ok(_) => {
                self.notice = Some(Notice::error(LOGIN_FAILED));
                Ok(None)
            }
            // The login screen is where a 401 would send us anyway, so here it
            // just means wrong credentials.
            Err(e) if e.is_unauthorized() || e.status() == Some(StatusCode::BAD_REQUEST) => {
                self.notice = Some(Notice::error(INVALID_CREDENTIALS));
                Ok(None)
            }
            Err(e) => {
                tracing::warn!(error = %e, "login request failed");
                self.notice = Some(Notice::error(LOGIN_FAILED));
                Ok(None)
            }
        }
    }
}

/// Shared by login and registration: both fields are required.
pub(crate) fn credentials(login: &str, password: &str) -> Option<Credentials> {
    let login = login.trim();
    if login.is_empty() || password.is_empty() {
        return None;
    }
    Some(Credentials { login: login.to_owned(), password: password.to_owned() })
}

#[cfg(test)]
#[path = "login_test.rs"]
mod tests;
