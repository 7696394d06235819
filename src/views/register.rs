//! Registration screen.

use reqwest::StatusCode;

use super::login::credentials;
use super::{Notice, ViewResult, store_session};
use crate::api::CalcApi;
use crate::router::View;

pub const MISSING_CREDENTIALS: &str = super::login::MISSING_CREDENTIALS;
pub const LOGIN_TAKEN: &str = "User with such login already exists";
pub const REGISTER_FAILED: &str = "Error registering";
pub const SUCCESS: &str = "Success";

#[derive(Debug, Clone, Default)]
pub struct RegisterView {
    pub login: String,
    pub password: String,
    pub notice: Option<Notice>,
}

impl RegisterView {
    #[must_use]
    pub fn new(login: impl Into<String>, password: impl Into<String>) -> Self {
        Self { login: login.into(), password: password.into(), notice: None }
    }

    pub async fn submit(&mut self, api: &CalcApi) -> ViewResult {
        let Some(credentials) = credentials(&self.login, &self.password) else {
            self.notice = Some(Notice::error(MISSING_CREDENTIALS));
            return Ok(None);
        };

        match api.register(&credentials).await {
            Ok(token) if !token.access.is_empty() => {
                store_session(api, &token.access)?;
                tracing::info!(login = %credentials.login, "registered");
                self.notice = Some(Notice::success(SUCCESS));
                Ok(Some(View::Home))
            }
            Ok(_) => {
                self.notice = Some(Notice::error(REGISTER_FAILED));
                Ok(None)
            }
            // Nobody is signed in on this screen, so a 401 is not an expired
            // session.
            Err(e) => {
                if e.status() == Some(StatusCode::CONFLICT) {
                    self.notice = Some(Notice::error(LOGIN_TAKEN));
                } else {
                    tracing::warn!(error = %e, "registration failed");
                    self.notice = Some(Notice::error(REGISTER_FAILED));
                }
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
#[path = "register_test.rs"]
mod tests;
