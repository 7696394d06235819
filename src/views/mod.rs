//! View models, one per screen.
//!
//! DESIGN
//! ======
//! A view holds the same state its screen would: form fields, loaded data and
//! an inline `Notice`. Loading and submitting go through the shared
//! [`CalcApi`](crate::api::CalcApi) passed in by reference.
//!
//! ERROR HANDLING
//! ==============
//! Validation and ordinary request failures become notices on the view.
//! Only an unauthorized response (and a failure to persist the session token)
//! escapes as `ViewError`, so the app can route to the login screen. A
//! successful action may ask for navigation by returning `Some(View)`.

pub mod computing_powers;
pub mod expressions;
pub mod home;
pub mod login;
pub mod logout;
pub mod operations;
pub mod profile;
pub mod register;

use crate::api::CalcApi;
use crate::client::ApiError;
use crate::router::View;
use crate::store::{StoreError, TokenStore};

#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("could not save session: {0}")]
    Store(#[from] StoreError),
}

impl ViewError {
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Api(e) if e.is_unauthorized())
    }
}

/// Result of a view action: an optional navigation request.
pub type ViewResult = Result<Option<View>, ViewError>;

/// Inline message shown under a form or table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub is_error: bool,
}

impl Notice {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self { message: message.into(), is_error: false }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self { message: message.into(), is_error: true }
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Pass an unauthorized error up to the router; hand anything else back so
/// the view can show it.
pub(crate) fn unless_unauthorized(err: ApiError) -> Result<ApiError, ViewError> {
    if err.is_unauthorized() { Err(ViewError::Api(err)) } else { Ok(err) }
}

/// Persist a freshly issued session token.
pub(crate) fn store_session(api: &CalcApi, token: &str) -> Result<(), ViewError> {
    api.client().store().set_token(token)?;
    Ok(())
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
