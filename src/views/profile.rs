//! Profile screen: change login and/or password.

use super::{Notice, ViewResult, store_session, unless_unauthorized};
use crate::api::CalcApi;
use crate::router::View;
use crate::validate::{self, ProfileForm};

pub const LOAD_FAILED: &str = "Error getting user";
pub const UPDATE_FAILED: &str = "Invalid data";
pub const SUCCESS: &str = "Success";

#[derive(Debug, Clone, Default)]
pub struct ProfileView {
    pub form: ProfileForm,
    pub notice: Option<Notice>,
}

impl ProfileView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefill the login field with the current user's login.
    pub async fn load(&mut self, api: &CalcApi) -> ViewResult {
        match api.current_user().await {
            Ok(user) => self.form.login = user.login,
            Err(e) => {
                let e = unless_unauthorized(e)?;
                tracing::warn!(error = %e, "loading profile failed");
                self.notice = Some(Notice::error(LOAD_FAILED));
            }
        }
        Ok(None)
    }

    /// Validate the form and send the update. The service answers with a new
    /// token for the updated account, which replaces the stored one.
    pub async fn submit(&mut self, api: &CalcApi) -> ViewResult {
        let request = match validate::profile_update(&self.form) {
            Ok(request) => request,
            Err(e) => {
                self.notice = Some(Notice::error(e.to_string()));
                return Ok(None);
            }
        };

        match api.update_user(&request).await {
            Ok(token) if !token.access.is_empty() => {
                store_session(api, &token.access)?;
                self.notice = Some(Notice::success(SUCCESS));
                Ok(Some(View::Profile))
            }
            Ok(_) => {
                self.notice = Some(Notice::error(UPDATE_FAILED));
                Ok(None)
            }
            Err(e) => {
                let e = unless_unauthorized(e)?;
                tracing::warn!(error = %e, "profile update failed");
                self.notice = Some(Notice::error(UPDATE_FAILED));
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
#[path = "profile_test.rs"]
mod tests;
