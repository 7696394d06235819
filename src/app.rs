//! Application context.
//!
//! DESIGN
//! ======
//! `App` is built once at start-up (config -> token store -> client -> router)
//! and handed by reference to every view. There is no global client; tests
//! build as many independent apps as they need.
//!
//! ERROR HANDLING
//! ==============
//! `settle` is the one place a view outcome turns into navigation. An
//! unauthorized error clears the stored session and redirects to login; the
//! router guarantees that happens once even when several requests fail
//! together. Any other error goes back to the caller.

use std::sync::Arc;

use crate::api::CalcApi;
use crate::client::{ApiClient, ApiError};
use crate::config::ClientConfig;
use crate::router::{Router, View};
use crate::store::{FileTokenStore, TokenStore};
use crate::views::{ViewError, ViewResult};

#[derive(Debug)]
pub struct App {
    api: CalcApi,
    router: Router,
}

impl App {
    pub fn new(config: &ClientConfig, store: Arc<dyn TokenStore>, start: View) -> Result<Self, ApiError> {
        let client = ApiClient::new(config, store)?;
        Ok(Self { api: CalcApi::new(client), router: Router::new(start) })
    }

    /// Build an app whose session lives in the configured session file.
    pub fn from_config(config: &ClientConfig, start: View) -> Result<Self, ApiError> {
        let store = Arc::new(FileTokenStore::new(config.session_file.clone()));
        Self::new(config, store, start)
    }

    #[must_use]
    pub fn api(&self) -> &CalcApi {
        &self.api
    }

    #[must_use]
    pub fn router(&self) -> &Router {
        &self.router
    }

    #[must_use]
    pub fn store(&self) -> &Arc<dyn TokenStore> {
        self.api.client().store()
    }

    /// Apply the outcome of a view action.
    pub fn settle(&self, result: ViewResult) -> Result<(), ViewError> {
        match result {
            Ok(Some(view)) => {
                self.router.navigate(view);
                Ok(())
            }
            Ok(None) => Ok(()),
            Err(e) if e.is_unauthorized() => {
                if let Err(err) = self.store().clear() {
                    tracing::warn!(error = %err, "failed to clear expired session");
                }
                self.router.unauthorized();
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
#[path = "app_test.rs"]
mod tests;
