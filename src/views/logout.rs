//! Logout: forget the session and go to the login screen.

use super::ViewResult;
use crate::router::View;
use crate::store::TokenStore;

pub const LOGGED_OUT: &str = "You have been logged out";

pub fn logout(store: &dyn TokenStore) -> ViewResult {
    store.clear()?;
    tracing::info!("logged out");
    Ok(Some(View::Login))
}

#[cfg(test)]
#[path = "logout_test.rs"]
mod tests;
