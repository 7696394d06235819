//! Screen routing.
//!
//! DESIGN
//! ======
//! The router owns the current `View` and the navigation history. It is the
//! only component that turns an unauthorized response into navigation, and it
//! does so only when the current view is not already the login view, so any
//! number of concurrent 401s produce a single redirect.

use std::fmt;
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Home,
    Login,
    Register,
    Logout,
    Profile,
    InputExpression,
    ViewExpressions,
    Operations,
    ComputingPowers,
}

impl View {
    pub const ALL: [Self; 9] = [
        Self::Home,
        Self::Login,
        Self::Register,
        Self::Logout,
        Self::Profile,
        Self::InputExpression,
        Self::ViewExpressions,
        Self::Operations,
        Self::ComputingPowers,
    ];

    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Login => "/login",
            Self::Register => "/register",
            Self::Logout => "/logout",
            Self::Profile => "/profile",
            Self::InputExpression => "/inputExpression",
            Self::ViewExpressions => "/viewExpressions",
            Self::Operations => "/operations",
            Self::ComputingPowers => "/computingPowers",
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Login => "Login",
            Self::Register => "Register",
            Self::Logout => "Logout",
            Self::Profile => "Profile",
            Self::InputExpression => "Input New Expression",
            Self::ViewExpressions => "View All Expressions",
            Self::Operations => "View Operations And Execution Times",
            Self::ComputingPowers => "View Computing Powers",
        }
    }

    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|view| view.path() == path)
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(Debug)]
struct RouterState {
    current: View,
    history: Vec<View>,
}

#[derive(Debug)]
pub struct Router {
    state: Mutex<RouterState>,
}

impl Router {
    #[must_use]
    pub fn new(start: View) -> Self {
        Self { state: Mutex::new(RouterState { current: start, history: Vec::new() }) }
    }

    #[must_use]
    pub fn current(&self) -> View {
        self.lock().current
    }

    /// Every navigation performed since start, oldest first.
    #[must_use]
    pub fn history(&self) -> Vec<View> {
        self.lock().history.clone()
    }

    pub fn navigate(&self, view: View) {
        let mut state = self.lock();
        tracing::debug!(from = %state.current, to = %view, "navigate");
        state.current = view;
        state.history.push(view);
    }

    /// Redirect to the login view after a 401. Returns whether navigation
    /// happened; it does not when the login view is already current.
    pub fn unauthorized(&self) -> bool {
        let mut state = self.lock();
        if state.current == View::Login {
            return false;
        }
        tracing::info!(from = %state.current, "session expired, redirecting to login");
        state.current = View::Login;
        state.history.push(View::Login);
        true
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, RouterState> {
        self.state.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[cfg(test)]
#[path = "router_test.rs"]
mod tests;
