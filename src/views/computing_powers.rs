//! Worker node status screen.

use super::{Notice, ViewResult, unless_unauthorized};
use crate::api::CalcApi;
use crate::types::ComputingServer;

pub const LOAD_FAILED: &str = "Error getting computing powers";

#[derive(Debug, Clone, Default)]
pub struct ComputingPowersView {
    pub servers: Vec<ComputingServer>,
    pub notice: Option<Notice>,
}

impl ComputingPowersView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the node list. Each node's calculated expression ids are shown
    /// newest first.
    pub async fn load(&mut self, api: &CalcApi) -> ViewResult {
        match api.computing_powers().await {
            Ok(mut servers) => {
                for server in &mut servers {
                    server.calculated_expressions.sort_unstable_by(|a, b| b.cmp(a));
                }
                self.servers = servers;
                self.notice = None;
            }
            Err(e) => {
                let e = unless_unauthorized(e)?;
                tracing::warn!(error = %e, "loading computing powers failed");
                self.notice = Some(Notice::error(LOAD_FAILED));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
#[path = "computing_powers_test.rs"]
mod tests;
