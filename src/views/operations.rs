//! Operation timing editor.
//!
//! Each arithmetic operation has an execution time in milliseconds. Edits are
//! validated per field: a bad value leaves the stored time alone and attaches
//! a message to that field only. Saving always posts the whole mapping.

use std::collections::BTreeMap;

use super::{Notice, ViewResult, unless_unauthorized};
use crate::api::CalcApi;
use crate::types::OperationTimes;
use crate::validate;

pub const LOAD_FAILED: &str = "Error getting operations and times";
pub const SAVED: &str = "Operations and times saved successfully";
pub const SAVE_FAILED: &str = "Error saving operations and times";
pub const UNKNOWN_OPERATION: &str = "Unknown operation";

#[derive(Debug, Clone, Default)]
pub struct OperationsView {
    pub times: OperationTimes,
    /// Per-operation validation messages, keyed like `times`.
    pub field_errors: BTreeMap<String, String>,
    pub notice: Option<Notice>,
}

impl OperationsView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn load(&mut self, api: &CalcApi) -> ViewResult {
        match api.operation_times().await {
            Ok(times) => {
                self.times = times;
                self.field_errors.clear();
                self.notice = None;
            }
            Err(e) => {
                let e = unless_unauthorized(e)?;
                tracing::warn!(error = %e, "loading operation times failed");
                self.notice = Some(Notice::error(LOAD_FAILED));
            }
        }
        Ok(None)
    }

    /// Apply a typed value to one operation. Returns whether the value was
    /// taken.
    pub fn edit(&mut self, operation: &str, raw: &str) -> bool {
        let Some(slot) = self.times.get_mut(operation) else {
            self.field_errors.insert(operation.to_owned(), UNKNOWN_OPERATION.to_owned());
            return false;
        };
        match validate::operation_time(raw) {
            Ok(ms) => {
                *slot = ms;
                self.field_errors.remove(operation);
                true
            }
            Err(e) => {
                self.field_errors.insert(operation.to_owned(), e.to_string());
                false
            }
        }
    }

    pub async fn save(&mut self, api: &CalcApi) -> ViewResult {
        match api.update_operation_times(&self.times).await {
            Ok(()) => {
                tracing::debug!(count = self.times.len(), "operation times saved");
                self.notice = Some(Notice::success(SAVED));
            }
            Err(e) => {
                let e = unless_unauthorized(e)?;
                tracing::warn!(error = %e, "saving operation times failed");
                self.notice = Some(Notice::error(SAVE_FAILED));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
#[path = "operations_test.rs"]
mod tests;
