//! Expression screens: submit a new expression, list all expressions.

use super::{Notice, ViewResult, unless_unauthorized};
use crate::api::CalcApi;
use crate::types::Expression;
use crate::validate;

pub const ADDED: &str = "Expression added successfully";
pub const ADD_FAILED: &str = "Error adding expression";
pub const LIST_FAILED: &str = "Error getting expressions";

// =============================================================================
// INPUT
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct InputExpressionView {
    pub expression: String,
    pub notice: Option<Notice>,
    /// Id assigned by the service to the last accepted expression.
    pub accepted_id: Option<i64>,
}

impl InputExpressionView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an edit to the input field. Input with disallowed characters is
    /// not taken; the previous value stays and an error notice is shown.
    pub fn on_change(&mut self, input: &str) {
        match validate::expression_chars(input) {
            Ok(()) => {
                input.clone_into(&mut self.expression);
                self.notice = None;
            }
            Err(e) => self.notice = Some(Notice::error(e.to_string())),
        }
    }

    #[must_use]
    pub fn has_validation_error(&self) -> bool {
        self.notice.as_ref().is_some_and(|n| n.message == validate::INVALID_EXPRESSION)
    }

    /// Send the current expression. Nothing is sent while the field shows a
    /// validation error or is empty.
    pub async fn submit(&mut self, api: &CalcApi) -> ViewResult {
        if self.has_validation_error() {
            return Ok(None);
        }
        if let Err(e) = validate::expression(&self.expression) {
            self.notice = Some(Notice::error(e.to_string()));
            return Ok(None);
        }

        match api.submit_expression(&self.expression).await {
            Ok(accepted) => {
                tracing::debug!(id = accepted.id, "expression accepted");
                self.accepted_id = Some(accepted.id);
                self.notice = Some(Notice::success(ADDED));
            }
            Err(e) => {
                let e = unless_unauthorized(e)?;
                tracing::warn!(error = %e, "submitting expression failed");
                self.notice = Some(Notice::error(ADD_FAILED));
            }
        }
        Ok(None)
    }
}

// =============================================================================
// LIST
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct ViewExpressionsView {
    pub expressions: Vec<Expression>,
    pub notice: Option<Notice>,
}

impl ViewExpressionsView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn load(&mut self, api: &CalcApi) -> ViewResult {
        match api.expressions().await {
            Ok(expressions) => {
                self.expressions = expressions;
                self.notice = None;
            }
            Err(e) => {
                let e = unless_unauthorized(e)?;
                tracing::warn!(error = %e, "loading expressions failed");
                self.notice = Some(Notice::error(LIST_FAILED));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
#[path = "expressions_test.rs"]
mod tests;
