//! Client-side input rules, checked before any request is sent.

use crate::types::UpdateUserRequest;

pub const INVALID_EXPRESSION: &str = "Invalid input. Only numbers and +, /, -, *, ), ( are allowed.";
pub const EMPTY_EXPRESSION: &str = "Enter an expression";
pub const INVALID_OPERATION_TIME: &str = "Invalid input. Only numbers are allowed.";
pub const MISSING_OLD_PASSWORD: &str = "Enter current password";
pub const PASSWORD_MISMATCH: &str = "New Passwords do not match";
pub const NO_CHANGES: &str = "No changes";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{}", INVALID_EXPRESSION)]
    ExpressionCharacters,
    #[error("{}", EMPTY_EXPRESSION)]
    EmptyExpression,
    #[error("{}", INVALID_OPERATION_TIME)]
    OperationTime,
    #[error("{}", MISSING_OLD_PASSWORD)]
    MissingOldPassword,
    #[error("{}", PASSWORD_MISMATCH)]
    PasswordMismatch,
    #[error("{}", NO_CHANGES)]
    NoChanges,
}

fn is_expression_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '+' | '-' | '*' | '/' | '(' | ')' | ' ')
}

/// Character check applied while the expression is being typed.
/// An empty string is allowed here; emptiness is a submit-time error.
pub fn expression_chars(input: &str) -> Result<(), ValidationError> {
    if input.chars().all(is_expression_char) {
        Ok(())
    } else {
        Err(ValidationError::ExpressionCharacters)
    }
}

/// Full check applied on submit.
pub fn expression(input: &str) -> Result<(), ValidationError> {
    expression_chars(input)?;
    if input.trim().is_empty() {
        return Err(ValidationError::EmptyExpression);
    }
    Ok(())
}

/// Parse an operation execution time in milliseconds.
pub fn operation_time(input: &str) -> Result<u64, ValidationError> {
    if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::OperationTime);
    }
    // The service stores times as signed 64-bit integers.
    let ms: i64 = input.parse().map_err(|_| ValidationError::OperationTime)?;
    Ok(ms.unsigned_abs())
}

/// Raw profile form fields as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileForm {
    pub old_password: String,
    pub login: String,
    pub new_password: String,
    pub confirm_password: String,
}

/// Turn the profile form into an update request.
pub fn profile_update(form: &ProfileForm) -> Result<UpdateUserRequest, ValidationError> {
    if form.old_password.is_empty() {
        return Err(ValidationError::MissingOldPassword);
    }
    let password = if form.new_password.is_empty() && form.confirm_password.is_empty() {
        None
    } else if form.new_password == form.confirm_password {
        Some(form.new_password.clone())
    } else {
        return Err(ValidationError::PasswordMismatch);
    };
    let login = Some(form.login.clone()).filter(|login| !login.is_empty());
    if password.is_none() && login.is_none() {
        return Err(ValidationError::NoChanges);
    }
    Ok(UpdateUserRequest { old_password: form.old_password.clone(), login, password })
}

#[cfg(test)]
#[path = "validate_test.rs"]
mod tests;
