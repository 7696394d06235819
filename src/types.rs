//! Wire types for the calculation service's JSON endpoints.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The service encodes empty lists and maps as `null`.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// =============================================================================
// EXPRESSIONS
// =============================================================================

/// Calculation status as reported in the `ready` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpressionStatus {
    #[default]
    NotReady,
    Working,
    Ready,
    Error,
    Unknown(i64),
}

impl ExpressionStatus {
    #[must_use]
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => Self::NotReady,
            1 => Self::Working,
            2 => Self::Ready,
            3 => Self::Error,
            other => Self::Unknown(other),
        }
    }

    #[must_use]
    pub fn code(self) -> i64 {
        match self {
            Self::NotReady => 0,
            Self::Working => 1,
            Self::Ready => 2,
            Self::Error => 3,
            Self::Unknown(code) => code,
        }
    }
}

impl fmt::Display for ExpressionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotReady => f.write_str("not ready"),
            Self::Working => f.write_str("working"),
            Self::Ready => f.write_str("ready"),
            Self::Error => f.write_str("error"),
            Self::Unknown(code) => write!(f, "unknown ({code})"),
        }
    }
}

impl Serialize for ExpressionStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.code())
    }
}

impl<'de> Deserialize<'de> for ExpressionStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        i64::deserialize(deserializer).map(Self::from_code)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expression {
    pub id: i64,
    pub value: String,
    #[serde(default)]
    pub answer: f64,
    #[serde(default)]
    pub logs: String,
    #[serde(default)]
    pub ready: ExpressionStatus,
    #[serde(default)]
    pub creation_time: String,
    #[serde(default)]
    pub end_calculation_time: String,
    #[serde(default)]
    pub server_name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExpressionList {
    #[serde(default, deserialize_with = "null_as_default")]
    pub expressions: Vec<Expression>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewExpression {
    pub expression: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExpressionAccepted {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub message: String,
}

// =============================================================================
// COMPUTING POWERS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputingServer {
    pub server_name: String,
    #[serde(default)]
    pub server_status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub calculated_expressions: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ComputingPowers {
    #[serde(default, deserialize_with = "null_as_default")]
    pub servers: Vec<ComputingServer>,
}

// =============================================================================
// OPERATIONS
// =============================================================================

/// Operation symbol (`+`, `-`, `*`, `/`) to execution time in milliseconds.
pub type OperationTimes = BTreeMap<String, u64>;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OperationTimesEnvelope {
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: OperationTimes,
}

// =============================================================================
// USERS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub login: String,
    pub password: String,
}

#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct AccessToken {
    pub access: String,
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken").field("access", &"<redacted>").finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserInfo {
    pub login: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateUserRequest {
    pub old_password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Pong {
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
