//! Typed wrappers over the calculation service's REST endpoints.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::client::{ApiClient, ApiError};
use crate::types::{
    AccessToken, ComputingPowers, ComputingServer, Credentials, Expression, ExpressionAccepted, ExpressionList,
    NewExpression, OperationTimes, OperationTimesEnvelope, Pong, UpdateUserRequest, UserInfo,
};

pub const PING: &str = "/ping";
pub const COMPUTING_POWERS: &str = "/getComputingPowers";
pub const EXPRESSION: &str = "/expression";
pub const GET_OPERATIONS: &str = "/getOperationsAndTimes";
pub const POST_OPERATIONS: &str = "/postOperationsAndTimes";
pub const GET_USER: &str = "/getUser";
pub const LOGIN: &str = "/login";
pub const REGISTER: &str = "/register";
pub const UPDATE_USER: &str = "/updateUser";

#[derive(Debug, Clone)]
pub struct CalcApi {
    client: ApiClient,
}

impl CalcApi {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    #[must_use]
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// `GET /ping`: service liveness.
    pub async fn ping(&self) -> Result<Pong, ApiError> {
        self.get_json(PING).await
    }

    /// `GET /getComputingPowers`: worker nodes and the expressions they handled.
    pub async fn computing_powers(&self) -> Result<Vec<ComputingServer>, ApiError> {
        let powers: ComputingPowers = self.get_json(COMPUTING_POWERS).await?;
        Ok(powers.servers)
    }

    /// `GET /expression`: every expression visible to the current user.
    pub async fn expressions(&self) -> Result<Vec<Expression>, ApiError> {
        let list: ExpressionList = self.get_json(EXPRESSION).await?;
        Ok(list.expressions)
    }

    /// `POST /expression`: queue an expression for calculation.
    pub async fn submit_expression(&self, expression: &str) -> Result<ExpressionAccepted, ApiError> {
        let body = NewExpression { expression: expression.to_owned() };
        self.post_json(EXPRESSION, &body).await
    }

    /// `GET /getOperationsAndTimes`.
    pub async fn operation_times(&self) -> Result<OperationTimes, ApiError> {
        let envelope: OperationTimesEnvelope = self.get_json(GET_OPERATIONS).await?;
        Ok(envelope.data)
    }

    /// `POST /postOperationsAndTimes`: the body is the bare mapping.
    pub async fn update_operation_times(&self, times: &OperationTimes) -> Result<(), ApiError> {
        let body = to_body(POST_OPERATIONS, times)?;
        self.client.post(POST_OPERATIONS, &body).await?;
        Ok(())
    }

    /// `GET /getUser`.
    pub async fn current_user(&self) -> Result<UserInfo, ApiError> {
        self.get_json(GET_USER).await
    }

    /// `POST /login`. Does not touch the token store.
    pub async fn login(&self, credentials: &Credentials) -> Result<AccessToken, ApiError> {
        self.post_json(LOGIN, credentials).await
    }

    /// `POST /register`. Does not touch the token store.
    pub async fn register(&self, credentials: &Credentials) -> Result<AccessToken, ApiError> {
        self.post_json(REGISTER, credentials).await
    }

    /// `POST /updateUser`: returns a fresh token for the updated account.
    pub async fn update_user(&self, request: &UpdateUserRequest) -> Result<AccessToken, ApiError> {
        self.post_json(UPDATE_USER, request).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.client.get(path).await?.json(path)
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        let body = to_body(path, body)?;
        self.client.post(path, &body).await?.json(path)
    }
}

fn to_body<B: Serialize>(path: &str, body: &B) -> Result<Value, ApiError> {
    serde_json::to_value(body).map_err(|source| ApiError::Encode { path: path.to_owned(), source })
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
