use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::account::errors::AccountError;
use crate::account::errors::UsernameError;
use crate::account::models::CredentialsCommand;
use crate::account::models::PlainPassword;
use crate::account::models::Username;
use crate::account::ports::AccountServicePort;
use crate::inbound::http::router::AppState;
use crate::task::ports::TaskServicePort;

pub async fn login<AS, TS>(
    State(state): State<AppState<AS, TS>>,
    Json(body): Json<LoginRequest>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError>
where
    AS: AccountServicePort,
    TS: TaskServicePort,
{
    let command = body.try_into_command()?;

    state
        .account_service
        .login(command)
        .await
        .map_err(ApiError::from)
        .map(|token| ApiSuccess::new(StatusCode::OK, LoginResponseData { token }))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    username: String,
    password: String,
}

impl LoginRequest {
    /// Missing fields are a validation error; a username no account could
    /// hold is just a failed login.
    fn try_into_command(self) -> Result<CredentialsCommand, ApiError> {
        let username = Username::new(self.username).map_err(|e| match e {
            UsernameError::Empty => ApiError::from(AccountError::InvalidUsername(e)),
            UsernameError::TooLong { .. } => ApiError::from(AccountError::InvalidCredentials),
        })?;
        let password = PlainPassword::new(self.password).map_err(AccountError::from)?;
        Ok(CredentialsCommand::new(username, password))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub token: String,
}
