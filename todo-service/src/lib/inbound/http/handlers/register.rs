use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use crate::account::errors::PasswordInputError;
use crate::account::errors::UsernameError;
use crate::account::models::Account;
use crate::account::models::CredentialsCommand;
use crate::account::models::PlainPassword;
use crate::account::models::Username;
use crate::account::ports::AccountServicePort;
use crate::inbound::http::router::AppState;
use crate::task::ports::TaskServicePort;

pub async fn register<AS, TS>(
    State(state): State<AppState<AS, TS>>,
    Json(body): Json<RegisterRequest>,
) -> Result<ApiSuccess<RegisterResponseData>, ApiError>
where
    AS: AccountServicePort,
    TS: TaskServicePort,
{
    state
        .account_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref account| ApiSuccess::new(StatusCode::CREATED, account.into()))
}

/// HTTP request body for registering an account (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequest {
    username: String,
    password: String,
}

#[derive(Debug, Clone, Error)]
enum ParseRegisterRequestError {
    #[error("Invalid username: {0}")]
    Username(#[from] UsernameError),

    #[error("Invalid password: {0}")]
    Password(#[from] PasswordInputError),
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<CredentialsCommand, ParseRegisterRequestError> {
        let username = Username::new(self.username)?;
        let password = PlainPassword::new(self.password)?;
        Ok(CredentialsCommand::new(username, password))
    }
}

impl From<ParseRegisterRequestError> for ApiError {
    fn from(err: ParseRegisterRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}

/// Public account summary; the password hash is never part of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterResponseData {
    pub id: i64,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Account> for RegisterResponseData {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.as_i64(),
            username: account.username.as_str().to_string(),
            created_at: account.created_at,
        }
    }
}
