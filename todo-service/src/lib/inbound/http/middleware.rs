use std::sync::Arc;

use auth::AuthorizationGate;
use axum::extract::Request;
use axum::extract::State;
use axum::middleware::Next;
use axum::response::Response;
use chrono::Utc;

use super::handlers::ApiError;
use crate::account::models::AccountId;

/// Extension type to store the authenticated owner in request extensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedOwner {
    pub owner_id: AccountId,
}

/// Middleware that runs the authorization gate and adds the owner to request extensions
///
/// Every rejection, whatever its cause, is the same 401 response.
pub async fn authenticate(
    State(gate): State<Arc<AuthorizationGate>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let credential = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let owner_id = gate.authenticate(credential, Utc::now()).map_err(|e| {
        tracing::debug!(uri = %req.uri(), "Request rejected by authorization gate");
        ApiError::from(e)
    })?;

    req.extensions_mut().insert(AuthenticatedOwner {
        owner_id: AccountId(owner_id),
    });

    Ok(next.run(req).await)
}
