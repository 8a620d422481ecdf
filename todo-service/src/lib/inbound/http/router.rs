use std::any::Any;
use std::sync::Arc;
use std::time::Duration;

use auth::AuthorizationGate;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_task::create_task;
use super::handlers::delete_task::delete_task;
use super::handlers::get_task::get_task;
use super::handlers::list_tasks::list_tasks;
use super::handlers::login::login;
use super::handlers::register::register;
use super::handlers::update_task::update_task;
use super::handlers::ApiError;
use super::middleware::authenticate as auth_middleware;
use crate::account::ports::AccountServicePort;
use crate::task::ports::TaskServicePort;

/// Shared handler state, generic over the service implementations.
pub struct AppState<AS, TS>
where
    AS: AccountServicePort,
    TS: TaskServicePort,
{
    pub account_service: Arc<AS>,
    pub task_service: Arc<TS>,
}

impl<AS, TS> Clone for AppState<AS, TS>
where
    AS: AccountServicePort,
    TS: TaskServicePort,
{
    fn clone(&self) -> Self {
        Self {
            account_service: Arc::clone(&self.account_service),
            task_service: Arc::clone(&self.task_service),
        }
    }
}

pub fn create_router<AS, TS>(
    account_service: Arc<AS>,
    task_service: Arc<TS>,
    gate: Arc<AuthorizationGate>,
) -> Router
where
    AS: AccountServicePort,
    TS: TaskServicePort,
{
    let state = AppState {
        account_service,
        task_service,
    };

    let public_routes = Router::new()
        .route("/api/v1/auth/register", post(register::<AS, TS>))
        .route("/api/v1/auth/login", post(login::<AS, TS>));

    let protected_routes = Router::new()
        .route(
            "/api/v1/todos",
            get(list_tasks::<AS, TS>).post(create_task::<AS, TS>),
        )
        .route(
            "/api/v1/todos/:id",
            get(get_task::<AS, TS>)
                .put(update_task::<AS, TS>)
                .delete(delete_task::<AS, TS>),
        )
        .route_layer(middleware::from_fn_with_state(gate, auth_middleware));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    ApiError::InternalServerError(format!("Handler panicked: {}", detail)).into_response()
}
