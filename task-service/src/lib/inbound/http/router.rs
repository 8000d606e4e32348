use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_task::create_task;
use super::handlers::delete_task::delete_task;
use super::handlers::get_task::get_task;
use super::handlers::health::health;
use super::handlers::list_tasks::list_tasks;
use super::handlers::login::login;
use super::handlers::register::register;
use super::handlers::update_task::update_task;
use super::middleware::authenticate as auth_middleware;
use crate::domain::account::ports::AccountServicePort;
use crate::domain::task::ports::TaskServicePort;

#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<dyn AccountServicePort>,
    pub task_service: Arc<dyn TaskServicePort>,
    pub authenticator: Arc<Authenticator>,
}

/// Build the HTTP application.
///
/// `/health`, `/register` and `/login` are public; every `/tasks` route sits
/// behind the authentication gate.
pub fn create_router(
    account_service: Arc<dyn AccountServicePort>,
    task_service: Arc<dyn TaskServicePort>,
    authenticator: Arc<Authenticator>,
) -> Router {
    let state = AppState {
        account_service,
        task_service,
        authenticator,
    };

    let public_routes = Router::new()
        .route("/health", get(health))
        .route("/register", post(register))
        .route("/login", post(login));

    let protected_routes = Router::new()
        .route("/tasks", get(list_tasks).post(create_task))
        .route(
            "/tasks/:id",
            get(get_task).put(update_task).delete(delete_task),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Headers are left out of the span: they carry bearer tokens.
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
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
