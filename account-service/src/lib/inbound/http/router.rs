use std::sync::Arc;
use std::time::Duration;

use auth::AppError;
use auth::Authenticator;
use auth::TransportGate;
use axum::body::Body;
use axum::http::header;
use axum::http::HeaderValue;
use axum::http::Method;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::generate_password::generate_password;
use super::handlers::login::login;
use super::handlers::logout::logout;
use super::handlers::me::me;
use super::handlers::public_key::public_key;
use super::handlers::refresh::refresh;
use super::handlers::register::register;
use super::handlers::ApiError;
use super::middleware::authenticate as auth_middleware;
use super::request_id::request_id;
use super::request_id::RequestId;
use crate::domain::authentication::ports::AuthServicePort;
use crate::domain::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthServicePort>,
    pub user_service: Arc<dyn UserServicePort>,
    pub authenticator: Arc<Authenticator>,
    pub transport: Arc<TransportGate>,
    /// Set the `Secure` flag on the refresh token cookie
    pub secure_cookies: bool,
}

/// Deployment-dependent router settings.
#[derive(Debug, Clone)]
pub struct HttpSettings {
    /// Production turns on secure cookies and hides the password helper.
    pub production: bool,
    pub cors_origin: String,
}

pub fn create_router(
    auth_service: Arc<dyn AuthServicePort>,
    user_service: Arc<dyn UserServicePort>,
    authenticator: Arc<Authenticator>,
    transport: Arc<TransportGate>,
    settings: HttpSettings,
) -> Result<Router, anyhow::Error> {
    let state = AppState {
        auth_service,
        user_service,
        authenticator,
        transport,
        secure_cookies: settings.production,
    };

    let mut public_routes = Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
        .route("/auth/public-key", get(public_key));

    if !settings.production {
        public_routes = public_routes.route("/auth/generate-password", post(generate_password));
    }

    let protected_routes = Router::new()
        .route("/auth/logout", post(logout))
        .route("/user/me", get(me))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            let request_id = request
                .extensions()
                .get::<RequestId>()
                .map(ToString::to_string)
                .unwrap_or_default();
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
                request_id = %request_id,
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

    let cors_layer = CorsLayer::new()
        .allow_origin(settings.cors_origin.parse::<HeaderValue>()?)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true);

    Ok(Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .fallback(not_found)
        .layer(trace_layer)
        .layer(middleware::from_fn(request_id))
        .layer(cors_layer)
        .with_state(state))
}

async fn not_found() -> ApiError {
    AppError::not_found("Route not found").into()
}
