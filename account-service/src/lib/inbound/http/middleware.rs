use auth::error::INVALID_AUTHENTICATION;
use auth::extract_bearer_token;
use auth::AppError;
use axum::extract::Request;
use axum::extract::State;
use axum::http;
use axum::middleware::Next;
use axum::response::Response;

use super::handlers::ApiError;
use crate::domain::user::models::PublicId;
use crate::inbound::http::router::AppState;

/// Extension type to store the authenticated principal in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub public_id: PublicId,
    pub email: String,
}

/// Middleware that validates the bearer access token and adds the principal
/// to request extensions.
///
/// Expired tokens are reported as `TOKEN_EXPIRED` so clients know to refresh;
/// every other failure is `UNAUTHENTICATED`.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = authenticated_user(&state, &req)?;

    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

fn authenticated_user(state: &AppState, req: &Request) -> Result<AuthenticatedUser, AppError> {
    let header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| AppError::authentication("Authorization token is missing"))?;

    let header = header
        .to_str()
        .map_err(|_| AppError::authentication(INVALID_AUTHENTICATION))?;

    let token = extract_bearer_token(Some(header))?;

    let claims = state
        .authenticator
        .tokens()
        .verify_access_token(token)
        .inspect_err(|e| tracing::warn!(reason = e.kind().name(), "Access token rejected"))?;

    let public_id = PublicId::from_string(claims.id())
        .map_err(|_| AppError::authentication(INVALID_AUTHENTICATION))?;

    Ok(AuthenticatedUser {
        public_id,
        email: claims.email().to_string(),
    })
}
