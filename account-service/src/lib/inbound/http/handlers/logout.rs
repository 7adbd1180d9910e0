use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum_extra::extract::CookieJar;
use serde::Serialize;

use super::refresh_token_removal_cookie;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::authentication::ports::AuthServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn logout(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    jar: CookieJar,
) -> Result<(CookieJar, ApiSuccess<LogoutResponseData>), ApiError> {
    state.auth_service.logout(&user.public_id).await?;

    let jar = jar.remove(refresh_token_removal_cookie());

    Ok((
        jar,
        ApiSuccess::new(
            StatusCode::OK,
            LogoutResponseData {
                message: "Logged out successfully".to_string(),
            },
        ),
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogoutResponseData {
    pub message: String,
}
