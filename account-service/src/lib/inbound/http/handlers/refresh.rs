use auth::AppError;
use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::CookieJar;
use serde::Serialize;

use super::refresh_token_cookie;
use super::ApiError;
use super::ApiSuccess;
use super::REFRESH_TOKEN_COOKIE;
use crate::domain::authentication::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, ApiSuccess<RefreshResponseData>), ApiError> {
    let refresh_token = jar
        .get(REFRESH_TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .ok_or_else(AppError::invalid_token)?;

    let tokens = state.auth_service.refresh_token(&refresh_token).await?;

    let data = RefreshResponseData {
        access_token: tokens.access_token,
    };
    let jar = jar.add(refresh_token_cookie(
        tokens.refresh_token,
        state.secure_cookies,
    ));

    Ok((jar, ApiSuccess::new(StatusCode::OK, data)))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponseData {
    pub access_token: String,
}
