use auth::AppError;
use auth::FieldError;
use auth::TransportGate;
use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use super::refresh_token_cookie;
use super::ApiError;
use super::ApiSuccess;
use super::SessionResponseData;
use super::ValidatedJson;
use crate::domain::authentication::models::SignInCommand;
use crate::domain::authentication::ports::AuthServicePort;
use crate::domain::user::models::EmailAddress;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(body): ValidatedJson<LoginRequest>,
) -> Result<(CookieJar, ApiSuccess<SessionResponseData>), ApiError> {
    let command = body.try_into_command(&state.transport)?;
    let session = state.auth_service.sign_in(command).await?;

    let data = SessionResponseData::new(&session.user, &session.tokens);
    let jar = jar.add(refresh_token_cookie(
        session.tokens.refresh_token,
        state.secure_cookies,
    ));

    Ok((jar, ApiSuccess::new(StatusCode::OK, data)))
}

/// HTTP request body for signing in (raw JSON).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    email: String,
    password: String,
}

impl LoginRequest {
    fn try_into_command(self, transport: &TransportGate) -> Result<SignInCommand, AppError> {
        let mut details = Vec::new();

        let email = EmailAddress::new(self.email)
            .map_err(|e| details.push(FieldError::new("email", e.to_string())))
            .ok();
        if self.password.is_empty() {
            details.push(FieldError::new("password", "Password cannot be empty"));
        }

        match email {
            Some(email) if details.is_empty() => {
                let password = transport.decrypt_password(&self.password)?;
                Ok(SignInCommand::new(email, password))
            }
            _ => Err(AppError::validation(details)),
        }
    }
}
