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
use crate::domain::authentication::models::SignUpCommand;
use crate::domain::authentication::ports::AuthServicePort;
use crate::domain::user::models::AvatarUrl;
use crate::domain::user::models::DisplayName;
use crate::domain::user::models::EmailAddress;
use crate::inbound::http::router::AppState;

pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(body): ValidatedJson<RegisterRequest>,
) -> Result<(CookieJar, ApiSuccess<SessionResponseData>), ApiError> {
    let command = body.try_into_command(&state.transport)?;
    let session = state.auth_service.sign_up(command).await?;

    let data = SessionResponseData::new(&session.user, &session.tokens);
    let jar = jar.add(refresh_token_cookie(
        session.tokens.refresh_token,
        state.secure_cookies,
    ));

    Ok((jar, ApiSuccess::new(StatusCode::OK, data)))
}

/// HTTP request body for registering (raw JSON).
///
/// `password` is the base64 RSA-OAEP ciphertext of the plaintext password.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegisterRequest {
    name: String,
    email: String,
    password: String,
    avatar_url: Option<String>,
}

impl RegisterRequest {
    fn try_into_command(self, transport: &TransportGate) -> Result<SignUpCommand, AppError> {
        let mut details = Vec::new();

        let name = DisplayName::new(self.name)
            .map_err(|e| details.push(FieldError::new("name", e.to_string())))
            .ok();
        let email = EmailAddress::new(self.email)
            .map_err(|e| details.push(FieldError::new("email", e.to_string())))
            .ok();
        if self.password.is_empty() {
            details.push(FieldError::new("password", "Password cannot be empty"));
        }
        let avatar_url = AvatarUrl::parse_optional(self.avatar_url)
            .map_err(|e| details.push(FieldError::new("avatarUrl", e.to_string())))
            .ok();

        match (name, email, avatar_url) {
            (Some(name), Some(email), Some(avatar_url)) if details.is_empty() => {
                let password = transport.decrypt_password(&self.password)?;
                Ok(SignUpCommand::new(name, email, password, avatar_url))
            }
            _ => Err(AppError::validation(details)),
        }
    }
}
