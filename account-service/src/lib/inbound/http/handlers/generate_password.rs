use auth::AppError;
use auth::FieldError;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::ValidatedJson;
use crate::inbound::http::router::AppState;

/// Encrypt a plaintext password under the service's public key.
///
/// Lets clients and test tooling produce transport ciphertext without their
/// own RSA implementation. Not mounted in production.
pub async fn generate_password(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<GeneratePasswordRequest>,
) -> Result<ApiSuccess<String>, ApiError> {
    if body.password.is_empty() {
        return Err(AppError::validation(vec![FieldError::new(
            "password",
            "Password cannot be empty",
        )])
        .into());
    }

    let ciphertext = state.transport.encrypt_password(&body.password)?;

    Ok(ApiSuccess::new(StatusCode::OK, ciphertext))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GeneratePasswordRequest {
    password: String,
}
