use auth::parse_validation_error;
use auth::tokens::REFRESH_TOKEN_TTL_SECS;
use auth::AppError;
use auth::ErrorCode;
use auth::TokenPair;
use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::cookie::SameSite;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;
use serde_json::json;
use serde_json::Value;

use super::request_id::RequestId;
use crate::domain::user::models::User;

pub mod generate_password;
pub mod login;
pub mod logout;
pub mod me;
pub mod public_key;
pub mod refresh;
pub mod register;

/// Name of the cookie carrying the refresh token.
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";

/// Cookie delivering a freshly issued refresh token.
pub fn refresh_token_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((REFRESH_TOKEN_COOKIE, token))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Strict)
        .max_age(time::Duration::seconds(REFRESH_TOKEN_TTL_SECS))
        .path("/")
        .build()
}

/// Cookie matching [`refresh_token_cookie`] for removal from a jar.
pub fn refresh_token_removal_cookie() -> Cookie<'static> {
    Cookie::build(REFRESH_TOKEN_COOKIE).path("/").build()
}

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    /// Wrap `data` in the success envelope of the current request.
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(
            status,
            Json(ApiResponseBody::new(data, RequestId::current_or_generate())),
        )
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// Failure leaving the HTTP boundary.
///
/// Every handler and middleware error funnels through here, so the status,
/// machine code and public message always come from the error's kind.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError(AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let report = json!({
            "errors": [{ "message": rejection.body_text() }]
        });
        Self(parse_validation_error(&report.to_string()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status = err.status();

        if status.is_server_error() {
            tracing::error!(code = err.code().as_str(), error = %err, "Request failed");
        } else {
            tracing::debug!(code = err.code().as_str(), error = %err, "Request rejected");
        }

        let body = ApiErrorBody::new(&err, RequestId::current_or_generate());
        (status, Json(body)).into_response()
    }
}

/// Success envelope: `{data, requestId}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    data: T,
    request_id: String,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(data: T, request_id: RequestId) -> Self {
        Self {
            data,
            request_id: request_id.to_string(),
        }
    }
}

/// Error envelope: `{error: {code, message, details, requestId}}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiErrorBody {
    pub error: ApiErrorData,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorData {
    pub code: ErrorCode,
    pub message: String,
    pub details: Option<Value>,
    pub request_id: String,
}

impl ApiErrorBody {
    pub fn new(err: &AppError, request_id: RequestId) -> Self {
        Self {
            error: ApiErrorData {
                code: err.code(),
                message: err.public_message(),
                details: err.details(),
                request_id: request_id.to_string(),
            },
        }
    }
}

/// JSON body extractor whose rejections become validation errors.
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct ValidatedJson<T>(pub T);

/// Public view of a user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    pub id: String,
    pub email: String,
    pub name: String,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.public_id.to_string(),
            email: user.email.as_str().to_string(),
            name: user.name.as_str().to_string(),
            avatar_url: user.avatar_url.as_ref().map(|url| url.as_str().to_string()),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Payload returned by register and login.
///
/// The refresh token is not part of it; it travels only in the cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponseData {
    pub user: UserData,
    pub access_token: String,
}

impl SessionResponseData {
    pub fn new(user: &User, tokens: &TokenPair) -> Self {
        Self {
            user: user.into(),
            access_token: tokens.access_token.clone(),
        }
    }
}
