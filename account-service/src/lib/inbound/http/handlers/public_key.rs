use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn public_key(State(state): State<AppState>) -> ApiSuccess<PublicKeyResponseData> {
    ApiSuccess::new(
        StatusCode::OK,
        PublicKeyResponseData {
            public_key: state.transport.public_key_pem().to_string(),
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicKeyResponseData {
    pub public_key: String,
}
