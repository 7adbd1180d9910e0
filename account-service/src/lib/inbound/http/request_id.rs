//! Per-request correlation identifier.
//!
//! The [`request_id`] middleware generates a [`RequestId`] for every inbound
//! request and keeps it in task-local storage while the rest of the stack
//! runs, so response envelopes can read it without parameter threading.
//! Task-locals are not inherited by spawned tasks; wrap such work in
//! [`RequestId::scope`].

use std::fmt;
use std::future::Future;

use axum::extract::Request;
use axum::http::HeaderName;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use tokio::task_local;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

task_local! {
    static REQUEST_ID: RequestId;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestId(Uuid);

impl RequestId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// The identifier of the request being served, if any.
    pub fn current() -> Option<Self> {
        REQUEST_ID.try_with(|id| *id).ok()
    }

    /// The current identifier, or a fresh one outside a request scope.
    pub fn current_or_generate() -> Self {
        Self::current().unwrap_or_else(Self::generate)
    }

    /// Run `fut` with `request_id` in scope.
    pub async fn scope<Fut>(request_id: RequestId, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        REQUEST_ID.scope(request_id, fut).await
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Middleware that scopes a fresh request id around the inner service and
/// echoes it in the `x-request-id` response header.
pub async fn request_id(mut req: Request, next: Next) -> Response {
    let request_id = RequestId::generate();
    req.extensions_mut().insert(request_id);

    let mut response = RequestId::scope(request_id, next.run(req)).await;

    if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
    }
    response
}
