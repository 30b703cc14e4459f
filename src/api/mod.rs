//! API dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! Matched request
//!     → path_param (required {id} segments; missing/empty ⇒ 400, stop)
//!     → decode_body (JSON body where the method carries one ⇒ 400, stop)
//!     → exactly one backend call
//!     → forward (verbatim passthrough on success,
//!                fixed diagnostic + server-side log on failure)
//! ```
//!
//! # Design Decisions
//! - Every resource handler follows the same contract; the helpers here
//!   are the single implementation of it
//! - Backend failures of any kind collapse to one client-error status
//!   with a fixed message; the cause is logged, never exposed
//! - Once a backend call starts, the response always comes from the
//!   forward step; error branches never reach the backend

pub mod manifest;
pub mod project;
pub mod user;
pub mod user_project;
pub mod wallet;

use std::future::Future;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::{FromRequestParts, RawPathParams};
use axum::http::request::Parts;
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::backend::BackendError;
use crate::routing::RouteHandler;

/// Diagnostic for an undecodable request body.
pub const MALFORMED_BODY: &str = "request body is not in json form or is malformed";
/// Diagnostic for a failed backend call.
pub const BACKEND_FAILURE: &str = "response error";
/// Diagnostic for a missing or empty `{id}` segment on user-scoped routes.
pub const MISSING_USER_ID: &str = "user id not specified";
/// Diagnostic for a missing or empty `{id}` segment on project routes.
pub const MISSING_PROJECT_ID: &str = "project id not specified";

/// Largest request body a dispatch handler will buffer.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// The JSON error envelope every client error carries.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: u16,
    pub message: String,
}

/// A client-facing error: HTTP status plus a human-readable message.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            status: self.status.as_u16(),
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

/// Wrap a fallible endpoint function into a [`RouteHandler`], turning its
/// error branch into the JSON envelope.
pub fn route_handler<F, Fut>(f: F) -> RouteHandler
where
    F: Fn(Request<Body>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Response, ApiError>> + Send + 'static,
{
    Arc::new(move |req| {
        let fut = f(req);
        Box::pin(async move { fut.await.unwrap_or_else(IntoResponse::into_response) })
    })
}

/// Required path parameter. Missing or empty yields a client error with
/// the resource's fixed message; the backend is never called.
pub async fn path_param(
    parts: &mut Parts,
    name: &str,
    missing: &'static str,
) -> Result<String, ApiError> {
    let params = RawPathParams::from_request_parts(parts, &())
        .await
        .map_err(|_| ApiError::bad_request(missing))?;
    params
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| ApiError::bad_request(missing))
}

/// Decode the JSON request body into the endpoint's request shape.
pub async fn decode_body<T: DeserializeOwned>(body: Body) -> Result<T, ApiError> {
    let bytes = axum::body::to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(|err| {
            tracing::error!(error = %err, "reading request body failed");
            ApiError::bad_request(MALFORMED_BODY)
        })?;
    serde_json::from_slice(&bytes).map_err(|err| {
        tracing::error!(error = %err, "request body decode failed");
        ApiError::bad_request(MALFORMED_BODY)
    })
}

/// Translate a backend result: verbatim JSON passthrough on success, the
/// fixed diagnostic on failure. The underlying cause is logged only.
pub fn forward<T: Serialize>(
    result: Result<T, BackendError>,
    failure: &'static str,
) -> Result<Response, ApiError> {
    match result {
        Ok(response) => Ok(Json(response).into_response()),
        Err(err) => {
            tracing::error!(error = %err, "backend call failed");
            Err(ApiError::bad_request(failure))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn path_param_missing_yields_fixed_message() {
        // A request that never went through the router has no captured
        // parameters at all.
        let request = Request::builder()
            .uri("/project")
            .body(Body::empty())
            .unwrap();
        let (mut parts, _body) = request.into_parts();

        let err = path_param(&mut parts, "id", MISSING_PROJECT_ID)
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, MISSING_PROJECT_ID);
    }

    #[test]
    fn id_diagnostics_have_fixed_text() {
        assert_eq!(MISSING_USER_ID, "user id not specified");
        assert_eq!(MISSING_PROJECT_ID, "project id not specified");
    }

    #[tokio::test]
    async fn decode_body_rejects_non_json() {
        let err = decode_body::<crate::backend::LoginUserRequest>(Body::from("not-json"))
            .await
            .unwrap_err();
        assert_eq!(err.message, MALFORMED_BODY);
    }

    #[tokio::test]
    async fn decode_body_rejects_type_mismatch() {
        let err = decode_body::<crate::backend::LoginUserRequest>(Body::from(
            r#"{"user_id": 42, "login_type": "nope"}"#,
        ))
        .await
        .unwrap_err();
        assert_eq!(err.message, MALFORMED_BODY);
    }

    #[test]
    fn forward_collapses_backend_errors() {
        let result: Result<crate::backend::UserResponse, _> =
            Err(BackendError::Status(StatusCode::SERVICE_UNAVAILABLE));
        let err = forward(result, BACKEND_FAILURE).unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, BACKEND_FAILURE);
    }
}
