//! Mapping from `AppError` to HTTP responses.
//!
//! Every error leaves the service as `{"error": "<message>"}`. Messages for
//! caller mistakes are returned verbatim; server-side failures get a fixed
//! message and the cause goes to the log.

use axum::{
    body::{self, Body},
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::api::dto::ErrorResponse;
use crate::error::AppError;

/// Largest plain-text error body carried over by `global_error_handler`.
const MAX_ERROR_BODY: usize = 4 * 1024;

/// Status code and public message for an error.
pub fn error_parts(error: &AppError) -> (StatusCode, String) {
    match error {
        AppError::InvalidInput { .. }
        | AppError::ValidationErrors { .. }
        | AppError::UniqueValue { .. } => (StatusCode::BAD_REQUEST, error.to_string()),
        AppError::IdNotFound { .. } | AppError::DeliveryNotFound => {
            (StatusCode::NOT_FOUND, error.to_string())
        }
        AppError::NotAuthenticated { .. } => (StatusCode::UNAUTHORIZED, error.to_string()),
        AppError::NotAuthorized { .. } | AppError::UserNotCompleted => {
            (StatusCode::FORBIDDEN, error.to_string())
        }
        AppError::Storage { .. } => internal("internal storage error"),
        AppError::TransactionBegin { .. } => internal("failed to begin transaction"),
        AppError::TransactionCommit { .. } => internal("failed to commit transaction"),
        AppError::ConnectionPool { .. } => internal("database connection unavailable"),
        AppError::Cache { .. } => internal("cache unavailable"),
        AppError::Configuration { key, .. } => internal(&format!("configuration error: {}", key)),
        AppError::Internal { .. } => internal("internal error"),
    }
}

fn internal(message: &str) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, message.to_string())
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = error_parts(&self);

        if status.is_server_error() {
            tracing::error!(error = %self, cause = ?self, "Request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "Request rejected");
        }

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

/// Rewrites error responses produced outside the handlers (unknown route,
/// wrong method, timeouts) into the JSON error shape.
pub async fn global_error_handler(request: Request, next: Next) -> Response {
    let response = next.run(request).await;
    let status = response.status();

    if !(status.is_client_error() || status.is_server_error()) || is_json(&response) {
        return response;
    }

    let (parts, body) = response.into_parts();
    let original = match body::to_bytes(body, MAX_ERROR_BODY).await {
        Ok(bytes) => String::from_utf8_lossy(&bytes).trim().to_string(),
        Err(_) => String::new(),
    };

    let message = if original.is_empty() || status.is_server_error() {
        status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_lowercase()
    } else {
        original
    };

    let mut rewritten = (status, Json(ErrorResponse::new(message))).into_response();
    for (name, value) in parts.headers.iter() {
        if name != header::CONTENT_TYPE && name != header::CONTENT_LENGTH {
            rewritten.headers_mut().insert(name.clone(), value.clone());
        }
    }
    rewritten
}

fn is_json(response: &Response<Body>) -> bool {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"))
}
