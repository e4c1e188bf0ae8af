//! API error types with HTTP response mapping.

use auth::AuthError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use store::StoreError;

/// API-level error type that maps to HTTP responses.
///
/// Every error is translated to a status code plus a JSON `{"message"}`
/// body at the route boundary; nothing propagates past it.
#[derive(Debug)]
pub enum ApiError {
    /// Authentication failure.
    Auth(AuthError),
    /// Bad request from the client.
    Validation(String),
    /// A referenced record does not exist. Surfaces as a client error, per
    /// the interface contract.
    NotFound(String),
    /// Store failure.
    Store(StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Auth(err) => auth_error_to_response(err),
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Store(err) => store_error_to_response(err),
        };

        let body = serde_json::json!({ "message": message });
        (status, axum::Json(body)).into_response()
    }
}

fn auth_error_to_response(err: AuthError) -> (StatusCode, String) {
    match &err {
        AuthError::Signing(_) | AuthError::Hash(_) => {
            tracing::error!(error = %err, "internal auth error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
        }
        _ => (StatusCode::UNAUTHORIZED, err.to_string()),
    }
}

fn store_error_to_response(err: StoreError) -> (StatusCode, String) {
    match &err {
        StoreError::MenuNotFound(_) => (StatusCode::BAD_REQUEST, "Menu not found".to_string()),
        StoreError::RestaurantNotFound(_) => {
            (StatusCode::BAD_REQUEST, "Restaurant not found".to_string())
        }
        StoreError::CustomerNotFound(_) => {
            (StatusCode::BAD_REQUEST, "Customer not found".to_string())
        }
        StoreError::UsernameTaken(_) => {
            (StatusCode::BAD_REQUEST, "Username already taken".to_string())
        }
        // Internal detail stays in the log, never in the response body.
        StoreError::Database(_) | StoreError::Migration(_) => {
            tracing::error!(error = %err, "database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Database error".to_string(),
            )
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        ApiError::Auth(err)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Store(err)
    }
}
