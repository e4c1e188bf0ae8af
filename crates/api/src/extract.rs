//! Bearer-token authentication extractor.
//!
//! The single auth gate for all protected routes: a handler that takes a
//! [`CurrentCustomer`] argument only runs once the request carried a valid
//! `Authorization: Bearer <token>` header, and receives the verified claims.

use std::sync::Arc;

use auth::{AuthError, Claims};
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use store::Store;

use crate::AppState;
use crate::error::ApiError;

/// The authenticated customer identity for the current request.
#[derive(Debug, Clone)]
pub struct CurrentCustomer(pub Claims);

impl<S: Store + Clone + 'static> FromRequestParts<Arc<AppState<S>>> for CurrentCustomer {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState<S>>,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(AuthError::MissingToken)?
            .to_str()
            .map_err(|_| AuthError::MalformedHeader)?;

        let claims = state.tokens.verify(bearer_token(header)?)?;
        Ok(CurrentCustomer(claims))
    }
}

/// Extracts the token from a `Bearer <token>` header value.
fn bearer_token(header: &str) -> Result<&str, AuthError> {
    match header.split_once(' ') {
        Some(("Bearer", token)) if !token.is_empty() && !token.contains(' ') => Ok(token),
        _ => Err(AuthError::MalformedHeader),
    }
}
