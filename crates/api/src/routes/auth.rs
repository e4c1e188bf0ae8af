//! Registration and login endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use store::{NewCustomer, Store};

use crate::AppState;
use crate::error::ApiError;

// -- Request types --

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub fullname: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

// -- Response types --

#[derive(Serialize)]
pub struct RegisterResponse {
    pub message: &'static str,
}

#[derive(Serialize)]
pub struct TokenResponse {
    pub token: String,
}

// -- Handlers --

/// POST /auth/register — create a customer account.
#[tracing::instrument(skip(state, req), fields(username = %req.username))]
pub async fn register<S: Store + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>, ApiError> {
    if req.username.trim().is_empty() || req.password.is_empty() {
        return Err(ApiError::Validation(
            "Username and password are required".to_string(),
        ));
    }

    let password_hash = auth::password::hash(&req.password)?;

    state
        .store
        .create_customer(NewCustomer {
            username: req.username,
            password_hash,
            fullname: req.fullname,
            address: req.address,
            phone: req.phone,
            email: req.email,
        })
        .await?;

    metrics::counter!("customers_registered_total").increment(1);

    Ok(Json(RegisterResponse {
        message: "Register success",
    }))
}

/// POST /auth/login — verify credentials and issue a signed token.
#[tracing::instrument(skip(state, req), fields(username = %req.username))]
pub async fn login<S: Store + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let customer = state
        .store
        .customer_by_username(&req.username)
        .await?
        .ok_or_else(|| ApiError::NotFound("Username not found".to_string()))?;

    if !auth::password::verify(&req.password, &customer.password_hash) {
        return Err(ApiError::Validation("Password incorrect".to_string()));
    }

    let token = state.tokens.issue(customer.customer_id, &customer.fullname)?;

    metrics::counter!("logins_total").increment(1);

    Ok(Json(TokenResponse { token }))
}
