//! Health check endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use chrono::{DateTime, Utc};
use serde::Serialize;
use store::Store;

use crate::AppState;
use crate::error::ApiError;

#[derive(Serialize)]
pub struct PingResponse {
    pub status: &'static str,
    pub time: DateTime<Utc>,
}

/// GET /ping — round-trips the database and reports its clock.
pub async fn ping<S: Store + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<PingResponse>, ApiError> {
    let time = state.store.ping().await?;
    Ok(Json(PingResponse { status: "ok", time }))
}
